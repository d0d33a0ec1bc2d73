// File: crates/silplot-core/src/lib.rs
// Summary: Core library entry point; exports table loading, figure configuration and rendering.

pub mod error;
pub mod table;
pub mod scale;
pub mod axis;
pub mod series;
pub mod geometry;
pub mod grid;
pub mod types;
pub mod theme;
pub mod text;
pub mod canvas;
pub mod figure;
pub mod presets;

pub use error::{Error, Result};
pub use table::{Cell, Table};
pub use scale::{Scale, ScaleTransform, ValidatedScale};
pub use axis::Axis;
pub use series::{LineSeries, LineStyle, Marker};
pub use geometry::FigureRect;
pub use theme::Theme;
pub use text::TextShaper;
pub use canvas::{Axes, Canvas};
pub use figure::{FigureConfig, LabelFn};
pub use presets::Preset;
