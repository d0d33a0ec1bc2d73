// File: crates/silplot-core/src/types.rs
// Summary: Shared constants (figure size, stroke widths, font sizes).

/// Default figure width in pixels.
pub const WIDTH: i32 = 640;
/// Default figure height in pixels.
pub const HEIGHT: i32 = 480;

/// Series stroke width in pixels.
pub const LINE_WIDTH: f32 = 1.5;
/// Dash pattern for dashed series: on, off.
pub const DASH: [f32; 2] = [5.5, 2.4];
/// Square marker edge length in pixels.
pub const MARKER_SIZE: f32 = 6.0;

/// Tick label font size.
pub const TICK_FONT_SIZE: f32 = 10.0;
/// Legend entry font size.
pub const LEGEND_FONT_SIZE: f32 = 10.0;
/// Tick mark length in pixels.
pub const TICK_LEN: f32 = 3.5;
