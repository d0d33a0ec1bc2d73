// File: crates/silplot-core/src/series.rs
// Summary: Line series model (points, legend label, marker and stroke style).

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    None,
    Square,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineSeries {
    pub points: Vec<(f64, f64)>,
    pub label: Option<String>,
    pub marker: Marker,
    pub style: LineStyle,
}

impl LineSeries {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points, label: None, marker: Marker::None, style: LineStyle::Solid }
    }

    /// Square markers joined by a dashed line.
    pub fn square_dashed(points: Vec<(f64, f64)>) -> Self {
        Self { points, label: None, marker: Marker::Square, style: LineStyle::Dashed }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.0)
    }

    pub fn ys(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.1)
    }
}
