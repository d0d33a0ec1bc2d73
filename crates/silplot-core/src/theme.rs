// File: crates/silplot-core/src/theme.rs
// Summary: Light/Dark theming for figure rendering colors and the series color cycle.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub axes_face: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub legend_face: skia::Color,
    pub legend_frame: skia::Color,
    pub cycle: [skia::Color; 10],
}

// Category10 palette
const TAB10: [skia::Color; 10] = [
    skia::Color::new(0xff1f77b4),
    skia::Color::new(0xffff7f0e),
    skia::Color::new(0xff2ca02c),
    skia::Color::new(0xffd62728),
    skia::Color::new(0xff9467bd),
    skia::Color::new(0xff8c564b),
    skia::Color::new(0xffe377c2),
    skia::Color::new(0xff7f7f7f),
    skia::Color::new(0xffbcbd22),
    skia::Color::new(0xff17becf),
];

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::WHITE,
            axes_face: skia::Color::WHITE,
            axis_line: skia::Color::BLACK,
            axis_label: skia::Color::BLACK,
            tick: skia::Color::BLACK,
            legend_face: skia::Color::from_argb(204, 255, 255, 255),
            legend_frame: skia::Color::from_argb(255, 204, 204, 204),
            cycle: TAB10,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            axes_face: skia::Color::from_argb(255, 24, 24, 28),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            legend_face: skia::Color::from_argb(204, 30, 30, 34),
            legend_frame: skia::Color::from_argb(255, 90, 90, 100),
            cycle: TAB10,
        }
    }

    /// Color of the `index`-th series, cycling.
    pub fn series_color(&self, index: usize) -> skia::Color {
        self.cycle[index % self.cycle.len()]
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    [Theme::light(), Theme::dark()]
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_default()
}
