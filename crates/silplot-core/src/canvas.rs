// File: crates/silplot-core/src/canvas.rs
// Summary: Retained figure canvas (axes, line series, legend) and its headless Skia raster pipeline.

use std::io::Cursor;
use std::path::Path;

use skia_safe as skia;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::geometry::FigureRect;
use crate::grid::{format_tick, ticks};
use crate::scale::{Scale, ScaleTransform};
use crate::series::{LineSeries, LineStyle, Marker};
use crate::text::{plain_label, TextShaper};
use crate::theme::Theme;
use crate::types::{DASH, HEIGHT, LEGEND_FONT_SIZE, LINE_WIDTH, MARKER_SIZE, TICK_FONT_SIZE, TICK_LEN, WIDTH};
use crate::Axis;

/// One plot area: axis setup plus the series drawn into it.
#[derive(Clone, Debug)]
pub struct Axes {
    pub rect: FigureRect,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub title: String,
    pub label_size: u32,
    pub title_size: u32,
    series: Vec<LineSeries>,
    legend: bool,
}

impl Axes {
    pub fn new(rect: FigureRect) -> Self {
        Self {
            rect,
            x_axis: Axis::default(),
            y_axis: Axis::default(),
            title: String::new(),
            label_size: 10,
            title_size: 12,
            series: Vec::new(),
            legend: false,
        }
    }

    pub fn set_xlabel(&mut self, label: &str, size: u32) {
        self.x_axis.label = label.to_string();
        self.label_size = size;
    }

    pub fn set_ylabel(&mut self, label: &str, size: u32) {
        self.y_axis.label = label.to_string();
        self.label_size = size;
    }

    pub fn set_xscale(&mut self, kind: Scale) {
        self.x_axis.kind = kind;
        self.autoscale();
    }

    pub fn set_yscale(&mut self, kind: Scale) {
        self.y_axis.kind = kind;
        self.autoscale();
    }

    pub fn set_title(&mut self, title: &str, size: u32) {
        self.title = title.to_string();
        self.title_size = size;
    }

    /// Add a series and refit both axes. Returns the series index, which
    /// also selects its color from the theme cycle.
    pub fn plot(&mut self, series: LineSeries) -> usize {
        self.series.push(series);
        self.autoscale();
        self.series.len() - 1
    }

    pub fn series(&self) -> &[LineSeries] { &self.series }

    pub fn legend(&mut self) { self.legend = true; }

    pub fn has_legend(&self) -> bool { self.legend }

    /// Legend entries in draw order; empty until `legend` is called.
    pub fn legend_labels(&self) -> Vec<&str> {
        if !self.legend {
            return Vec::new();
        }
        self.series.iter().filter_map(|s| s.label.as_deref()).collect()
    }

    fn autoscale(&mut self) {
        let xs = self.series.iter().flat_map(LineSeries::xs).collect::<Vec<_>>();
        let ys = self.series.iter().flat_map(LineSeries::ys).collect::<Vec<_>>();
        self.x_axis.autoscale(xs);
        self.y_axis.autoscale(ys);
    }
}

/// Figure-level drawing surface. Holds at most one `Axes`; `clear` drops
/// it together with everything drawn into it.
#[derive(Clone, Debug)]
pub struct Canvas {
    pub width: i32,
    pub height: i32,
    pub theme: Theme,
    axes: Option<Axes>,
}

impl Canvas {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height, theme: Theme::default(), axes: None }
    }

    pub fn clear(&mut self) {
        self.axes = None;
    }

    /// Replace any existing axes with fresh ones at `rect`.
    pub fn add_axes(&mut self, rect: FigureRect) -> &mut Axes {
        self.axes.insert(Axes::new(rect))
    }

    pub fn axes(&self) -> Option<&Axes> { self.axes.as_ref() }

    pub fn axes_mut(&mut self) -> Option<&mut Axes> { self.axes.as_mut() }

    /// Series of the current axes (empty when cleared).
    pub fn series(&self) -> &[LineSeries] {
        self.axes.as_ref().map(Axes::series).unwrap_or_default()
    }

    /// Render at the canvas size; RGBA8 unpremultiplied, tightly packed.
    pub fn render_to_rgba8(&self) -> Result<Vec<u8>> {
        self.render_rgba8_sized(self.width, self.height)
    }

    /// Render at an arbitrary pixel size (axes placement is fractional).
    pub fn render_rgba8_sized(&self, width: i32, height: i32) -> Result<Vec<u8>> {
        let mut surface = skia::surfaces::raster_n32_premul((width, height))
            .ok_or_else(|| Error::Render(format!("failed to create {width}x{height} raster surface")))?;
        let shaper = TextShaper::new();
        self.draw(surface.canvas(), width, height, &shaper);

        let info = skia::ImageInfo::new(
            (width, height),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let row_bytes = width as usize * 4;
        let mut pixels = vec![0u8; row_bytes * height as usize];
        if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
            return Err(Error::Render("read_pixels failed".into()));
        }
        Ok(pixels)
    }

    fn to_image(&self) -> Result<image::DynamicImage> {
        let pixels = self.render_to_rgba8()?;
        let buf = image::RgbaImage::from_raw(self.width as u32, self.height as u32, pixels)
            .ok_or_else(|| Error::Render("pixel buffer size mismatch".into()))?;
        Ok(image::DynamicImage::ImageRgba8(buf))
    }

    /// Encode in memory, e.g. `image::ImageFormat::Png`.
    pub fn encode(&self, format: image::ImageFormat) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        self.to_image()?.to_rgb8().write_to(&mut out, format)?;
        Ok(out.into_inner())
    }

    /// Write the figure; the encoder follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let img = self.to_image()?.to_rgb8();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        img.save(path)?;
        info!(path = %path.display(), series = self.series().len(), "wrote figure");
        Ok(())
    }

    fn draw(&self, canvas: &skia::Canvas, width: i32, height: i32, shaper: &TextShaper) {
        let theme = &self.theme;
        canvas.clear(theme.background);

        let Some(axes) = &self.axes else { return };
        let r = axes.rect.to_pixels(width, height);
        let (l, t, rr, b) = (r.left as f32, r.top as f32, r.right as f32, r.bottom as f32);
        let plot = skia::Rect::from_ltrb(l, t, rr, b);

        let sx = ScaleTransform::new(axes.x_axis.kind, l, rr, axes.x_axis.min, axes.x_axis.max);
        let sy = ScaleTransform::new(axes.y_axis.kind, b, t, axes.y_axis.min, axes.y_axis.max);

        canvas.draw_rect(plot, &fill_paint(theme.axes_face));

        let tick_h = draw_x_ticks(canvas, shaper, theme, &sx, b);
        let tick_w = draw_y_ticks(canvas, shaper, theme, &sy, l);

        canvas.save();
        canvas.clip_rect(plot, skia::ClipOp::Intersect, true);
        for (i, s) in axes.series.iter().enumerate() {
            draw_line_series(canvas, &sx, &sy, s, theme.series_color(i));
        }
        canvas.restore();

        // spines
        canvas.draw_rect(plot, &stroke_paint(theme.axis_line, 1.0));

        let label_size = axes.label_size as f32;
        let label_h = shaper.line_height(label_size);
        if !axes.x_axis.label.is_empty() {
            let y = b + TICK_LEN + tick_h + 4.0;
            shaper.draw_centered(canvas, &plain_label(&axes.x_axis.label), (l + rr) * 0.5, y, label_size, theme.axis_label);
        }
        if !axes.y_axis.label.is_empty() {
            let cx = l - TICK_LEN - tick_w - 6.0 - label_h * 0.5;
            shaper.draw_vertical(canvas, &plain_label(&axes.y_axis.label), cx, (t + b) * 0.5, label_size, theme.axis_label);
        }
        if !axes.title.is_empty() {
            let size = axes.title_size as f32;
            let y = t - shaper.line_height(size) - 6.0;
            shaper.draw_centered(canvas, &plain_label(&axes.title), (l + rr) * 0.5, y, size, theme.axis_label);
        }

        if axes.legend {
            draw_legend(canvas, shaper, theme, axes, rr, t);
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT)
    }
}

// ---- helpers ----------------------------------------------------------------

fn stroke_paint(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color);
    paint
}

fn fill_paint(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color);
    paint
}

/// Returns the height taken by the tick labels.
fn draw_x_ticks(canvas: &skia::Canvas, shaper: &TextShaper, theme: &Theme, sx: &ScaleTransform, b: f32) -> f32 {
    let paint = stroke_paint(theme.tick, 1.0);
    let mut used = 0.0f32;
    for v in ticks(sx.kind, sx.vmin, sx.vmax) {
        if !sx.contains(v) {
            continue;
        }
        let px = sx.to_px(v);
        canvas.draw_line((px, b), (px, b + TICK_LEN), &paint);
        shaper.draw_centered(canvas, &format_tick(v), px, b + TICK_LEN + 2.0, TICK_FONT_SIZE, theme.tick);
        used = used.max(shaper.line_height(TICK_FONT_SIZE) + 2.0);
    }
    used
}

/// Returns the width taken by the widest tick label.
fn draw_y_ticks(canvas: &skia::Canvas, shaper: &TextShaper, theme: &Theme, sy: &ScaleTransform, l: f32) -> f32 {
    let paint = stroke_paint(theme.tick, 1.0);
    let mut widest = 0.0f32;
    for v in ticks(sy.kind, sy.vmin, sy.vmax) {
        if !sy.contains(v) {
            continue;
        }
        let py = sy.to_px(v);
        let text = format_tick(v);
        canvas.draw_line((l - TICK_LEN, py), (l, py), &paint);
        shaper.draw_right(canvas, &text, l - TICK_LEN - 2.0, py, TICK_FONT_SIZE, theme.tick);
        widest = widest.max(shaper.measure_width(&text, TICK_FONT_SIZE) + 2.0);
    }
    widest
}

fn series_paints(style: LineStyle, color: skia::Color) -> (skia::Paint, skia::Paint) {
    let mut stroke = stroke_paint(color, LINE_WIDTH);
    if style == LineStyle::Dashed {
        stroke.set_path_effect(skia::PathEffect::dash(&DASH, 0.0));
    }
    (stroke, fill_paint(color))
}

fn draw_marker(canvas: &skia::Canvas, marker: Marker, x: f32, y: f32, fill: &skia::Paint) {
    if marker == Marker::Square {
        let h = MARKER_SIZE * 0.5;
        canvas.draw_rect(skia::Rect::from_ltrb(x - h, y - h, x + h, y + h), fill);
    }
}

fn draw_line_series(
    canvas: &skia::Canvas,
    sx: &ScaleTransform,
    sy: &ScaleTransform,
    series: &LineSeries,
    color: skia::Color,
) {
    let usable = |v: f64, kind: Scale| v.is_finite() && (kind == Scale::Linear || v > 0.0);
    let pts = series
        .points
        .iter()
        .filter(|&&(x, y)| usable(x, sx.kind) && usable(y, sy.kind))
        .map(|&(x, y)| (sx.to_px(x), sy.to_px(y)))
        .collect::<Vec<_>>();
    if pts.is_empty() {
        return;
    }

    let (stroke, fill) = series_paints(series.style, color);
    if pts.len() >= 2 {
        let mut path = skia::Path::new();
        path.move_to(pts[0]);
        for &p in pts.iter().skip(1) {
            path.line_to(p);
        }
        canvas.draw_path(&path, &stroke);
    }
    for &(x, y) in &pts {
        draw_marker(canvas, series.marker, x, y, &fill);
    }
}

fn draw_legend(canvas: &skia::Canvas, shaper: &TextShaper, theme: &Theme, axes: &Axes, right: f32, top: f32) {
    let entries = axes
        .series
        .iter()
        .enumerate()
        .filter_map(|(i, s)| s.label.as_deref().map(|label| (plain_label(label), s, theme.series_color(i))))
        .collect::<Vec<_>>();
    if entries.is_empty() {
        warn!("legend requested but no series carries a label");
        return;
    }

    let pad = 6.0;
    let sample_w = 24.0;
    let line_h = shaper.line_height(LEGEND_FONT_SIZE);
    let row_h = line_h + 4.0;
    let text_w = entries
        .iter()
        .map(|(label, _, _)| shaper.measure_width(label, LEGEND_FONT_SIZE))
        .fold(0.0f32, f32::max);
    let box_w = pad + sample_w + pad + text_w + pad;
    let box_h = pad * 2.0 + row_h * entries.len() as f32;
    let x0 = right - 8.0 - box_w;
    let y0 = top + 8.0;
    let frame = skia::Rect::from_xywh(x0, y0, box_w, box_h);

    canvas.draw_rect(frame, &fill_paint(theme.legend_face));
    canvas.draw_rect(frame, &stroke_paint(theme.legend_frame, 1.0));

    for (row, (label, series, color)) in entries.iter().enumerate() {
        let cy = y0 + pad + row_h * (row as f32 + 0.5);
        let (stroke, fill) = series_paints(series.style, *color);
        canvas.draw_line((x0 + pad, cy), (x0 + pad + sample_w, cy), &stroke);
        draw_marker(canvas, series.marker, x0 + pad + sample_w * 0.5, cy, &fill);
        shaper.draw_top_left(canvas, label, x0 + pad * 2.0 + sample_w, cy - line_h * 0.5, LEGEND_FONT_SIZE, theme.axis_label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_axes_replaces_previous() {
        let mut c = Canvas::default();
        let a = c.add_axes(FigureRect::default());
        a.plot(LineSeries::new(vec![(0.0, 1.0)]));
        a.legend();
        assert_eq!(c.series().len(), 1);

        c.add_axes(FigureRect::default());
        assert!(c.series().is_empty());
        assert!(!c.axes().map_or(true, Axes::has_legend));
    }

    #[test]
    fn clear_drops_axes() {
        let mut c = Canvas::default();
        c.add_axes(FigureRect::default());
        c.clear();
        assert!(c.axes().is_none());
        assert!(c.series().is_empty());
    }

    #[test]
    fn plot_refits_axes_to_data() {
        let mut a = Axes::new(FigureRect::default());
        a.plot(LineSeries::new(vec![(1.0, 10.0), (3.0, 30.0)]));
        assert!(a.x_axis.min < 1.0 && a.x_axis.max > 3.0);
        assert!(a.y_axis.min < 10.0 && a.y_axis.max > 30.0);
    }

    #[test]
    fn legend_labels_follow_series_order() {
        let mut a = Axes::new(FigureRect::default());
        a.plot(LineSeries::new(vec![(0.0, 0.0)]).with_label("$b$"));
        a.plot(LineSeries::new(vec![(0.0, 0.0)]).with_label("$a$"));
        assert!(a.legend_labels().is_empty());
        a.legend();
        assert_eq!(a.legend_labels(), vec!["$b$", "$a$"]);
    }

    #[test]
    fn render_buffer_has_figure_shape() {
        let mut c = Canvas::new(120, 90);
        c.add_axes(FigureRect::default())
            .plot(LineSeries::square_dashed(vec![(0.0, 0.0), (1.0, 1.0)]));
        let px = c.render_to_rgba8().expect("render");
        assert_eq!(px.len(), 120 * 90 * 4);
        // opaque white corner outside the axes
        assert_eq!(&px[0..4], &[255, 255, 255, 255]);
    }
}
