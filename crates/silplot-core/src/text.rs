// File: crates/silplot-core/src/text.rs
// Summary: Text shaper/renderer using Skia textlayout, plus plain-text rendering of mathtext-style labels.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

pub struct TextShaper {
    fonts: FontCollection,
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&["DejaVu Sans", "Segoe UI", "Arial", "Helvetica", "sans-serif"]);
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        let style = Self::make_style(size, color);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32) -> f32 {
        let p = self.layout(text, size, skia::Color::from_argb(0, 0, 0, 0));
        // width of the longest line
        p.longest_line()
    }

    /// Draw with the top-left corner of the text box at `(x, y)`.
    pub fn draw_top_left(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color) {
        self.layout(text, size, color).paint(canvas, (x, y));
    }

    /// Draw horizontally centered on `cx`, top edge at `y`.
    pub fn draw_centered(&self, canvas: &skia::Canvas, text: &str, cx: f32, y: f32, size: f32, color: skia::Color) {
        let mut p = self.layout(text, size, color);
        let w = p.longest_line();
        p.paint(canvas, (cx - w * 0.5, y));
    }

    /// Draw right-aligned to `right`, vertically centered on `cy`.
    pub fn draw_right(&self, canvas: &skia::Canvas, text: &str, right: f32, cy: f32, size: f32, color: skia::Color) {
        let mut p = self.layout(text, size, color);
        let w = p.longest_line();
        let h = p.height();
        p.paint(canvas, (right - w, cy - h * 0.5));
    }

    /// Draw rotated 90° counter-clockwise, centered on `(cx, cy)`.
    pub fn draw_vertical(&self, canvas: &skia::Canvas, text: &str, cx: f32, cy: f32, size: f32, color: skia::Color) {
        let mut p = self.layout(text, size, color);
        let w = p.longest_line();
        let h = p.height();
        canvas.save();
        canvas.translate((cx, cy));
        canvas.rotate(-90.0, None);
        p.paint(canvas, (-w * 0.5, -h * 0.5));
        canvas.restore();
    }

    /// Line height for `size`, measured on a reference glyph run.
    pub fn line_height(&self, size: f32) -> f32 {
        self.layout("Ag", size, skia::Color::from_argb(0, 0, 0, 0)).height().max(size)
    }
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}

/// Plain-text rendering of a mathtext label: `$` delimiters dropped,
/// `\ ` becomes a space, known symbols map to Unicode, and the braces of
/// `^{..}` / `_{..}` groups are removed with their content kept inline.
pub fn plain_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut chars = label.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '$' | '{' | '}' => {}
            '^' | '_' if chars.peek() == Some(&'{') => {}
            '\\' => {
                let mut name = String::new();
                while let Some(&n) = chars.peek() {
                    if n.is_ascii_alphabetic() {
                        name.push(n);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if name.is_empty() {
                    // escaped punctuation, e.g. "\ " or "\$"
                    if let Some(n) = chars.next() {
                        out.push(n);
                    }
                } else {
                    out.push_str(symbol(&name).unwrap_or(name.as_str()));
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn symbol(name: &str) -> Option<&'static str> {
    Some(match name {
        "Omega" => "Ω",
        "omega" => "ω",
        "mu" => "µ",
        "Delta" => "Δ",
        "alpha" => "α",
        "beta" => "β",
        "cdot" => "·",
        "times" => "×",
        _ => return None,
    })
}
