// File: crates/silplot-core/src/geometry.rs
// Summary: Fractional plot rectangle and pixel-rect helpers.

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }
    pub const fn width(&self) -> i32 { self.right - self.left }
    pub const fn height(&self) -> i32 { self.bottom - self.top }
}

/// Plot-area placement as fractions of the figure, origin bottom-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FigureRect {
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl FigureRect {
    pub const fn new(left: f64, bottom: f64, width: f64, height: f64) -> Self {
        Self { left, bottom, width, height }
    }

    /// Build from an ordered `(left, bottom, width, height)` sequence.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        match *values {
            [left, bottom, width, height] => Ok(Self { left, bottom, width, height }),
            _ => Err(Error::InvalidRectangle { len: values.len() }),
        }
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.left, self.bottom, self.width, self.height]
    }

    /// Resolve against a `width` x `height` pixel figure (y grows downwards).
    pub fn to_pixels(&self, width: i32, height: i32) -> RectI32 {
        let (w, h) = (width as f64, height as f64);
        let left = (self.left * w).round() as i32;
        let right = ((self.left + self.width) * w).round() as i32;
        let top = ((1.0 - self.bottom - self.height) * h).round() as i32;
        let bottom = ((1.0 - self.bottom) * h).round() as i32;
        RectI32::from_ltrb(left, top, right.max(left + 1), bottom.max(top + 1))
    }
}

impl Default for FigureRect {
    fn default() -> Self {
        Self::new(0.15, 0.15, 0.8, 0.75)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_requires_four_values() {
        assert!(FigureRect::from_slice(&[0.1, 0.1, 0.8, 0.8]).is_ok());
        for bad in [&[0.1, 0.1, 0.8][..], &[][..], &[0.1, 0.1, 0.8, 0.8, 0.1][..]] {
            match FigureRect::from_slice(bad) {
                Err(Error::InvalidRectangle { len }) => assert_eq!(len, bad.len()),
                other => panic!("unexpected: {other:?}"),
            }
        }
    }

    #[test]
    fn pixels_flip_vertical_origin() {
        let r = FigureRect::new(0.1, 0.2, 0.5, 0.5).to_pixels(200, 100);
        assert_eq!(r, RectI32::from_ltrb(20, 30, 120, 80));
        assert_eq!((r.width(), r.height()), (100, 50));
    }
}
