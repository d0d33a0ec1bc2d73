// File: crates/silplot-core/src/scale.rs
// Summary: Two-valued axis scale (linear/log) with validated assignment, plus the data-to-pixel transform.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Accepted scale names, in the order reported by errors.
pub const VALID_SCALES: &[&str] = &["linear", "log"];

const LOG_EPS: f64 = 1e-12;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scale {
    #[default]
    Linear,
    Log,
}

impl Scale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scale::Linear => "linear",
            Scale::Log => "log",
        }
    }

    #[inline]
    fn forward(&self, v: f64) -> f64 {
        match self {
            Scale::Linear => v,
            Scale::Log => v.max(LOG_EPS).log10(),
        }
    }
}

impl FromStr for Scale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linear" => Ok(Scale::Linear),
            "log" => Ok(Scale::Log),
            other => Err(Error::InvalidScale { value: other.to_string(), valid: VALID_SCALES }),
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Holder that only ever contains a valid scale. A rejected `set` leaves
/// the previous value in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValidatedScale {
    scale: Scale,
}

impl ValidatedScale {
    pub fn new(scale: impl fmt::Display) -> Result<Self> {
        let mut s = Self::default();
        s.set(scale)?;
        Ok(s)
    }

    pub fn get(&self) -> &'static str { self.scale.as_str() }

    pub fn kind(&self) -> Scale { self.scale }

    pub fn set(&mut self, scale: impl fmt::Display) -> Result<()> {
        self.scale = scale.to_string().parse()?;
        Ok(())
    }
}

/// Maps data values onto a pixel span along one axis. `start_px` is where
/// `vmin` lands, `end_px` where `vmax` lands; for a vertical axis pass the
/// bottom edge as start so values grow upwards.
#[derive(Clone, Copy, Debug)]
pub struct ScaleTransform {
    pub kind: Scale,
    pub start_px: f32,
    pub end_px: f32,
    pub vmin: f64,
    pub vmax: f64,
    // endpoints in transformed space
    lo: f64,
    hi: f64,
}

impl ScaleTransform {
    pub fn new(kind: Scale, start_px: f32, end_px: f32, mut vmin: f64, mut vmax: f64) -> Self {
        if kind == Scale::Log {
            vmin = vmin.max(LOG_EPS);
            if vmax <= vmin { vmax = vmin * 10.0; }
        } else if (vmax - vmin).abs() < 1e-12 {
            vmax = vmin + 1.0;
        }
        let lo = kind.forward(vmin);
        let hi = kind.forward(vmax);
        Self { kind, start_px, end_px, vmin, vmax, lo, hi }
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        let span = (self.hi - self.lo).max(1e-12);
        let t = (self.kind.forward(v) - self.lo) / span;
        self.start_px + t as f32 * (self.end_px - self.start_px)
    }

    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        let (a, b) = (self.vmin.min(self.vmax), self.vmin.max(self.vmax));
        v >= a - (b - a) * 1e-9 && v <= b + (b - a) * 1e-9
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips_valid_names() {
        let mut s = ValidatedScale::default();
        for name in ["log", "linear", "log"] {
            s.set(name).unwrap();
            assert_eq!(s.get(), name);
        }
        s.set(Scale::Log).unwrap();
        assert_eq!(s.kind(), Scale::Log);
    }

    #[test]
    fn rejects_other_names_and_keeps_previous() {
        let mut s = ValidatedScale::new("log").unwrap();
        for bad in ["symlog", "Linear", "", "logit"] {
            let err = s.set(bad).unwrap_err();
            let msg = err.to_string();
            assert!(msg.contains("linear") && msg.contains("log"), "{msg}");
            assert_eq!(s.get(), "log");
        }
    }

    #[test]
    fn linear_transform_maps_endpoints() {
        let t = ScaleTransform::new(Scale::Linear, 100.0, 500.0, 0.0, 10.0);
        assert_eq!(t.to_px(0.0), 100.0);
        assert_eq!(t.to_px(10.0), 500.0);
        assert!((t.to_px(5.0) - 300.0).abs() < 1e-3);
    }

    #[test]
    fn vertical_transform_grows_upwards() {
        let t = ScaleTransform::new(Scale::Linear, 400.0, 40.0, 0.0, 1.0);
        assert!(t.to_px(1.0) < t.to_px(0.0));
    }

    #[test]
    fn log_transform_spaces_decades_evenly() {
        let t = ScaleTransform::new(Scale::Log, 0.0, 300.0, 1.0, 1000.0);
        assert!((t.to_px(10.0) - 100.0).abs() < 1e-3);
        assert!((t.to_px(100.0) - 200.0).abs() < 1e-3);
        // non-positive values clamp instead of producing NaN
        assert!(t.to_px(-5.0).is_finite());
    }

    #[test]
    fn degenerate_range_is_widened() {
        let t = ScaleTransform::new(Scale::Linear, 0.0, 100.0, 3.0, 3.0);
        assert!(t.vmax > t.vmin);
        assert!(t.to_px(3.0).is_finite());
    }
}
