// File: crates/silplot-core/src/axis.rs
// Summary: Axis model with label, scale kind and data range.

use crate::scale::Scale;

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub kind: Scale,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max, kind: Scale::Linear }
    }

    pub fn with_scale(mut self, kind: Scale) -> Self {
        self.kind = kind;
        self
    }

    /// Fit the range to `values` with a 5% margin on each side (in log space
    /// for log axes). Non-finite values, and non-positive ones on a log
    /// axis, are ignored. Returns false and leaves the range untouched when
    /// nothing usable remains.
    pub fn autoscale<I: IntoIterator<Item = f64>>(&mut self, values: I) -> bool {
        let log = self.kind == Scale::Log;
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for v in values {
            if !v.is_finite() || (log && v <= 0.0) {
                continue;
            }
            let v = if log { v.log10() } else { v };
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if !lo.is_finite() || !hi.is_finite() {
            return false;
        }
        if (hi - lo).abs() < 1e-12 {
            let pad = if log { 1.0 } else { (lo.abs() * 0.05).max(0.5) };
            lo -= pad;
            hi += pad;
        } else {
            let m = (hi - lo) * 0.05;
            lo -= m;
            hi += m;
        }
        if log {
            self.min = 10f64.powf(lo);
            self.max = 10f64.powf(hi);
        } else {
            self.min = lo;
            self.max = hi;
        }
        true
    }
}

impl Default for Axis {
    fn default() -> Self {
        Self::new("", 0.0, 1.0)
    }
}
