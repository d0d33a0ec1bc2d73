// File: crates/silplot-core/src/grid.rs
// Summary: Tick layout helpers (linear "nice" steps, log decades) and tick label formatting.

use crate::scale::Scale;

/// Round-number ticks inside `[min, max]`, roughly `target` of them, with a
/// step from the 1-2-2.5-5 family.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || max <= min {
        return vec![min];
    }
    let raw = (max - min) / target.max(1) as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let step = mag * if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 2.5 {
        2.5
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };

    let first = (min / step).ceil() as i64;
    let last = (max / step + 1e-9).floor() as i64;
    (first..=last)
        .map(|k| {
            let v = k as f64 * step;
            if v.abs() < step * 1e-9 { 0.0 } else { v }
        })
        .collect()
}

/// Powers of ten inside `[min, max]`; falls back to linear ticks when the
/// range spans less than one decade boundary.
pub fn log_ticks(min: f64, max: f64) -> Vec<f64> {
    if min <= 0.0 || max <= min {
        return nice_ticks(min, max, 5);
    }
    let lo = min.log10().ceil() as i32;
    let hi = max.log10().floor() as i32;
    if hi < lo {
        return nice_ticks(min, max, 5);
    }
    (lo..=hi).map(|e| 10f64.powi(e)).collect()
}

pub fn ticks(kind: Scale, min: f64, max: f64) -> Vec<f64> {
    match kind {
        Scale::Linear => nice_ticks(min, max, 6),
        Scale::Log => log_ticks(min, max),
    }
}

/// Short tick label: plain decimal for moderate magnitudes, scientific
/// otherwise, trailing zeros trimmed.
pub fn format_tick(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let a = v.abs();
    if !(1e-3..1e5).contains(&a) {
        let s = format!("{v:.3e}");
        return match s.split_once('e') {
            Some((mantissa, exp)) => format!("{}e{}", trim_zeros(mantissa), exp),
            None => s,
        };
    }
    trim_zeros(&format!("{v:.6}")).to_string()
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_ticks_land_on_round_steps() {
        assert_eq!(nice_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(nice_ticks(-0.3, 1.1, 6), vec![-0.25, 0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn log_ticks_are_decades() {
        assert_eq!(log_ticks(0.5, 2000.0), vec![1.0, 10.0, 100.0, 1000.0]);
        // narrower than a decade: linear fallback
        assert!(!log_ticks(2.0, 5.0).is_empty());
    }

    #[test]
    fn tick_labels_are_compact() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(2.5), "2.5");
        assert_eq!(format_tick(100.0), "100");
        assert_eq!(format_tick(1.5e16), "1.5e16");
        assert_eq!(format_tick(1e-5), "1e-5");
    }
}
