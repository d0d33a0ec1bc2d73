// File: crates/report/src/config.rs
// Summary: Report settings with in-code defaults and environment overrides.

use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "alldf.csv";
pub const X_COLUMN: &str = "jfetw";
pub const X_LABEL: &str = r"$jfetw\ (cm^{-3})$";

#[derive(Clone, Debug, PartialEq)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub x_column: String,
    pub x_label: String,
    pub theme: String,
    pub show: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            out_dir: PathBuf::from("."),
            x_column: X_COLUMN.to_string(),
            x_label: X_LABEL.to_string(),
            theme: "light".to_string(),
            show: true,
        }
    }
}

impl ReportConfig {
    /// Defaults overridden by `SILPLOT_INPUT`, `SILPLOT_OUT_DIR`,
    /// `SILPLOT_THEME` and `SILPLOT_NO_SHOW`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(v) = get("SILPLOT_INPUT").filter(|v| !v.is_empty()) {
            cfg.input = PathBuf::from(v);
        }
        if let Some(v) = get("SILPLOT_OUT_DIR").filter(|v| !v.is_empty()) {
            cfg.out_dir = PathBuf::from(v);
        }
        if let Some(v) = get("SILPLOT_THEME").filter(|v| !v.is_empty()) {
            cfg.theme = v;
        }
        if let Some(v) = get("SILPLOT_NO_SHOW") {
            cfg.show = !(v == "1" || v.eq_ignore_ascii_case("true"));
        }
        cfg
    }
}
