// File: crates/report/src/main.rs
// Summary: Loads the device table, renders the three preset figures, then shows them in a window.

mod config;
mod viewer;

use std::sync::Arc;

use anyhow::{Context, Result};
use silplot_core::{theme, Canvas, Preset, Table};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ReportConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let cfg = ReportConfig::from_env();
    info!(input = %cfg.input.display(), out_dir = %cfg.out_dir.display(), "starting report");

    let table = Table::from_path(&cfg.input)
        .with_context(|| format!("failed to load table '{}'", cfg.input.display()))?;
    info!(rows = table.len(), columns = table.columns().len(), "loaded table");
    let table = Arc::new(table);

    let canvases = render_presets(&cfg, &table)?;

    if cfg.show {
        viewer::show(canvases)?;
    }
    Ok(())
}

fn render_presets(cfg: &ReportConfig, table: &Arc<Table>) -> Result<Vec<Canvas>> {
    let look = theme::find(&cfg.theme);
    let mut canvases = Vec::with_capacity(Preset::ALL.len());
    for preset in Preset::ALL {
        let mut fig = preset
            .build(Arc::clone(table))
            .with_context(|| format!("{preset:?} figure"))?;
        fig.set_x(&cfg.x_column)?;
        fig.set_x_label(&cfg.x_label);
        fig.set_theme(look);
        fig.set_file_name(cfg.out_dir.join(preset.file_name()));

        let path = fig.file_name().to_path_buf();
        let canvas = fig
            .plot_line()
            .with_context(|| format!("rendering {}", path.display()))?;
        canvases.push(canvas.clone());
    }
    Ok(canvases)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_all_presets_into_out_dir() {
        let csv = "jfetw,bv,ronsp,fom\n2e16,600,2.0,180\n1e16,650,2.5,169\n";
        let table = Arc::new(Table::from_reader(csv.as_bytes()).unwrap());
        let cfg = ReportConfig {
            out_dir: "target/test_out/report".into(),
            show: false,
            ..ReportConfig::default()
        };
        let canvases = render_presets(&cfg, &table).expect("render");
        assert_eq!(canvases.len(), 3);
        for (canvas, preset) in canvases.iter().zip(Preset::ALL) {
            assert_eq!(canvas.series()[0].points, vec![(1e16, preset_y(preset, 0)), (2e16, preset_y(preset, 1))]);
            assert!(cfg.out_dir.join(preset.file_name()).exists());
        }
    }

    fn preset_y(preset: Preset, sorted_row: usize) -> f64 {
        let by_x = [[650.0, 2.5, 169.0], [600.0, 2.0, 180.0]];
        let col = Preset::ALL.iter().position(|p| *p == preset).unwrap();
        by_x[sorted_row][col]
    }

    #[test]
    fn missing_x_column_is_reported() {
        let table = Arc::new(Table::from_reader("x,bv,ronsp,fom\n1,2,3,4\n".as_bytes()).unwrap());
        let cfg = ReportConfig { out_dir: "target/test_out/report_bad".into(), ..ReportConfig::default() };
        let err = render_presets(&cfg, &table).unwrap_err();
        assert!(format!("{err:#}").contains("jfetw"));
    }
}
