// File: crates/silplot-core/src/figure.rs
// Summary: Figure configuration with validated setters and the single/grouped line plot operations.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::canvas::{Axes, Canvas};
use crate::error::Result;
use crate::geometry::FigureRect;
use crate::scale::ValidatedScale;
use crate::series::LineSeries;
use crate::table::{Cell, Table};
use crate::theme::Theme;
use crate::types::{HEIGHT, WIDTH};

/// Maps a group value to its legend label.
pub type LabelFn = Box<dyn Fn(&Cell) -> String>;

/// Chart setup over a shared table. Column-valued properties are checked
/// against the table when assigned; everything else is free-form.
pub struct FigureConfig {
    table: Arc<Table>,
    rectangle: FigureRect,
    x_scale: ValidatedScale,
    y_scale: ValidatedScale,
    x_label: String,
    y_label: String,
    title: String,
    label_size: u32,
    title_size: u32,
    x: String,
    y: String,
    group: String,
    file_name: PathBuf,
    canvas: Canvas,
    label_fn: Option<LabelFn>,
}

impl FigureConfig {
    pub fn new(table: Arc<Table>) -> Self {
        Self {
            table,
            rectangle: FigureRect::default(),
            x_scale: ValidatedScale::default(),
            y_scale: ValidatedScale::default(),
            x_label: "x".into(),
            y_label: "y".into(),
            title: "title".into(),
            label_size: 15,
            title_size: 15,
            x: "x".into(),
            y: "y".into(),
            group: "t".into(),
            file_name: PathBuf::from("figure.tiff"),
            canvas: Canvas::new(WIDTH, HEIGHT),
            label_fn: None,
        }
    }

    pub fn table(&self) -> &Arc<Table> { &self.table }

    // ---- column selectors ---------------------------------------------------

    pub fn x(&self) -> &str { &self.x }

    pub fn set_x(&mut self, name: impl AsRef<str>) -> Result<()> {
        self.x = self.checked_column(name.as_ref())?;
        Ok(())
    }

    pub fn y(&self) -> &str { &self.y }

    pub fn set_y(&mut self, name: impl AsRef<str>) -> Result<()> {
        self.y = self.checked_column(name.as_ref())?;
        Ok(())
    }

    /// Grouping column used by `plot_lines`.
    pub fn group(&self) -> &str { &self.group }

    pub fn set_group(&mut self, name: impl AsRef<str>) -> Result<()> {
        self.group = self.checked_column(name.as_ref())?;
        Ok(())
    }

    fn checked_column(&self, name: &str) -> Result<String> {
        self.table.column_index(name)?;
        Ok(name.to_string())
    }

    // ---- text ---------------------------------------------------------------

    pub fn x_label(&self) -> &str { &self.x_label }

    pub fn set_x_label(&mut self, label: impl fmt::Display) { self.x_label = label.to_string(); }

    pub fn y_label(&self) -> &str { &self.y_label }

    pub fn set_y_label(&mut self, label: impl fmt::Display) { self.y_label = label.to_string(); }

    pub fn title(&self) -> &str { &self.title }

    pub fn set_title(&mut self, title: impl fmt::Display) { self.title = title.to_string(); }

    pub fn label_size(&self) -> u32 { self.label_size }

    /// Truncates toward zero; negative sizes clamp to 0.
    pub fn set_label_size(&mut self, size: f64) { self.label_size = size.trunc() as u32; }

    pub fn title_size(&self) -> u32 { self.title_size }

    pub fn set_title_size(&mut self, size: f64) { self.title_size = size.trunc() as u32; }

    // ---- layout, scales, output ---------------------------------------------

    pub fn rectangle(&self) -> FigureRect { self.rectangle }

    /// `(left, bottom, width, height)` as fractions of the figure; exactly
    /// four values are accepted.
    pub fn set_rectangle(&mut self, rect: &[f64]) -> Result<()> {
        self.rectangle = FigureRect::from_slice(rect)?;
        Ok(())
    }

    pub fn x_scale(&self) -> &'static str { self.x_scale.get() }

    pub fn set_x_scale(&mut self, scale: impl fmt::Display) -> Result<()> { self.x_scale.set(scale) }

    pub fn y_scale(&self) -> &'static str { self.y_scale.get() }

    pub fn set_y_scale(&mut self, scale: impl fmt::Display) -> Result<()> { self.y_scale.set(scale) }

    pub fn file_name(&self) -> &Path { &self.file_name }

    pub fn set_file_name(&mut self, file_name: impl AsRef<Path>) {
        self.file_name = file_name.as_ref().to_path_buf();
    }

    pub fn label_fn(&self) -> Option<&dyn Fn(&Cell) -> String> { self.label_fn.as_deref() }

    pub fn set_label_fn(&mut self, f: impl Fn(&Cell) -> String + 'static) {
        self.label_fn = Some(Box::new(f));
    }

    pub fn set_theme(&mut self, theme: Theme) { self.canvas.theme = theme; }

    /// The rendered figure (empty until a plot operation or `init_canvas`).
    pub fn canvas(&self) -> &Canvas { &self.canvas }

    // ---- drawing ------------------------------------------------------------

    /// Drop whatever was drawn and set up fresh axes from the current
    /// configuration.
    pub fn init_canvas(&mut self) -> &mut Axes {
        self.canvas.clear();
        let axes = self.canvas.add_axes(self.rectangle);
        axes.set_xlabel(&self.x_label, self.label_size);
        axes.set_ylabel(&self.y_label, self.label_size);
        axes.set_xscale(self.x_scale.kind());
        axes.set_yscale(self.y_scale.kind());
        axes.set_title(&self.title, self.title_size);
        axes
    }

    /// One series over the whole table, sorted by x, written to `file_name`.
    pub fn plot_line(&mut self) -> Result<&Canvas> {
        let points = self.table.select_xy(&self.x, &self.y, None)?;
        debug!(x = %self.x, y = %self.y, points = points.len(), "plot line");

        self.init_canvas().plot(LineSeries::square_dashed(points));
        self.canvas.save(&self.file_name)?;
        Ok(&self.canvas)
    }

    /// One series per distinct value of the grouping column (ascending),
    /// each sorted by x, with a legend. `group` overrides and stores the
    /// grouping column first.
    pub fn plot_lines(&mut self, group: Option<&str>) -> Result<&Canvas> {
        if let Some(g) = group {
            self.set_group(g)?;
        }

        let values = self.table.distinct(&self.group)?;
        let mut series = Vec::with_capacity(values.len());
        for value in &values {
            let points = self.table.select_xy(&self.x, &self.y, Some((self.group.as_str(), value)))?;
            let label = self.label_for(value);
            debug!(group = %self.group, value = %value, label = %label, points = points.len(), "plot group");
            series.push(LineSeries::square_dashed(points).with_label(label));
        }

        let axes = self.init_canvas();
        for s in series {
            axes.plot(s);
        }
        axes.legend();
        self.canvas.save(&self.file_name)?;
        Ok(&self.canvas)
    }

    /// Legend text for a group value: the label function when set,
    /// otherwise the value wrapped as inline math (`$a$`).
    pub fn label_for(&self, value: &Cell) -> String {
        match &self.label_fn {
            Some(f) => f(value),
            None => format!("${value}$"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn figure(src: &str) -> FigureConfig {
        let table = Table::from_reader(src.as_bytes()).expect("table");
        FigureConfig::new(Arc::new(table))
    }

    fn out(name: &str) -> PathBuf {
        PathBuf::from("target/test_out/figure").join(name)
    }

    #[test]
    fn defaults() {
        let f = figure("x,y,t\n1,2,a\n");
        assert_eq!(f.rectangle().as_array(), [0.15, 0.15, 0.8, 0.75]);
        assert_eq!((f.x_scale(), f.y_scale()), ("linear", "linear"));
        assert_eq!((f.x_label(), f.y_label(), f.title()), ("x", "y", "title"));
        assert_eq!((f.label_size(), f.title_size()), (15, 15));
        assert_eq!((f.x(), f.y(), f.group()), ("x", "y", "t"));
        assert_eq!(f.file_name(), Path::new("figure.tiff"));
        assert!(f.label_fn().is_none());
        assert!(f.canvas().axes().is_none());
    }

    #[test]
    fn column_setters_accept_only_table_columns() {
        let mut f = figure("a,b,c\n1,2,3\n");
        for name in ["a", "b", "c"] {
            f.set_x(name).unwrap();
            f.set_y(name).unwrap();
            f.set_group(name).unwrap();
        }
        let err = f.set_y("bv").unwrap_err();
        match &err {
            Error::UnknownColumn { name, available } => {
                assert_eq!(name, "bv");
                assert_eq!(available, &["a", "b", "c"]);
            }
            other => panic!("unexpected: {other:?}"),
        }
        // rejected assignment leaves the previous value
        assert_eq!(f.y(), "c");
        assert!(f.set_x("").is_err());
        assert!(f.set_group("A").is_err());
    }

    #[test]
    fn rectangle_needs_four_values() {
        let mut f = figure("x,y\n1,2\n");
        assert!(matches!(f.set_rectangle(&[0.1, 0.1, 0.8]), Err(Error::InvalidRectangle { len: 3 })));
        assert_eq!(f.rectangle(), FigureRect::default());
        f.set_rectangle(&[0.1, 0.2, 0.7, 0.6]).unwrap();
        assert_eq!(f.rectangle().as_array(), [0.1, 0.2, 0.7, 0.6]);
    }

    #[test]
    fn font_sizes_truncate() {
        let mut f = figure("x,y\n1,2\n");
        f.set_label_size(12.9);
        f.set_title_size(20.0);
        assert_eq!((f.label_size(), f.title_size()), (12, 20));
    }

    #[test]
    fn scale_setters_validate() {
        let mut f = figure("x,y\n1,2\n");
        f.set_x_scale("log").unwrap();
        assert_eq!(f.x_scale(), "log");
        assert!(f.set_y_scale("symlog").is_err());
        assert_eq!(f.y_scale(), "linear");
    }

    #[test]
    fn text_setters_stringify() {
        let mut f = figure("x,y\n1,2\n");
        f.set_title(42);
        f.set_x_label(1.5);
        assert_eq!((f.title(), f.x_label()), ("42", "1.5"));
    }

    #[test]
    fn init_canvas_applies_configuration() {
        let mut f = figure("x,y\n1,2\n");
        f.set_x_label("Voltage");
        f.set_y_scale("log").unwrap();
        f.set_label_size(11.0);
        f.set_title_size(18.0);
        f.set_rectangle(&[0.2, 0.2, 0.6, 0.6]).unwrap();
        let axes = f.init_canvas();
        assert_eq!(axes.x_axis.label, "Voltage");
        assert_eq!(axes.y_axis.kind, crate::Scale::Log);
        assert_eq!((axes.label_size, axes.title_size), (11, 18));
        assert_eq!(axes.rect.as_array(), [0.2, 0.2, 0.6, 0.6]);
        assert_eq!(axes.title, "title");
    }

    #[test]
    fn init_canvas_twice_leaves_nothing_behind() {
        let mut f = figure("x,y,t\n1,2,a\n2,3,b\n");
        f.set_file_name(out("twice.png"));
        f.plot_lines(None).unwrap();
        assert_eq!(f.canvas().series().len(), 2);

        f.init_canvas();
        f.init_canvas();
        let axes = f.canvas().axes().expect("axes");
        assert!(axes.series().is_empty());
        assert!(!axes.has_legend());
    }

    #[test]
    fn default_label_wraps_value_in_math_delimiters() {
        let f = figure("x,y\n1,2\n");
        assert_eq!(f.label_for(&Cell::from("a")), "$a$");
        assert_eq!(f.label_for(&Cell::Int(3)), "$3$");
        assert_eq!(f.label_for(&Cell::Float(0.5)), "$0.5$");
    }

    #[test]
    fn label_fn_overrides_default() {
        let mut f = figure("x,y,t\n1,2,1\n2,3,2\n");
        f.set_label_fn(|v| format!("W = {v} um"));
        assert_eq!(f.label_for(&Cell::Int(2)), "W = 2 um");

        f.set_file_name(out("label_fn.png"));
        let canvas = f.plot_lines(None).unwrap();
        assert_eq!(canvas.axes().unwrap().legend_labels(), vec!["W = 1 um", "W = 2 um"]);
    }

    #[test]
    fn plot_line_sorts_by_x_and_writes_file() {
        let mut f = figure("x,y\n3,1\n1,2\n2,9\n1,0\n");
        let path = out("single.png");
        f.set_file_name(&path);
        let canvas = f.plot_line().unwrap();
        let series = canvas.series();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].points, vec![(1.0, 2.0), (1.0, 0.0), (2.0, 9.0), (3.0, 1.0)]);
        assert!(series[0].label.is_none());
        assert!(!canvas.axes().unwrap().has_legend());
        assert!(std::fs::metadata(&path).map(|m| m.len() > 0).unwrap_or(false));
    }

    #[test]
    fn plot_lines_override_is_validated_and_stored() {
        let mut f = figure("x,y,g\n1,2,a\n");
        f.set_file_name(out("override.png"));
        assert!(f.plot_lines(Some("nope")).is_err());
        assert_eq!(f.group(), "t");
        f.plot_lines(Some("g")).unwrap();
        assert_eq!(f.group(), "g");
    }

    #[test]
    fn non_numeric_y_fails_at_plot_time() {
        let mut f = figure("x,y\n1,a\n");
        f.set_file_name(out("never.png"));
        assert!(matches!(f.plot_line(), Err(Error::NonNumeric { .. })));
    }

    #[test]
    fn unknown_extension_is_an_encode_error() {
        let mut f = figure("x,y\n1,2\n");
        f.set_file_name(out("figure.unknownext"));
        assert!(matches!(f.plot_line(), Err(Error::Encode(_))));
    }
}
