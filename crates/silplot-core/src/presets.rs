// File: crates/silplot-core/src/presets.rs
// Summary: Preset figures for the three device metrics (breakdown voltage, Ron,sp, FoM).

use std::sync::Arc;

use crate::error::Result;
use crate::figure::FigureConfig;
use crate::scale::Scale;
use crate::table::Table;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    BreakdownVoltage,
    OnResistance,
    FigureOfMerit,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::BreakdownVoltage, Preset::OnResistance, Preset::FigureOfMerit];

    pub fn y_column(self) -> &'static str {
        match self {
            Preset::BreakdownVoltage => "bv",
            Preset::OnResistance => "ronsp",
            Preset::FigureOfMerit => "fom",
        }
    }

    pub fn y_label(self) -> &'static str {
        match self {
            Preset::BreakdownVoltage => r"$Breakdown\ Voltage\ (V)$",
            Preset::OnResistance => r"$R_{on,sp}\ m\Omega·cm^{2}$",
            Preset::FigureOfMerit => r"$FoM\ (MW/cm^{2})$",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Preset::BreakdownVoltage => r"$Breakdown\ Voltage$",
            Preset::OnResistance => r"$R_{on,sp}$",
            Preset::FigureOfMerit => r"$FoM$",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Preset::BreakdownVoltage => "bv.tiff",
            Preset::OnResistance => "r.tiff",
            Preset::FigureOfMerit => "fom.tiff",
        }
    }

    /// A figure with this preset's y column, labels, linear y scale and
    /// output file. Fails when the table lacks the y column.
    pub fn build(self, table: Arc<Table>) -> Result<FigureConfig> {
        let mut fig = FigureConfig::new(table);
        fig.set_y_scale(Scale::Linear)?;
        fig.set_y_label(self.y_label());
        fig.set_title(self.title());
        fig.set_y(self.y_column())?;
        fig.set_file_name(self.file_name());
        Ok(fig)
    }
}
