//! Per-category plot options with the stock defaults.
//!
//! Option blocks are plain data: nothing is validated here. Windows larger than the
//! data simply truncate, and style/grid problems surface when the series builder runs.

use crate::error::PlotError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

/// Plot style selector. Deserialises through [`FromStr`], so option files accept the same aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum PlotType {
    #[default]
    Line,
    /// Line with a ±1 standard deviation band.
    ErrorLine,
    Bar,
    /// Bars with ±1 standard deviation whiskers.
    ErrorBar,
    /// Whole matrix as a single signed-magnitude heatmap.
    Hinton,
}

impl PlotType {
    pub const ALL: [PlotType; 5] = [
        PlotType::Line,
        PlotType::ErrorLine,
        PlotType::Bar,
        PlotType::ErrorBar,
        PlotType::Hinton,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlotType::Line => "line",
            PlotType::ErrorLine => "error_line",
            PlotType::Bar => "bar",
            PlotType::ErrorBar => "error_bar",
            PlotType::Hinton => "hinton",
        }
    }
}

impl fmt::Display for PlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for PlotType {
    type Error = PlotError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for PlotType {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "line" => Ok(PlotType::Line),
            "error_line" | "errorline" => Ok(PlotType::ErrorLine),
            "bar" => Ok(PlotType::Bar),
            "error_bar" | "errorbar" => Ok(PlotType::ErrorBar),
            "hinton" | "heatmap" => Ok(PlotType::Hinton),
            other => Err(PlotError::invalid(
                "plot_type",
                format!("unknown plot type {other:?}"),
            )),
        }
    }
}

/// Subplot grid shape and axis sharing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subplots {
    pub rows: usize,
    pub columns: usize,
    pub share_x: bool,
    pub share_y: bool,
}

impl Subplots {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            share_x: false,
            share_y: false,
        }
    }

    pub fn shared(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            share_x: true,
            share_y: true,
        }
    }

    /// Number of panels in the grid.
    pub fn cells(&self) -> usize {
        self.rows * self.columns
    }
}

impl Default for Subplots {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Options common to every plot category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseOptions {
    pub show: bool,
    /// Leading items to skip.
    pub skip: usize,
    /// Items to display after the skip.
    pub num_to_show: usize,
    pub subplots: Subplots,
    pub plot_type: PlotType,
}

impl BaseOptions {
    fn preset(num_to_show: usize, plot_type: PlotType, subplots: Subplots) -> Self {
        Self {
            show: false,
            skip: 0,
            num_to_show,
            subplots,
            plot_type,
        }
    }

    /// `"{skip}-{skip + num_to_show}"`, used in posterior titles and file names.
    pub fn selection(&self) -> String {
        format!("{}-{}", self.skip, self.skip + self.num_to_show)
    }
}

/// Reconstruction plots: the base block plus styles for the original and reconstructed traces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructionOptions {
    #[serde(flatten)]
    pub base: BaseOptions,
    pub original_type: PlotType,
    pub reconstructed_type: PlotType,
}

impl Default for ReconstructionOptions {
    fn default() -> Self {
        Self {
            base: BaseOptions::default(),
            original_type: PlotType::Line,
            reconstructed_type: PlotType::ErrorLine,
        }
    }
}

impl Deref for ReconstructionOptions {
    type Target = BaseOptions;

    fn deref(&self) -> &BaseOptions {
        &self.base
    }
}

impl DerefMut for ReconstructionOptions {
    fn deref_mut(&mut self) -> &mut BaseOptions {
        &mut self.base
    }
}

/// All option blocks for one visualisation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotOptions {
    /// Render data as square 2-D images instead of 1-D signals.
    pub is_image: bool,
    pub dictionary: BaseOptions,
    pub coefficients: BaseOptions,
    pub reconstructions: ReconstructionOptions,
    pub classifier_weights: BaseOptions,
    pub images: BaseOptions,
    pub signals: BaseOptions,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            is_image: false,
            dictionary: BaseOptions::preset(16, PlotType::ErrorLine, Subplots::shared(4, 4)),
            coefficients: BaseOptions::preset(4, PlotType::ErrorBar, Subplots::shared(4, 1)),
            reconstructions: ReconstructionOptions {
                base: BaseOptions::preset(2, PlotType::Line, Subplots::shared(2, 1)),
                ..ReconstructionOptions::default()
            },
            classifier_weights: BaseOptions {
                show: true,
                ..BaseOptions::default()
            },
            images: BaseOptions::preset(16, PlotType::Hinton, Subplots::shared(4, 4)),
            signals: BaseOptions::preset(16, PlotType::Line, Subplots::shared(4, 4)),
        }
    }
}

impl PlotOptions {
    /// Defaults with every category switched on.
    pub fn show_all() -> Self {
        let mut options = Self::default();
        options.dictionary.show = true;
        options.coefficients.show = true;
        options.reconstructions.show = true;
        options.classifier_weights.show = true;
        options.images.show = true;
        options.signals.show = true;
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_type_parses_aliases() {
        assert_eq!("Error-Line".parse::<PlotType>().unwrap(), PlotType::ErrorLine);
        assert_eq!("heatmap".parse::<PlotType>().unwrap(), PlotType::Hinton);
        for t in PlotType::ALL {
            assert_eq!(t.as_str().parse::<PlotType>().unwrap(), t);
        }
    }

    #[test]
    fn unknown_plot_type_names_the_option() {
        let err = "pie".parse::<PlotType>().unwrap_err();
        assert!(err.to_string().contains("plot_type"));
    }

    #[test]
    fn reconstruction_options_deref_to_base() {
        let mut r = ReconstructionOptions::default();
        r.num_to_show = 3;
        assert_eq!(r.base.num_to_show, 3);
        assert_eq!(r.selection(), "0-3");
    }
}
