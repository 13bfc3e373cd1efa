//! Render configuration and output file naming.
//!
//! One `RenderConfig` is built by the host (CLI flags, a JSON file, or code) and
//! passed by reference into every render call.

use crate::error::PlotError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Figure file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FigureFormat {
    #[default]
    Pdf,
    Svg,
    Png,
}

impl FigureFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            FigureFormat::Pdf => "pdf",
            FigureFormat::Svg => "svg",
            FigureFormat::Png => "png",
        }
    }
}

impl fmt::Display for FigureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for FigureFormat {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(FigureFormat::Pdf),
            "svg" => Ok(FigureFormat::Svg),
            "png" => Ok(FigureFormat::Png),
            other => Err(PlotError::invalid(
                "figure_format",
                format!("unsupported figure format {other:?}"),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Interpreter used to run generated scripts; `None` only writes them.
    pub python: Option<PathBuf>,
    pub script_dir: PathBuf,
    pub figure_dir: PathBuf,
    pub figure_format: FigureFormat,
    /// Pixel size for the native renderer.
    pub width: u32,
    pub height: u32,
    /// TTF file for native text rendering (the `ab_glyph` path does not discover OS fonts).
    pub font: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            python: None,
            script_dir: PathBuf::from("scripts"),
            figure_dir: PathBuf::from("figures"),
            figure_format: FigureFormat::Pdf,
            width: 1000,
            height: 800,
            font: None,
        }
    }
}

impl RenderConfig {
    pub fn script_path(&self, stem: &str) -> PathBuf {
        self.script_dir.join(format!("{}.py", sanitize(stem)))
    }

    pub fn figure_path(&self, stem: &str) -> PathBuf {
        self.figure_dir
            .join(format!("{}.{}", sanitize(stem), self.figure_format.extension()))
    }
}

/// Spaces become underscores in file names.
pub fn sanitize(name: &str) -> String {
    name.replace(' ', "_")
}

/// `"_{subtitle}"` (sanitised) when non-empty, otherwise empty.
pub fn subtitle_suffix(subtitle: &str) -> String {
    if subtitle.is_empty() {
        String::new()
    } else {
        format!("_{}", sanitize(subtitle))
    }
}

/// `"{title} {subtitle}"`, or just the title when there is no subtitle.
pub fn join_title(title: &str, subtitle: &str) -> String {
    if subtitle.is_empty() {
        title.to_string()
    } else {
        format!("{title} {subtitle}")
    }
}
