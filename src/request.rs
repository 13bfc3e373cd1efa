//! Plot requests and the renderer seam.

use crate::config::RenderConfig;
use crate::options::Subplots;
use crate::series::Series;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything a renderer needs to draw one figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotRequest {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub series: Vec<Series>,
    pub subplots: Subplots,
    /// Output file stem; sanitised and joined with the configured directories.
    pub stem: String,
    pub show: bool,
    pub grid: bool,
    pub tight: bool,
    /// Second y axis sharing the x axis of the first panel.
    pub twin: Option<Box<PlotRequest>>,
}

impl PlotRequest {
    pub fn new(stem: impl Into<String>, series: Vec<Series>) -> Self {
        Self {
            title: None,
            x_label: None,
            y_label: None,
            series,
            subplots: Subplots::default(),
            stem: stem.into(),
            show: false,
            grid: true,
            tight: false,
            twin: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = Some(x_label.into());
        self.y_label = Some(y_label.into());
        self
    }

    pub fn subplots(mut self, subplots: Subplots) -> Self {
        self.subplots = subplots;
        self
    }

    pub fn show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    pub fn grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    pub fn tight(mut self, tight: bool) -> Self {
        self.tight = tight;
        self
    }

    pub fn twin(mut self, twin: PlotRequest) -> Self {
        self.twin = Some(Box::new(twin));
        self
    }

    /// Series whose cell lies outside the grid.
    pub fn misplaced(&self) -> impl Iterator<Item = &Series> {
        self.series.iter().filter(|s| {
            let p = s.placement();
            p.row >= self.subplots.rows || p.column >= self.subplots.columns
        })
    }
}

/// Files produced by one render call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOutput {
    pub script: Option<PathBuf>,
    pub figure: Option<PathBuf>,
}

/// Sink for plot requests.
pub trait Renderer {
    fn render(&self, request: &PlotRequest, config: &RenderConfig) -> anyhow::Result<RenderOutput>;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    fn render(&self, request: &PlotRequest, config: &RenderConfig) -> anyhow::Result<RenderOutput> {
        (**self).render(request, config)
    }
}
