//! Renderers for [`PlotRequest`](crate::request::PlotRequest)s.
//!
//! - [`PythonRenderer`]: matplotlib script per request, optionally executed
//! - [`NativeRenderer`]: direct SVG/PNG output through plotters

pub mod native;
pub mod python;
pub mod style;
pub mod text;

pub use native::NativeRenderer;
pub use python::PythonRenderer;

use crate::config::RenderConfig;
use crate::request::{PlotRequest, RenderOutput, Renderer};
use serde::{Deserialize, Serialize};

/// Runtime choice between the bundled renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Python,
    Native,
}

impl Renderer for Backend {
    fn render(&self, request: &PlotRequest, config: &RenderConfig) -> anyhow::Result<RenderOutput> {
        match self {
            Backend::Python => PythonRenderer.render(request, config),
            Backend::Native => NativeRenderer.render(request, config),
        }
    }
}
