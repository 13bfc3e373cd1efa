//! bdl_plot
//!
//! Plotting layer for Bayesian dictionary learning. Turns posterior dictionaries,
//! coefficients and reconstructions into figures. Pairs with the `bdl-plot` CLI.
//!
//! ### Features
//! - Window, style and lay out items on a subplot grid ([`builder`], [`grid`])
//! - Signal vs. reconstruction panels, for 1-D signals and square images
//! - matplotlib script output (optionally executed) or direct SVG/PNG via plotters
//! - Options and inputs as JSON/CSV
//!
//! ### Example
//! ```no_run
//! use bdl_plot::{Backend, Gaussian, PlotOptions, Plotter, RenderConfig};
//!
//! let config = RenderConfig::default();
//! let plotter = Plotter::new(&config, Backend::Native);
//! let dictionary = vec![vec![Gaussian::new(0.0, 1.0), Gaussian::new(1.0, 0.5)]; 4];
//! plotter.plot_results(4, 2, &dictionary, None, "run 1", &PlotOptions::default())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod grid;
pub mod models;
pub mod options;
pub mod plotting;
pub mod reconstruction;
pub mod render;
pub mod request;
pub mod series;
pub mod stats;
pub mod storage;

pub use config::{FigureFormat, RenderConfig};
pub use error::PlotError;
pub use models::{Gaussian, HasMean, HasVariance, Reconstruction, VectorGaussian};
pub use options::{BaseOptions, PlotOptions, PlotType, ReconstructionOptions, Subplots};
pub use plotting::Plotter;
pub use render::{Backend, NativeRenderer, PythonRenderer};
pub use request::{PlotRequest, RenderOutput, Renderer};
pub use series::{Placement, Series};
