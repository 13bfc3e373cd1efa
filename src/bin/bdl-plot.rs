use anyhow::{Context, Result};
use bdl_plot::models::Gaussian;
use bdl_plot::{
    Backend, FigureFormat, PlotOptions, PlotRequest, Plotter, Reconstruction, RenderConfig,
    RenderOutput, Renderer,
};
use bdl_plot::{stats, storage};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bdl-plot",
    version,
    about = "Plot dictionaries, coefficients and reconstructions from Bayesian dictionary learning"
)]
struct Cli {
    #[command(flatten)]
    render: RenderArgs,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Python interpreter used to run generated scripts. Scripts are only written when omitted.
    #[arg(long, global = true)]
    python: Option<PathBuf>,
    /// Directory for generated scripts.
    #[arg(long, global = true, default_value = "scripts")]
    script_dir: PathBuf,
    /// Directory for figures.
    #[arg(long, global = true, default_value = "figures")]
    figure_dir: PathBuf,
    /// Figure format (pdf, svg or png). The native renderer cannot write pdf.
    #[arg(long, global = true)]
    format: Option<FigureFormat>,
    #[arg(long, global = true, value_enum, default_value_t = RendererKind::Python)]
    renderer: RendererKind,
    /// TrueType/OpenType font for native titles and axis labels.
    #[arg(long, global = true)]
    font: Option<PathBuf>,
    /// Width of native figures in pixels.
    #[arg(long, global = true, default_value_t = 1000)]
    width: u32,
    /// Height of native figures in pixels.
    #[arg(long, global = true, default_value_t = 800)]
    height: u32,
    /// Plot options JSON. Missing fields take their defaults.
    #[arg(long, global = true)]
    options: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RendererKind {
    Python,
    Native,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print plot options as JSON (defaults, or the file given by --options).
    Options {
        /// Turn on display for every plot category.
        #[arg(long, default_value_t = false)]
        show_all: bool,
        /// Write to a file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Dictionary and coefficient posteriors (JSON arrays of {mean, variance} rows).
    Results {
        #[arg(long)]
        dictionary: PathBuf,
        #[arg(long)]
        coefficients: Option<PathBuf>,
        #[arg(long, default_value = "")]
        subtitle: String,
    },
    /// Signals against their reconstructions (JSON array of {signal, estimate}).
    Reconstructions {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long, default_value = "")]
        subtitle: String,
        #[arg(long, default_value_t = false)]
        normalised: bool,
    },
    /// Raw signals from a headerless CSV, one signal per row.
    Signals {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long, default_value = "Signals")]
        title: String,
        #[arg(long, default_value = "")]
        subtitle: String,
    },
    /// Hinton diagram of coefficient means (JSON posterior rows).
    Sparsity {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long, default_value = "Sparsity")]
        stem: String,
    },
    /// Square images from a headerless CSV, one flattened image per row.
    Images {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long, default_value = "Images")]
        title: String,
    },
    /// Render a serialized plot request as-is.
    Render {
        #[arg(short, long)]
        request: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = render_config(&cli.render);
    let backend = match cli.render.renderer {
        RendererKind::Python => Backend::Python,
        RendererKind::Native => Backend::Native,
    };
    let options = match cli.render.options.as_ref() {
        Some(p) => storage::load_options(p)
            .with_context(|| format!("reading options from {}", p.display()))?,
        None => PlotOptions::default(),
    };
    let plotter = Plotter::new(&config, backend);

    match cli.cmd {
        Command::Options { show_all, out } => {
            let options = if show_all {
                PlotOptions::show_all()
            } else {
                options
            };
            match out {
                Some(path) => {
                    storage::save_options(&options, &path)?;
                    eprintln!("Saved options to {}", path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&options)?),
            }
        }
        Command::Results {
            dictionary,
            coefficients,
            subtitle,
        } => {
            let dictionary: Vec<Vec<Gaussian>> = storage::load_json(&dictionary)
                .with_context(|| format!("reading dictionary from {}", dictionary.display()))?;
            let coefficients: Option<Vec<Vec<Gaussian>>> = coefficients
                .map(|p| {
                    storage::load_json(&p)
                        .with_context(|| format!("reading coefficients from {}", p.display()))
                })
                .transpose()?;
            let num_bases = dictionary.len();
            let signal_width = dictionary.first().map_or(0, Vec::len);
            let outputs = plotter.plot_results(
                num_bases,
                signal_width,
                &dictionary,
                coefficients.as_deref(),
                &subtitle,
                &options,
            )?;
            outputs.iter().for_each(report);
        }
        Command::Reconstructions {
            input,
            subtitle,
            normalised,
        } => {
            let recs: Vec<Reconstruction> = storage::load_json(&input)
                .with_context(|| format!("reading reconstructions from {}", input.display()))?;
            let summary = stats::error_summary(&recs);
            log::info!(
                "{} reconstructions, RMSE min={:?} max={:?} median={:?}",
                summary.count,
                summary.min,
                summary.max,
                summary.median
            );
            let average = summary.mean.unwrap_or(f64::NAN);
            report(&plotter.plot_reconstructions(&recs, average, &subtitle, normalised, &options)?);
        }
        Command::Signals {
            input,
            title,
            subtitle,
        } => {
            let rows = storage::load_matrix_csv(&input)
                .with_context(|| format!("reading signals from {}", input.display()))?;
            report(&plotter.plot_functions(&rows, &title, &subtitle, &options)?);
        }
        Command::Sparsity { input, stem } => {
            let coefficients: Vec<Vec<Gaussian>> = storage::load_json(&input)
                .with_context(|| format!("reading coefficients from {}", input.display()))?;
            report(&plotter.sparsity_plot(&coefficients, &stem, options.coefficients.show)?);
        }
        Command::Images { input, title } => {
            let rows = storage::load_matrix_csv(&input)
                .with_context(|| format!("reading images from {}", input.display()))?;
            report(&plotter.plot_images(&rows, &title, &options.images)?);
        }
        Command::Render { request } => {
            let req: PlotRequest = storage::load_json(&request)
                .with_context(|| format!("reading plot request from {}", request.display()))?;
            report(&backend.render(&req, &config)?);
        }
    }
    Ok(())
}

fn render_config(args: &RenderArgs) -> RenderConfig {
    let native = matches!(args.renderer, RendererKind::Native);
    RenderConfig {
        python: args.python.clone(),
        script_dir: args.script_dir.clone(),
        figure_dir: args.figure_dir.clone(),
        // pdf is the script default; the native renderer falls back to svg.
        figure_format: args.format.unwrap_or(if native {
            FigureFormat::Svg
        } else {
            FigureFormat::Pdf
        }),
        width: args.width,
        height: args.height,
        font: args.font.clone(),
    }
}

fn report(output: &RenderOutput) {
    if let Some(p) = &output.script {
        eprintln!("Wrote script to {}", p.display());
    }
    if let Some(p) = &output.figure {
        eprintln!("Wrote figure to {}", p.display());
    }
}
