//! High-level plot operations for dictionary-learning results.
//!
//! Each method assembles one or more [`PlotRequest`]s from model output and hands
//! them to the configured [`Renderer`]. Builders live in [`crate::builder`] and
//! [`crate::reconstruction`]; nothing here touches files directly.

use crate::builder::{create_posterior_series, create_series};
use crate::config::{RenderConfig, join_title, subtitle_suffix};
use crate::grid::{auto_subplots, checked_columns, placement, reshape_square, window};
use crate::models::{Gaussian, HasMean, HasVariance, Reconstruction, VectorGaussian, mean_matrix, transpose};
use crate::options::{BaseOptions, PlotOptions, Subplots};
use crate::reconstruction::{
    image_reconstruction_series, image_reconstruction_subplots, image_reconstruction_title,
    reconstruction_series, reconstruction_stem, reconstruction_title,
};
use crate::request::{PlotRequest, RenderOutput, Renderer};
use crate::series::{LineSeries, Placement, ScatterSeries, Series};
use anyhow::Result;

/// Color expression that advances the python palette cycle.
const NEXT_COLOR: &str = "next(palette)";
/// Dictionaries above this size are cut down to a 4×4 page.
const MAX_DICTIONARY_SHOWN: usize = 16;

pub struct Plotter<'a, R: Renderer> {
    config: &'a RenderConfig,
    renderer: R,
}

impl<'a, R: Renderer> Plotter<'a, R> {
    pub fn new(config: &'a RenderConfig, renderer: R) -> Self {
        Self { config, renderer }
    }

    pub fn config(&self) -> &RenderConfig {
        self.config
    }

    fn submit(&self, request: PlotRequest) -> Result<RenderOutput> {
        log::debug!(
            "rendering `{}` ({} series, {}x{} grid)",
            request.stem,
            request.series.len(),
            request.subplots.rows,
            request.subplots.columns
        );
        self.renderer.render(&request, self.config)
    }

    /// Single line of `y` against `x`.
    #[allow(clippy::too_many_arguments)]
    pub fn plot_xy(
        &self,
        x: &[f64],
        y: &[f64],
        title: &str,
        subtitle: &str,
        x_label: &str,
        y_label: &str,
        show: bool,
    ) -> Result<RenderOutput> {
        let series = Series::Line(LineSeries {
            label: None,
            x: x.to_vec(),
            y: y.to_vec(),
            color: None,
            placement: Placement::default(),
        });
        let request = PlotRequest::new(title, vec![series])
            .title(join_title(title, subtitle))
            .labels(x_label, y_label)
            .show(show)
            .tight(true);
        self.submit(request)
    }

    /// Several labelled lines on one axis, drawn in the given order.
    pub fn plot_named(
        &self,
        lines: &[(String, Vec<f64>)],
        title: &str,
        subtitle: &str,
        x_label: &str,
        y_label: &str,
        show: bool,
    ) -> Result<RenderOutput> {
        let series = lines
            .iter()
            .map(|(label, y)| Series::line(Some(label.clone()), y.clone(), Placement::default()))
            .collect();
        let request = PlotRequest::new(title, series)
            .title(join_title(title, subtitle))
            .labels(x_label, y_label)
            .show(show)
            .tight(true);
        self.submit(request)
    }

    /// Two lines sharing the x axis, the second on its own y axis.
    #[allow(clippy::too_many_arguments)]
    pub fn twin_plot(
        &self,
        y1: &[f64],
        y2: &[f64],
        title: &str,
        x_label: &str,
        y1_label: &str,
        y2_label: &str,
        show: bool,
    ) -> Result<RenderOutput> {
        let first = colored_line(None, index_axis(y1.len()), y1.to_vec());
        let second = colored_line(None, index_axis(y2.len()), y2.to_vec());
        let twin = PlotRequest::new(title, vec![second]).labels(x_label, y2_label);
        let request = PlotRequest::new(title, vec![first])
            .title(title)
            .labels(x_label, y1_label)
            .show(show)
            .tight(true)
            .twin(twin);
        self.submit(request)
    }

    /// Hinton diagram of coefficient means: bases along x, signals along y.
    pub fn sparsity_plot<T: HasMean>(
        &self,
        coefficients: &[Vec<T>],
        file_stem: &str,
        show: bool,
    ) -> Result<RenderOutput> {
        let series = Series::hinton(None, mean_matrix(coefficients), Placement::default());
        let request = PlotRequest::new(file_stem, vec![series])
            .labels("bases", "signals")
            .show(show)
            .grid(false)
            .tight(true);
        self.submit(request)
    }

    /// Raw signals, or square images when `options.is_image` is set.
    pub fn plot_functions(
        &self,
        functions: &[Vec<f64>],
        title: &str,
        subtitle: &str,
        options: &PlotOptions,
    ) -> Result<RenderOutput> {
        if options.is_image {
            return self.plot_images(functions, title, &options.images);
        }
        let signals = &options.signals;
        let series = create_series(functions, None, signals)?;
        let request = PlotRequest::new(title, series)
            .title(join_title(title, subtitle))
            .labels("x", "y")
            .subplots(signals.subplots)
            .show(signals.show);
        self.submit(request)
    }

    /// Points from the first two columns of `data`, colored by class label.
    ///
    /// Rows with fewer than two values are skipped.
    pub fn scatter_plot(
        &self,
        data: &[Vec<f64>],
        labels: &[i64],
        title: &str,
        subtitle: &str,
    ) -> Result<RenderOutput> {
        let (x, y): (Vec<f64>, Vec<f64>) = data
            .iter()
            .filter_map(|row| Some((*row.first()?, *row.get(1)?)))
            .unzip();
        let colors = (!labels.is_empty()).then(|| labels.to_vec());
        let series = Series::Scatter(ScatterSeries {
            label: None,
            x,
            y,
            colors,
            placement: Placement::default(),
        });
        let request = PlotRequest::new(title, vec![series])
            .title(join_title(title, subtitle))
            .labels("x", "y")
            .tight(true);
        self.submit(request)
    }

    /// Dictionary and (optionally) coefficient posteriors.
    ///
    /// The dictionary grid is sized from `num_bases`; image dictionaries are shown as
    /// square heatmaps of `signal_width` pixels each. Coefficients use a 3×2 page.
    pub fn plot_results<T>(
        &self,
        num_bases: usize,
        signal_width: usize,
        dictionary: &[Vec<T>],
        coefficients: Option<&[Vec<T>]>,
        subtitle: &str,
        options: &PlotOptions,
    ) -> Result<Vec<RenderOutput>>
    where
        T: HasMean + HasVariance,
    {
        self.plot_results_named(
            num_bases,
            signal_width,
            dictionary,
            coefficients,
            ("Dictionary", "Coefficients"),
            subtitle,
            options,
        )
    }

    /// [`plot_results`](Self::plot_results) once per class, with class-tagged stems.
    ///
    /// Classes without a label are numbered.
    #[allow(clippy::too_many_arguments)]
    pub fn plot_class_results<T>(
        &self,
        num_bases: usize,
        signal_width: usize,
        dictionaries: &[Vec<Vec<T>>],
        coefficients: Option<&[Vec<Vec<T>>]>,
        subtitle: &str,
        options: &PlotOptions,
        labels: Option<&[String]>,
    ) -> Result<Vec<RenderOutput>>
    where
        T: HasMean + HasVariance,
    {
        let mut outputs = Vec::new();
        for (class, dictionary) in dictionaries.iter().enumerate() {
            let label = labels
                .and_then(|l| l.get(class))
                .cloned()
                .unwrap_or_else(|| class.to_string());
            let dictionary_title = format!("Dictionary_class={label}");
            let coefficients_title = format!("Coefficients_class={label}");
            let class_coefficients = coefficients
                .and_then(|c| c.get(class))
                .map(Vec::as_slice);
            outputs.extend(self.plot_results_named(
                num_bases,
                signal_width,
                dictionary,
                class_coefficients,
                (dictionary_title.as_str(), coefficients_title.as_str()),
                subtitle,
                options,
            )?);
        }
        Ok(outputs)
    }

    /// Results whose dictionary and coefficients come as one vector posterior per basis
    /// and per signal. Each is replaced by its independent approximation; the dictionary
    /// is transposed so rows are bases.
    pub fn plot_vector_results(
        &self,
        num_bases: usize,
        signal_width: usize,
        dictionary: &[VectorGaussian],
        coefficients: &[VectorGaussian],
        subtitle: &str,
        options: &PlotOptions,
    ) -> Result<Vec<RenderOutput>> {
        let dictionary = transpose(&independent(dictionary));
        let coefficients = independent(coefficients);
        self.plot_results(
            num_bases,
            signal_width,
            &dictionary,
            Some(coefficients.as_slice()),
            subtitle,
            options,
        )
    }

    /// Scalar dictionary posteriors with vector coefficient posteriors.
    pub fn plot_mixed_results(
        &self,
        num_bases: usize,
        signal_width: usize,
        dictionary: &[Vec<Gaussian>],
        coefficients: &[VectorGaussian],
        subtitle: &str,
        options: &PlotOptions,
    ) -> Result<Vec<RenderOutput>> {
        let coefficients = independent(coefficients);
        self.plot_results(
            num_bases,
            signal_width,
            dictionary,
            Some(coefficients.as_slice()),
            subtitle,
            options,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn plot_results_named<T>(
        &self,
        num_bases: usize,
        signal_width: usize,
        dictionary: &[Vec<T>],
        coefficients: Option<&[Vec<T>]>,
        (dictionary_title, coefficients_title): (&str, &str),
        subtitle: &str,
        options: &PlotOptions,
    ) -> Result<Vec<RenderOutput>>
    where
        T: HasMean + HasVariance,
    {
        let grid = auto_subplots(num_bases);
        let mut outputs = Vec::with_capacity(2);

        let dictionary_options = BaseOptions {
            subplots: grid,
            num_to_show: if options.is_image {
                1
            } else {
                num_bases.min(MAX_DICTIONARY_SHOWN)
            },
            ..options.dictionary.clone()
        };
        outputs.push(if options.is_image {
            self.plot_image_posteriors(dictionary, signal_width, dictionary_title, &dictionary_options)?
        } else {
            self.plot_posteriors(dictionary, dictionary_title, subtitle, &dictionary_options)?
        });

        if let Some(coefficients) = coefficients {
            let coefficient_options = BaseOptions {
                subplots: Subplots {
                    rows: 3,
                    columns: 2,
                    ..grid
                },
                num_to_show: 6,
                ..options.coefficients.clone()
            };
            outputs.push(self.plot_posteriors(
                coefficients,
                coefficients_title,
                subtitle,
                &coefficient_options,
            )?);
        }
        Ok(outputs)
    }

    /// Signals against their reconstructions, as lines or as image pairs.
    pub fn plot_reconstructions(
        &self,
        reconstructions: &[Reconstruction],
        average_error: f64,
        subtitle: &str,
        normalised: bool,
        options: &PlotOptions,
    ) -> Result<RenderOutput> {
        let recon = &options.reconstructions;
        let stem = reconstruction_stem(subtitle, normalised);

        let request = if options.is_image {
            let title = image_reconstruction_title(average_error, subtitle, normalised);
            log::info!("{title}");
            PlotRequest::new(stem, image_reconstruction_series(reconstructions, recon))
                .title(title)
                .subplots(image_reconstruction_subplots(recon))
                .grid(false)
        } else {
            PlotRequest::new(stem, reconstruction_series(reconstructions, recon)?)
                .title(reconstruction_title(average_error, normalised))
                .labels("x", "y")
                .subplots(recon.subplots)
        };
        self.submit(request.show(recon.show))
    }

    /// One window of posterior rows, titled and named after the window.
    pub fn plot_posteriors<T>(
        &self,
        posteriors: &[Vec<T>],
        title: &str,
        subtitle: &str,
        options: &BaseOptions,
    ) -> Result<RenderOutput>
    where
        T: HasMean + HasVariance,
    {
        let series = create_posterior_series(posteriors, None, options)?;
        let selection = options.selection();
        let request = PlotRequest::new(
            format!("{title}{}_{selection}", subtitle_suffix(subtitle)),
            series,
        )
        .title(format!("{title} {selection}"))
        .labels("x", "y")
        .subplots(options.subplots)
        .show(options.show);
        self.submit(request)
    }

    /// Reconstruction error and log evidence against the number of bases.
    pub fn plot_errors_with_evidence(
        &self,
        bases: &[f64],
        errors: &[f64],
        evidence: &[f64],
        show: bool,
    ) -> Result<RenderOutput> {
        let error_line = colored_line(
            Some("Reconstruction error"),
            bases.to_vec(),
            errors.to_vec(),
        );
        let evidence_line = colored_line(Some("Evidence"), bases.to_vec(), evidence.to_vec());
        let twin = PlotRequest::new("EffectOfBases", vec![evidence_line])
            .labels("#bases", "Log Evidence");
        let request = PlotRequest::new("EffectOfBases", vec![error_line])
            .title("Effect of number of bases")
            .labels("#bases", "Reconstruction error")
            .show(show)
            .twin(twin);
        self.submit(request)
    }

    /// A flat vector as one square image.
    pub fn plot_image(&self, flat: &[f64], show: bool) -> Result<RenderOutput> {
        let series = Series::matrix(None, reshape_square(flat), Placement::default());
        let request = PlotRequest::new("Image", vec![series])
            .show(show)
            .grid(false);
        self.submit(request)
    }

    /// One square image per row of `images`, laid out on the options' grid.
    pub fn plot_images(
        &self,
        images: &[Vec<f64>],
        title: &str,
        options: &BaseOptions,
    ) -> Result<RenderOutput> {
        let columns = checked_columns(&options.subplots, "images.subplots.columns")?;
        let series = window(images, options.skip, options.num_to_show)
            .iter()
            .enumerate()
            .map(|(i, flat)| Series::matrix(None, reshape_square(flat), placement(i, columns)))
            .collect();
        let request = PlotRequest::new(title, series)
            .title(title)
            .subplots(options.subplots)
            .show(options.show)
            .grid(false);
        self.submit(request)
    }

    /// Posterior means of the first `rows × columns` items, each cut to `image_width`
    /// values and drawn as a square image.
    pub fn plot_image_posteriors<T: HasMean>(
        &self,
        images: &[Vec<T>],
        image_width: usize,
        title: &str,
        options: &BaseOptions,
    ) -> Result<RenderOutput> {
        let cells = options.subplots.cells();
        let flat: Vec<Vec<f64>> = mean_matrix(window(images, 0, cells))
            .into_iter()
            .map(|mut row| {
                row.truncate(image_width);
                row
            })
            .collect();
        let page = BaseOptions {
            skip: 0,
            num_to_show: cells,
            ..options.clone()
        };
        self.plot_images(&flat, title, &page)
    }
}

fn colored_line(label: Option<&str>, x: Vec<f64>, y: Vec<f64>) -> Series {
    Series::Line(LineSeries {
        label: label.map(str::to_string),
        x,
        y,
        color: Some(NEXT_COLOR.to_string()),
        placement: Placement::default(),
    })
}

fn index_axis(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

fn independent(posteriors: &[VectorGaussian]) -> Vec<Vec<Gaussian>> {
    posteriors
        .iter()
        .map(VectorGaussian::independent_approximation)
        .collect()
}
