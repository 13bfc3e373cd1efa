//! Signal vs. reconstruction series, for 1-D signals and square images.

use crate::error::{PlotError, Result};
use crate::grid::{checked_columns, placement, reshape_square, window};
use crate::models::{Reconstruction, means, std_devs};
use crate::options::{BaseOptions, PlotType, ReconstructionOptions, Subplots};
use crate::series::{ErrorLineSeries, Placement, Series};

pub const SIGNAL_LABEL: &str = "signal";
pub const RECONSTRUCTION_LABEL: &str = "reconstruction";
pub const STD_DEV_LABEL: &str = "$\\pm$s.d.";

/// Two overlaid series per record: the raw signal, then the estimate.
///
/// All signal series come first, then all reconstruction series; record `i` of the
/// window lands in cell `placement(i, columns)` for both. The signal is drawn in
/// `original_type` (line or bar, it has no variance) and the estimate in
/// `reconstructed_type` (any per-record style).
pub fn reconstruction_series(
    reconstructions: &[Reconstruction],
    options: &ReconstructionOptions,
) -> Result<Vec<Series>> {
    let columns = checked_columns(&options.subplots, "reconstructions.subplots.columns")?;
    check_styles(options)?;
    let selected = window(reconstructions, options.skip, options.num_to_show);

    let signals = selected.iter().enumerate().map(|(i, r)| {
        let label = Some(SIGNAL_LABEL.to_string());
        let pos = placement(i, columns);
        match options.original_type {
            PlotType::Bar => Series::bar(label, r.signal.clone(), pos),
            _ => Series::line(label, r.signal.clone(), pos),
        }
    });
    let estimates = selected.iter().enumerate().map(|(i, r)| {
        let label = Some(RECONSTRUCTION_LABEL.to_string());
        let pos = placement(i, columns);
        let y = means(&r.estimate);
        match options.reconstructed_type {
            PlotType::ErrorLine => Series::ErrorLine(ErrorLineSeries {
                label,
                error_label: Some(STD_DEV_LABEL.to_string()),
                x: (0..y.len()).map(|k| k as f64).collect(),
                error: std_devs(&r.estimate),
                y,
                placement: pos,
            }),
            PlotType::Bar => Series::bar(label, y, pos),
            PlotType::ErrorBar => Series::error_bar(label, y, std_devs(&r.estimate), pos),
            _ => Series::line(label, y, pos),
        }
    });
    Ok(signals.chain(estimates).collect())
}

fn check_styles(options: &ReconstructionOptions) -> Result<()> {
    match options.original_type {
        PlotType::Line | PlotType::Bar => {}
        other => {
            return Err(PlotError::invalid(
                "reconstructions.original_type",
                format!("{other} cannot show a plain signal; use line or bar"),
            ));
        }
    }
    if options.reconstructed_type == PlotType::Hinton {
        return Err(PlotError::invalid(
            "reconstructions.reconstructed_type",
            "hinton shows a whole matrix, not one reconstruction",
        ));
    }
    Ok(())
}

/// Signal and reconstruction mean as side-by-side square heatmaps, one row per record.
pub fn image_reconstruction_series(
    reconstructions: &[Reconstruction],
    options: &BaseOptions,
) -> Vec<Series> {
    let selected = window(reconstructions, options.skip, options.num_to_show);
    let signals = selected.iter().enumerate().map(|(i, r)| {
        Series::hinton(
            Some(SIGNAL_LABEL.to_string()),
            reshape_square(&r.signal),
            Placement::new(i, 0),
        )
    });
    let estimates = selected.iter().enumerate().map(|(i, r)| {
        Series::hinton(
            Some(RECONSTRUCTION_LABEL.to_string()),
            reshape_square(&means(&r.estimate)),
            Placement::new(i, 1),
        )
    });
    signals.chain(estimates).collect()
}

/// Grid for image reconstructions: one row per shown record, signal | reconstruction.
pub fn image_reconstruction_subplots(options: &BaseOptions) -> Subplots {
    Subplots::new(options.num_to_show, 2)
}

pub fn reconstruction_title(average_error: f64, normalised: bool) -> String {
    let n = if normalised { " (normalised)" } else { "" };
    format!("Reconstructions{n}, RMSE={average_error:.4}")
}

pub fn image_reconstruction_title(average_error: f64, subtitle: &str, normalised: bool) -> String {
    let n = if normalised { "(normalised)" } else { "" };
    let sub = if subtitle.is_empty() {
        String::new()
    } else {
        format!(" {}", subtitle.replace('_', " "))
    };
    format!("Reconstructions {n}{sub}, avg. error={average_error:.4}")
}

/// File stem shared by both reconstruction layouts, e.g. `Reconstructions_(normalised)_run_1`.
///
/// Both layouts use the same stem, with no separator between `Reconstructions_` and
/// `(normalised)`.
pub fn reconstruction_stem(subtitle: &str, normalised: bool) -> String {
    let n = if normalised { "(normalised)" } else { "" };
    format!("Reconstructions_{n}{}", crate::config::subtitle_suffix(subtitle))
}
