//! Series builder: windowing, style dispatch and grid placement.
//!
//! Rows of the input are items (atoms, coefficient vectors, signals); columns are
//! sample positions. A window of `num_to_show` items after `skip` becomes one series
//! each, placed row-major on the options' subplot grid. `Hinton` bypasses per-item
//! construction and emits the full matrix as a single series.

use crate::error::{PlotError, Result};
use crate::grid::{checked_columns, placement, window};
use crate::models::{HasMean, HasVariance, mean_matrix, means, std_devs};
use crate::options::{BaseOptions, PlotType};
use crate::series::{Placement, Series};

/// Build series from plain values.
///
/// Error styles are rejected: scalar input has no spread to show.
pub fn create_series(
    data: &[Vec<f64>],
    labels: Option<&[String]>,
    options: &BaseOptions,
) -> Result<Vec<Series>> {
    let columns = checked_columns(&options.subplots, "options.subplots.columns")?;
    let selected = window(data, options.skip, options.num_to_show);
    log::debug!(
        "building {} {} series from {} items (skip {})",
        selected.len(),
        options.plot_type,
        data.len(),
        options.skip
    );

    let series = match options.plot_type {
        PlotType::Line => per_item(selected, labels, columns, |label, row, pos| {
            Series::line(label, row.clone(), pos)
        }),
        PlotType::Bar => per_item(selected, labels, columns, |label, row, pos| {
            Series::bar(label, row.clone(), pos)
        }),
        PlotType::Hinton => vec![Series::hinton(None, data.to_vec(), Placement::default())],
        PlotType::ErrorLine | PlotType::ErrorBar => {
            return Err(PlotError::invalid(
                "options.plot_type",
                format!(
                    "{} needs posterior input; plain values carry no variance",
                    options.plot_type
                ),
            ));
        }
    };
    Ok(series)
}

/// Build series from posterior distributions.
///
/// `Line` and `Bar` show means only; the error styles add one standard deviation.
pub fn create_posterior_series<T>(
    data: &[Vec<T>],
    labels: Option<&[String]>,
    options: &BaseOptions,
) -> Result<Vec<Series>>
where
    T: HasMean + HasVariance,
{
    let columns = checked_columns(&options.subplots, "options.subplots.columns")?;
    let selected = window(data, options.skip, options.num_to_show);
    log::debug!(
        "building {} {} posterior series from {} items (skip {})",
        selected.len(),
        options.plot_type,
        data.len(),
        options.skip
    );

    let series = match options.plot_type {
        PlotType::Line => per_item(selected, labels, columns, |label, row, pos| {
            Series::line(label, means(row), pos)
        }),
        PlotType::ErrorLine => per_item(selected, labels, columns, |label, row, pos| {
            Series::error_line(label, means(row), std_devs(row), pos)
        }),
        PlotType::Bar => per_item(selected, labels, columns, |label, row, pos| {
            Series::bar(label, means(row), pos)
        }),
        PlotType::ErrorBar => per_item(selected, labels, columns, |label, row, pos| {
            Series::error_bar(label, means(row), std_devs(row), pos)
        }),
        PlotType::Hinton => vec![Series::hinton(
            None,
            mean_matrix(data),
            Placement::default(),
        )],
    };
    Ok(series)
}

fn per_item<R, F>(selected: &[R], labels: Option<&[String]>, columns: usize, make: F) -> Vec<Series>
where
    F: Fn(Option<String>, &R, Placement) -> Series,
{
    selected
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let label = labels.and_then(|l| l.get(i)).cloned();
            make(label, row, placement(i, columns))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gaussian;
    use crate::options::Subplots;

    fn opts(plot_type: PlotType, skip: usize, n: usize, columns: usize) -> BaseOptions {
        BaseOptions {
            show: false,
            skip,
            num_to_show: n,
            subplots: Subplots::new(4, columns),
            plot_type,
        }
    }

    #[test]
    fn zero_columns_is_rejected() {
        let data = vec![vec![1.0]];
        let err = create_series(&data, None, &opts(PlotType::Line, 0, 1, 0)).unwrap_err();
        assert!(err.to_string().contains("subplots.columns"));
    }

    #[test]
    fn labels_follow_window_position() {
        let data = vec![vec![1.0], vec![2.0], vec![3.0]];
        let labels = vec!["a".to_string(), "b".to_string()];
        let s = create_series(&data, Some(labels.as_slice()), &opts(PlotType::Bar, 1, 3, 1)).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s[0].label(), Some("a"));
        assert_eq!(s[1].label(), Some("b"));
        assert_eq!(s[1].primary_values(), vec![3.0]);
    }

    #[test]
    fn posterior_hinton_uses_full_mean_matrix() {
        let data = vec![
            vec![Gaussian::new(1.0, 1.0), Gaussian::new(2.0, 1.0)],
            vec![Gaussian::new(3.0, 1.0), Gaussian::new(4.0, 1.0)],
        ];
        let s = create_posterior_series(&data, None, &opts(PlotType::Hinton, 1, 1, 2)).unwrap();
        assert_eq!(s.len(), 1);
        match &s[0] {
            Series::Hinton(m) => assert_eq!(m.values, vec![vec![1.0, 2.0], vec![3.0, 4.0]]),
            other => panic!("expected hinton, got {}", other.kind_name()),
        }
    }
}
