use crate::models::{HasMean, Reconstruction};
use serde::{Deserialize, Serialize};

/// Root-mean-square error between a signal and the posterior means of its estimate.
///
/// Compares the common prefix; `None` when there is nothing to compare.
pub fn rmse<T: HasMean>(signal: &[f64], estimate: &[T]) -> Option<f64> {
    let n = signal.len().min(estimate.len());
    if n == 0 {
        return None;
    }
    let sum_sq: f64 = signal
        .iter()
        .zip(estimate)
        .map(|(s, e)| (s - e.mean()).powi(2))
        .sum();
    Some((sum_sq / n as f64).sqrt())
}

/// Mean of the per-record RMSE over all comparable records.
pub fn average_rmse(reconstructions: &[Reconstruction]) -> Option<f64> {
    let errors: Vec<f64> = reconstructions
        .iter()
        .filter_map(|r| rmse(&r.signal, &r.estimate))
        .collect();
    if errors.is_empty() {
        None
    } else {
        Some(errors.iter().sum::<f64>() / errors.len() as f64)
    }
}

/// Summary of reconstruction quality across a set of records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorSummary {
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

pub fn error_summary(reconstructions: &[Reconstruction]) -> ErrorSummary {
    let mut vals: Vec<f64> = reconstructions
        .iter()
        .filter_map(|r| rmse(&r.signal, &r.estimate))
        .collect();
    vals.sort_by(|a, b| a.total_cmp(b));
    let count = vals.len();
    let mean = if count > 0 {
        Some(vals.iter().sum::<f64>() / count as f64)
    } else {
        None
    };
    let median = if count == 0 {
        None
    } else if count % 2 == 1 {
        Some(vals[count / 2])
    } else {
        Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
    };
    ErrorSummary {
        count,
        min: vals.first().copied(),
        max: vals.last().copied(),
        mean,
        median,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gaussian;

    #[test]
    fn rmse_of_exact_estimate_is_zero() {
        let r = Reconstruction::from_point_estimates(vec![1.0, 2.0], &[1.0, 2.0]);
        assert_eq!(rmse(&r.signal, &r.estimate), Some(0.0));
    }

    #[test]
    fn average_and_summary() {
        let recs = vec![
            Reconstruction::from_point_estimates(vec![0.0, 0.0], &[1.0, 1.0]),
            Reconstruction::from_point_estimates(vec![0.0, 0.0], &[3.0, 3.0]),
            Reconstruction {
                signal: vec![],
                estimate: vec![Gaussian::new(0.0, 1.0)],
            },
        ];
        assert_eq!(average_rmse(&recs), Some(2.0));
        let s = error_summary(&recs);
        assert_eq!(s.count, 2);
        assert_eq!(s.min, Some(1.0));
        assert_eq!(s.max, Some(3.0));
        assert_eq!(s.median, Some(2.0));
        assert_eq!(average_rmse(&[]), None);
    }
}
