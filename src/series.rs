//! Renderable series descriptors.
//!
//! A [`Series`] is one trace with a target subplot cell. Renderers match on the
//! variant exhaustively, so adding a style is a compile-time change everywhere.

use serde::{Deserialize, Serialize};

/// Zero-based subplot cell, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
}

impl Placement {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub label: Option<String>,
    /// Independent variable; sample index when built from a row of values.
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Explicit color expression for the script backend (e.g. a palette cycle).
    pub color: Option<String>,
    pub placement: Placement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorLineSeries {
    pub label: Option<String>,
    pub error_label: Option<String>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Half-width of the band around `y` (one standard deviation).
    pub error: Vec<f64>,
    pub placement: Placement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub label: Option<String>,
    pub categories: Vec<String>,
    pub values: Vec<f64>,
    pub error: Option<Vec<f64>>,
    pub placement: Placement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    pub label: Option<String>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Per-point class index used as the color value.
    pub colors: Option<Vec<i64>>,
    pub placement: Placement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixSeries {
    pub label: Option<String>,
    pub values: Vec<Vec<f64>>,
    pub placement: Placement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Series {
    Line(LineSeries),
    ErrorLine(ErrorLineSeries),
    /// Plain bars (`error` is `None`).
    Bar(BarSeries),
    /// Bars with error whiskers (`error` is `Some`).
    ErrorBar(BarSeries),
    Scatter(ScatterSeries),
    /// Intensity image.
    Matrix(MatrixSeries),
    /// Signed magnitude diagram.
    Hinton(MatrixSeries),
}

impl Series {
    pub fn line(label: Option<String>, y: Vec<f64>, placement: Placement) -> Self {
        Series::Line(LineSeries {
            label,
            x: index_axis(y.len()),
            y,
            color: None,
            placement,
        })
    }

    pub fn error_line(
        label: Option<String>,
        y: Vec<f64>,
        error: Vec<f64>,
        placement: Placement,
    ) -> Self {
        Series::ErrorLine(ErrorLineSeries {
            label,
            error_label: None,
            x: index_axis(y.len()),
            y,
            error,
            placement,
        })
    }

    pub fn bar(label: Option<String>, values: Vec<f64>, placement: Placement) -> Self {
        Series::Bar(BarSeries {
            label,
            categories: index_categories(values.len()),
            values,
            error: None,
            placement,
        })
    }

    pub fn error_bar(
        label: Option<String>,
        values: Vec<f64>,
        error: Vec<f64>,
        placement: Placement,
    ) -> Self {
        Series::ErrorBar(BarSeries {
            label,
            categories: index_categories(values.len()),
            values,
            error: Some(error),
            placement,
        })
    }

    pub fn matrix(label: Option<String>, values: Vec<Vec<f64>>, placement: Placement) -> Self {
        Series::Matrix(MatrixSeries {
            label,
            values,
            placement,
        })
    }

    pub fn hinton(label: Option<String>, values: Vec<Vec<f64>>, placement: Placement) -> Self {
        Series::Hinton(MatrixSeries {
            label,
            values,
            placement,
        })
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Series::Line(s) => s.label.as_deref(),
            Series::ErrorLine(s) => s.label.as_deref(),
            Series::Bar(s) | Series::ErrorBar(s) => s.label.as_deref(),
            Series::Scatter(s) => s.label.as_deref(),
            Series::Matrix(s) | Series::Hinton(s) => s.label.as_deref(),
        }
    }

    pub fn placement(&self) -> Placement {
        match self {
            Series::Line(s) => s.placement,
            Series::ErrorLine(s) => s.placement,
            Series::Bar(s) | Series::ErrorBar(s) => s.placement,
            Series::Scatter(s) => s.placement,
            Series::Matrix(s) | Series::Hinton(s) => s.placement,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Series::Line(_) => "line",
            Series::ErrorLine(_) => "error_line",
            Series::Bar(_) => "bar",
            Series::ErrorBar(_) => "error_bar",
            Series::Scatter(_) => "scatter",
            Series::Matrix(_) => "matrix",
            Series::Hinton(_) => "hinton",
        }
    }

    /// Values plotted on the dependent axis (means for posterior input).
    pub fn primary_values(&self) -> Vec<f64> {
        match self {
            Series::Line(s) => s.y.clone(),
            Series::ErrorLine(s) => s.y.clone(),
            Series::Bar(s) | Series::ErrorBar(s) => s.values.clone(),
            Series::Scatter(s) => s.y.clone(),
            Series::Matrix(s) | Series::Hinton(s) => s.values.concat(),
        }
    }

    /// Uncertainty values, if the variant carries any.
    pub fn error_values(&self) -> Option<&[f64]> {
        match self {
            Series::ErrorLine(s) => Some(&s.error),
            Series::Bar(s) | Series::ErrorBar(s) => s.error.as_deref(),
            _ => None,
        }
    }
}

fn index_axis(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

fn index_categories(n: usize) -> Vec<String> {
    (0..n).map(|i| i.to_string()).collect()
}
