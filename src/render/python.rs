//! matplotlib script backend.
//!
//! Each request becomes a standalone Python script. When an interpreter is
//! configured the script is executed, which writes the figure file (and opens a
//! window when the request asks to be shown).

use super::style::office_hex;
use crate::config::RenderConfig;
use crate::error::PlotError;
use crate::request::{PlotRequest, RenderOutput, Renderer};
use crate::series::Series;
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::process::Command;

const PREAMBLE: &str = r#"import itertools

import matplotlib
"#;

const HELPERS: &str = r#"import matplotlib.pyplot as plt
import numpy as np

palette = itertools.cycle(plt.rcParams["axes.prop_cycle"].by_key()["color"])


def hinton(ax, matrix):
    matrix = np.asarray(matrix, dtype=float)
    peak = np.abs(matrix).max() if matrix.size else 0.0
    max_weight = 2 ** np.ceil(np.log2(peak)) if peak > 0 else 1.0
    ax.patch.set_facecolor("gray")
    ax.set_aspect("equal", "box")
    ax.xaxis.set_major_locator(plt.NullLocator())
    ax.yaxis.set_major_locator(plt.NullLocator())
    for (y, x), w in np.ndenumerate(matrix):
        color = "white" if w > 0 else "black"
        size = np.sqrt(abs(w) / max_weight)
        ax.add_patch(plt.Rectangle([x - size / 2, y - size / 2], size, size,
                                   facecolor=color, edgecolor=color))
    ax.set_xlim(-0.5, matrix.shape[1] - 0.5 if matrix.ndim == 2 else 0.5)
    ax.set_ylim(-0.5, matrix.shape[0] - 0.5)
    ax.invert_yaxis()

"#;

/// Writes matplotlib scripts and optionally runs them.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonRenderer;

impl Renderer for PythonRenderer {
    fn render(&self, request: &PlotRequest, config: &RenderConfig) -> Result<RenderOutput> {
        let script_path = config.script_path(&request.stem);
        let figure_path = config.figure_path(&request.stem);

        fs::create_dir_all(&config.script_dir).with_context(|| {
            format!("creating script directory {}", config.script_dir.display())
        })?;
        fs::create_dir_all(&config.figure_dir).with_context(|| {
            format!("creating figure directory {}", config.figure_dir.display())
        })?;

        let script = build_script(request, &figure_path);
        fs::write(&script_path, script)
            .with_context(|| format!("writing {}", script_path.display()))?;
        log::info!("wrote plotting script {}", script_path.display());

        let figure = match &config.python {
            Some(python) => {
                run_script(python, &script_path)?;
                log::info!("wrote figure {}", figure_path.display());
                Some(figure_path)
            }
            None => None,
        };

        Ok(RenderOutput {
            script: Some(script_path),
            figure,
        })
    }
}

fn run_script(python: &Path, script: &Path) -> Result<()> {
    log::debug!("running {} {}", python.display(), script.display());
    let status = Command::new(python)
        .arg(script)
        .status()
        .with_context(|| format!("launching {}", python.display()))?;
    if !status.success() {
        return Err(PlotError::Interpreter {
            program: python.display().to_string(),
            status,
        }
        .into());
    }
    Ok(())
}

/// Full script text for `request`, saving the figure to `figure_path`.
pub fn build_script(request: &PlotRequest, figure_path: &Path) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "# Generated by bdl-plot {} on {}",
        env!("CARGO_PKG_VERSION"),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    out.push_str(PREAMBLE);
    if !request.show {
        out.push_str("matplotlib.use(\"Agg\")\n");
    }
    out.push_str(HELPERS);

    let rows = request.subplots.rows.max(1);
    let columns = request.subplots.columns.max(1);
    let _ = writeln!(
        out,
        "fig, axes = plt.subplots({rows}, {columns}, sharex={}, sharey={}, squeeze=False)",
        py_bool(request.subplots.share_x),
        py_bool(request.subplots.share_y)
    );

    let mut legend_cells = BTreeSet::new();
    for (idx, series) in request.series.iter().enumerate() {
        let p = series.placement();
        if p.row >= rows || p.column >= columns {
            log::warn!(
                "{} series at ({}, {}) lies outside the {rows}x{columns} grid and is skipped",
                series.kind_name(),
                p.row,
                p.column
            );
            continue;
        }
        let ax = format!("axes[{}][{}]", p.row, p.column);
        emit_series(&mut out, &ax, series, idx);
        // Image panels use their label as the panel title instead.
        if series.label().is_some() && !matches!(series, Series::Matrix(_) | Series::Hinton(_)) {
            legend_cells.insert(ax);
        }
    }
    for ax in &legend_cells {
        let _ = writeln!(out, "{ax}.legend()");
    }

    if let Some(title) = &request.title {
        let _ = writeln!(out, "fig.suptitle({})", py_str(title));
    }
    let single = rows * columns == 1;
    if let Some(x) = &request.x_label {
        if single {
            let _ = writeln!(out, "axes[0][0].set_xlabel({})", py_str(x));
        } else {
            let _ = writeln!(out, "fig.supxlabel({})", py_str(x));
        }
    }
    if let Some(y) = &request.y_label {
        if single {
            let _ = writeln!(out, "axes[0][0].set_ylabel({})", py_str(y));
        } else {
            let _ = writeln!(out, "fig.supylabel({})", py_str(y));
        }
    }
    let _ = writeln!(
        out,
        "for ax in axes.flat:\n    ax.grid({})",
        py_bool(request.grid)
    );

    if let Some(twin) = &request.twin {
        out.push_str("twin_ax = axes[0][0].twinx()\n");
        for (idx, series) in twin.series.iter().enumerate() {
            emit_series(&mut out, "twin_ax", series, request.series.len() + idx);
        }
        if let Some(y) = &twin.y_label {
            let _ = writeln!(out, "twin_ax.set_ylabel({})", py_str(y));
        }
        if twin.series.iter().any(|s| s.label().is_some()) {
            out.push_str("twin_ax.legend(loc=\"upper right\")\n");
        }
    }

    if request.tight {
        out.push_str("fig.tight_layout()\n");
    }
    let _ = writeln!(
        out,
        "fig.savefig({})",
        py_str(&figure_path.to_string_lossy())
    );
    if request.show {
        out.push_str("plt.show()\n");
    }
    out
}

fn emit_series(out: &mut String, ax: &str, series: &Series, idx: usize) {
    match series {
        Series::Line(s) => {
            let color = s.color.clone().unwrap_or_else(|| py_str(&office_hex(idx)));
            let _ = writeln!(
                out,
                "{ax}.plot({}, {}, color={color}{})",
                py_list(&s.x),
                py_list(&s.y),
                label_kw(s.label.as_deref())
            );
        }
        Series::ErrorLine(s) => {
            let color = py_str(&office_hex(idx));
            let _ = writeln!(out, "_x = np.array({})", py_list(&s.x));
            let _ = writeln!(out, "_y = np.array({})", py_list(&s.y));
            let _ = writeln!(out, "_e = np.array({})", py_list(&s.error));
            let _ = writeln!(
                out,
                "{ax}.plot(_x, _y, color={color}{})",
                label_kw(s.label.as_deref())
            );
            let _ = writeln!(
                out,
                "{ax}.fill_between(_x, _y - _e, _y + _e, color={color}, alpha=0.3{})",
                label_kw(s.error_label.as_deref())
            );
        }
        Series::Bar(s) | Series::ErrorBar(s) => {
            let color = py_str(&office_hex(idx));
            let yerr = match &s.error {
                Some(e) => format!(", yerr={}, capsize=3", py_list(e)),
                None => String::new(),
            };
            let _ = writeln!(
                out,
                "{ax}.bar(range({}), {}, tick_label={}, color={color}{yerr}{})",
                s.values.len(),
                py_list(&s.values),
                py_str_list(&s.categories),
                label_kw(s.label.as_deref())
            );
        }
        Series::Scatter(s) => {
            let colors = match &s.colors {
                Some(c) => format!(
                    ", c=[{}]",
                    c.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
                ),
                None => String::new(),
            };
            let _ = writeln!(
                out,
                "{ax}.scatter({}, {}{colors}{})",
                py_list(&s.x),
                py_list(&s.y),
                label_kw(s.label.as_deref())
            );
        }
        Series::Matrix(s) => {
            let _ = writeln!(
                out,
                "{ax}.imshow(np.array({}), cmap=\"gray\", interpolation=\"nearest\")",
                py_matrix(&s.values)
            );
            if let Some(l) = &s.label {
                let _ = writeln!(out, "{ax}.set_title({})", py_str(l));
            }
        }
        Series::Hinton(s) => {
            let _ = writeln!(out, "hinton({ax}, {})", py_matrix(&s.values));
            if let Some(l) = &s.label {
                let _ = writeln!(out, "{ax}.set_title({})", py_str(l));
            }
        }
    }
}

fn label_kw(label: Option<&str>) -> String {
    label
        .map(|l| format!(", label={}", py_str(l)))
        .unwrap_or_default()
}

fn py_bool(b: bool) -> &'static str {
    if b { "True" } else { "False" }
}

/// Double-quoted Python string literal.
pub fn py_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

pub fn py_float(v: f64) -> String {
    if v.is_nan() {
        "float(\"nan\")".to_string()
    } else if v.is_infinite() {
        if v > 0.0 {
            "float(\"inf\")".to_string()
        } else {
            "-float(\"inf\")".to_string()
        }
    } else {
        format!("{v:?}")
    }
}

pub fn py_list(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| py_float(*v)).collect();
    format!("[{}]", items.join(", "))
}

fn py_str_list(values: &[String]) -> String {
    let items: Vec<String> = values.iter().map(|v| py_str(v)).collect();
    format!("[{}]", items.join(", "))
}

fn py_matrix(rows: &[Vec<f64>]) -> String {
    let items: Vec<String> = rows.iter().map(|r| py_list(r)).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_are_python_literals() {
        assert_eq!(py_float(1.0), "1.0");
        assert_eq!(py_float(f64::NAN), "float(\"nan\")");
        assert_eq!(py_float(f64::NEG_INFINITY), "-float(\"inf\")");
        assert_eq!(py_list(&[0.5, 2.0]), "[0.5, 2.0]");
    }

    #[test]
    fn strings_are_escaped() {
        assert_eq!(py_str("$\\pm$s.d."), "\"$\\\\pm$s.d.\"");
        assert_eq!(py_str("say \"hi\""), "\"say \\\"hi\\\"\"");
    }
}
