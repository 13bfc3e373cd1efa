use bdl_plot::render::python::build_script;
use bdl_plot::{Placement, PlotRequest, PythonRenderer, RenderConfig, Renderer, Series, Subplots};
use std::path::Path;
use tempfile::tempdir;

fn two_panel_request() -> PlotRequest {
    let series = vec![
        Series::line(Some("signal".into()), vec![1.0, 2.0], Placement::new(0, 0)),
        Series::error_line(
            Some("reconstruction".into()),
            vec![1.5, 2.5],
            vec![0.1, f64::NAN],
            Placement::new(1, 0),
        ),
    ];
    PlotRequest::new("Demo", series)
        .title("Demo plot")
        .labels("x", "y")
        .subplots(Subplots::shared(2, 1))
}

#[test]
fn script_contains_layout_and_series() {
    let script = build_script(&two_panel_request(), Path::new("figures/Demo.pdf"));
    assert!(script.starts_with("# Generated by bdl-plot"));
    assert!(script.contains("matplotlib.use(\"Agg\")"));
    assert!(script.contains("plt.subplots(2, 1, sharex=True, sharey=True, squeeze=False)"));
    assert!(script.contains("axes[0][0].plot([0.0, 1.0], [1.0, 2.0]"));
    assert!(script.contains("axes[1][0].fill_between("));
    assert!(script.contains("float(\"nan\")"));
    assert!(script.contains("fig.suptitle(\"Demo plot\")"));
    assert!(script.contains("fig.supxlabel(\"x\")"));
    assert!(script.contains("fig.savefig(\"figures/Demo.pdf\")"));
    assert!(!script.contains("plt.show()"));
}

#[test]
fn shown_requests_call_show() {
    let request = two_panel_request().show(true).tight(true);
    let script = build_script(&request, Path::new("out.pdf"));
    assert!(!script.contains("matplotlib.use(\"Agg\")"));
    assert!(script.contains("fig.tight_layout()"));
    assert!(script.trim_end().ends_with("plt.show()"));
}

#[test]
fn twin_axis_gets_its_own_label() {
    let twin = PlotRequest::new("t", vec![Series::line(Some("Evidence".into()), vec![3.0], Placement::default())])
        .labels("#bases", "Log Evidence");
    let request = PlotRequest::new("t", vec![Series::line(None, vec![1.0], Placement::default())]).twin(twin);
    let script = build_script(&request, Path::new("t.pdf"));
    assert!(script.contains("twin_ax = axes[0][0].twinx()"));
    assert!(script.contains("twin_ax.set_ylabel(\"Log Evidence\")"));
    assert!(script.contains("twin_ax.legend("));
}

#[test]
fn renderer_writes_script_without_interpreter() {
    let dir = tempdir().unwrap();
    let config = RenderConfig {
        script_dir: dir.path().join("scripts"),
        figure_dir: dir.path().join("figures"),
        ..RenderConfig::default()
    };
    let out = PythonRenderer
        .render(&two_panel_request().title("Demo run"), &config)
        .unwrap();
    let script = out.script.unwrap();
    assert_eq!(script, dir.path().join("scripts").join("Demo.py"));
    assert!(std::fs::read_to_string(&script).unwrap().contains("Demo run"));
    assert!(out.figure.is_none());
    assert!(dir.path().join("figures").is_dir());
}

#[cfg(unix)]
#[test]
fn failing_interpreter_is_reported() {
    let dir = tempdir().unwrap();
    let config = RenderConfig {
        python: Some("false".into()),
        script_dir: dir.path().join("scripts"),
        figure_dir: dir.path().join("figures"),
        ..RenderConfig::default()
    };
    let err = PythonRenderer.render(&two_panel_request(), &config).unwrap_err();
    assert!(err.to_string().contains("exited with"), "{err}");
}

#[test]
fn series_outside_the_grid_are_skipped() {
    let series: Vec<Series> = (0..6)
        .map(|i| Series::line(None, vec![i as f64], bdl_plot::grid::placement(i, 2)))
        .collect();
    let request = PlotRequest::new("overflow", series).subplots(Subplots::new(2, 2));
    assert_eq!(request.misplaced().count(), 2);
    let script = build_script(&request, Path::new("overflow.pdf"));
    assert!(script.contains("axes[1][1].plot("));
    assert!(!script.contains("axes[2]"));
}
