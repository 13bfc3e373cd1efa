use bdl_plot::builder::{create_posterior_series, create_series};
use bdl_plot::{BaseOptions, Gaussian, Placement, PlotType, Series, Subplots};

fn grid_data(rows: usize, cols: usize) -> Vec<Vec<f64>> {
    (0..rows)
        .map(|r| (0..cols).map(|c| (r * 10 + c) as f64).collect())
        .collect()
}

fn options(plot_type: PlotType) -> BaseOptions {
    BaseOptions {
        show: false,
        skip: 2,
        num_to_show: 4,
        subplots: Subplots::new(2, 2),
        plot_type,
    }
}

#[test]
fn line_window_is_placed_row_major() {
    let data = grid_data(20, 5);
    let series = create_series(&data, None, &options(PlotType::Line)).unwrap();
    assert_eq!(series.len(), 4);
    let cells: Vec<Placement> = series.iter().map(Series::placement).collect();
    assert_eq!(
        cells,
        vec![
            Placement::new(0, 0),
            Placement::new(0, 1),
            Placement::new(1, 0),
            Placement::new(1, 1)
        ]
    );
    for (k, s) in series.iter().enumerate() {
        assert_eq!(s.primary_values(), data[2 + k]);
        assert_eq!(s.kind_name(), "line");
    }
}

#[test]
fn window_past_the_end_truncates() {
    let data = grid_data(5, 3);
    let opts = BaseOptions {
        skip: 3,
        num_to_show: 10,
        ..options(PlotType::Bar)
    };
    let series = create_series(&data, None, &opts).unwrap();
    assert_eq!(series.len(), 2);
    match &series[1] {
        Series::Bar(b) => {
            assert_eq!(b.categories, vec!["0", "1", "2"]);
            assert!(b.error.is_none());
        }
        other => panic!("expected bar, got {}", other.kind_name()),
    }

    let empty = BaseOptions {
        skip: 99,
        ..opts
    };
    assert!(create_series(&data, None, &empty).unwrap().is_empty());
}

#[test]
fn error_styles_need_posteriors() {
    let data = grid_data(3, 3);
    for t in [PlotType::ErrorLine, PlotType::ErrorBar] {
        let err = create_series(&data, None, &options(t)).unwrap_err();
        assert!(err.to_string().contains("plot_type"), "{err}");
    }
}

#[test]
fn posterior_error_line_carries_standard_deviation() {
    let data: Vec<Vec<Gaussian>> = (0..6)
        .map(|r| (0..3).map(|c| Gaussian::new((r + c) as f64, 4.0)).collect())
        .collect();
    let series = create_posterior_series(&data, None, &options(PlotType::ErrorLine)).unwrap();
    assert_eq!(series.len(), 4);
    match &series[0] {
        Series::ErrorLine(s) => {
            assert_eq!(s.y, vec![2.0, 3.0, 4.0]);
            assert_eq!(s.error, vec![2.0, 2.0, 2.0]);
            assert_eq!(s.x, vec![0.0, 1.0, 2.0]);
        }
        other => panic!("expected error line, got {}", other.kind_name()),
    }

    let bars = create_posterior_series(&data, None, &options(PlotType::ErrorBar)).unwrap();
    assert_eq!(bars[3].error_values(), Some(&[2.0, 2.0, 2.0][..]));
    let plain = create_posterior_series(&data, None, &options(PlotType::Bar)).unwrap();
    assert!(plain[0].error_values().is_none());
}

#[test]
fn hinton_ignores_the_window() {
    let data = grid_data(7, 2);
    let series = create_series(&data, None, &options(PlotType::Hinton)).unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].placement(), Placement::default());
    match &series[0] {
        Series::Hinton(m) => assert_eq!(m.values.len(), 7),
        other => panic!("expected hinton, got {}", other.kind_name()),
    }
}

fn posterior_grid(rows: usize, cols: usize) -> Vec<Vec<Gaussian>> {
    (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| Gaussian::new((r * 10 + c) as f64, 0.25 + c as f64))
                .collect()
        })
        .collect()
}

#[test]
fn posterior_line_hides_variance() {
    let data = posterior_grid(20, 5);
    let series = create_posterior_series(&data, None, &options(PlotType::Line)).unwrap();
    assert_eq!(series.len(), 4);
    for (k, s) in series.iter().enumerate() {
        match s {
            Series::Line(l) => {
                let expected: Vec<f64> = (0..5).map(|c| ((2 + k) * 10 + c) as f64).collect();
                assert_eq!(l.y, expected);
            }
            other => panic!("expected line, got {}", other.kind_name()),
        }
        assert!(s.error_values().is_none());
    }
}

#[test]
fn every_posterior_style_uses_the_same_cells() {
    let data = posterior_grid(20, 5);
    let expected = vec![
        Placement::new(0, 0),
        Placement::new(0, 1),
        Placement::new(1, 0),
        Placement::new(1, 1),
    ];
    for t in [PlotType::Line, PlotType::ErrorLine, PlotType::Bar, PlotType::ErrorBar] {
        let series = create_posterior_series(&data, None, &options(t)).unwrap();
        let cells: Vec<Placement> = series.iter().map(Series::placement).collect();
        assert_eq!(cells, expected, "{t}");
        for (k, s) in series.iter().enumerate() {
            let means: Vec<f64> = data[2 + k].iter().map(|g| g.mean).collect();
            assert_eq!(s.primary_values(), means, "{t}");
        }
    }
}
