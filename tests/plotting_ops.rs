use bdl_plot::models::VectorGaussian;
use bdl_plot::{FigureFormat, Gaussian, NativeRenderer, PlotOptions, Plotter, PythonRenderer, RenderConfig};
use std::fs;
use tempfile::tempdir;

fn config(dir: &std::path::Path) -> RenderConfig {
    RenderConfig {
        script_dir: dir.join("scripts"),
        figure_dir: dir.join("figures"),
        ..RenderConfig::default()
    }
}

fn dictionary(bases: usize, width: usize) -> Vec<Vec<Gaussian>> {
    (0..bases)
        .map(|b| {
            (0..width)
                .map(|i| Gaussian::new(((b + i) as f64).sin(), 0.01 * (i + 1) as f64))
                .collect()
        })
        .collect()
}

#[test]
fn results_write_dictionary_and_coefficient_scripts() {
    let dir = tempdir().unwrap();
    let cfg = config(dir.path());
    let plotter = Plotter::new(&cfg, PythonRenderer);
    let dict = dictionary(20, 8);
    let coefs = dictionary(12, 20);
    let outputs = plotter
        .plot_results(20, 8, &dict, Some(coefs.as_slice()), "trial 2", &PlotOptions::default())
        .unwrap();
    assert_eq!(outputs.len(), 2);

    let scripts = dir.path().join("scripts");
    let dict_script = fs::read_to_string(scripts.join("Dictionary_trial_2_0-16.py")).unwrap();
    assert!(dict_script.contains("plt.subplots(4, 4"));
    assert!(dict_script.contains("fig.suptitle(\"Dictionary 0-16\")"));
    assert!(dict_script.contains("fill_between"));

    let coef_script = fs::read_to_string(scripts.join("Coefficients_trial_2_0-6.py")).unwrap();
    assert!(coef_script.contains("plt.subplots(3, 2"));
    assert!(coef_script.contains("yerr="));
}

#[test]
fn vector_results_transpose_the_dictionary() {
    let dir = tempdir().unwrap();
    let cfg = config(dir.path());
    let plotter = Plotter::new(&cfg, PythonRenderer);
    // Three signal positions, each a posterior over two bases.
    let dict: Vec<VectorGaussian> = (0..3)
        .map(|i| VectorGaussian {
            mean: vec![i as f64, 10.0 + i as f64],
            covariance: vec![vec![1.0, 0.0], vec![0.0, 4.0]],
        })
        .collect();
    let coefs = vec![VectorGaussian {
        mean: vec![0.5, -0.5],
        covariance: vec![vec![0.25, 0.0], vec![0.0, 0.25]],
    }];
    plotter
        .plot_vector_results(2, 3, &dict, &coefs, "", &PlotOptions::default())
        .unwrap();
    let script = fs::read_to_string(dir.path().join("scripts").join("Dictionary_0-2.py")).unwrap();
    assert!(script.contains("_y = np.array([10.0, 11.0, 12.0])"));
    assert!(script.contains("_e = np.array([2.0, 2.0, 2.0])"));
}

#[test]
fn sparsity_and_images_render_natively() {
    let dir = tempdir().unwrap();
    let cfg = RenderConfig {
        figure_format: FigureFormat::Svg,
        width: 320,
        height: 240,
        ..config(dir.path())
    };
    let plotter = Plotter::new(&cfg, NativeRenderer);
    let out = plotter.sparsity_plot(&dictionary(6, 4), "Sparsity run", false).unwrap();
    assert_eq!(out.figure.unwrap(), dir.path().join("figures").join("Sparsity_run.svg"));

    let images: Vec<Vec<f64>> = (0..4).map(|k| (0..16).map(|i| (i * k) as f64).collect()).collect();
    let out = plotter
        .plot_images(&images, "Digits", &PlotOptions::default().images)
        .unwrap();
    assert!(fs::metadata(out.figure.unwrap()).unwrap().len() > 0);
}

#[test]
fn functions_in_image_mode_use_image_options() {
    let dir = tempdir().unwrap();
    let cfg = config(dir.path());
    let plotter = Plotter::new(&cfg, PythonRenderer);
    let options = PlotOptions {
        is_image: true,
        ..PlotOptions::default()
    };
    let rows = vec![vec![0.0; 4]; 2];
    plotter.plot_functions(&rows, "Inputs", "", &options).unwrap();
    let script = fs::read_to_string(dir.path().join("scripts").join("Inputs.py")).unwrap();
    assert!(script.contains("axes[0][1].imshow("));
    assert!(script.contains("for ax in axes.flat:\n    ax.grid(False)"));
}
