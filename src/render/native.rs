//! Native plotters backend: draws plot requests straight to **SVG** or **PNG**.
//!
//! - One cartesian chart per subplot cell; matrix panels fill their cell
//! - Error bands as translucent polygons, error bars as whiskers
//! - Hinton squares sized by magnitude (white positive, black negative, on gray)
//! - Text (titles, axis descriptions, legends) only when a font is configured

use super::style::{MarkerShape, class_style, office_color, viridis};
use super::text::{plain_label, truncate_to_width};
use crate::config::{FigureFormat, RenderConfig};
use crate::error::PlotError;
use crate::request::{PlotRequest, RenderOutput, Renderer};
use crate::series::Series;
use anyhow::{Context, Result};
use plotters::chart::SeriesAnno;
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::fmt::Debug;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const MARGIN: u32 = 8;
const LEFT_LABEL_PX: u32 = 48;
const BOTTOM_LABEL_PX: u32 = 32;

/// Set once a font has been registered; later configured fonts are ignored.
/// Failed loads are not cached, so a later call with a usable font still succeeds.
static FONT_READY: OnceLock<()> = OnceLock::new();

fn ensure_font_registered(font: Option<&Path>) -> bool {
    if FONT_READY.get().is_some() {
        return true;
    }
    let Some(path) = font else {
        return false;
    };
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("cannot read font {}: {e}; drawing without text", path.display());
            return false;
        }
    };
    // ab_glyph keeps a 'static reference to the font data.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    match plotters::style::register_font("sans-serif", plotters::style::FontStyle::Normal, bytes) {
        Ok(()) => {
            let _ = FONT_READY.set(());
            true
        }
        Err(_) => {
            log::warn!("{} is not a usable font; drawing without text", path.display());
            false
        }
    }
}

fn render_err<E: Debug>(e: E) -> PlotError {
    PlotError::Render(format!("{e:?}"))
}

/// Draws requests with plotters; ignores `show`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRenderer;

impl Renderer for NativeRenderer {
    fn render(&self, request: &PlotRequest, config: &RenderConfig) -> Result<RenderOutput> {
        if config.figure_format == FigureFormat::Pdf {
            return Err(PlotError::invalid(
                "figure_format",
                "the native renderer writes svg or png, not pdf",
            )
            .into());
        }
        if request.show {
            log::debug!("native renderer does not open windows; writing {}", request.stem);
        }
        for s in request.misplaced() {
            let p = s.placement();
            log::warn!(
                "{} series at ({}, {}) lies outside the {}x{} grid and is skipped",
                s.kind_name(),
                p.row,
                p.column,
                request.subplots.rows,
                request.subplots.columns
            );
        }

        fs::create_dir_all(&config.figure_dir).with_context(|| {
            format!("creating figure directory {}", config.figure_dir.display())
        })?;
        let path = config.figure_path(&request.stem);
        let path_string = path.to_string_lossy().into_owned();
        let text = ensure_font_registered(config.font.as_deref());
        let size = (config.width, config.height);

        if config.figure_format == FigureFormat::Svg {
            let root = SVGBackend::new(path_string.as_str(), size).into_drawing_area();
            draw_request(root, request, text)?;
        } else {
            let root = BitMapBackend::new(path_string.as_str(), size).into_drawing_area();
            draw_request(root, request, text)?;
        }
        log::info!("wrote figure {}", path.display());

        Ok(RenderOutput {
            script: None,
            figure: Some(path),
        })
    }
}

/// Helper that draws to any Plotters backend.
fn draw_request<DB>(root: DrawingArea<DB, Shift>, request: &PlotRequest, text: bool) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(render_err)?;
    let area = match (&request.title, text) {
        (Some(title), true) => {
            let (w, _) = root.dim_in_pixel();
            let title = truncate_to_width(title, 20, w.saturating_sub(20));
            root.titled(&title, (FontFamily::SansSerif, 20))
                .map_err(render_err)?
        }
        _ => root,
    };

    let rows = request.subplots.rows.max(1);
    let columns = request.subplots.columns.max(1);
    let shared = SharedRanges::of(request);
    let cells = area.split_evenly((rows, columns));

    for (k, cell) in cells.iter().enumerate() {
        let (row, column) = (k / columns, k % columns);
        let here: Vec<(usize, &Series)> = request
            .series
            .iter()
            .enumerate()
            .filter(|(_, s)| {
                let p = s.placement();
                p.row == row && p.column == column
            })
            .collect();
        let twin = if k == 0 { request.twin.as_deref() } else { None };
        if here.is_empty() && twin.is_none() {
            continue;
        }
        draw_cell(cell, request, &here, twin, &shared, text)?;
    }

    area.present().map_err(render_err)?;
    Ok(())
}

fn draw_cell<DB: DrawingBackend>(
    cell: &DrawingArea<DB, Shift>,
    request: &PlotRequest,
    here: &[(usize, &Series)],
    twin: Option<&PlotRequest>,
    shared: &SharedRanges,
    text: bool,
) -> Result<()> {
    if let Some((_, m)) = here
        .iter()
        .find(|(_, s)| matches!(s, Series::Matrix(_) | Series::Hinton(_)))
    {
        return draw_matrix(cell, m, text);
    }

    let (xe, ye) = extents(here.iter().map(|(_, s)| *s));
    let x_range = if request.subplots.share_x { shared.x } else { xe.range() };
    let y_range = if request.subplots.share_y { shared.y } else { ye.range() };
    let (Some((x0, x1)), Some((y0, y1))) = (x_range, y_range) else {
        return Ok(());
    };

    let mut builder = ChartBuilder::on(cell);
    builder.margin(MARGIN);
    if text {
        builder
            .set_label_area_size(LabelAreaPosition::Left, LEFT_LABEL_PX)
            .set_label_area_size(LabelAreaPosition::Bottom, BOTTOM_LABEL_PX);
    }
    let mut chart = builder
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(render_err)?;

    if text {
        let mut mesh = chart.configure_mesh();
        if !request.grid {
            mesh.disable_mesh();
        }
        if let Some(x) = &request.x_label {
            mesh.x_desc(x.as_str());
        }
        if let Some(y) = &request.y_label {
            mesh.y_desc(y.as_str());
        }
        mesh.x_labels(6)
            .y_labels(6)
            .label_style((FontFamily::SansSerif, 11))
            .axis_desc_style((FontFamily::SansSerif, 12))
            .draw()
            .map_err(render_err)?;
    } else {
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(x0, y0), (x1, y1)],
                BLACK.stroke_width(1),
            )))
            .map_err(render_err)?;
    }

    let mut labelled = false;
    for (idx, s) in here {
        labelled |= draw_series(&mut chart, *idx, s, text)?;
    }
    if text && labelled {
        chart
            .configure_series_labels()
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.85))
            .label_font((FontFamily::SansSerif, 12))
            .draw()
            .map_err(render_err)?;
    }

    if let Some(twin) = twin {
        draw_twin(cell, twin, (x0, x1), request.series.len(), text)?;
    }
    Ok(())
}

/// Second y axis: an overlay chart with identical margins and x range.
fn draw_twin<DB: DrawingBackend>(
    cell: &DrawingArea<DB, Shift>,
    twin: &PlotRequest,
    (x0, x1): (f64, f64),
    color_offset: usize,
    text: bool,
) -> Result<()> {
    let (_, ye) = extents(twin.series.iter());
    let Some((y0, y1)) = ye.range() else {
        return Ok(());
    };
    let mut builder = ChartBuilder::on(cell);
    builder.margin(MARGIN);
    if text {
        builder
            .set_label_area_size(LabelAreaPosition::Left, LEFT_LABEL_PX)
            .set_label_area_size(LabelAreaPosition::Bottom, BOTTOM_LABEL_PX);
    }
    let mut chart = builder
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(render_err)?;
    for (k, s) in twin.series.iter().enumerate() {
        draw_series(&mut chart, color_offset + k, s, false)?;
    }
    Ok(())
}

/// Draws one cartesian series; returns whether it added a legend entry.
fn draw_series<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    idx: usize,
    series: &Series,
    text: bool,
) -> Result<bool> {
    let color = office_color(idx);
    match series {
        Series::Line(s) => {
            let pts: Vec<(f64, f64)> = s.x.iter().copied().zip(s.y.iter().copied()).collect();
            let anno = chart
                .draw_series(LineSeries::new(pts, color.stroke_width(2)))
                .map_err(render_err)?;
            Ok(annotate_line(anno, s.label.as_deref(), color, text))
        }
        Series::ErrorLine(s) => {
            let upper = s
                .x
                .iter()
                .zip(s.y.iter().zip(&s.error))
                .map(|(x, (y, e))| (*x, y + e));
            let lower: Vec<(f64, f64)> = s
                .x
                .iter()
                .zip(s.y.iter().zip(&s.error))
                .map(|(x, (y, e))| (*x, y - e))
                .collect();
            let mut band: Vec<(f64, f64)> = upper.collect();
            band.extend(lower.into_iter().rev());
            let band_color = color.mix(0.25);
            let band_anno = chart
                .draw_series(std::iter::once(Polygon::new(band, band_color.filled())))
                .map_err(render_err)?;
            let band_labelled = annotate_fill(band_anno, s.error_label.as_deref(), band_color, text);

            let pts: Vec<(f64, f64)> = s.x.iter().copied().zip(s.y.iter().copied()).collect();
            let anno = chart
                .draw_series(LineSeries::new(pts, color.stroke_width(2)))
                .map_err(render_err)?;
            Ok(annotate_line(anno, s.label.as_deref(), color, text) | band_labelled)
        }
        Series::Bar(s) | Series::ErrorBar(s) => {
            let anno = chart
                .draw_series(s.values.iter().enumerate().map(|(i, v)| {
                    let x = i as f64;
                    Rectangle::new([(x - 0.4, v.min(0.0)), (x + 0.4, v.max(0.0))], color.filled())
                }))
                .map_err(render_err)?;
            let labelled = annotate_fill(anno, s.label.as_deref(), color, text);
            if let Some(err) = &s.error {
                chart
                    .draw_series(s.values.iter().zip(err).enumerate().map(|(i, (v, e))| {
                        let x = i as f64;
                        PathElement::new(vec![(x, v - e), (x, v + e)], BLACK.stroke_width(1))
                    }))
                    .map_err(render_err)?;
            }
            Ok(labelled)
        }
        Series::Scatter(s) => {
            let classes = s.colors.as_deref().unwrap_or(&[]);
            for (k, (x, y)) in s.x.iter().zip(&s.y).enumerate() {
                let (c, shape) = class_style(classes.get(k).copied().unwrap_or(0));
                draw_marker(chart, (*x, *y), shape, c)?;
            }
            Ok(false)
        }
        // Matrix panels are drawn per cell, never inside a cartesian chart.
        Series::Matrix(_) | Series::Hinton(_) => Ok(false),
    }
}

fn annotate_line<DB: DrawingBackend>(
    anno: &mut SeriesAnno<'_, DB>,
    label: Option<&str>,
    color: RGBAColor,
    text: bool,
) -> bool {
    match (label, text) {
        (Some(l), true) => {
            anno.label(plain_label(l)).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2))
            });
            true
        }
        _ => false,
    }
}

fn annotate_fill<DB: DrawingBackend>(
    anno: &mut SeriesAnno<'_, DB>,
    label: Option<&str>,
    color: RGBAColor,
    text: bool,
) -> bool {
    match (label, text) {
        (Some(l), true) => {
            anno.label(plain_label(l)).legend(move |(x, y)| {
                Rectangle::new([(x, y - 4), (x + 16, y + 4)], color.filled())
            });
            true
        }
        _ => false,
    }
}

fn draw_marker<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    at: (f64, f64),
    shape: MarkerShape,
    color: RGBAColor,
) -> Result<()> {
    const S: i32 = 4;
    let fill = color.filled();
    let stroke = color.stroke_width(2);
    match shape {
        MarkerShape::Circle => chart
            .draw_series(std::iter::once(Circle::new(at, S, fill)))
            .map(|_| ()),
        MarkerShape::Square => chart
            .draw_series(std::iter::once(
                EmptyElement::at(at) + Rectangle::new([(-S, -S), (S, S)], fill),
            ))
            .map(|_| ()),
        MarkerShape::Triangle => chart
            .draw_series(std::iter::once(
                EmptyElement::at(at) + Polygon::new(vec![(0, -S), (-S, S), (S, S)], fill),
            ))
            .map(|_| ()),
        MarkerShape::Diamond => chart
            .draw_series(std::iter::once(
                EmptyElement::at(at) + Polygon::new(vec![(0, -S), (-S, 0), (0, S), (S, 0)], fill),
            ))
            .map(|_| ()),
        MarkerShape::Cross => chart
            .draw_series(std::iter::once(
                EmptyElement::at(at)
                    + PathElement::new(vec![(-S, 0), (S, 0)], stroke)
                    + PathElement::new(vec![(0, -S), (0, S)], stroke),
            ))
            .map(|_| ()),
        MarkerShape::X => chart
            .draw_series(std::iter::once(
                EmptyElement::at(at)
                    + PathElement::new(vec![(-S, -S), (S, S)], stroke)
                    + PathElement::new(vec![(-S, S), (S, -S)], stroke),
            ))
            .map(|_| ()),
    }
    .map_err(render_err)?;
    Ok(())
}

/// Matrix or Hinton panel filling the whole cell; row 0 at the top.
fn draw_matrix<DB: DrawingBackend>(
    cell: &DrawingArea<DB, Shift>,
    series: &Series,
    text: bool,
) -> Result<()> {
    let (m, hinton) = match series {
        Series::Matrix(m) => (m, false),
        Series::Hinton(m) => (m, true),
        _ => return Ok(()),
    };
    let rows = m.values.len();
    let cols = m.values.iter().map(Vec::len).max().unwrap_or(0);
    if rows == 0 || cols == 0 {
        return Ok(());
    }

    let titled;
    let area = match (&m.label, text) {
        (Some(l), true) => {
            titled = cell
                .titled(&plain_label(l), (FontFamily::SansSerif, 12))
                .map_err(render_err)?;
            &titled
        }
        _ => cell,
    };
    let top = rows as f64;
    let mut chart = ChartBuilder::on(area)
        .margin(4)
        .build_cartesian_2d(0f64..cols as f64, 0f64..top)
        .map_err(render_err)?;

    let finite = || m.values.iter().flatten().copied().filter(|v| v.is_finite());

    if hinton {
        let peak = finite().fold(0.0f64, |acc, v| acc.max(v.abs()));
        let max_weight = if peak > 0.0 {
            2f64.powf(peak.log2().ceil())
        } else {
            1.0
        };
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(0.0, 0.0), (cols as f64, top)],
                RGBColor(128, 128, 128).filled(),
            )))
            .map_err(render_err)?;
        chart
            .draw_series(m.values.iter().enumerate().flat_map(|(r, row)| {
                row.iter().enumerate().filter_map(move |(c, w)| {
                    if !w.is_finite() {
                        return None;
                    }
                    let half = (w.abs() / max_weight).sqrt() / 2.0;
                    let (cx, cy) = (c as f64 + 0.5, top - r as f64 - 0.5);
                    let color = if *w > 0.0 { WHITE } else { BLACK };
                    Some(Rectangle::new(
                        [(cx - half, cy - half), (cx + half, cy + half)],
                        color.filled(),
                    ))
                })
            }))
            .map_err(render_err)?;
    } else {
        let lo = finite().fold(f64::INFINITY, f64::min);
        let hi = finite().fold(f64::NEG_INFINITY, f64::max);
        let span = if hi > lo { hi - lo } else { 1.0 };
        chart
            .draw_series(m.values.iter().enumerate().flat_map(|(r, row)| {
                row.iter().enumerate().map(move |(c, v)| {
                    let t = if v.is_finite() { (v - lo) / span } else { 0.0 };
                    let (x, y) = (c as f64, top - r as f64);
                    Rectangle::new([(x, y - 1.0), (x + 1.0, y)], viridis(t).filled())
                })
            }))
            .map_err(render_err)?;
    }
    Ok(())
}

/// Running min/max of finite values.
#[derive(Debug, Clone, Copy)]
struct Extent {
    min: f64,
    max: f64,
}

impl Extent {
    fn empty() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn add(&mut self, v: f64) {
        if v.is_finite() {
            self.min = self.min.min(v);
            self.max = self.max.max(v);
        }
    }

    /// Padded plotting range, or `None` when nothing was added.
    fn range(self) -> Option<(f64, f64)> {
        if self.min > self.max {
            return None;
        }
        if (self.max - self.min).abs() < f64::EPSILON {
            return Some((self.min - 1.0, self.max + 1.0));
        }
        let pad = (self.max - self.min) * 0.05;
        Some((self.min - pad, self.max + pad))
    }
}

fn extents<'a>(series: impl IntoIterator<Item = &'a Series>) -> (Extent, Extent) {
    let (mut xe, mut ye) = (Extent::empty(), Extent::empty());
    for s in series {
        match s {
            Series::Line(l) => {
                l.x.iter().for_each(|v| xe.add(*v));
                l.y.iter().for_each(|v| ye.add(*v));
            }
            Series::ErrorLine(l) => {
                l.x.iter().for_each(|v| xe.add(*v));
                for (y, e) in l.y.iter().zip(&l.error) {
                    ye.add(y - e);
                    ye.add(y + e);
                }
            }
            Series::Bar(b) | Series::ErrorBar(b) => {
                xe.add(-0.5);
                xe.add(b.values.len() as f64 - 0.5);
                ye.add(0.0);
                match &b.error {
                    Some(err) => {
                        for (v, e) in b.values.iter().zip(err) {
                            ye.add(v - e);
                            ye.add(v + e);
                        }
                    }
                    None => b.values.iter().for_each(|v| ye.add(*v)),
                }
            }
            Series::Scatter(p) => {
                p.x.iter().for_each(|v| xe.add(*v));
                p.y.iter().for_each(|v| ye.add(*v));
            }
            Series::Matrix(_) | Series::Hinton(_) => {}
        }
    }
    (xe, ye)
}

/// Ranges over every series of the request, used when axes are shared.
struct SharedRanges {
    x: Option<(f64, f64)>,
    y: Option<(f64, f64)>,
}

impl SharedRanges {
    fn of(request: &PlotRequest) -> Self {
        let (xe, ye) = extents(request.series.iter());
        Self {
            x: xe.range(),
            y: ye.range(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_font_load_is_not_remembered() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.ttf");
        assert!(!ensure_font_registered(Some(&missing)));
        assert!(!ensure_font_registered(None));
        assert!(FONT_READY.get().is_none());
    }

    #[test]
    fn extent_pads_flat_ranges() {
        let mut e = Extent::empty();
        assert!(e.range().is_none());
        e.add(2.0);
        assert_eq!(e.range(), Some((1.0, 3.0)));
        e.add(f64::NAN);
        e.add(12.0);
        assert_eq!(e.range(), Some((1.5, 12.5)));
    }
}
