//! Colors and marker shapes shared by the renderers.

use plotters::prelude::*;

/// Microsoft Office (2013+) chart series palette.
/// Order: Blue, Orange, Gray, Gold, Light Blue, Green, Dark Blue, Dark Orange, Dark Gray, Brownish Gold.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

/// Get a color from the Office palette.
#[inline]
pub fn office_color(idx: usize) -> RGBAColor {
    OFFICE10[idx % OFFICE10.len()].to_rgba()
}

/// Same palette as `#rrggbb` strings, for the script backend.
pub fn office_hex(idx: usize) -> String {
    let RGBColor(r, g, b) = OFFICE10[idx % OFFICE10.len()];
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Viridis approximation for `t` in [0, 1] (purple → cyan → yellow).
pub fn viridis(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let r = (0.267 + t * (0.329 - 0.267 + t * (0.984 - 0.329))) * 255.0;
    let g = (0.005 + t * (0.569 - 0.005 + t * (0.906 - 0.569))) * 255.0;
    let b = (0.329 + t * (0.758 - 0.329 - t * (0.758 - 0.121))) * 255.0;
    RGBColor(
        r.clamp(0.0, 255.0) as u8,
        g.clamp(0.0, 255.0) as u8,
        b.clamp(0.0, 255.0) as u8,
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Square,
    Triangle,
    Diamond,
    Cross,
    X,
}

const MARKERS: [MarkerShape; 6] = [
    MarkerShape::Circle,
    MarkerShape::Square,
    MarkerShape::Triangle,
    MarkerShape::Diamond,
    MarkerShape::Cross,
    MarkerShape::X,
];

/// Scatter classes get a color and, redundantly, a marker shape.
pub fn class_style(class: i64) -> (RGBAColor, MarkerShape) {
    let idx = class.unsigned_abs() as usize;
    (office_color(idx), MARKERS[idx % MARKERS.len()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_matches_palette() {
        assert_eq!(office_hex(0), "#4472c4");
        assert_eq!(office_hex(10), office_hex(0));
    }

    #[test]
    fn viridis_endpoints_clamp() {
        assert_eq!(viridis(-1.0), viridis(0.0));
        assert_eq!(viridis(2.0), viridis(1.0));
    }

    #[test]
    fn classes_cycle_markers() {
        assert_eq!(class_style(0).1, MarkerShape::Circle);
        assert_eq!(class_style(7).1, MarkerShape::Square);
    }
}
