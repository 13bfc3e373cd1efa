//! Text measurement and truncation for native titles and legends.

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Truncate to fit `max_px` and add a single ellipsis if needed.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        out.push(ch);
        if estimate_text_width_px(&out, font_px) + estimate_text_width_px("…", font_px) > max_px {
            out.pop();
            break;
        }
    }
    out.push('…');
    out
}

/// Render matplotlib-style mathtext for native text, e.g. `$\pm$s.d.` → `±s.d.`.
pub fn plain_label(label: &str) -> String {
    label.replace("$\\pm$", "±").replace('$', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("abc", 10, 100), "abc");
    }

    #[test]
    fn long_text_gets_ellipsis() {
        let t = truncate_to_width("Reconstructions (normalised), RMSE=0.1234", 10, 60);
        assert!(t.ends_with('…'));
        assert!(estimate_text_width_px(&t, 10) <= 60);
    }

    #[test]
    fn mathtext_is_flattened() {
        assert_eq!(plain_label("$\\pm$s.d."), "±s.d.");
    }
}
