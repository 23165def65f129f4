use eframe::egui::Color32;
use eframe::egui::ecolor::Hsva;

/// Stable display color for an exercise, derived from its name so the same
/// exercise always renders the same. Case and surrounding whitespace are
/// ignored.
pub fn color_from_name(name: &str) -> Color32 {
    let normalized = name.trim().to_lowercase();

    let mut hash: i32 = 0;
    for ch in normalized.chars() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(ch as i32);
    }
    let hue = (hash.unsigned_abs() % 360) as f32;

    // hsl(hue, 65%, 45%), converted to HSV for egui.
    let l = 0.45_f32;
    let s = 0.65_f32;
    let v = l + s * l.min(1.0 - l);
    let sv = if v > 0.0 { 2.0 * (1.0 - l / v) } else { 0.0 };
    Hsva::new(hue / 360.0, sv, v, 1.0).into()
}
