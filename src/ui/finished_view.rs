use eframe::egui::{self, RichText};

/// End-of-workout screen. Returns true when the user wants to go back to the
/// setup screen.
pub fn show(ui: &mut egui::Ui, total_sets: u32) -> bool {
    let mut restart = false;

    ui.add_space(100.0);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new("🎉 Workout Complete!").size(36.0).strong());
        ui.add_space(12.0);
        let plural = if total_sets == 1 { "set" } else { "sets" };
        ui.label(RichText::new(format!("Great job finishing {} {}!", total_sets, plural)).size(18.0));
        ui.add_space(24.0);
        if ui
            .button(RichText::new("Back to Setup").size(18.0))
            .clicked()
        {
            restart = true;
        }
    });

    restart
}
