use eframe::egui::{self, Align2, Color32, RichText};

use crate::ops::sequencer::DisplaySnapshot;
use crate::ops::timefmt::format_time;
use crate::types::progress::TimerState;
use crate::ui::theme::color_from_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Pause,
    Resume,
    RequestQuit,
    ConfirmQuit,
    CancelQuit,
}

/// The running/paused screen. Purely reads the snapshot and reports the
/// pressed buttons back as events.
pub fn show(
    ctx: &egui::Context,
    ui: &mut egui::Ui,
    snapshot: &DisplaySnapshot,
) -> Vec<TimerEvent> {
    let mut events = Vec::new();

    ui.horizontal(|ui| {
        if ui.button("⬅ Home").clicked() {
            events.push(TimerEvent::RequestQuit);
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(format!(
                    "Set {} of {}",
                    snapshot.current_set, snapshot.total_sets
                ))
                .size(16.0),
            );
        });
    });

    ui.add_space(32.0);
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new(&snapshot.current_segment_label)
                .size(14.0)
                .color(Color32::GRAY),
        );
        let name_color = if snapshot.current_segment_label == "Rest" {
            Color32::LIGHT_BLUE
        } else {
            color_from_name(&snapshot.current_segment_name)
        };
        ui.label(
            RichText::new(&snapshot.current_segment_name)
                .size(34.0)
                .strong()
                .color(name_color),
        );
        ui.label(
            RichText::new(format_time(snapshot.time_remaining))
                .size(72.0)
                .strong(),
        );
    });

    ui.add_space(32.0);
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new(&snapshot.next_segment_label)
                .size(13.0)
                .color(Color32::GRAY),
        );
        ui.label(RichText::new(&snapshot.next_segment_name).size(20.0));
        if let Some(time) = snapshot.next_segment_time {
            ui.label(RichText::new(format_time(time)).size(16.0).color(Color32::GRAY));
        }
    });

    ui.add_space(40.0);
    ui.vertical_centered(|ui| match snapshot.timer_state {
        TimerState::Running => {
            if ui.button(RichText::new("⏸ Pause").size(18.0)).clicked() {
                events.push(TimerEvent::Pause);
            }
        }
        TimerState::Paused(_) if !snapshot.quit_confirm_pending => {
            if ui.button(RichText::new("▶ Resume").size(18.0)).clicked() {
                events.push(TimerEvent::Resume);
            }
        }
        _ => {}
    });

    if snapshot.quit_confirm_pending {
        egui::Window::new("Quit Workout?")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Your progress will be lost");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Yes, Quit").clicked() {
                        events.push(TimerEvent::ConfirmQuit);
                    }
                    if ui.button("Continue").clicked() {
                        events.push(TimerEvent::CancelQuit);
                    }
                });
            });
    }

    events
}
