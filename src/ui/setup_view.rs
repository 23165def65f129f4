use eframe::egui::{self, Color32, RichText, Sense};
use egui_extras::{Size, StripBuilder};

use crate::ops::timefmt::{format_time, parse_time};
use crate::types::config::WorkoutConfig;
use crate::types::exercise::Exercise;
use crate::types::plan::Plan;
use crate::ui::theme::color_from_name;

/// Editor state that persists between frames.
#[derive(Default)]
pub struct SetupState {
    /// Exercise whose name is currently being edited inline
    pub editing_id: Option<String>,
    /// Focus the name field on the frame after entering edit mode
    focus_name_edit: bool,
    /// In-progress text of a time field, committed on blur
    time_edit: Option<TimeEdit>,
}

#[derive(Clone, PartialEq, Eq)]
enum TimeField {
    ExerciseTime(String),
    RestBetweenExercises,
    RestBetweenSets,
}

struct TimeEdit {
    field: TimeField,
    buffer: String,
}

pub struct SetupResponse {
    /// The configuration was edited and should be persisted
    pub changed: bool,
    /// The start button was pressed
    pub start: bool,
}

enum RowOp {
    Delete(usize),
    Duplicate(usize),
    Move { from: usize, to: usize },
}

pub fn show(
    ui: &mut egui::Ui,
    state: &mut SetupState,
    config: &mut WorkoutConfig,
) -> SetupResponse {
    let mut changed = false;
    let mut start = false;

    ui.horizontal(|ui| {
        if ui.small_button("Reset workout memory").clicked() {
            *config = WorkoutConfig::default();
            state.editing_id = None;
            state.time_edit = None;
            changed = true;
        }
    });
    ui.vertical_centered(|ui| {
        ui.label(RichText::new("Workout Timer").size(30.0).strong());
    });
    ui.add_space(12.0);

    let mut ops: Vec<RowOp> = Vec::new();
    egui::ScrollArea::vertical().max_height(340.0).show(ui, |ui| {
        for index in 0..config.exercises.len() {
            exercise_row(
                ui,
                state,
                &mut config.exercises[index],
                index,
                &mut ops,
                &mut changed,
            );
        }
    });

    for op in ops {
        match op {
            RowOp::Delete(index) => {
                if index < config.exercises.len() {
                    config.exercises.remove(index);
                    changed = true;
                }
            }
            RowOp::Duplicate(index) => {
                if let Some(exercise) = config.exercises.get(index) {
                    let copy = exercise.duplicate();
                    config.exercises.insert(index + 1, copy);
                    changed = true;
                }
            }
            RowOp::Move { from, to } => {
                if from < config.exercises.len() && from != to {
                    let exercise = config.exercises.remove(from);
                    let to = to.min(config.exercises.len());
                    config.exercises.insert(to, exercise);
                    changed = true;
                }
            }
        }
    }

    if ui.button("➕ Add Exercise").clicked() {
        config.exercises.push(Exercise::new("New Exercise", 60));
        changed = true;
    }

    ui.add_space(16.0);
    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Sets");
        if ui.button("➖").clicked() && config.sets > 1 {
            config.sets -= 1;
            changed = true;
        }
        ui.label(RichText::new(config.sets.to_string()).size(18.0).strong());
        if ui.button("➕").clicked() {
            config.sets += 1;
            changed = true;
        }
    });

    rest_control(
        ui,
        state,
        "Rest between exercises",
        TimeField::RestBetweenExercises,
        &mut config.rest_between_exercises,
        &mut changed,
    );
    rest_control(
        ui,
        state,
        "Rest between sets",
        TimeField::RestBetweenSets,
        &mut config.rest_between_sets,
        &mut changed,
    );

    ui.add_space(12.0);
    let plan = Plan::from_config(config);
    StripBuilder::new(ui)
        .size(Size::relative(0.5))
        .size(Size::relative(0.5))
        .horizontal(|mut strip| {
            strip.cell(|ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("Set").size(13.0).color(Color32::GRAY));
                    ui.label(RichText::new(format_time(plan.set_time())).size(20.0).strong());
                });
            });
            strip.cell(|ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("Total").size(13.0).color(Color32::GRAY));
                    ui.label(
                        RichText::new(format_time(plan.total_time()))
                            .size(20.0)
                            .strong(),
                    );
                });
            });
        });

    ui.add_space(16.0);
    ui.vertical_centered(|ui| {
        let can_start = !config.exercises.is_empty();
        let button = egui::Button::new(RichText::new("Start Workout").size(20.0).strong());
        if ui.add_enabled(can_start, button).clicked() {
            start = true;
        }
    });

    SetupResponse { changed, start }
}

fn exercise_row(
    ui: &mut egui::Ui,
    state: &mut SetupState,
    exercise: &mut Exercise,
    index: usize,
    ops: &mut Vec<RowOp>,
    changed: &mut bool,
) {
    let drag_id = egui::Id::new(("exercise_drag", exercise.id.as_str()));

    let response = egui::Frame::group(ui.style())
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                // The handle carries the row index as the drag payload.
                ui.dnd_drag_source(drag_id, index, |ui| {
                    ui.label(RichText::new("☰").size(16.0).color(Color32::GRAY));
                });

                // Color chip derived from the name, same hue as the timer view.
                let (chip, _) = ui.allocate_exact_size(egui::vec2(4.0, 24.0), Sense::hover());
                ui.painter()
                    .rect_filled(chip, 1.0, color_from_name(&exercise.name));

                if state.editing_id.as_deref() == Some(exercise.id.as_str()) {
                    let edit = ui.add(
                        egui::TextEdit::singleline(&mut exercise.name).desired_width(150.0),
                    );
                    if state.focus_name_edit {
                        edit.request_focus();
                        state.focus_name_edit = false;
                    }
                    if edit.changed() {
                        *changed = true;
                    }
                    if edit.lost_focus() {
                        state.editing_id = None;
                    }
                } else {
                    let label = ui.add(
                        egui::Label::new(RichText::new(&exercise.name).size(16.0))
                            .sense(Sense::click()),
                    );
                    if label.clicked() {
                        state.editing_id = Some(exercise.id.clone());
                        state.focus_name_edit = true;
                    }
                }

                if time_field(
                    ui,
                    state,
                    TimeField::ExerciseTime(exercise.id.clone()),
                    &mut exercise.time,
                ) {
                    *changed = true;
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("❌").on_hover_text("Delete").clicked() {
                        ops.push(RowOp::Delete(index));
                    }
                    if ui.small_button("📋").on_hover_text("Duplicate").clicked() {
                        ops.push(RowOp::Duplicate(index));
                    }
                });
            });
        })
        .response;

    // Drop indicator while another row hovers over this one.
    if let Some(hovered) = response.dnd_hover_payload::<usize>() {
        if *hovered != index {
            ui.painter().hline(
                response.rect.x_range(),
                response.rect.top(),
                egui::Stroke::new(2.0, Color32::LIGHT_BLUE),
            );
        }
    }
    if let Some(from) = response.dnd_release_payload::<usize>() {
        if *from != index {
            ops.push(RowOp::Move { from: *from, to: index });
        }
    }
}

fn rest_control(
    ui: &mut egui::Ui,
    state: &mut SetupState,
    label: &str,
    field: TimeField,
    value: &mut u32,
    changed: &mut bool,
) {
    ui.horizontal(|ui| {
        ui.label(label);
        if ui.button("➖").clicked() {
            *value = value.saturating_sub(15);
            *changed = true;
        }
        if time_field(ui, state, field, value) {
            *changed = true;
        }
        if ui.button("➕").clicked() {
            *value = value.saturating_add(15);
            *changed = true;
        }
    });
}

/// A "m:ss" text field. Shows the formatted value until focused, then edits a
/// buffer that is parsed and committed on blur. Returns true on commit.
fn time_field(
    ui: &mut egui::Ui,
    state: &mut SetupState,
    field: TimeField,
    value: &mut u32,
) -> bool {
    let editing = matches!(&state.time_edit, Some(edit) if edit.field == field);
    let mut buffer = match &state.time_edit {
        Some(edit) if edit.field == field => edit.buffer.clone(),
        _ => format_time(*value),
    };

    let response = ui.add(egui::TextEdit::singleline(&mut buffer).desired_width(48.0));
    if editing {
        if response.lost_focus() {
            *value = parse_time(&buffer);
            state.time_edit = None;
            return true;
        }
        if let Some(edit) = &mut state.time_edit {
            edit.buffer = buffer;
        }
    } else if response.gained_focus() {
        state.time_edit = Some(TimeEdit { field, buffer });
    }
    false
}
