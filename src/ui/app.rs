use std::path::PathBuf;
use std::time::{Duration, Instant};

use eframe::egui;

use crate::ops::sequencer::Sequencer;
use crate::types::config::WorkoutConfig;
use crate::types::plan::Plan;
use crate::types::progress::TimerState;
use crate::ui::finished_view;
use crate::ui::setup_view::{self, SetupState};
use crate::ui::timer_view::{self, TimerEvent};

pub struct AppState {
    pub config: WorkoutConfig,
    pub config_path: PathBuf,
    pub sequencer: Sequencer,
    pub setup_state: SetupState,
    last_tick: Option<Instant>,
}

impl AppState {
    pub fn new(config: WorkoutConfig, config_path: PathBuf) -> Self {
        AppState {
            config,
            config_path,
            sequencer: Sequencer::new(),
            setup_state: SetupState::default(),
            last_tick: None,
        }
    }

    fn save_config(&self) {
        if let Err(err) = self.config.save_to_file(&self.config_path) {
            eprintln!("Could not save {}: {}", self.config_path.display(), err);
        }
    }
}

pub struct SetioApp {
    pub state: AppState,
}

impl SetioApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SetioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // One tick per elapsed second while running. The accumulator is
        // dropped whenever the sequencer leaves `running`, so a stale
        // interval can never deliver a tick into pause, setup, or finished.
        if self.state.sequencer.state().is_running() {
            let now = Instant::now();
            match self.state.last_tick {
                None => self.state.last_tick = Some(now),
                Some(last) if now.duration_since(last) >= Duration::from_secs(1) => {
                    self.state.sequencer.tick();
                    self.state.last_tick = Some(now);
                }
                Some(_) => {}
            }
            ctx.request_repaint_after(Duration::from_millis(100));
        } else {
            self.state.last_tick = None;
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.state.sequencer.state() {
            TimerState::Setup => {
                let response =
                    setup_view::show(ui, &mut self.state.setup_state, &mut self.state.config);
                if response.changed {
                    self.state.save_config();
                }
                if response.start {
                    self.state
                        .sequencer
                        .start(Plan::from_config(&self.state.config));
                }
            }
            TimerState::Running | TimerState::Paused(_) => {
                let snapshot = self.state.sequencer.snapshot();
                for event in timer_view::show(ctx, ui, &snapshot) {
                    match event {
                        TimerEvent::Pause => self.state.sequencer.pause(),
                        TimerEvent::Resume => self.state.sequencer.resume(),
                        TimerEvent::RequestQuit => self.state.sequencer.request_quit(),
                        TimerEvent::ConfirmQuit => self.state.sequencer.confirm_quit(),
                        TimerEvent::CancelQuit => self.state.sequencer.cancel_quit(),
                    }
                }
            }
            TimerState::Finished => {
                if finished_view::show(ui, self.state.sequencer.plan().sets) {
                    self.state.sequencer.restart_after_finish();
                }
            }
        });
    }
}
