pub mod app;
pub mod finished_view;
pub mod setup_view;
pub mod theme;
pub mod timer_view;
