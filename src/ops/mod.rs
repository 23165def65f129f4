pub mod sequencer;
pub mod timefmt;
