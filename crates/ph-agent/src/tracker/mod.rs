pub mod track_outcome;
pub mod tracker;
pub mod tracker_health;
