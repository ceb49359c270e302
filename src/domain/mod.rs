pub mod batch;
pub mod jobs;
pub mod roster;
