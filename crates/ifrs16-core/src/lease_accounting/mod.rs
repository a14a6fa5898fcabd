pub mod journal;
pub mod measurement;
pub mod schedule;
