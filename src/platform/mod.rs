// Integration with the external hand-landmark detector

pub mod tracker;
