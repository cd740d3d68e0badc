pub mod config;
pub mod gesture_classifier;
pub mod gesture_engine;
pub mod gesture_tracker;
pub mod list_navigator;
pub mod ml_models;
pub mod stability_filter;
