pub mod app;
pub mod audio;
pub mod config;
pub mod model;
pub mod player;
pub mod ui;
