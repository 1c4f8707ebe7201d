mod app;
mod cli;
mod effects;
mod persistence;
mod render;
mod settings;

pub use app::run_app;
