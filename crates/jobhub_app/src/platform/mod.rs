mod app;
mod cli;
mod effects;
mod logging;
mod ui;

pub use app::run;
