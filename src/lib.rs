pub mod app;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod guess;
pub mod input;
pub mod logging;
pub mod territory;
pub mod ui;
