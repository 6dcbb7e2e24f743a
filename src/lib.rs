pub mod config;
pub mod io;
pub mod render;
pub mod state;
pub mod ui;
