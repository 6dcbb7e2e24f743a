pub mod app;
pub mod cell;
pub mod table;
pub mod toolbar;
