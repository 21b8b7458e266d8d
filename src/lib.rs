pub mod app;
pub mod player;
pub mod sync;
pub mod ui;
