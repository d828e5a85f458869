pub mod buttons;
pub mod celebration;
pub mod interactions;
pub mod plugin;
pub mod setup;
pub mod ui;
pub mod utils;
