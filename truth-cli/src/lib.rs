pub mod config;
pub mod driver;
pub mod engagement;
pub mod input;
pub mod render;
