pub mod camera;
pub mod config;
pub mod core;
pub mod error;
pub mod loading;
pub mod scene;
pub mod systems;
