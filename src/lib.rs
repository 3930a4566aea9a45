// Library crate for integration tests.
// main.rs has its own mod declarations; this re-exports all modules.

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod render;
pub mod scenarios;
pub mod screen;
pub mod state;
