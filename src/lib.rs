#![allow(clippy::implicit_hasher)]

pub mod analytics;
pub mod components;
pub mod config;
pub mod models;
pub mod navigation;
pub mod plan_params;
pub mod storage;

#[cfg(target_arch = "wasm32")]
pub mod browser_router;

pub use components::app::App;
