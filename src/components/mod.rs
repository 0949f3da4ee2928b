#![allow(clippy::needless_pass_by_value)]

pub mod app;
pub mod mode_filter;
pub mod quick_settings_panel;
pub mod route_schedule_header;
pub mod summary_navigation;
