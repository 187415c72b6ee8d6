//! HTTP API handlers for obras-dashboard

pub mod health;
pub mod summary;
pub mod ui;

pub use health::health_routes;
pub use summary::{get_crew_summary, get_project_summary};
pub use ui::{serve_app_js, serve_index};
