pub mod api;
pub mod app;
pub mod backend;
pub mod config;
pub mod countries;
mod country_data;
pub mod errors;
pub mod handlers;
pub mod messages;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod views;

pub use app::router;
pub use config::Config;
pub use state::AppState;
