mod browse;
pub mod config;
mod http_layers;
pub mod metrics;
mod session;
pub mod server;
pub mod state;

pub use browse::make_catalog_routes;
pub use config::ServerConfig;
pub use http_layers::*;
pub use server::{make_app, run_server};
