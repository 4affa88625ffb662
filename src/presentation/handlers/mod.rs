mod analyze;
mod download;
mod health;

pub use analyze::analyze_handler;
pub use download::download_handler;
pub use health::health_handler;
