mod content_service;
mod dashboard_service;
pub mod export_service;

pub use content_service::*;
pub use dashboard_service::*;
