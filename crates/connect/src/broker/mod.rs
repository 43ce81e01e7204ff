mod models;
mod service;
mod traits;

pub use models::*;
pub use service::HoldingsSyncService;
pub use traits::*;
