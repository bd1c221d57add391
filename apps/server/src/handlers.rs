mod approval_status;
mod health;

pub use approval_status::{approval_status_handler, approval_status_info_handler};
pub use health::health_handler;
