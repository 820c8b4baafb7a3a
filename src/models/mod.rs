//! Data models for the SAR Emergency Notification application.
//!
//! These models match the viewer client interfaces exactly for seamless interoperability.

mod alert;
mod auth;
mod zone;

pub use alert::*;
pub use auth::*;
pub use zone::*;
