//! Linking the couple's two accounts into a pair and issuing sign-in links.

pub mod allow_list;
pub mod service;

pub use allow_list::CoupleEmails;
pub use service::{ProvisioningConfig, ProvisioningService};
