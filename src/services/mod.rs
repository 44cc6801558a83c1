//! Service layer for business logic
//!
//! Shared by the HTTP handlers and the tests; every service receives its
//! store handle explicitly.

mod link_service;
mod redirect_service;

pub use link_service::*;
pub use redirect_service::*;
