//! System-level modules
//!
//! Process plumbing that is not part of the URL domain: logging setup.

pub mod logging;
