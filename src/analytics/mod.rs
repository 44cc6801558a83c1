//! Visit analytics
//!
//! Redirects hand visits to a [`VisitRecorder`], which applies them to the
//! mapping store on a background task so the redirect never waits on the write.

pub mod recorder;

pub use recorder::{Visit, VisitRecorder};
