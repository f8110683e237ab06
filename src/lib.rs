pub mod app;
pub mod classify;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod fetch;
pub mod humanize;
pub mod links;
pub mod observability;
pub mod orchestrator;
pub mod report;
pub mod transport;
pub mod upload;

pub use error::{ErrorKind, UploadError, UploadOutcome};
pub use orchestrator::{Stage, UploadOrchestrator, UploadSource};
