pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{AttioClient, RegistryClient};
pub use config::SyncConfig;
pub use core::sync::SyncEngine;
pub use utils::error::{Result, SyncError};
