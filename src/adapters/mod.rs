pub mod attio;
pub mod registry;

pub use attio::{AttioClient, InsertOutcome, UpsertOutcome};
pub use registry::RegistryClient;
