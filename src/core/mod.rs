pub mod sync;

pub use sync::{dedupe_chains, SyncEngine};
