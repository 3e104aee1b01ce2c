use crate::adapters::{AttioClient, InsertOutcome, RegistryClient, UpsertOutcome};
use crate::config::SyncConfig;
use crate::domain::model::{ChainRecord, RecordValues};
use crate::utils::error::Result;
use crate::utils::retry::{backoff_delay, retry_with_backoff, Attempt};
use reqwest::Client;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Retry budget per chain; only HTTP 429 on a write call re-arms it.
pub const MAX_SYNC_ATTEMPTS: u32 = 5;

/// Collapses the fetched catalog to one record per chain id. The last
/// occurrence of a duplicated id wins; output order is first-seen key order.
pub fn dedupe_chains(chains: Vec<ChainRecord>) -> Vec<ChainRecord> {
    let mut slots: HashMap<i64, usize> = HashMap::new();
    let mut unique: Vec<ChainRecord> = Vec::new();

    for chain in chains {
        match slots.entry(chain.chain_id) {
            Entry::Occupied(slot) => unique[*slot.get()] = chain,
            Entry::Vacant(slot) => {
                slot.insert(unique.len());
                unique.push(chain);
            }
        }
    }

    unique
}

enum PassOutcome {
    Completed,
    RateLimited { step: &'static str },
}

/// One full upsert → membership check → conditional insert pass. Returns
/// `RateLimited` only for a 429 on one of the two write calls; every other
/// terminal shape, including a dropped item, is `Completed`.
async fn sync_pass(
    config: &SyncConfig,
    attio: &AttioClient,
    chain: &ChainRecord,
) -> Result<PassOutcome> {
    let values = RecordValues::from_chain(chain);

    let record_id = match attio.upsert_record(&config.attio_object, &values).await? {
        UpsertOutcome::RateLimited => return Ok(PassOutcome::RateLimited { step: "upsert" }),
        UpsertOutcome::Unresolved { status, body } => {
            println!("⚠️ Failed to upsert: {}", chain.chain_name);
            println!("⚠️ Response ({}): {}", status, body);
            println!("{:?}", values);
            println!("{:?}", chain);
            return Ok(PassOutcome::Completed);
        }
        UpsertOutcome::Resolved { record_id } => record_id,
    };

    if attio
        .list_entry_exists(&config.attio_list_id, &record_id)
        .await?
    {
        println!("↳ already in list: {}", chain.chain_name);
        return Ok(PassOutcome::Completed);
    }

    match attio
        .create_list_entry(&config.attio_list_id, &record_id, &config.attio_object)
        .await?
    {
        InsertOutcome::RateLimited => Ok(PassOutcome::RateLimited { step: "list entry" }),
        InsertOutcome::AlreadyInList => {
            println!("↳ already in list: {}", chain.chain_name);
            Ok(PassOutcome::Completed)
        }
        InsertOutcome::Added => {
            println!("✅ added to list: {}", chain.chain_name);
            Ok(PassOutcome::Completed)
        }
        InsertOutcome::Failed { status, body } => {
            println!("❌ Error adding {}: {} - {}", chain.chain_name, status, body);
            Ok(PassOutcome::Completed)
        }
    }
}

/// Runs the full workflow for one chain. A 429 on either write re-runs the
/// whole pass, upsert included, after `2^attempt` seconds, up to
/// [`MAX_SYNC_ATTEMPTS`]. All other failures end the item here and never
/// reach sibling tasks.
pub async fn sync_chain(config: &SyncConfig, attio: &AttioClient, chain: &ChainRecord) {
    retry_with_backoff(MAX_SYNC_ATTEMPTS, |attempt| async move {
        match sync_pass(config, attio, chain).await {
            Ok(PassOutcome::Completed) => Attempt::Done(()),
            Ok(PassOutcome::RateLimited { step }) => {
                println!(
                    "⚠️ Rate limited on {} for {}, retrying in {}s…",
                    step,
                    chain.chain_name,
                    backoff_delay(attempt).as_secs()
                );
                Attempt::RetryAfterBackoff
            }
            Err(e) => {
                println!("❌ Unexpected error for {}: {}", chain.chain_name, e);
                Attempt::Done(())
            }
        }
    })
    .await;
}

/// Orchestrates a whole run: fetch, dedupe, fan out one task per unique
/// chain under the shared limiter, and join them all. Per-item outcomes do
/// not feed back into the run result.
pub struct SyncEngine {
    config: Arc<SyncConfig>,
    registry: RegistryClient,
    attio: Arc<AttioClient>,
    limiter: Arc<Semaphore>,
}

impl SyncEngine {
    pub fn new(config: SyncConfig) -> Self {
        // one connection pool shared by both APIs
        let client = Client::new();
        let registry = RegistryClient::new(client.clone(), config.registry_base_url.clone());
        let attio = Arc::new(AttioClient::new(
            client,
            config.attio_base_url.clone(),
            config.attio_token.clone(),
        ));
        let limiter = Arc::new(Semaphore::new(config.concurrent_requests));

        Self {
            config: Arc::new(config),
            registry,
            attio,
            limiter,
        }
    }

    pub async fn run(&self) -> Result<()> {
        let chains = self.registry.fetch_chains().await?;
        tracing::debug!("Fetched {} chains from registry", chains.len());

        let unique = dedupe_chains(chains);
        println!("Found {} unique chains, syncing into Attio…", unique.len());

        let mut handles = Vec::with_capacity(unique.len());
        for chain in unique {
            let config = Arc::clone(&self.config);
            let attio = Arc::clone(&self.attio);
            let limiter = Arc::clone(&self.limiter);

            handles.push(tokio::spawn(async move {
                // held across every retry of this chain's workflow
                let _permit = match limiter.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return,
                };
                sync_chain(&config, &attio, &chain).await;
            }));
        }

        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!("sync task aborted: {}", e);
            }
        }

        Ok(())
    }
}
