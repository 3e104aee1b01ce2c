use crate::domain::model::{EntriesResponse, RecordValues, UpsertResponse};
use crate::utils::error::Result;
use reqwest::{Client, StatusCode};
use serde_json::json;

/// Client for the CRM's records and list-entries endpoints. Write calls
/// surface their status as an outcome enum so the synchronizer can branch on
/// 429/409/2xx without re-inspecting raw responses.
#[derive(Debug, Clone)]
pub struct AttioClient {
    client: Client,
    base_url: String,
    token: String,
}

#[derive(Debug)]
pub enum UpsertOutcome {
    /// The upsert landed and the response carried a record id.
    Resolved { record_id: String },
    /// HTTP 429; the caller owns backoff.
    RateLimited,
    /// The body parsed but no record id could be extracted.
    Unresolved { status: StatusCode, body: String },
}

#[derive(Debug)]
pub enum InsertOutcome {
    Added,
    AlreadyInList,
    RateLimited,
    Failed { status: StatusCode, body: String },
}

impl AttioClient {
    pub fn new(client: Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Upserts one record, matching on the `chain_id` attribute.
    pub async fn upsert_record(&self, object: &str, values: &RecordValues) -> Result<UpsertOutcome> {
        let url = format!("{}/objects/{}/records", self.base_url, object);
        let response = self
            .client
            .put(&url)
            .query(&[("matching_attribute", "chain_id")])
            .bearer_auth(&self.token)
            .json(&json!({ "data": { "values": values } }))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Upsert response status for {}: {}", values.chain_id, status);

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Ok(UpsertOutcome::RateLimited);
        }

        let body = response.text().await?;
        let parsed: UpsertResponse = serde_json::from_str(&body)?;
        match parsed.record_id() {
            Some(record_id) => Ok(UpsertOutcome::Resolved { record_id }),
            None => Ok(UpsertOutcome::Unresolved { status, body }),
        }
    }

    /// Returns true if the record already has an entry in the list. A failed
    /// query reads as "not present"; the insert that follows still relies on
    /// the CRM's own uniqueness check (409).
    pub async fn list_entry_exists(&self, list_id: &str, record_id: &str) -> Result<bool> {
        let url = format!("{}/lists/{}/entries", self.base_url, list_id);
        let response = self
            .client
            .get(&url)
            .query(&[("parent_record_id", record_id)])
            .bearer_auth(&self.token)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            tracing::debug!(
                "Membership query for {} returned {}, treating as not present",
                record_id,
                response.status()
            );
            return Ok(false);
        }

        let entries: EntriesResponse = response.json().await?;
        Ok(entries
            .data
            .iter()
            .any(|entry| entry.parent_record_id.as_deref() == Some(record_id)))
    }

    /// Creates a list entry referencing an existing record.
    pub async fn create_list_entry(
        &self,
        list_id: &str,
        parent_record_id: &str,
        parent_object: &str,
    ) -> Result<InsertOutcome> {
        let url = format!("{}/lists/{}/entries", self.base_url, list_id);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({
                "data": {
                    "parent_record_id": parent_record_id,
                    "parent_object": parent_object,
                    "entry_values": {},
                }
            }))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("List entry response status for {}: {}", parent_record_id, status);

        match status {
            StatusCode::TOO_MANY_REQUESTS => Ok(InsertOutcome::RateLimited),
            StatusCode::CONFLICT => Ok(InsertOutcome::AlreadyInList),
            StatusCode::OK | StatusCode::CREATED => Ok(InsertOutcome::Added),
            _ => Ok(InsertOutcome::Failed {
                status,
                body: response.text().await?,
            }),
        }
    }
}
