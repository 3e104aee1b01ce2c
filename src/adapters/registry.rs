use crate::domain::model::{ChainRecord, ChainsResponse};
use crate::utils::error::Result;
use reqwest::Client;

/// Read-only client for the public chain registry.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: Client,
    base_url: String,
}

impl RegistryClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetches the full chain catalog in one request. Single page, no retry;
    /// a transport or parse failure here is fatal to the whole run.
    pub async fn fetch_chains(&self) -> Result<Vec<ChainRecord>> {
        let url = format!("{}/v1/chains", self.base_url);
        tracing::debug!("Fetching chains from {}", url);

        let response = self.client.get(&url).send().await?;
        tracing::debug!("Registry response status: {}", response.status());

        let body: ChainsResponse = response.json().await?;
        Ok(body.chains)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_chains_parses_payload() {
        let server = MockServer::start();
        let registry_mock = server.mock(|when, then| {
            when.method(GET).path("/v1/chains");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "chains": [
                        { "chainId": 43114, "chainName": "Avalanche", "isTestnet": false },
                        { "chainId": 43113, "chainName": "Fuji", "isTestnet": true }
                    ]
                }));
        });

        let client = RegistryClient::new(Client::new(), server.base_url());
        let chains = client.fetch_chains().await.unwrap();

        registry_mock.assert();
        assert_eq!(chains.len(), 2);
        assert_eq!(chains[0].chain_name, "Avalanche");
        assert!(chains[1].is_testnet);
    }

    #[tokio::test]
    async fn test_fetch_chains_missing_field_is_empty() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/chains");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({ "nextPageToken": null }));
        });

        let client = RegistryClient::new(Client::new(), server.base_url());
        let chains = client.fetch_chains().await.unwrap();
        assert!(chains.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_chains_malformed_body_is_fatal() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/chains");
            then.status(500).body("upstream unavailable");
        });

        let client = RegistryClient::new(Client::new(), server.base_url());
        assert!(client.fetch_chains().await.is_err());
    }
}
