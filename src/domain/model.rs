use serde::{Deserialize, Serialize};

/// One chain as returned by the registry's chains endpoint. Fetched fresh on
/// every run, never mutated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainRecord {
    pub chain_id: i64,
    pub chain_name: String,
    #[serde(default)]
    pub is_testnet: bool,
    #[serde(default)]
    pub rpc_url: Option<String>,
    #[serde(default)]
    pub chain_logo_uri: Option<String>,
}

/// Top-level registry payload. A missing `chains` field reads as empty.
#[derive(Debug, Deserialize)]
pub struct ChainsResponse {
    #[serde(default)]
    pub chains: Vec<ChainRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChainStatus {
    Mainnet,
    Testnet,
}

/// Field values written to the CRM record. Absent optionals serialize as
/// null rather than being defaulted or skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordValues {
    pub chain_id: String,
    pub name: String,
    pub rpc: Option<String>,
    pub status: ChainStatus,
    pub logo_url: Option<String>,
}

impl RecordValues {
    pub fn from_chain(chain: &ChainRecord) -> Self {
        let name = if chain.is_testnet {
            format!("{} (Testnet)", chain.chain_name)
        } else {
            chain.chain_name.clone()
        };

        Self {
            chain_id: chain.chain_id.to_string(),
            name,
            rpc: chain.rpc_url.clone(),
            status: if chain.is_testnet {
                ChainStatus::Testnet
            } else {
                ChainStatus::Mainnet
            },
            logo_url: chain.chain_logo_uri.clone(),
        }
    }
}

/// CRM upsert response, resolved down to `data.id.record_id`. Every level is
/// optional so a malformed or partial body reads as "no record id" instead of
/// a parse error.
#[derive(Debug, Deserialize)]
pub struct UpsertResponse {
    pub data: Option<UpsertData>,
}

#[derive(Debug, Deserialize)]
pub struct UpsertData {
    pub id: Option<RecordId>,
}

#[derive(Debug, Deserialize)]
pub struct RecordId {
    pub record_id: Option<String>,
}

impl UpsertResponse {
    pub fn record_id(self) -> Option<String> {
        self.data?.id?.record_id
    }
}

/// CRM list entries page for a membership query.
#[derive(Debug, Deserialize)]
pub struct EntriesResponse {
    #[serde(default)]
    pub data: Vec<ListEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ListEntry {
    #[serde(default)]
    pub parent_record_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(is_testnet: bool) -> ChainRecord {
        ChainRecord {
            chain_id: 43114,
            chain_name: "Avalanche".to_string(),
            is_testnet,
            rpc_url: Some("https://rpc.example.com".to_string()),
            chain_logo_uri: None,
        }
    }

    #[test]
    fn test_mainnet_values() {
        let values = RecordValues::from_chain(&chain(false));
        assert_eq!(values.chain_id, "43114");
        assert_eq!(values.name, "Avalanche");
        assert_eq!(values.status, ChainStatus::Mainnet);
    }

    #[test]
    fn test_testnet_name_suffix_and_status() {
        let values = RecordValues::from_chain(&chain(true));
        assert_eq!(values.name, "Avalanche (Testnet)");
        assert_eq!(values.status, ChainStatus::Testnet);
    }

    #[test]
    fn test_missing_optionals_serialize_as_null() {
        let values = RecordValues::from_chain(&ChainRecord {
            chain_id: 7,
            chain_name: "Seven".to_string(),
            is_testnet: false,
            rpc_url: None,
            chain_logo_uri: None,
        });

        let json = serde_json::to_value(&values).unwrap();
        assert_eq!(json["rpc"], serde_json::Value::Null);
        assert_eq!(json["logo_url"], serde_json::Value::Null);
        assert_eq!(json["status"], "Mainnet");
    }

    #[test]
    fn test_chain_record_from_registry_json() {
        let json = serde_json::json!({
            "chainId": 43113,
            "chainName": "Fuji",
            "isTestnet": true,
            "rpcUrl": "https://fuji.example.com",
            "chainLogoUri": "https://logo.example.com/fuji.png",
            "vmName": "EVM",
            "networkToken": { "symbol": "AVAX" }
        });

        let record: ChainRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.chain_id, 43113);
        assert_eq!(record.chain_name, "Fuji");
        assert!(record.is_testnet);
        assert_eq!(record.rpc_url.as_deref(), Some("https://fuji.example.com"));
    }

    #[test]
    fn test_chain_record_defaults() {
        let record: ChainRecord =
            serde_json::from_value(serde_json::json!({ "chainId": 1, "chainName": "One" }))
                .unwrap();
        assert!(!record.is_testnet);
        assert_eq!(record.rpc_url, None);
        assert_eq!(record.chain_logo_uri, None);
    }

    #[test]
    fn test_chains_response_without_chains_field() {
        let response: ChainsResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(response.chains.is_empty());
    }

    #[test]
    fn test_upsert_record_id_extraction() {
        let full: UpsertResponse = serde_json::from_value(serde_json::json!({
            "data": { "id": { "record_id": "r1" } }
        }))
        .unwrap();
        assert_eq!(full.record_id().as_deref(), Some("r1"));

        let missing_id: UpsertResponse =
            serde_json::from_value(serde_json::json!({ "data": {} })).unwrap();
        assert_eq!(missing_id.record_id(), None);

        let empty: UpsertResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(empty.record_id(), None);
    }
}
