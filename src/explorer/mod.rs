use reqwest::Client;
use serde::Deserialize;

use crate::core::{Transaction, TxInput, TxOutput};

/// Client for an Esplora-style block explorer REST API.
#[derive(Clone)]
pub struct EsploraClient {
    base_url: String,
    client: Client,
}

impl EsploraClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Funded/spent totals for an address (`GET /address/{addr}`).
    pub async fn address_stats(&self, address: &str) -> Result<AddressStats, ExplorerError> {
        self.get_json(&format!("/address/{address}")).await
    }

    /// Transaction history for an address, most-recent-first
    /// (`GET /address/{addr}/txs`), converted to domain transactions at
    /// this boundary.
    pub async fn address_txs(&self, address: &str) -> Result<Vec<Transaction>, ExplorerError> {
        let raw: Vec<EsploraTx> = self.get_json(&format!("/address/{address}/txs")).await?;
        Ok(raw.into_iter().map(EsploraTx::into_transaction).collect())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ExplorerError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ExplorerError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExplorerError::Status(status));
        }

        let body = response.text().await.map_err(ExplorerError::Http)?;
        serde_json::from_str(&body).map_err(ExplorerError::Shape)
    }
}

#[derive(Debug)]
pub enum ExplorerError {
    Http(reqwest::Error),
    Status(reqwest::StatusCode),
    Shape(serde_json::Error),
}

impl std::fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExplorerError::Http(e) => write!(f, "HTTP error: {e}"),
            ExplorerError::Status(s) => write!(f, "unexpected explorer status: {s}"),
            ExplorerError::Shape(e) => write!(f, "malformed explorer payload: {e}"),
        }
    }
}

impl std::error::Error for ExplorerError {}

/// `GET /address/{addr}` payload, reduced to the settled totals the
/// ledger needs. A response without `chain_stats` is malformed.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressStats {
    pub chain_stats: ChainStats,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChainStats {
    pub funded_txo_sum: u64,
    pub spent_txo_sum: u64,
}

// Raw wire shapes. Required fields are the boundary validation: a payload
// missing any of them fails deserialization instead of leaking half-formed
// transactions into the core.

#[derive(Debug, Deserialize)]
struct EsploraTx {
    txid: String,
    #[serde(default)]
    vin: Vec<EsploraVin>,
    #[serde(default)]
    vout: Vec<EsploraVout>,
    status: EsploraStatus,
}

#[derive(Debug, Deserialize)]
struct EsploraVin {
    /// Absent on coinbase inputs.
    prevout: Option<EsploraVout>,
}

#[derive(Debug, Deserialize)]
struct EsploraVout {
    scriptpubkey_address: Option<String>,
    value: u64,
}

#[derive(Debug, Deserialize)]
struct EsploraStatus {
    confirmed: bool,
    /// Unix seconds; present once confirmed.
    block_time: Option<i64>,
}

impl EsploraTx {
    fn into_transaction(self) -> Transaction {
        Transaction {
            txid: self.txid,
            // coinbase inputs spend nothing and cannot involve our address
            inputs: self
                .vin
                .into_iter()
                .filter_map(|vin| vin.prevout)
                .map(|prevout| TxInput {
                    prevout: prevout.into_output(),
                })
                .collect(),
            outputs: self
                .vout
                .into_iter()
                .map(EsploraVout::into_output)
                .collect(),
            confirmed: self.status.confirmed,
            block_time_millis: self.status.block_time.map(|t| t * 1_000),
        }
    }
}

impl EsploraVout {
    fn into_output(self) -> TxOutput {
        TxOutput {
            address: self.scriptpubkey_address,
            value_sats: self.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_a_full_transaction() {
        let json = r#"{
            "txid": "f4184fc596403b9d638783cf57adfe4c75c605f6356fbc91338530e9831e9e16",
            "vin": [
                {"prevout": {"scriptpubkey_address": "mzE3QR8QjTNwzfQQ7Af85RmQ6mFhwvbQQb", "value": 5000}},
                {"prevout": null}
            ],
            "vout": [
                {"scriptpubkey_address": "n2eMqTT929pb1RDNuqEnxdaLau1rxy3efi", "value": 4000},
                {"scriptpubkey_address": null, "value": 0}
            ],
            "status": {"confirmed": true, "block_time": 1716900000}
        }"#;
        let raw: EsploraTx = serde_json::from_str(json).unwrap();
        let tx = raw.into_transaction();

        // the coinbase-style input without a prevout is dropped
        assert_eq!(tx.inputs.len(), 1);
        assert_eq!(
            tx.inputs[0].prevout.address.as_deref(),
            Some("mzE3QR8QjTNwzfQQ7Af85RmQ6mFhwvbQQb")
        );
        assert_eq!(tx.outputs.len(), 2);
        assert_eq!(tx.outputs[1].address, None);
        assert!(tx.confirmed);
        assert_eq!(tx.block_time_millis, Some(1_716_900_000_000));
    }

    #[test]
    fn unconfirmed_status_has_no_block_time() {
        let json = r#"{
            "txid": "ab",
            "vin": [],
            "vout": [],
            "status": {"confirmed": false, "block_time": null}
        }"#;
        let tx = serde_json::from_str::<EsploraTx>(json).unwrap().into_transaction();
        assert!(!tx.confirmed);
        assert_eq!(tx.block_time_millis, None);
    }

    #[test]
    fn missing_status_is_a_shape_error() {
        let json = r#"{"txid": "ab", "vin": [], "vout": []}"#;
        assert!(serde_json::from_str::<EsploraTx>(json).is_err());
    }

    #[test]
    fn address_stats_deserialize() {
        let json = r#"{
            "address": "mzE3QR8QjTNwzfQQ7Af85RmQ6mFhwvbQQb",
            "chain_stats": {
                "funded_txo_count": 3,
                "funded_txo_sum": 300000,
                "spent_txo_count": 1,
                "spent_txo_sum": 100000,
                "tx_count": 4
            }
        }"#;
        let stats: AddressStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.chain_stats.funded_txo_sum, 300_000);
        assert_eq!(stats.chain_stats.spent_txo_sum, 100_000);
    }

    #[test]
    fn missing_chain_stats_is_a_shape_error() {
        let json = r#"{"address": "mzE3QR8QjTNwzfQQ7Af85RmQ6mFhwvbQQb"}"#;
        assert!(serde_json::from_str::<AddressStats>(json).is_err());
    }
}
