//! The two collaborator-facing contracts: payment status checks and the
//! wallet ledger. Handlers compose one explorer fetch with the pure core
//! logic; everything below the fetch is network-free and tested as such.

use bitcoin::address::NetworkUnchecked;
use bitcoin::{Address, Network};
use serde::Serialize;

use crate::core::status::{PaymentState, StatusReport};
use crate::core::{Transaction, amount, ledger, matcher, status};
use crate::explorer::{AddressStats, EsploraClient, ExplorerError};

/// Body of a payment status check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentStatusResponse {
    pub message: String,
    /// Absent on the upstream-failure shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentState>,
    pub success: bool,
    pub data: Option<PaymentDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub address: String,
    /// Matched amount as an 8-decimal fixed-point tBTC string.
    pub amount: String,
    pub transaction_id: String,
}

impl PaymentStatusResponse {
    /// Malformed address or amount.
    pub fn invalid_request() -> Self {
        Self {
            message: "Invalid address or amount provided".into(),
            status: Some(PaymentState::Error),
            success: false,
            data: None,
        }
    }

    /// The explorer call failed.
    pub fn upstream_failure() -> Self {
        Self {
            message: "Internal Server Error".into(),
            status: None,
            success: false,
            data: None,
        }
    }

    pub fn http_status(&self) -> u16 {
        if self.success {
            200
        } else if self.status.is_some() {
            400
        } else {
            500
        }
    }
}

/// Run one request/response classification cycle against the explorer.
/// A validation failure produces the 400-shaped body directly; an explorer
/// failure is returned as `Err` for the caller to map to the 500 shape.
pub async fn check_payment_status(
    explorer: &EsploraClient,
    address: &str,
    amount_raw: &str,
    since_millis: Option<i64>,
) -> Result<PaymentStatusResponse, ExplorerError> {
    let target_sats = match validate_request(address, amount_raw) {
        Some(sats) => sats,
        None => return Ok(PaymentStatusResponse::invalid_request()),
    };
    let transactions = explorer.address_txs(address).await?;
    Ok(classify_payment(&transactions, address, target_sats, since_millis))
}

/// Match and classify, network-free.
pub fn classify_payment(
    transactions: &[Transaction],
    address: &str,
    target_sats: u64,
    since_millis: Option<i64>,
) -> PaymentStatusResponse {
    let matched = matcher::find_payment(transactions, address, target_sats, since_millis);
    let report = status::classify(matched, true);
    status_response(&report, address, target_sats)
}

fn status_response(report: &StatusReport, address: &str, target_sats: u64) -> PaymentStatusResponse {
    let message = match report.state {
        PaymentState::Awaiting => "No matching transaction found",
        PaymentState::Unconfirmed => "Transaction detected but not confirmed",
        PaymentState::Confirmed => "Transaction confirmed",
        PaymentState::Error => "Invalid address or amount provided",
    };
    let data = report.transaction_id.as_ref().map(|txid| PaymentDetails {
        address: address.to_owned(),
        amount: amount::sats_to_btc_string(target_sats),
        transaction_id: txid.clone(),
    });
    PaymentStatusResponse {
        message: message.into(),
        status: Some(report.state),
        success: report.state != PaymentState::Error,
        data,
    }
}

fn validate_request(address: &str, amount_raw: &str) -> Option<u64> {
    if !is_valid_testnet_address(address) {
        return None;
    }
    amount::parse_btc(amount_raw).ok()
}

/// Whether `address` parses and belongs to testnet.
pub fn is_valid_testnet_address(address: &str) -> bool {
    address
        .parse::<Address<NetworkUnchecked>>()
        .map(|parsed| parsed.require_network(Network::Testnet).is_ok())
        .unwrap_or(false)
}

/// Body of the wallet ledger endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletLedgerResponse {
    pub message: String,
    pub data: Option<WalletSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletSummary {
    /// 8-decimal fixed-point tBTC string.
    pub balance: String,
    pub transactions: Vec<LedgerEntryView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntryView {
    pub txid: String,
    pub direction: ledger::Direction,
    /// Signed net amount in tBTC from the address's perspective.
    pub amount: f64,
    pub confirmed: bool,
}

impl WalletLedgerResponse {
    pub fn invalid_request() -> Self {
        Self {
            message: "Invalid address provided".into(),
            data: None,
        }
    }

    pub fn upstream_failure() -> Self {
        Self {
            message: "Internal Server Error".into(),
            data: None,
        }
    }
}

/// Balance and classified history for an address. The two explorer calls
/// run concurrently, matching how the page originally fetched them.
pub async fn wallet_ledger(
    explorer: &EsploraClient,
    address: &str,
) -> Result<WalletLedgerResponse, ExplorerError> {
    if !is_valid_testnet_address(address) {
        return Ok(WalletLedgerResponse::invalid_request());
    }
    let (stats, transactions) = tokio::try_join!(
        explorer.address_stats(address),
        explorer.address_txs(address)
    )?;
    Ok(ledger_response(&stats, &transactions, address))
}

/// The balance comes from the explorer's funded/spent summary while the
/// entry list is classified from the raw transactions. The two paths are
/// independent on purpose and must agree.
pub fn ledger_response(
    stats: &AddressStats,
    transactions: &[Transaction],
    address: &str,
) -> WalletLedgerResponse {
    let balance_sats = stats
        .chain_stats
        .funded_txo_sum
        .saturating_sub(stats.chain_stats.spent_txo_sum);
    let entries = ledger::classify_history(transactions, address);
    let views = entries
        .into_iter()
        .map(|entry| LedgerEntryView {
            txid: entry.txid,
            direction: entry.direction,
            amount: entry.amount_sats as f64 / amount::SATS_PER_BTC as f64,
            confirmed: entry.confirmed,
        })
        .collect();
    WalletLedgerResponse {
        message: "OK".into(),
        data: Some(WalletSummary {
            balance: amount::sats_to_btc_string(balance_sats),
            transactions: views,
        }),
    }
}
