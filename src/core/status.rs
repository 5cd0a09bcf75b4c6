use serde::Serialize;

use super::Transaction;

/// Lifecycle state of a watched deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentState {
    Awaiting,
    Unconfirmed,
    Confirmed,
    Error,
}

/// Outcome of one classification cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub state: PaymentState,
    pub transaction_id: Option<String>,
}

/// Map a match result into a lifecycle state. A failed request validation
/// wins over anything the transaction list says; otherwise no match means
/// the deposit is still awaited, and a match follows the transaction's
/// confirmation flag. Pure and stateless per call.
pub fn classify(matched: Option<&Transaction>, validation_ok: bool) -> StatusReport {
    if !validation_ok {
        return StatusReport {
            state: PaymentState::Error,
            transaction_id: None,
        };
    }
    match matched {
        None => StatusReport {
            state: PaymentState::Awaiting,
            transaction_id: None,
        },
        Some(tx) => StatusReport {
            state: if tx.confirmed {
                PaymentState::Confirmed
            } else {
                PaymentState::Unconfirmed
            },
            transaction_id: Some(tx.txid.clone()),
        },
    }
}
