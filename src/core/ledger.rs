use serde::Serialize;

use super::Transaction;

/// Direction of a transaction relative to one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Sent,
    Received,
    Unknown,
}

/// One classified history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub txid: String,
    pub direction: Direction,
    /// Signed net amount in sats from the address's perspective.
    pub amount_sats: i64,
    pub confirmed: bool,
}

/// Classify an address's history into ledger entries. Only settled
/// transactions appear; the explorer feed is not trusted to pre-filter.
pub fn classify_history(transactions: &[Transaction], address: &str) -> Vec<LedgerEntry> {
    transactions
        .iter()
        .filter(|tx| tx.confirmed)
        .map(|tx| classify_transaction(tx, address))
        .collect()
}

/// Direction and signed net amount of a single transaction. The sender
/// check takes precedence, so a self-send resolves to `Sent` with the
/// spent sum negated.
pub fn classify_transaction(tx: &Transaction, address: &str) -> LedgerEntry {
    let is_sender = tx.inputs.iter().any(|input| input.prevout.pays(address));
    let is_receiver = tx.outputs.iter().any(|output| output.pays(address));

    let received_sats: u64 = tx
        .outputs
        .iter()
        .filter(|output| output.pays(address))
        .map(|output| output.value_sats)
        .sum();
    let sent_sats: u64 = tx
        .inputs
        .iter()
        .filter(|input| input.prevout.pays(address))
        .map(|input| input.prevout.value_sats)
        .sum();

    let direction = if is_sender {
        Direction::Sent
    } else if is_receiver {
        Direction::Received
    } else {
        Direction::Unknown
    };
    let amount_sats = if is_sender {
        -(sent_sats as i64)
    } else {
        received_sats as i64
    };

    LedgerEntry {
        txid: tx.txid.clone(),
        direction,
        amount_sats,
        confirmed: tx.confirmed,
    }
}
