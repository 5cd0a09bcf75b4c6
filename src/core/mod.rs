pub mod amount;
pub mod engine;
pub mod ledger;
pub mod matcher;
pub mod status;

/// A transaction output as reported by the explorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutput {
    /// Receiving address. Absent for non-standard scripts (e.g. OP_RETURN).
    pub address: Option<String>,
    pub value_sats: u64,
}

impl TxOutput {
    /// Whether this output pays `address`.
    pub fn pays(&self, address: &str) -> bool {
        self.address.as_deref() == Some(address)
    }
}

/// A transaction input, reduced to the output it spends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxInput {
    pub prevout: TxOutput,
}

/// A transaction from an address's history, validated at the explorer
/// boundary. Read-only view: nothing in this crate mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub txid: String,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    /// Flips false→true exactly once, when the transaction enters a block.
    pub confirmed: bool,
    /// Block inclusion time in unix millis. `None` while unconfirmed.
    pub block_time_millis: Option<i64>,
}
