use super::Transaction;

/// Scan an address's transactions for one that pays `address` exactly
/// `target_sats`. The list arrives most-recent-first from the explorer, so
/// the first structural match is the freshest one.
///
/// With `since_millis` set, a candidate must also carry a block time
/// strictly after the cutoff; this keeps a payment broadcast before the
/// current deposit request from matching when an address is reused.
///
/// When several transactions pay the same amount and no cutoff is given,
/// the freshest one wins. That ambiguity is inherent to amount-based
/// matching, not a uniqueness guarantee.
pub fn find_payment<'a>(
    transactions: &'a [Transaction],
    address: &str,
    target_sats: u64,
    since_millis: Option<i64>,
) -> Option<&'a Transaction> {
    if address.is_empty() || target_sats == 0 {
        return None;
    }
    transactions.iter().find(|tx| {
        let pays_target = tx
            .outputs
            .iter()
            .any(|output| output.pays(address) && output.value_sats == target_sats);
        if !pays_target {
            return false;
        }
        match since_millis {
            Some(cutoff) => tx.block_time_millis.is_some_and(|t| t > cutoff),
            None => true,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{TxInput, TxOutput};

    const ADDR: &str = "mzE3QR8QjTNwzfQQ7Af85RmQ6mFhwvbQQb";
    const OTHER: &str = "n2eMqTT929pb1RDNuqEnxdaLau1rxy3efi";

    fn payment_tx(txid: &str, to: &str, sats: u64, block_time_millis: Option<i64>) -> Transaction {
        Transaction {
            txid: txid.to_string(),
            inputs: vec![TxInput {
                prevout: TxOutput {
                    address: Some(OTHER.to_string()),
                    value_sats: sats + 1_000,
                },
            }],
            outputs: vec![
                TxOutput {
                    address: Some(to.to_string()),
                    value_sats: sats,
                },
                TxOutput {
                    address: Some(OTHER.to_string()),
                    value_sats: 500,
                },
            ],
            confirmed: block_time_millis.is_some(),
            block_time_millis,
        }
    }

    #[test]
    fn matches_exact_output() {
        let txs = vec![payment_tx("tx1", ADDR, 81927577, Some(1_000))];
        let matched = find_payment(&txs, ADDR, 81927577, None);
        assert_eq!(matched.map(|tx| tx.txid.as_str()), Some("tx1"));
    }

    #[test]
    fn off_by_one_sat_does_not_match() {
        let txs = vec![payment_tx("tx1", ADDR, 81927576, Some(1_000))];
        assert!(find_payment(&txs, ADDR, 81927577, None).is_none());
    }

    #[test]
    fn other_address_does_not_match() {
        let txs = vec![payment_tx("tx1", OTHER, 10_000, Some(1_000))];
        assert!(find_payment(&txs, ADDR, 10_000, None).is_none());
    }

    #[test]
    fn empty_list_yields_none() {
        assert!(find_payment(&[], ADDR, 200_000_000, None).is_none());
    }

    #[test]
    fn freshest_of_several_candidates_wins() {
        // explorer order is most-recent-first
        let txs = vec![
            payment_tx("fresh", ADDR, 10_000, Some(2_000)),
            payment_tx("stale", ADDR, 10_000, Some(1_000)),
        ];
        let matched = find_payment(&txs, ADDR, 10_000, None);
        assert_eq!(matched.map(|tx| tx.txid.as_str()), Some("fresh"));
    }

    #[test]
    fn cutoff_skips_transactions_at_or_before_it() {
        let txs = vec![
            payment_tx("at", ADDR, 10_000, Some(5_000)),
            payment_tx("before", ADDR, 10_000, Some(4_000)),
        ];
        assert!(find_payment(&txs, ADDR, 10_000, Some(5_000)).is_none());
    }

    #[test]
    fn cutoff_keeps_transactions_after_it() {
        let txs = vec![
            payment_tx("after", ADDR, 10_000, Some(6_000)),
            payment_tx("before", ADDR, 10_000, Some(4_000)),
        ];
        let matched = find_payment(&txs, ADDR, 10_000, Some(5_000));
        assert_eq!(matched.map(|tx| tx.txid.as_str()), Some("after"));
    }

    #[test]
    fn cutoff_requires_a_block_time() {
        let txs = vec![payment_tx("pending", ADDR, 10_000, None)];
        assert!(find_payment(&txs, ADDR, 10_000, Some(5_000)).is_none());
        // without a cutoff the pending transaction matches
        assert!(find_payment(&txs, ADDR, 10_000, None).is_some());
    }

    #[test]
    fn rejects_degenerate_targets() {
        let txs = vec![payment_tx("tx1", ADDR, 10_000, Some(1_000))];
        assert!(find_payment(&txs, "", 10_000, None).is_none());
        assert!(find_payment(&txs, ADDR, 0, None).is_none());
    }

    #[test]
    fn input_is_untouched() {
        let txs = vec![payment_tx("tx1", ADDR, 10_000, Some(1_000))];
        let before = txs.clone();
        let _ = find_payment(&txs, ADDR, 10_000, None);
        assert_eq!(txs, before);
    }
}
