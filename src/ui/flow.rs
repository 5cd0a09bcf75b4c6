use crate::core::engine::PollOutcome;

/// Screen-level state of the deposit flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    EnterAmount,
    ShowQrCode,
    Unconfirmed { txid: String },
    Confirmed { txid: String },
    Error,
}

impl Step {
    /// Apply one poll outcome. Only the polling steps react; the entry
    /// form and the terminal screens ignore late-arriving outcomes, so a
    /// result that was already queued when the user backed out cannot
    /// yank the UI forward again.
    pub fn apply(&self, outcome: &PollOutcome) -> Step {
        if !self.polling() {
            return self.clone();
        }
        match outcome {
            PollOutcome::Awaiting => Step::ShowQrCode,
            PollOutcome::Unconfirmed { txid } => Step::Unconfirmed { txid: txid.clone() },
            PollOutcome::Confirmed { txid } => Step::Confirmed { txid: txid.clone() },
            PollOutcome::Failed => Step::Error,
        }
    }

    /// Whether a payment watch is active in this step.
    pub fn polling(&self) -> bool {
        matches!(self, Step::ShowQrCode | Step::Unconfirmed { .. })
    }
}

/// BIP21 payment request encoded into the QR code.
pub fn payment_uri(address: &str, amount_btc: &str) -> String {
    format!("bitcoin:{address}?amount={amount_btc}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unconfirmed(txid: &str) -> PollOutcome {
        PollOutcome::Unconfirmed { txid: txid.into() }
    }

    fn confirmed(txid: &str) -> PollOutcome {
        PollOutcome::Confirmed { txid: txid.into() }
    }

    #[test]
    fn awaiting_keeps_the_qr_screen() {
        assert_eq!(Step::ShowQrCode.apply(&PollOutcome::Awaiting), Step::ShowQrCode);
    }

    #[test]
    fn detection_moves_to_unconfirmed() {
        assert_eq!(
            Step::ShowQrCode.apply(&unconfirmed("tx1")),
            Step::Unconfirmed { txid: "tx1".into() }
        );
    }

    #[test]
    fn unconfirmed_advances_to_confirmed() {
        let step = Step::Unconfirmed { txid: "tx1".into() };
        assert_eq!(step.apply(&confirmed("tx1")), Step::Confirmed { txid: "tx1".into() });
    }

    #[test]
    fn match_dropping_out_returns_to_qr_screen() {
        let step = Step::Unconfirmed { txid: "tx1".into() };
        assert_eq!(step.apply(&PollOutcome::Awaiting), Step::ShowQrCode);
    }

    #[test]
    fn failure_lands_on_error() {
        assert_eq!(Step::ShowQrCode.apply(&PollOutcome::Failed), Step::Error);
        let step = Step::Unconfirmed { txid: "tx1".into() };
        assert_eq!(step.apply(&PollOutcome::Failed), Step::Error);
    }

    #[test]
    fn terminal_and_entry_steps_ignore_outcomes() {
        let done = Step::Confirmed { txid: "tx1".into() };
        assert_eq!(done.apply(&PollOutcome::Failed), done);
        assert_eq!(Step::Error.apply(&confirmed("tx2")), Step::Error);
        assert_eq!(Step::EnterAmount.apply(&confirmed("tx2")), Step::EnterAmount);
    }

    #[test]
    fn polling_only_while_watching() {
        assert!(Step::ShowQrCode.polling());
        assert!(Step::Unconfirmed { txid: "tx1".into() }.polling());
        assert!(!Step::EnterAmount.polling());
        assert!(!Step::Confirmed { txid: "tx1".into() }.polling());
        assert!(!Step::Error.polling());
    }

    #[test]
    fn builds_a_bip21_uri() {
        assert_eq!(
            payment_uri("mzE3QR8QjTNwzfQQ7Af85RmQ6mFhwvbQQb", "0.00010000"),
            "bitcoin:mzE3QR8QjTNwzfQQ7Af85RmQ6mFhwvbQQb?amount=0.00010000"
        );
    }
}
