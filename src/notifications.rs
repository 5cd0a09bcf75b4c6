use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::config::NotificationConfig;

/// Desktop notification sender with cooldown to prevent spam.
pub struct Notifier {
    enabled: bool,
    cooldown: Duration,
    last_sent: Mutex<Option<Instant>>,
}

impl Notifier {
    pub fn new(config: &NotificationConfig) -> Self {
        Self {
            enabled: config.enabled,
            cooldown: Duration::from_secs(config.cooldown_seconds),
            last_sent: Mutex::new(None),
        }
    }

    /// Try to send a desktop notification for a confirmed deposit.
    /// Returns true if a notification was sent, false if skipped.
    pub fn notify_confirmed(&self, amount_btc: &str, txid: &str) -> bool {
        if !self.enabled {
            return false;
        }
        if !self.check_cooldown() {
            return false;
        }

        self.send_notification(amount_btc, txid);
        true
    }

    /// Check and update cooldown. Returns true if enough time has passed.
    fn check_cooldown(&self) -> bool {
        let mut last = self.last_sent.lock().unwrap();
        let now = Instant::now();
        if let Some(prev) = *last {
            if now.duration_since(prev) < self.cooldown {
                return false;
            }
        }
        *last = Some(now);
        true
    }

    /// Fire-and-forget: send the actual desktop notification.
    fn send_notification(&self, amount_btc: &str, txid: &str) {
        let title = "₿ DepositWatch — payment confirmed".to_string();
        let txid_short = &txid[..8.min(txid.len())];
        let body = format!("{amount_btc} tBTC | {txid_short}");

        // Fire-and-forget in a background thread to never block the engine
        std::thread::spawn(move || {
            if let Err(e) = notify_rust::Notification::new()
                .summary(&title)
                .body(&body)
                .show()
            {
                tracing::debug!("Desktop notification failed: {e}");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_blocks_rapid_notifications() {
        let config = NotificationConfig {
            enabled: true,
            cooldown_seconds: 30,
        };
        let notifier = Notifier::new(&config);

        // First call should pass cooldown
        assert!(notifier.check_cooldown());
        // Second call immediately should be blocked
        assert!(!notifier.check_cooldown());
    }

    #[test]
    fn cooldown_zero_allows_all() {
        let config = NotificationConfig {
            enabled: true,
            cooldown_seconds: 0,
        };
        let notifier = Notifier::new(&config);
        assert!(notifier.check_cooldown());
        assert!(notifier.check_cooldown());
    }

    #[test]
    fn disabled_notifier_skips() {
        let config = NotificationConfig {
            enabled: false,
            cooldown_seconds: 0,
        };
        let notifier = Notifier::new(&config);
        assert!(!notifier.notify_confirmed("0.00010000", "aabbccdd11223344"));
    }
}
