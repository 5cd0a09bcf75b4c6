use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::api;
use crate::config::Config;
use crate::core::status::PaymentState;
use crate::explorer::EsploraClient;
use crate::notifications::Notifier;

/// Commands from the UI to the engine.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Begin watching for a deposit of `amount` tBTC to `address`.
    /// Supersedes any active watch.
    WatchPayment {
        address: String,
        amount: String,
        /// Only transactions with a block time after this cutoff count.
        since_millis: Option<i64>,
    },
    /// Cancel the active watch, if any.
    CancelPayment,
}

/// Events from the engine to the UI.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    Payment(PollOutcome),
    Wallet(api::WalletSummary),
}

/// One classification cycle's result, as seen by the step machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Awaiting,
    Unconfirmed { txid: String },
    Confirmed { txid: String },
    Failed,
}

impl PollOutcome {
    /// Terminal outcomes stop the poll loop.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PollOutcome::Confirmed { .. } | PollOutcome::Failed)
    }

    /// Reduce an endpoint response to what the step machine needs. A body
    /// that claims a detected transaction but carries no detail is treated
    /// as a failure rather than guessed around.
    pub fn from_response(response: &api::PaymentStatusResponse) -> Self {
        if !response.success {
            return PollOutcome::Failed;
        }
        let txid = response.data.as_ref().map(|d| d.transaction_id.clone());
        match (response.status, txid) {
            (Some(PaymentState::Awaiting), _) => PollOutcome::Awaiting,
            (Some(PaymentState::Unconfirmed), Some(txid)) => PollOutcome::Unconfirmed { txid },
            (Some(PaymentState::Confirmed), Some(txid)) => PollOutcome::Confirmed { txid },
            _ => PollOutcome::Failed,
        }
    }
}

/// Owns the single active payment watch. Starting a new watch aborts the
/// previous task and strands its ticket, so two watches can never race to
/// report state. Cancellation is a synchronous sequence bump: an in-flight
/// response whose ticket went stale is discarded, never applied.
pub struct PollController {
    latest: Arc<AtomicU64>,
    active: Option<JoinHandle<()>>,
}

impl PollController {
    pub fn new() -> Self {
        Self {
            latest: Arc::new(AtomicU64::new(0)),
            active: None,
        }
    }

    /// Invalidate any prior watch and issue the ticket for a new one.
    pub fn begin(&mut self) -> PollTicket {
        self.abort_active();
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        PollTicket {
            seq,
            latest: Arc::clone(&self.latest),
        }
    }

    /// Track the task driving the current watch.
    pub fn attach(&mut self, handle: JoinHandle<()>) {
        self.active = Some(handle);
    }

    /// Cancel the active watch. No outcome from it can be applied past
    /// this point.
    pub fn cancel(&mut self) {
        self.abort_active();
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    fn abort_active(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.abort();
        }
    }
}

impl Default for PollController {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof that a poll loop is still the latest watch issued.
#[derive(Debug, Clone)]
pub struct PollTicket {
    seq: u64,
    latest: Arc<AtomicU64>,
}

impl PollTicket {
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.seq
    }
}

/// Engine entry point, run on its own tokio runtime thread. Reacts to UI
/// commands until the command channel closes.
pub async fn run_engine(
    mut commands: mpsc::UnboundedReceiver<EngineCommand>,
    events: mpsc::UnboundedSender<EngineEvent>,
    explorer: EsploraClient,
    notifier: Notifier,
    config: Config,
    wallet_address: String,
) {
    let notifier = Arc::new(notifier);
    let mut controller = PollController::new();
    let payment_interval = Duration::from_millis(config.polling.payment_interval_ms);
    let balance_interval = Duration::from_millis(config.polling.balance_interval_ms);

    let balance_task = tokio::spawn(balance_loop(
        explorer.clone(),
        wallet_address,
        balance_interval,
        events.clone(),
    ));

    info!("Engine started");

    while let Some(command) = commands.recv().await {
        match command {
            EngineCommand::WatchPayment {
                address,
                amount,
                since_millis,
            } => {
                info!("Watching for deposit of {amount} tBTC to {address}");
                let ticket = controller.begin();
                let explorer = explorer.clone();
                let events = events.clone();
                let notifier = Arc::clone(&notifier);
                let handle = tokio::spawn(async move {
                    let check = move || {
                        let explorer = explorer.clone();
                        let address = address.clone();
                        let amount = amount.clone();
                        let notifier = Arc::clone(&notifier);
                        async move {
                            check_once(&explorer, &address, &amount, since_millis, &notifier).await
                        }
                    };
                    poll_loop(check, ticket, events, payment_interval).await;
                });
                controller.attach(handle);
            }
            EngineCommand::CancelPayment => {
                info!("Payment watch cancelled");
                controller.cancel();
            }
        }
    }

    controller.cancel();
    balance_task.abort();
    info!("Engine shutting down");
}

/// Drive one watch: tick at a fixed interval, run a classification cycle,
/// forward the outcome while the ticket is still current. A cycle whose
/// watch was cancelled mid-flight is discarded, not applied.
async fn poll_loop<F, Fut>(
    mut check: F,
    ticket: PollTicket,
    events: mpsc::UnboundedSender<EngineEvent>,
    interval: Duration,
) where
    F: FnMut() -> Fut,
    Fut: Future<Output = PollOutcome>,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick of an interval fires immediately; consume it so the
    // first check happens one full interval after the QR is shown
    ticker.tick().await;

    loop {
        ticker.tick().await;
        if !ticket.is_current() {
            break;
        }
        let outcome = check().await;
        if !ticket.is_current() {
            debug!("Discarding stale poll outcome: {outcome:?}");
            break;
        }
        let stop = outcome.is_terminal();
        if events.send(EngineEvent::Payment(outcome)).is_err() {
            break;
        }
        if stop {
            break;
        }
    }
}

async fn check_once(
    explorer: &EsploraClient,
    address: &str,
    amount: &str,
    since_millis: Option<i64>,
    notifier: &Notifier,
) -> PollOutcome {
    let response = match api::check_payment_status(explorer, address, amount, since_millis).await {
        Ok(response) => response,
        Err(e) => {
            warn!("Payment status check failed: {e}");
            api::PaymentStatusResponse::upstream_failure()
        }
    };
    debug!(
        "Payment status: {} {}",
        response.http_status(),
        response.message
    );

    let outcome = PollOutcome::from_response(&response);
    if let PollOutcome::Confirmed { txid } = &outcome {
        if let Some(data) = &response.data {
            notifier.notify_confirmed(&data.amount, txid);
        }
    }
    outcome
}

/// Keep the wallet panel fresh on its own fixed interval. Upstream
/// hiccups are logged and retried on the next tick; the panel just keeps
/// its last good summary.
async fn balance_loop(
    explorer: EsploraClient,
    address: String,
    interval: Duration,
    events: mpsc::UnboundedSender<EngineEvent>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let response = match api::wallet_ledger(&explorer, &address).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Wallet ledger refresh failed: {e}");
                api::WalletLedgerResponse::upstream_failure()
            }
        };
        if let Some(summary) = response.data {
            if events.send(EngineEvent::Wallet(summary)).is_err() {
                break;
            }
        }
    }
}
