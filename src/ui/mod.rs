pub mod flow;
pub mod qr;
pub mod request;
pub mod steps;
pub mod wallet;

use chrono::Utc;
use dioxus::prelude::*;

use crate::api::WalletSummary;
use crate::core::amount;
use crate::core::engine::{EngineCommand, EngineEvent};
use crate::ui::flow::Step;

/// Root UI component.
#[component]
pub fn App() -> Element {
    let mut step = use_signal(|| Step::EnterAmount);
    let mut payment_request = use_signal(String::new);
    let mut amount_display = use_signal(String::new);
    let mut wallet_summary = use_signal(|| Option::<WalletSummary>::None);

    // Spawn a coroutine that drains the engine event channel
    use_coroutine(move |_: UnboundedReceiver<()>| async move {
        let Some(mut rx) = crate::take_event_rx() else {
            tracing::error!("Failed to take engine event receiver");
            return;
        };

        tracing::info!("UI coroutine started, listening for engine events");

        while let Some(event) = rx.recv().await {
            match event {
                EngineEvent::Payment(outcome) => {
                    let next = step.read().apply(&outcome);
                    step.set(next);
                }
                EngineEvent::Wallet(summary) => {
                    wallet_summary.set(Some(summary));
                }
            }
        }
    });

    let submit = move |raw_amount: String| {
        // the form already validated; a parse failure here means the form
        // let something through, so stay put rather than watch a bad value
        let Ok(sats) = amount::parse_btc(&raw_amount) else {
            tracing::warn!("Rejected amount past the form: {raw_amount:?}");
            return;
        };
        let address = crate::get_wallet().address.clone();
        let canonical = amount::sats_to_btc_string(sats);
        payment_request.set(flow::payment_uri(&address, &canonical));
        amount_display.set(canonical.clone());
        step.set(Step::ShowQrCode);
        crate::send_command(EngineCommand::WatchPayment {
            address,
            amount: canonical,
            since_millis: Some(Utc::now().timestamp_millis()),
        });
    };

    let back = move |_: ()| {
        crate::send_command(EngineCommand::CancelPayment);
        step.set(Step::EnterAmount);
    };

    let current = step.read().clone();
    let content = match current {
        Step::EnterAmount => rsx! {
            request::RequestForm { on_submit: submit }
        },
        Step::ShowQrCode => rsx! {
            qr::QrCodeCard {
                payment_request: payment_request.read().clone(),
                amount_display: amount_display.read().clone(),
                address: crate::get_wallet().address.clone(),
                on_back: back,
            }
        },
        Step::Unconfirmed { txid } => rsx! {
            steps::UnconfirmedStep { txid }
        },
        Step::Confirmed { txid } => rsx! {
            steps::ConfirmedStep {
                txid,
                amount_display: amount_display.read().clone(),
                on_back: back,
            }
        },
        Step::Error => rsx! {
            steps::ErrorStep { on_back: back }
        },
    };

    rsx! {
        div { class: "app",
            style: "font-family: monospace; background: #1a1a2e; color: #e0e0e0; min-height: 100vh; padding: 16px; text-align: center; position: relative;",

            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h1 { style: "color: #f7931a; margin: 0;", "₿ DepositWatch" }
                wallet::WalletPanel { summary: wallet_summary }
            }

            {content}
        }
    }
}
