use dioxus::prelude::*;

fn tx_link(txid: &str) -> String {
    format!("{}/tx/{txid}", crate::get_config().explorer.link_base)
}

/// Payment detected, waiting for a block.
#[component]
pub fn UnconfirmedStep(txid: String) -> Element {
    let link = tx_link(&txid);
    rsx! {
        div { style: "background: #16213e; padding: 24px; border-radius: 8px; max-width: 480px; margin: 48px auto;",
            h2 { style: "color: #f7931a; margin-top: 0;", "⏳ Payment detected" }
            p { style: "color: #888;", "Waiting for confirmation, please wait…" }
            a {
                style: "color: #f7931a;",
                href: "{link}",
                "See transaction"
            }
        }
    }
}

/// Deposit confirmed; terminal for this attempt.
#[component]
pub fn ConfirmedStep(txid: String, amount_display: String, on_back: EventHandler<()>) -> Element {
    let link = tx_link(&txid);
    rsx! {
        div { style: "background: #16213e; padding: 24px; border-radius: 8px; max-width: 480px; margin: 48px auto;",
            h2 { style: "color: #4caf50; margin-top: 0;", "✅ Payment Confirmed!" }
            p { "Your payment of {amount_display} tBTC has been successfully confirmed." }
            div { style: "display: flex; gap: 8px; justify-content: center; margin-top: 16px;",
                a {
                    style: "padding: 8px 16px; background: #f7931a; color: #1a1a2e; border-radius: 4px; font-weight: bold; text-decoration: none;",
                    href: "{link}",
                    "See transaction"
                }
                button {
                    style: "padding: 8px 16px; background: none; border: 1px solid #555; color: #e0e0e0; border-radius: 4px; cursor: pointer;",
                    onclick: move |_| on_back.call(()),
                    "Deposit Again"
                }
            }
        }
    }
}

/// Generic failure screen; transaction detail is deliberately absent.
#[component]
pub fn ErrorStep(on_back: EventHandler<()>) -> Element {
    rsx! {
        div { style: "background: #16213e; padding: 24px; border-radius: 8px; max-width: 480px; margin: 48px auto;",
            h2 { style: "color: #ff6b6b; margin-top: 0;", "❌ Error" }
            p { style: "color: #888;", "An error occurred while processing your payment." }
            button {
                style: "margin-top: 8px; padding: 8px 16px; background: none; border: 1px solid #555; color: #e0e0e0; border-radius: 4px; cursor: pointer;",
                onclick: move |_| on_back.call(()),
                "Try Again"
            }
        }
    }
}
