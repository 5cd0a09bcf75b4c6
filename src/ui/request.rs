use dioxus::prelude::*;

use crate::core::amount;

/// Amount entry form. Validation errors stay inline here; only a
/// well-formed amount leaves the form.
#[component]
pub fn RequestForm(on_submit: EventHandler<String>) -> Element {
    let mut amount_input = use_signal(|| "0.0001".to_string());
    let mut error = use_signal(|| Option::<String>::None);

    let error_line = error.read().clone().map(|msg| {
        rsx! {
            p { style: "color: #ff6b6b; font-size: 13px; margin: 4px 0;", "{msg}" }
        }
    });

    rsx! {
        div { style: "background: #16213e; padding: 24px; border-radius: 8px; max-width: 420px; margin: 48px auto; text-align: left;",
            h2 { style: "color: #f7931a; margin-top: 0;", "Request a deposit" }
            label { style: "display: block; margin-bottom: 8px;",
                "Enter the amount you want to deposit:"
            }
            div { style: "display: flex; gap: 8px; align-items: center;",
                input {
                    style: "flex: 1; padding: 8px; background: #1a1a2e; color: #e0e0e0; border: 1px solid #555; border-radius: 4px;",
                    r#type: "number",
                    step: "0.0001",
                    min: "0.0001",
                    placeholder: "0.0001",
                    value: "{amount_input}",
                    oninput: move |event| {
                        amount_input.set(event.value());
                        error.set(None);
                    },
                }
                span { style: "color: #888;", "tBTC" }
            }
            {error_line}
            button {
                style: "width: 100%; margin-top: 16px; padding: 10px; background: #f7931a; color: #1a1a2e; border: none; border-radius: 4px; font-weight: bold; cursor: pointer;",
                onclick: move |_| {
                    let value = amount_input.read().clone();
                    match amount::parse_btc(&value) {
                        Ok(_) => on_submit.call(value),
                        Err(e) => error.set(Some(e.to_string())),
                    }
                },
                "Generate Payment QR Code"
            }
        }
    }
}
