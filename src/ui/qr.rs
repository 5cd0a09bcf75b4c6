use dioxus::prelude::*;
use qrcode::QrCode;
use qrcode::render::svg;

/// Render `data` as an SVG QR code sized for the payment card.
pub fn qr_svg(data: &str) -> Option<String> {
    let code = QrCode::new(data.as_bytes()).ok()?;
    Some(
        code.render::<svg::Color>()
            .min_dimensions(220, 220)
            .dark_color(svg::Color("#1a1a2e"))
            .light_color(svg::Color("#ffffff"))
            .build(),
    )
}

/// QR screen shown while the deposit is awaited.
#[component]
pub fn QrCodeCard(
    payment_request: String,
    amount_display: String,
    address: String,
    on_back: EventHandler<()>,
) -> Element {
    let qr = match qr_svg(&payment_request) {
        Some(markup) => rsx! {
            div { style: "display: inline-block; padding: 12px; background: #ffffff; border-radius: 8px;",
                dangerous_inner_html: "{markup}",
            }
        },
        None => rsx! {
            p { style: "color: #ff6b6b;", "Failed to render QR code" }
        },
    };
    let address_full = address.clone();

    rsx! {
        div { style: "background: #16213e; padding: 24px; border-radius: 8px; max-width: 480px; margin: 48px auto;",
            h2 { style: "color: #f7931a; margin-top: 0;", "Scan to deposit {amount_display} tBTC" }
            {qr}
            div { style: "display: flex; gap: 4px; align-items: center; justify-content: center; margin-top: 12px;",
                span { style: "color: #888; font-family: monospace; font-size: 12px; word-break: break-all;",
                    "{address}"
                }
                button {
                    style: "background: none; border: 1px solid #555; color: #888; font-size: 10px; padding: 1px 4px; border-radius: 3px; cursor: pointer;",
                    title: "Copy address",
                    onclick: move |_| {
                        let js = format!("navigator.clipboard.writeText('{address_full}')");
                        document::eval(&js);
                    },
                    "📋"
                }
            }
            p { style: "color: #888; margin-top: 16px;", "Waiting for payment…" }
            button {
                style: "margin-top: 8px; padding: 8px 16px; background: none; border: 1px solid #555; color: #e0e0e0; border-radius: 4px; cursor: pointer;",
                onclick: move |_| on_back.call(()),
                "Back"
            }
        }
    }
}
