use dioxus::prelude::*;

use crate::api::{LedgerEntryView, WalletSummary};
use crate::core::ledger::Direction;

/// Wallet header: live balance plus toggles for key details and the
/// confirmed transaction history.
#[component]
pub fn WalletPanel(summary: Signal<Option<WalletSummary>>) -> Element {
    let mut show_details = use_signal(|| false);
    let mut show_history = use_signal(|| false);

    let balance_text = match summary.read().as_ref() {
        Some(s) => format!("{} tBTC", s.balance),
        None => "…".to_string(),
    };
    let history_count = summary
        .read()
        .as_ref()
        .map(|s| s.transactions.len())
        .unwrap_or(0);

    rsx! {
        div { style: "display: flex; gap: 8px; align-items: baseline;",
            span { style: "color: #ffffff; font-size: 14px;", "{balance_text}" }
            button {
                style: "background: none; border: 1px solid #555; color: #888; font-size: 11px; padding: 2px 6px; border-radius: 3px; cursor: pointer;",
                title: "Display wallet information",
                onclick: move |_| {
                    let shown = *show_details.read();
                    show_details.set(!shown);
                },
                "👛"
            }
            button {
                style: "background: none; border: 1px dashed #555; color: #888; font-size: 11px; padding: 2px 6px; border-radius: 3px; cursor: pointer;",
                title: "Display wallet transactions",
                onclick: move |_| {
                    let shown = *show_history.read();
                    show_history.set(!shown);
                },
                "📜"
            }
        }
        if *show_details.read() {
            WalletDetails {}
        }
        if *show_history.read() {
            HistoryList { summary, count: history_count }
        }
    }
}

#[component]
fn WalletDetails() -> Element {
    let wallet = crate::get_wallet();
    rsx! {
        div { style: "position: absolute; right: 16px; top: 56px; z-index: 2; background: #16213e; border: 1px solid #555; padding: 16px; border-radius: 8px; max-width: 420px; font-size: 12px; text-align: left;",
            h3 { style: "color: #f7931a; margin-top: 0;", "👛 Wallet" }
            p { style: "color: #888; margin-bottom: 2px;", "Address" }
            p { style: "font-family: monospace; word-break: break-all; user-select: all; margin-top: 0;",
                "{wallet.address}"
            }
            p { style: "color: #888; margin-bottom: 2px;", "Private Key" }
            p { style: "font-family: monospace; word-break: break-all; user-select: all; margin-top: 0;",
                "{wallet.private_key_wif}"
            }
            p { style: "color: #888; margin-bottom: 2px;", "Mnemonic" }
            p { style: "font-family: monospace; word-break: break-all; user-select: all; margin-top: 0;",
                "{wallet.mnemonic}"
            }
        }
    }
}

#[component]
fn HistoryList(summary: Signal<Option<WalletSummary>>, count: usize) -> Element {
    let max_entries = crate::get_config().ui.max_history_entries;
    let entries: Vec<LedgerEntryView> = summary
        .read()
        .as_ref()
        .map(|s| s.transactions.iter().take(max_entries).cloned().collect())
        .unwrap_or_default();
    let label = if count == 1 { "Transaction" } else { "Transactions" };

    rsx! {
        div { style: "position: absolute; right: 16px; top: 56px; z-index: 2; background: #16213e; border: 1px solid #555; padding: 16px; border-radius: 8px; width: 360px; max-height: 60vh; overflow-y: auto; text-align: left;",
            h3 { style: "color: #f7931a; margin-top: 0;", "{count} {label}" }
            for entry in entries {
                HistoryRow { entry }
            }
            if count == 0 {
                p { style: "color: #666;", "No confirmed transactions yet." }
            }
        }
    }
}

#[component]
fn HistoryRow(entry: LedgerEntryView) -> Element {
    let link = format!("{}/tx/{}", crate::get_config().explorer.link_base, entry.txid);
    let txid_short = if entry.txid.len() > 8 {
        format!("{}…{}", &entry.txid[..4], &entry.txid[entry.txid.len() - 4..])
    } else {
        entry.txid.clone()
    };
    let (arrow, color) = match entry.direction {
        Direction::Received => ("↓", "#4caf50"),
        Direction::Sent => ("↑", "#ff6b6b"),
        Direction::Unknown => ("•", "#888888"),
    };

    rsx! {
        div { style: "display: flex; justify-content: space-between; align-items: center; padding: 6px 0; border-bottom: 1px solid #2a2a4e; font-size: 12px;",
            span { style: "color: {color}; font-weight: bold;", "{arrow}" }
            a {
                style: "color: #e0e0e0;",
                href: "{link}",
                "Transaction ID: {txid_short}"
            }
            span { style: "color: {color};", "{entry.amount:.8} tBTC" }
        }
    }
}
