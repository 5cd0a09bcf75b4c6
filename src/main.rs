mod api;
mod config;
mod core;
mod explorer;
mod notifications;
mod ui;
mod wallet;

use std::sync::{Mutex, OnceLock};

use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::core::engine::{self, EngineCommand, EngineEvent};
use crate::explorer::EsploraClient;
use crate::notifications::Notifier;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("depositwatch=info".parse().unwrap()),
        )
        .init();

    tracing::info!("₿ DepositWatch starting...");

    // Load configuration
    let config = Config::load("config.toml");
    tracing::info!("Config: {:?}", config);

    // Fresh session wallet on every launch; nothing is persisted
    let session_wallet = wallet::generate(&config.wallet.derivation_path)
        .expect("Failed to generate session wallet");
    tracing::info!("Session wallet address: {}", session_wallet.address);

    // Explorer client
    let explorer = EsploraClient::new(&config.explorer.api_url);
    tracing::info!("Explorer client configured for {}", config.explorer.api_url);

    let notifier = Notifier::new(&config.notifications);

    // UI → Engine commands
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<EngineCommand>();

    // Engine → UI events
    let (event_tx, event_rx) = mpsc::unbounded_channel::<EngineEvent>();

    // Store the event receiver, command sender, config and wallet in globals
    // so the Dioxus app can grab them
    EVENT_RX.set(Mutex::new(Some(event_rx))).ok();
    CMD_TX.set(cmd_tx).ok();
    CONFIG.set(config.clone()).ok();
    WALLET.set(session_wallet.clone()).ok();

    // Start the engine in a tokio runtime on a separate thread
    let engine_config = config;
    let engine_address = session_wallet.address;
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
        rt.block_on(engine::run_engine(
            cmd_rx,
            event_tx,
            explorer,
            notifier,
            engine_config,
            engine_address,
        ));
    });
    tracing::info!("Engine thread started");

    // Launch Dioxus desktop app (blocks)
    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new().with_window(
                dioxus::desktop::tao::window::WindowBuilder::new()
                    .with_title("₿ DepositWatch")
                    .with_inner_size(dioxus::desktop::tao::dpi::LogicalSize::new(960.0, 720.0)),
            ),
        )
        .launch(ui::App);
}

/// One-shot global to pass the engine event receiver into the Dioxus app.
static EVENT_RX: OnceLock<Mutex<Option<mpsc::UnboundedReceiver<EngineEvent>>>> = OnceLock::new();

/// Command sender for UI handlers.
static CMD_TX: OnceLock<mpsc::UnboundedSender<EngineCommand>> = OnceLock::new();

/// Global config for UI access.
static CONFIG: OnceLock<Config> = OnceLock::new();

/// The session wallet shown in the wallet panel.
static WALLET: OnceLock<wallet::Wallet> = OnceLock::new();

/// Take the engine event receiver (can only be called once).
pub fn take_event_rx() -> Option<mpsc::UnboundedReceiver<EngineEvent>> {
    EVENT_RX.get()?.lock().ok()?.take()
}

/// Send a command to the engine. Logged and dropped if the engine is gone.
pub fn send_command(command: EngineCommand) {
    match CMD_TX.get() {
        Some(tx) => {
            if tx.send(command).is_err() {
                tracing::warn!("Engine command channel closed");
            }
        }
        None => tracing::warn!("Engine not initialized, dropping command"),
    }
}

/// Get the global config.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Get the session wallet.
pub fn get_wallet() -> &'static wallet::Wallet {
    WALLET.get().expect("Wallet not initialized")
}
