// ChatbotQuery - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. Chatbot client construction
// 5. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can still use
// `crate::app::...`, `crate::ui::...` etc.
pub use chatbot_query::app;
pub use chatbot_query::core;
pub use chatbot_query::platform;
pub use chatbot_query::ui;
pub use chatbot_query::util;

use clap::Parser;

/// ChatbotQuery - ask a supplier chatbot backend about a supplier, brand, or
/// product and view its raw JSON answer.
#[derive(Parser, Debug)]
#[command(name = "chatbot-query", version, about)]
struct Cli {
    /// Pre-fill the query field.
    #[arg(short = 'q', long = "query")]
    query: Option<String>,

    /// Backend base URL (overrides config.toml).
    #[arg(short = 'u', long = "base-url")]
    base_url: Option<String>,

    /// Endpoint path joined onto the base URL (overrides config.toml).
    #[arg(short = 'e', long = "endpoint")]
    endpoint: Option<String>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config is read before logging starts so [logging] can take effect;
    // its warnings are logged once the subscriber is installed.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config = %platform_paths.config_file().display(),
        "ChatbotQuery starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    // Endpoint: CLI override > config.toml > built-in default.
    let (endpoint, override_warnings) =
        platform::config::apply_endpoint_overrides(&config.endpoint, cli.base_url, cli.endpoint);
    tracing::info!(endpoint = %endpoint, "Chatbot endpoint resolved");

    let client = core::request::ChatbotClient::new(
        endpoint,
        Box::new(platform::http::UreqTransport::new()),
    );
    let query_manager = app::query::QueryManager::new(client);

    let mut state = app::state::AppState::new(query_manager.endpoint().to_string(), cli.debug);
    state.warnings = config_warnings;
    state.warnings.extend(override_warnings);
    if let Some(query) = cli.query {
        state.on_query_change(query);
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([720.0, 560.0])
            .with_min_inner_size([420.0, 320.0]),
        ..Default::default()
    };

    let dark_mode = config.dark_mode;
    let font_size = config.font_size;
    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            ui::theme::apply(&cc.egui_ctx, dark_mode, font_size);
            Ok(Box::new(gui::ChatbotQueryApp::new(
                state,
                query_manager,
                dark_mode,
            )))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch {} GUI: {e}", util::constants::APP_NAME);
        std::process::exit(1);
    }
}
