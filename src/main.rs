// ProfileLookup - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation (debug mode support)
// 3. Server URL resolution (CLI > environment > config)
// 4. Headless one-shot lookup, or eframe GUI launch

mod gui;

// Re-export modules from the library crate so that `gui.rs` can still use
// `crate::app::...`, `crate::core::...` etc.
pub use profile_lookup::app;
pub use profile_lookup::core;
pub use profile_lookup::platform;
pub use profile_lookup::ui;
pub use profile_lookup::util;

use clap::Parser;
use std::sync::Arc;

/// ProfileLookup - look up a member profile by Discord username.
///
/// Every edit of the username field queries the server's GraphQL endpoint
/// and shows the JSON response.
#[derive(Parser, Debug)]
#[command(name = "ProfileLookup", version, about)]
struct Cli {
    /// Username to look up as soon as the window opens.
    username: Option<String>,

    /// Server base URL; `/graphql` is appended. Overrides PROFILE_LOOKUP_SERVER and config.
    #[arg(short = 's', long = "server")]
    server: Option<String>,

    /// Look up this username once, print the JSON result to stdout, and exit.
    #[arg(short = 'q', long = "query", value_name = "USERNAME")]
    query: Option<String>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config is read before logging so its [logging] level can take effect;
    // its warnings are logged once the subscriber exists.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, mut warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "ProfileLookup starting"
    );

    let env_server = std::env::var(util::constants::SERVER_URL_ENV).ok();
    let server_url = platform::config::resolve_server_url(
        cli.server.as_deref(),
        env_server.as_deref(),
        &config,
        &mut warnings,
    );

    for warning in &warnings {
        tracing::warn!(warning = %warning, "Configuration warning");
    }

    let transport = match platform::http::HttpTransport::new(&server_url) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create HTTP client");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Some(ref username) = cli.query {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        if let Err(e) = app::headless::run(&transport, username, &mut out) {
            tracing::error!(error = %e, "Headless lookup failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        return;
    }

    let lookup_manager = app::lookup::LookupManager::new(Arc::new(transport));
    let mut state = app::state::AppState::new(
        lookup_manager.endpoint().to_string(),
        config.ordering,
        cli.debug,
    );
    state.warnings = warnings;

    // A username on the CLI behaves as if it had been typed.
    if let Some(username) = cli.username {
        state.username_input = username;
        state.request_lookup();
    }

    tracing::info!(
        endpoint = %state.endpoint,
        ordering = state.ordering.label(),
        "Ready to launch GUI"
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([640.0, 520.0])
            .with_min_inner_size([420.0, 300.0]),
        ..Default::default()
    };

    let dark_mode = config.dark_mode;
    let font_size = config.font_size;
    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            ui::theme::apply(&cc.egui_ctx, dark_mode, font_size);
            Ok(Box::new(gui::ProfileLookupApp::new(state, lookup_manager)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch ProfileLookup GUI: {e}");
        std::process::exit(1);
    }
}
