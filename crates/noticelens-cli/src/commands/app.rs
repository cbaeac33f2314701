use std::path::Path;
use std::sync::Arc;

use noticelens_core::{ClientConfig, HttpAuthGateway};

use crate::clipboard::Osc52Clipboard;

pub fn run(auth_url: &str, log_file: Option<&Path>) {
    if let Err(e) = super::init_file_logging(log_file) {
        super::fail(format!("cannot open log file: {e}"));
    }

    let config = ClientConfig {
        auth_base_url: auth_url.to_string(),
        ..ClientConfig::default()
    };
    let gateway = match HttpAuthGateway::new(&config.auth_base_url) {
        Ok(gateway) => gateway,
        Err(e) => super::fail(e),
    };
    log::info!("auth endpoints at {}", gateway.base_url());

    // Spawned auth and analysis tasks need a runtime context on this thread.
    let rt = super::runtime();
    let _guard = rt.enter();

    let mut app = crate::tui::app::App::new(
        config,
        Arc::new(gateway),
        Box::new(Osc52Clipboard::stdout()),
    );
    if let Err(e) = app.run() {
        eprintln!("TUI error: {e}");
        std::process::exit(1);
    }
}
