pub mod app;
pub mod classify;
pub mod notices;
pub mod serve;

use std::fs::File;
use std::path::Path;

use env_logger::{Env, Target};

/// Log to stderr, `RUST_LOG` overriding `default_filter`.
pub fn init_logging(default_filter: &str) {
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();
}

/// Log into `path` when given, otherwise stay silent. Used while the terminal
/// belongs to the UI.
pub fn init_file_logging(path: Option<&Path>) -> std::io::Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    match path {
        Some(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        None => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
    Ok(())
}

/// Print to stderr and exit with status 1.
pub fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

/// Runtime for the async parts of a command.
pub fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().unwrap_or_else(|e| fail(format!("tokio runtime: {e}")))
}
