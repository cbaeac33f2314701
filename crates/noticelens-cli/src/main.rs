//! CLI for noticelens: upload an IRS notice, get a plain-language breakdown.

mod clipboard;
mod commands;
mod tui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "noticelens")]
#[command(about = "noticelens: upload an IRS notice, get a plain-language breakdown")]
#[command(version = noticelens_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the web client's static assets (unknown paths get index.html)
    Serve {
        /// Port to listen on [default: $PORT, else 3000]
        #[arg(long)]
        port: Option<u16>,

        /// Host to bind to [default: 0.0.0.0]
        #[arg(long)]
        host: Option<String>,

        /// Directory holding index.html and the built assets [default: public]
        #[arg(long)]
        public_dir: Option<PathBuf>,

        /// Also answer POST /register and POST /login by echoing the form back.
        /// Development only: nothing is stored or verified.
        #[arg(long)]
        echo_auth: bool,
    },

    /// Interactive terminal client (login, upload, summary)
    App {
        /// Base URL of the register/login endpoints
        #[arg(long, env = "NOTICELENS_AUTH_URL", default_value = noticelens_core::config::DEFAULT_AUTH_URL)]
        auth_url: String,

        /// Write logs to this file (the terminal is taken by the UI)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Run the mock analysis on one file and print the breakdown
    Classify {
        /// PDF to analyze. Only the file name is inspected.
        file: PathBuf,

        /// Print the full notice record as JSON
        #[arg(long)]
        json: bool,

        /// Skip the simulated processing delay
        #[arg(long)]
        no_delay: bool,
    },

    /// List the notice types the classifier recognizes
    Notices,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            host,
            public_dir,
            echo_auth,
        } => commands::serve::run(commands::serve::ServeFlags {
            port,
            host,
            public_dir,
            echo_auth,
        }),
        Commands::App { auth_url, log_file } => {
            commands::app::run(&auth_url, log_file.as_deref())
        }
        Commands::Classify {
            file,
            json,
            no_delay,
        } => commands::classify::run(&file, json, no_delay),
        Commands::Notices => commands::notices::run(),
    }
}
