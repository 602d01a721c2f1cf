//! Command-line client for the IRKit internet API.
//!
//! Run with: `irkit <command>`
//!
//! Results are printed to stdout as JSON; logs and progress go to stderr.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::env;
use std::process::ExitCode;

use irkit_infra::InternetClient;
use tracing_subscriber::EnvFilter;

mod commands;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) => tracing::debug!(error = %e, "No .env file loaded"),
    }

    let args: Vec<String> = env::args().skip(1).collect();
    let task = args.first().map(String::as_str);

    let result = match task {
        Some("help" | "--help" | "-h") | None => {
            print_help();
            Ok(())
        }
        Some(command) => run(command, &args[1..]).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: &str, rest: &[String]) -> anyhow::Result<()> {
    let client = build_client()?;

    match command {
        "keys" => commands::keys(&client, rest).await,
        "devices" => commands::devices(&client, rest).await,
        "send" => commands::send(&client, rest).await,
        "receive" => commands::receive(&client, commands::ReceiveArgs::parse(rest)?).await,
        unknown => {
            eprintln!("Unknown command: {unknown}");
            eprintln!();
            print_help();
            Err(anyhow::anyhow!("Unknown command"))
        }
    }
}

fn build_client() -> anyhow::Result<InternetClient> {
    let config = irkit_infra::config::load()?;
    tracing::debug!(base_url = %config.base_url, "Using API endpoint");
    Ok(InternetClient::new(&config)?)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn print_help() {
    println!("IRKit internet API client");
    println!();
    println!("USAGE:");
    println!("    irkit <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    keys [TOKEN]          Exchange a client token for a client key and device id");
    println!("    devices [CLIENTKEY]   Exchange a client key for a device key");
    println!("    send <MESSAGE.json>   Ask the device to transmit a signal");
    println!("    receive [--peek] [--timeout-secs N]");
    println!("                          Wait for the next signal the device receives");
    println!("    help                  Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    IRKIT_API_URL         API endpoint (default https://api.getirkit.com)");
    println!("    CLIENT_TOKEN          Token for `keys` when none is given");
    println!("    CLIENT_KEY            Client key for `devices`, `send` and `receive`");
    println!("    DEVICE_ID             Device id for `send`");
    println!("    RUST_LOG              Log filter (default info)");
}
