//! Subcommand implementations

use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use irkit_domain::Message;
use irkit_infra::{InternetClient, RequestContext};

const ENV_CLIENT_TOKEN: &str = "CLIENT_TOKEN";
const ENV_CLIENT_KEY: &str = "CLIENT_KEY";
const ENV_DEVICE_ID: &str = "DEVICE_ID";

const DEFAULT_RECEIVE_TIMEOUT_SECS: u64 = 5;

/// `irkit keys [TOKEN]`
pub async fn keys(client: &InternetClient, args: &[String]) -> anyhow::Result<()> {
    let token = arg_or_env(args.first(), ENV_CLIENT_TOKEN)?;

    let keys = client
        .get_keys(&RequestContext::background(), &token)
        .await
        .context("failed to get client key")?;

    println!("{}", serde_json::to_string_pretty(&keys)?);
    Ok(())
}

/// `irkit devices [CLIENTKEY]`
pub async fn devices(client: &InternetClient, args: &[String]) -> anyhow::Result<()> {
    let client_key = arg_or_env(args.first(), ENV_CLIENT_KEY)?;

    let keys = client
        .get_devices(&RequestContext::background(), &client_key)
        .await
        .context("failed to get device key")?;

    println!("{}", serde_json::to_string_pretty(&keys)?);
    Ok(())
}

/// `irkit send <MESSAGE.json>`
pub async fn send(client: &InternetClient, args: &[String]) -> anyhow::Result<()> {
    let path = args.first().ok_or_else(|| anyhow!("usage: irkit send <MESSAGE.json>"))?;
    let message = read_message(Path::new(path))?;

    let client_key = env_required(ENV_CLIENT_KEY)?;
    let device_id = env_required(ENV_DEVICE_ID)?;

    client
        .send_messages(&RequestContext::background(), &client_key, &device_id, &message)
        .await
        .context("failed to send message")?;

    eprintln!("Sent {} intervals at {} kHz", message.data.len(), message.freq);
    Ok(())
}

/// Options for `irkit receive`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiveArgs {
    /// Leave the signal on the server instead of clearing it.
    pub peek: bool,
    /// Local deadline for the long-poll.
    pub timeout_secs: u64,
}

impl Default for ReceiveArgs {
    fn default() -> Self {
        Self { peek: false, timeout_secs: DEFAULT_RECEIVE_TIMEOUT_SECS }
    }
}

impl ReceiveArgs {
    /// Parse the arguments that follow `receive`.
    ///
    /// # Errors
    ///
    /// Unknown flags, or a missing, malformed or zero `--timeout-secs`.
    pub fn parse(args: &[String]) -> anyhow::Result<Self> {
        let mut parsed = Self::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--peek" => parsed.peek = true,
                "--timeout-secs" => {
                    let value =
                        iter.next().ok_or_else(|| anyhow!("--timeout-secs needs a value"))?;
                    parsed.timeout_secs = value
                        .parse()
                        .with_context(|| format!("invalid --timeout-secs value {value:?}"))?;
                    if parsed.timeout_secs == 0 {
                        bail!("--timeout-secs must be greater than zero");
                    }
                }
                other => bail!("unexpected argument {other:?}"),
            }
        }

        Ok(parsed)
    }
}

/// `irkit receive [--peek] [--timeout-secs N]`
///
/// Runs the long-poll on its own task and prints a dot to stderr every
/// second until it finishes. Ctrl-C cancels the poll.
pub async fn receive(client: &InternetClient, args: ReceiveArgs) -> anyhow::Result<()> {
    let client_key = env_required(ENV_CLIENT_KEY)?;
    let ctx = RequestContext::with_timeout(Duration::from_secs(args.timeout_secs));

    let poll_client = client.clone();
    let poll_ctx = ctx.clone();
    let mut poll = tokio::spawn(async move {
        poll_client.get_messages(&poll_ctx, &client_key, !args.peek).await
    });

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.tick().await;

    let result = loop {
        tokio::select! {
            joined = &mut poll => break joined.context("long-poll task failed")?,
            _ = ticker.tick() => eprint!("."),
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, cancelling long-poll");
                ctx.cancel();
            }
        }
    };
    eprintln!();

    let signal = result.context("failed to receive message")?;
    if signal.is_empty() {
        eprintln!("No signal received");
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(&signal)?);
    Ok(())
}

fn read_message(path: &Path) -> anyhow::Result<Message> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("invalid message in {}", path.display()))
}

fn arg_or_env(arg: Option<&String>, key: &str) -> anyhow::Result<String> {
    match arg {
        Some(value) if !value.is_empty() => Ok(value.clone()),
        _ => env_required(key),
    }
}

fn env_required(key: &str) -> anyhow::Result<String> {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(anyhow!("{key} is not set")),
    }
}
