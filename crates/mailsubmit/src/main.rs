//! `send-mail` - submit test email through an SMTP relay.
//!
//! ```text
//! send-mail --server smtp.example.com --username user --password secret \
//!     --from me@example.com --to you@example.com [--batch] [--verbose]
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use mailsubmit_smtp::{Config, Credentials, Session, TcpTransport, connection::SUBMISSION_PORT};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Submit email through an SMTP relay that requires STARTTLS and AUTH PLAIN.
#[derive(Parser, Debug)]
#[command(name = "send-mail")]
#[command(version, about, long_about = None)]
struct Cli {
    /// SMTP relay hostname
    #[arg(long)]
    server: String,

    /// SMTP relay port
    #[arg(long, default_value_t = SUBMISSION_PORT)]
    port: u16,

    /// SMTP username
    #[arg(long)]
    username: String,

    /// SMTP password
    #[arg(long, env = "SMTP_PASSWORD", hide_env_values = true)]
    password: String,

    /// Sender address
    #[arg(long)]
    from: String,

    /// Recipient address
    #[arg(long)]
    to: String,

    /// Send two messages over one connection instead of one
    #[arg(long)]
    batch: bool,

    /// Timeout in seconds for connecting and for each read or write
    #[arg(long)]
    timeout: Option<u64>,

    /// Log SMTP traffic
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        let mut builder = Config::builder(&self.server).port(self.port);
        if let Some(secs) = self.timeout {
            builder = builder
                .connect_timeout(Duration::from_secs(secs))
                .io_timeout(Duration::from_secs(secs));
        }
        builder.build()
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return usage_exit(&err),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailsubmit=info,mailsubmit_smtp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let transport = TcpTransport::new(cli.config());
    let mut session = Session::new(transport, Credentials::new(&cli.username, &cli.password));
    if cli.verbose {
        session.enable_logging();
    }

    let result = if cli.batch {
        send_batch(&mut session, &cli).await
    } else {
        send_single(&mut session, &cli).await
    };

    match result {
        Ok(()) => {
            let mode = if cli.batch { "batch" } else { "single" };
            info!(mode, "mail sent");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Prints a clap error or help text. Usage errors exit with 1 like any other
/// failure; `--help` and `--version` exit with 0.
fn usage_exit(err: &clap::Error) -> ExitCode {
    let _ = err.print();
    if err.use_stderr() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn send_single(session: &mut Session<TcpTransport>, cli: &Cli) -> anyhow::Result<()> {
    session
        .new_email()
        .sender(&cli.from)
        .to(&cli.to)
        .subject("subject1")
        .body("body1")
        .send()
        .await
        .context("sending message")
}

async fn send_batch(session: &mut Session<TcpTransport>, cli: &Cli) -> anyhow::Result<()> {
    session.connect().await.context("connecting to relay")?;
    for (subject, body) in [("subject1", "body1"), ("subject2", "body2")] {
        session
            .new_email()
            .sender(&cli.from)
            .to(&cli.to)
            .subject(subject)
            .body(body)
            .send_batch()
            .await
            .with_context(|| format!("sending {subject}"))?;
    }
    session.disconnect().await.context("closing session")
}
