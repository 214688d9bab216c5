//! Interactive administrator console.
//!
//! Reads one command per line from stdin and prints the result to stdout.
//! Logs go to stderr; set `RUST_LOG` to change the filter.

use callcenter_core::environment::SystemClock;
use callcenter_dashboard::{
    Command, CommandError, Config, DashboardEnvironment, DashboardState, dashboard_store,
    execute, view,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    callcenter_runtime::metrics::register_metrics();

    let state = DashboardState::seeded();
    let env = DashboardEnvironment::from_config(&state, Arc::new(SystemClock), &config);
    tracing::info!(
        admin = %env.admin,
        policy = env.policy.as_str(),
        queue_limit = config.queue_limit,
        "Console started"
    );
    let store = dashboard_store(state, env);

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let greeting = execute(&store, Command::Help, config.queue_limit).await?;
    stdout.write_all(format!("{}\n\n> ", greeting.output).as_bytes()).await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let output = match Command::parse(&line) {
            Ok(command) => {
                let outcome = execute(&store, command, config.queue_limit).await?;
                if outcome.quit {
                    stdout.write_all(format!("{}\n", outcome.output).as_bytes()).await?;
                    break;
                }
                outcome.output
            },
            Err(CommandError::Empty) => String::new(),
            Err(CommandError::Unknown(word)) => {
                tracing::debug!(%word, "Unknown command");
                view::UNKNOWN_COMMAND.to_string()
            },
            Err(error) => format!("⚠️ {error}"),
        };

        if !output.is_empty() {
            stdout.write_all(format!("{output}\n\n").as_bytes()).await?;
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    stdout.flush().await?;
    store.shutdown();
    Ok(())
}
