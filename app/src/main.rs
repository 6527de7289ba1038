//! Terminal front end for the todo list.
//!
//! Prints the screen on top of the stack, reads one command per line, and
//! sends the resulting action to the store. Logs go to stderr.

use std::io::Write as _;
use std::sync::Arc;
use tasklist::config::Config;
use tasklist::shell::{self, Command, ParseError, Style};
use tasklist::view;
use tasklist::{AppEnvironment, AppReducer, AppState, AppStore};
use tasklist_core::environment::SystemClock;
use tasklist_runtime::StoreConfig;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(?config, "Configuration loaded");

    let env = AppEnvironment::new(Arc::new(SystemClock));
    let store: AppStore = AppStore::with_config(
        AppState::new(),
        AppReducer::new(),
        env,
        StoreConfig::new(config.max_feedback_actions),
    );
    let style = Style::detect(config.styled);

    let mut input = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    loop {
        let screen = store.state(view::render).await;

        if let Some(action) = shell::auto_action(&screen) {
            store.send(action).await?;
            continue;
        }

        write!(stdout, "\n{}> ", shell::render_text(&screen, style))?;
        stdout.flush()?;

        let Some(line) = shell::read_line(&mut input).await? else {
            break;
        };

        match shell::parse_command(&screen, &line) {
            Ok(Command::Dispatch(action)) => {
                if let Err(e) = store.send(action).await {
                    error!(error = %e, "Action failed");
                }
            },
            Ok(Command::Help) => writeln!(stdout, "{}", shell::help_text(&screen))?,
            Ok(Command::Quit) => break,
            Err(ParseError::Empty) => {},
            Err(e) => writeln!(stdout, "{e}")?,
        }
    }

    let (total, done) = store
        .state(|s| (s.todos.len(), s.todos.completed_count()))
        .await;
    info!(total, done, "Exiting");
    Ok(())
}
