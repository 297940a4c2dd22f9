//! Querypad — an embedded SQL workspace.

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use querypad::cli::{render_response, Cli, OutputFormat};
use querypad::config::Config;
use querypad::engine::{Engine, SqliteEngine};
use querypad::query::QueryExecutor;
use querypad::runner::{RunOptions, RunOrchestrator};
use querypad::session::{Extension, SessionManager};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    querypad::logging::init_stderr_logging();

    if let Err(e) = run().await {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let format = cli.parse_output_format().map_err(anyhow::Error::msg)?;

    let mut config = Config::load_from_file(&cli.config_path())?;
    config.apply_env_overrides();
    if let Some(database) = &cli.database {
        config.engine.database = Some(database.clone());
    }

    let engine: Arc<dyn Engine> = match &config.engine.database {
        Some(path) => Arc::new(SqliteEngine::at_path(path)),
        None => Arc::new(SqliteEngine::in_memory()),
    };
    let sessions = Arc::new(SessionManager::new(engine));

    for name in &config.engine.extensions {
        match Extension::parse(name) {
            Some(extension) => {
                if let Err(e) = sessions.load_extension(extension).await {
                    warn!("Could not load extension '{name}': {e}");
                }
            }
            None => warn!("Unknown extension '{name}' in config"),
        }
    }

    if let Some(seed_path) = &cli.seed {
        let script = std::fs::read_to_string(seed_path)
            .with_context(|| format!("Cannot read seed script {}", seed_path.display()))?;
        let session = sessions.ensure_session().await?;
        session.run(&script).await?;
        info!("Seed script applied: {}", seed_path.display());
    }

    let executor = QueryExecutor::new(Arc::clone(&sessions));
    let orchestrator = RunOrchestrator::new(executor, config.workspace.clone());
    let show_time = config.workspace.show_execution_time;

    if let Some(sql) = &cli.execute {
        let mut options = RunOptions::with_query(sql.clone());
        if cli.no_history {
            options = options.skipping_history();
        }
        let result = orchestrator.run(options).await;
        println!("{}", render_response(&result.response, format, show_time));
        if !result.success {
            std::process::exit(1);
        }
        return Ok(());
    }

    repl(&orchestrator, format, show_time, cli.no_history).await
}

/// Line-oriented interactive loop: one statement per line, EOF or `exit`
/// to quit.
async fn repl(
    orchestrator: &RunOrchestrator,
    format: OutputFormat,
    show_time: bool,
    no_history: bool,
) -> anyhow::Result<()> {
    use std::io::{self, BufRead, Write};

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("querypad> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let statement = line.trim();
        if statement.is_empty() {
            continue;
        }
        if statement.eq_ignore_ascii_case("exit") || statement.eq_ignore_ascii_case("quit") {
            break;
        }

        let mut options = RunOptions::with_query(statement);
        if no_history {
            options = options.skipping_history();
        }
        let result = orchestrator.run(options).await;
        println!("{}", render_response(&result.response, format, show_time));
    }

    Ok(())
}
