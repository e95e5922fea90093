use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use parley::banner::{BannerInfo, print_banner, print_session_summary};
use parley::commands::{CommandRegistry, CommandResult, Session};
use parley::config::{Config, ConfigKey, Overrides, Settings};
use parley::consts::{SUBMITTING_LABEL, default_db_path};
use parley::controller::RewriteFormController;
use parley::form::{DraftField, UiStatus};
use parley::options::{Culture, NO_TONE_LABEL, Tone, parse_tone_choice};
use parley::render::OutputView;
use parley::rewriter::Rewriter;
use parley::rewriter::http::HttpRewriter;
use parley::spinner::Spinner;

#[derive(Parser)]
#[command(
    name = "parley",
    version,
    about = "Rewrite an email so it lands well in another culture."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Rewriting service endpoint
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Target culture (Japan, U.S., U.K., France, India, Germany)
    #[arg(short, long)]
    culture: Option<Culture>,

    /// Tone to emphasize (Clarity, Formality, Urgency, Respect, or none)
    #[arg(short, long)]
    tone: Option<String>,

    /// Email subject
    #[arg(short, long)]
    subject: Option<String>,

    /// Email body; rewrites once and exits instead of starting the REPL
    #[arg(short, long, conflicts_with = "body_file")]
    body: Option<String>,

    /// Read the email body from a file (`-` for stdin); rewrites once and exits
    #[arg(long, value_name = "PATH")]
    body_file: Option<PathBuf>,

    /// SQLite database for preferences (use :memory: for ephemeral)
    #[arg(short, long)]
    db: Option<String>,

    /// Log level when RUST_LOG is unset: error, warn, info, debug, trace
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Command {
    /// Read or change stored preferences
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Check that the rewriting service is up
    Ping,
    /// List the available cultures and tones
    Options,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show every preference and where its value comes from
    List,
    /// Print one stored preference
    Get { key: ConfigKey },
    /// Store a preference (endpoint, culture, tone)
    Set { key: ConfigKey, value: String },
    /// Forget a stored preference
    Unset { key: ConfigKey },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    let db_path = match &cli.db {
        Some(path) => path.clone(),
        None => {
            let path = default_db_path()?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            path.to_string_lossy().into_owned()
        }
    };
    let config = Config::open(&db_path)?;

    if let Some(Command::Config { action }) = &cli.command {
        handle_config(action, &config)?;
        return Ok(ExitCode::SUCCESS);
    }
    if let Some(Command::Options) = &cli.command {
        print_options();
        return Ok(ExitCode::SUCCESS);
    }

    let tone = cli
        .tone
        .as_deref()
        .map(parse_tone_choice)
        .transpose()?;
    let settings = Settings::resolve(
        Overrides {
            endpoint: cli.endpoint.clone(),
            culture: cli.culture,
            tone,
        },
        Some(&config),
    )?;
    tracing::debug!(?settings, db = %db_path, "settings resolved");

    let rewriter = Arc::new(HttpRewriter::new(settings.endpoint.clone()));

    if let Some(Command::Ping) = &cli.command {
        tracing::info!(endpoint = rewriter.endpoint(), "checking rewriting service");
        return Ok(match rewriter.ping().await {
            Ok(greeting) => {
                println!("{greeting}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e.user_message());
                ExitCode::FAILURE
            }
        });
    }

    let mut form = RewriteFormController::new(settings.culture, settings.tone);
    if let Some(subject) = &cli.subject {
        form.update_draft(DraftField::Subject, subject.as_str());
    }

    // One-shot mode
    let body = match (&cli.body, &cli.body_file) {
        (Some(body), _) => Some(body.clone()),
        (None, Some(path)) => Some(read_body_file(path)?),
        (None, None) => None,
    };
    if let Some(body) = body {
        form.update_draft(DraftField::Body, body);
        return rewrite_once(&mut form, rewriter.as_ref()).await;
    }

    let config_label = if db_path == ":memory:" {
        "ephemeral"
    } else {
        db_path.as_str()
    };
    print_banner(&BannerInfo {
        endpoint: rewriter.endpoint(),
        culture: settings.culture,
        tone: settings.tone,
        config: config_label,
    });

    let registry = CommandRegistry::new();
    let mut session = Session::new(form, rewriter);
    run_repl(&registry, &mut session).await?;

    print_session_summary(session.rewrites);
    Ok(ExitCode::SUCCESS)
}

/// REPL: slash-commands edit and send the form, other lines become body text.
async fn run_repl(registry: &CommandRegistry, session: &mut Session) -> anyhow::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("\nparley> ");
        io::stdout().flush()?;

        // Ctrl+C is honoured at the prompt only; a rewrite in flight runs to completion
        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        match registry.dispatch(&line, session).await {
            CommandResult::Quit => break,
            CommandResult::Handled => {}
            CommandResult::NotACommand => {
                if line.trim().is_empty() && session.form.draft().body.is_empty() {
                    continue;
                }
                session.form.append_body_line(&line);
            }
        }
    }

    Ok(())
}

async fn rewrite_once(
    form: &mut RewriteFormController,
    rewriter: &dyn Rewriter,
) -> anyhow::Result<ExitCode> {
    if !form.can_submit() {
        bail!("the email body is empty; nothing to rewrite");
    }

    let spinner = Spinner::start(SUBMITTING_LABEL);
    form.submit(rewriter).await;
    spinner.stop().await;

    let view = OutputView::of(form);
    Ok(match form.status() {
        UiStatus::Failed(_) => {
            eprintln!("{view}");
            ExitCode::FAILURE
        }
        _ => {
            println!("{view}");
            ExitCode::SUCCESS
        }
    })
}

fn read_body_file(path: &Path) -> anyhow::Result<String> {
    let text = if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read body from stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    Ok(text.trim_end_matches(['\n', '\r']).to_string())
}

fn handle_config(action: &ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::List => {
            let defaults = Settings::default();
            for key in ConfigKey::ALL {
                let line = match config.get(*key)? {
                    Some(value) if value.is_empty() => NO_TONE_LABEL.to_string(),
                    Some(value) => value,
                    None => {
                        let default = match key {
                            ConfigKey::Endpoint => defaults.endpoint.clone(),
                            ConfigKey::Culture => defaults.culture.to_string(),
                            ConfigKey::Tone => NO_TONE_LABEL.to_string(),
                        };
                        format!("{default} (default)")
                    }
                };
                println!("  {:<9} {line}", key.as_str());
            }
        }
        ConfigAction::Get { key } => match config.get(*key)? {
            Some(value) => println!("{value}"),
            None => println!("(unset)"),
        },
        ConfigAction::Set { key, value } => {
            let stored = config.set(*key, value)?;
            println!("✓ {key} = {stored}");
        }
        ConfigAction::Unset { key } => {
            config.remove(*key)?;
            println!("✓ {key} unset");
        }
    }
    Ok(())
}

fn print_options() {
    println!("cultures:");
    for culture in Culture::ALL {
        println!("  {culture}");
    }
    println!("tones:");
    println!("  {NO_TONE_LABEL}");
    for tone in Tone::ALL {
        println!("  {tone}");
    }
}

/// Set up tracing on stderr. `RUST_LOG` wins over `--log-level`.
fn setup_logging(level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
