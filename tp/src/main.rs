//! TripPlanner - AI travel planning front-end
//!
//! CLI entry point for the proxy server, the interactive plan page and the
//! one-shot plan commands.

use std::fs;
use std::io::{BufRead, BufReader};
use std::sync::Arc;

use clap::{CommandFactory, FromArgMatches};
use colored::{ColoredString, Colorize};
use eyre::{Context, Result};
use tracing::{debug, info};

use tripplanner::api::{PlanApi, create_client};
use tripplanner::cli::{Cli, Command, generate_after_help, get_log_dir, get_log_path};
use tripplanner::config::Config;
use tripplanner::domain::PlanStatus;
use tripplanner::page::{PendingRequest, PlanPage, interpret_response, send};
use tripplanner::view::{Fragment, TextLine, Tone, approve_label, layout};
use tripplanner::{proxy, tui};

fn parse_level(level: &str) -> Option<tracing::Level> {
    match level.to_uppercase().as_str() {
        "TRACE" => Some(tracing::Level::TRACE),
        "DEBUG" => Some(tracing::Level::DEBUG),
        "INFO" => Some(tracing::Level::INFO),
        "WARN" | "WARNING" => Some(tracing::Level::WARN),
        "ERROR" => Some(tracing::Level::ERROR),
        _ => None,
    }
}

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = get_log_dir();
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > INFO
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => parse_level(s).unwrap_or_else(|| {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
            tracing::Level::INFO
        }),
        None => tracing::Level::INFO,
    };

    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(get_log_path())
        .context("Failed to open log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Cli::command().after_help(generate_after_help());
    let cli = Cli::from_arg_matches(&cmd.get_matches())?;

    let config = Arc::new(Config::load(cli.config.as_ref()).context("Failed to load configuration")?);

    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref()).context("Failed to setup logging")?;
    info!(backend = %config.backend.url, proxy = %config.proxy.url, "TripPlanner loaded config");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Serve { listen }) => cmd_serve(config, listen).await,
        Some(Command::Tui { thread }) => cmd_tui(&config, thread.as_deref()).await,
        Some(Command::Plan { description, json }) => cmd_plan(&config, &description, json).await,
        Some(Command::Approve { thread_id, json }) => cmd_approve(&config, &thread_id, json).await,
        Some(Command::Show { thread_id, json }) => cmd_show(&config, &thread_id, json).await,
        Some(Command::Logs { follow, lines }) => cmd_logs(follow, lines),
        None => {
            debug!("main: no command specified, launching TUI");
            cmd_tui(&config, None).await
        }
    }
}

/// Run the proxy server in the foreground
async fn cmd_serve(config: Arc<Config>, listen: Option<String>) -> Result<()> {
    let listen = listen.unwrap_or_else(|| config.proxy.listen.clone());
    debug!(%listen, "cmd_serve: called");
    println!(
        "{} listening on {} (backend {})",
        "TripPlanner proxy".cyan().bold(),
        listen,
        config.backend.url
    );
    proxy::serve(config, &listen).await
}

fn proxy_client(config: &Config) -> Result<Arc<dyn PlanApi>> {
    create_client(&config.proxy.url).context(format!("Invalid proxy URL: {}", config.proxy.url))
}

/// Launch the interactive plan page
async fn cmd_tui(config: &Config, thread: Option<&str>) -> Result<()> {
    debug!(?thread, "cmd_tui: called");
    let api = proxy_client(config)?;
    tui::run(api, thread).await
}

/// Submit a trip description once
async fn cmd_plan(config: &Config, description: &str, json: bool) -> Result<()> {
    debug!(%description, json, "cmd_plan: called");
    let mut page = PlanPage::new();
    page.set_input(description);
    let Some(request) = page.begin_submit() else {
        return report(&page, json);
    };
    let api = proxy_client(config)?;
    run_request(api.as_ref(), &mut page, &request, json).await;
    report(&page, json)
}

/// Approve a plan's pending checkpoint
///
/// The current state is fetched first so approval is only sent when the
/// plan is actually waiting for it.
async fn cmd_approve(config: &Config, thread_id: &str, json: bool) -> Result<()> {
    debug!(%thread_id, json, "cmd_approve: called");
    let api = proxy_client(config)?;
    let mut page = PlanPage::new();
    page.load(api.as_ref(), thread_id).await;

    let Some(request) = page.begin_approve() else {
        if page.error.is_none() {
            println!("{}", format!("Plan {} is not awaiting approval", thread_id).yellow());
        }
        return report(&page, json);
    };
    run_request(api.as_ref(), &mut page, &request, json).await;
    report(&page, json)
}

/// Print the current state of a plan
async fn cmd_show(config: &Config, thread_id: &str, json: bool) -> Result<()> {
    debug!(%thread_id, json, "cmd_show: called");
    let api = proxy_client(config)?;
    let mut page = PlanPage::new();
    let Some(request) = page.begin_load(thread_id) else {
        return Err(eyre::eyre!("Thread id must not be empty"));
    };
    run_request(api.as_ref(), &mut page, &request, json).await;
    report(&page, json)
}

/// Send one request, printing the raw body in JSON mode
async fn run_request(api: &dyn PlanApi, page: &mut PlanPage, request: &PendingRequest, json: bool) {
    match send(api, request).await {
        Ok(raw) => {
            if json {
                match raw.json() {
                    Ok(body) => println!("{}", serde_json::to_string_pretty(&body).unwrap_or_else(|_| raw.body.clone())),
                    Err(_) => println!("{}", raw.body),
                }
            }
            page.finish(interpret_response(&raw));
        }
        Err(e) => page.finish(Err(e.to_string())),
    }
}

fn paint(fragment: &Fragment) -> ColoredString {
    let text = fragment.text.as_str();
    match fragment.tone {
        Tone::Title => text.yellow().bold(),
        Tone::Heading => text.cyan().bold(),
        Tone::Body => text.normal(),
        Tone::Muted => text.dimmed(),
        Tone::Accent => text.magenta(),
        Tone::Price => text.green(),
        Tone::Link => text.blue().underline(),
        Tone::Error => text.red().bold(),
    }
}

fn print_line(line: &TextLine) {
    let body: String = line.fragments.iter().map(|f| paint(f).to_string()).collect();
    println!("{}{}", "  ".repeat(line.indent), body);
}

/// Print the page outcome; an error becomes the command's error
fn report(page: &PlanPage, json: bool) -> Result<()> {
    if let Some(error) = &page.error {
        return Err(eyre::eyre!("{}", error));
    }
    if json {
        return Ok(());
    }
    let Some(result) = &page.result else {
        return Ok(());
    };
    if result.status == PlanStatus::NotFound {
        println!("{}", "Plan not found".yellow());
        return Ok(());
    }

    for line in layout(&page.view()) {
        print_line(&line);
    }

    if let Some(thread_id) = result.approvable_thread() {
        println!();
        println!(
            "{} run {}",
            approve_label(false).green().bold(),
            format!("tp approve {}", thread_id).cyan()
        );
    } else if let Some(thread_id) = &result.thread_id {
        println!();
        println!("{} {}", "thread:".dimmed(), thread_id);
    }
    Ok(())
}

/// Print the log file
fn cmd_logs(follow: bool, lines: usize) -> Result<()> {
    debug!(follow, lines, "cmd_logs: called");
    let log_path = get_log_path();

    if !log_path.exists() {
        println!("No log file found at: {}", log_path.display());
        return Ok(());
    }

    if follow {
        println!("Following log file: {} (Ctrl+C to stop)", log_path.display());
        println!();

        let mut child = std::process::Command::new("tail")
            .args(["-f", "-n", &lines.to_string()])
            .arg(&log_path)
            .spawn()
            .context("Failed to run tail -f")?;

        child.wait()?;
    } else {
        let file = fs::File::open(&log_path).context("Failed to open log file")?;
        let all_lines: Vec<String> = BufReader::new(file).lines().map_while(std::result::Result::ok).collect();
        let start = all_lines.len().saturating_sub(lines);
        for line in &all_lines[start..] {
            println!("{}", line);
        }
    }

    Ok(())
}
