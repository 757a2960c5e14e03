use anyhow::{Context, Result};
use clap::Parser;
use jiff::Zoned;
use sprint_relay::cli::{Cli, Commands};
use sprint_relay::content::{classify, ContentBlock, BODY_LABEL, CATEGORY_LABEL, SUMMARY_LABEL};
use sprint_relay::dispatch::DispatchRouter;
use sprint_relay::error::user_friendly_error;
use sprint_relay::sprint::{build_reminder, forecast, is_checkpoint_day, SprintAggregator};
use sprint_relay::trackers::{JiraClient, NotionClient, SlackClient};
use sprint_relay::Config;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        user_friendly_error(&e).display();
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Init { output } => {
            info!("Writing default configuration");
            init_command(output.clone())
        }
        Commands::Dispatch { file, dry_run } => dispatch_command(cli, file.as_deref(), *dry_run),
        Commands::Forecast { notify, force } => forecast_command(cli, *notify, *force),
        Commands::Remind { force } => remind_command(cli, *force),
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn init_command(output: Option<PathBuf>) -> Result<()> {
    let config_path = match output {
        Some(path) => path,
        None => Config::default_config_path()?,
    };

    if config_path.exists() {
        warn!("Configuration already exists at {:?}", config_path);
        println!("Configuration file already exists at: {:?}", config_path);
        println!("Please remove it first if you want to regenerate.");
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    let config_str =
        toml::to_string_pretty(&Config::default()).context("Failed to serialize config")?;
    std::fs::write(&config_path, config_str)
        .with_context(|| format!("Failed to write config to {:?}", config_path))?;

    println!("✓ Configuration created at: {:?}", config_path);
    println!("\nNext steps:");
    println!("  1. Fill in the Jira URL, email and project/board ids");
    println!("  2. Set JIRA_API_TOKEN, SLACK_BOT_TOKEN and NOTION_TOKEN");
    println!("  3. Pipe a content block through: sprint-relay dispatch --file update.md");

    Ok(())
}

fn dispatch_command(cli: &Cli, file: Option<&std::path::Path>, dry_run: bool) -> Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read content from {:?}", path))?,
        None => {
            info!("Reading content block from stdin");
            std::io::read_to_string(std::io::stdin()).context("Failed to read from stdin")?
        }
    };

    let block = ContentBlock::from_text(text);

    if dry_run {
        print_dry_run(&block);
        return Ok(());
    }

    info!("Loading configuration");
    let config = Config::load(cli.config.as_deref())?;

    let tracker = JiraClient::new(&config.jira)?;
    let messenger = SlackClient::new(&config.slack)?;
    let knowledge_log = NotionClient::new(&config.notion)?;

    let router = DispatchRouter::new(&tracker, &messenger, &knowledge_log);
    let report = router.dispatch(&block);

    println!("{}", report.render());
    Ok(())
}

/// Show what a dispatch would do without touching any backend. Useful for
/// checking that a generated block carries the labels it is supposed to.
fn print_dry_run(block: &ContentBlock) {
    let classification = classify(block);
    println!("Classification: {:?}", classification);

    if let Some(recipient) = block.field(sprint_relay::content::RECIPIENT_LABELS) {
        println!("Recipient: {}", recipient);
    }
    if let Some(category) = block.field(&[CATEGORY_LABEL]) {
        println!("Category: {}", category);
    }
    if let Some(summary) = block.field(&[SUMMARY_LABEL]) {
        println!("Summary: {}", summary);
    }
    if let Some(body) = block.body_after(BODY_LABEL) {
        println!("Body:\n{}", body);
    }
}

fn forecast_command(cli: &Cli, notify: bool, force: bool) -> Result<()> {
    info!("Loading configuration");
    let config = Config::load(cli.config.as_deref())?;
    let tracker = JiraClient::new(&config.jira)?;

    let aggregator = SprintAggregator::new(&tracker, &config.jira);
    let data = match aggregator.collect()? {
        Some(data) => data,
        None => {
            println!("No active sprint with relevant issues found.");
            return Ok(());
        }
    };

    let today = Zoned::now().date();
    let report = match forecast(&data, today) {
        Some(report) => report,
        None => {
            println!(
                "Sprint '{}' has no start or end date; skipping forecast.",
                data.sprint.name
            );
            return Ok(());
        }
    };

    let rendered = report.render();
    println!("{}", rendered);

    if notify {
        if force || report.should_notify(config.sprint.notify_window_days) {
            let messenger = SlackClient::new(&config.slack)?;
            let outcome = messenger.send(&config.slack.forecast_channel, &rendered);
            println!("\n{}", outcome);
        } else {
            info!(
                "Skipping notification: {} day(s) remaining, window is {}",
                report.remaining_days, config.sprint.notify_window_days
            );
            println!("\nOutside the notification window; not posting. Use --force to override.");
        }
    }

    Ok(())
}

fn remind_command(cli: &Cli, force: bool) -> Result<()> {
    info!("Loading configuration");
    let config = Config::load(cli.config.as_deref())?;
    let tracker = JiraClient::new(&config.jira)?;

    let aggregator = SprintAggregator::new(&tracker, &config.jira);
    let data = match aggregator.collect()? {
        Some(data) => data,
        None => {
            println!("No active sprint with relevant issues found.");
            return Ok(());
        }
    };

    let today = Zoned::now().date();
    if !force && !is_checkpoint_day(data.sprint.start_date, today, config.sprint.checkpoint_day) {
        println!(
            "Today is not day {} of sprint '{}'; no reminders sent. Use --force to override.",
            config.sprint.checkpoint_day, data.sprint.name
        );
        return Ok(());
    }

    let reminder = match build_reminder(
        &data,
        config.sprint.checkpoint_day,
        config.sprint.excluded_assignee.as_deref(),
    ) {
        Some(reminder) => reminder,
        None => {
            println!("Nothing outstanding to remind about.");
            return Ok(());
        }
    };

    let messenger = SlackClient::new(&config.slack)?;
    let outcome = messenger.send(&config.slack.forecast_channel, &reminder);
    println!("{}", outcome);

    Ok(())
}
