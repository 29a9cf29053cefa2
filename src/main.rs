use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use uac_triage::cli::{Args, Commands};
use uac_triage::collectors::collector::{run_collection, run_parse, OutputLayout, RunReport};
use uac_triage::config::{load_or_default, CategoryId, TriageConfig};
use uac_triage::constants::ERROR_INVALID_INPUT;

fn main() -> Result<()> {
    let args = Args::parse();

    initialize_logging(args.verbose)?;

    if let Some(cmd) = &args.command {
        return handle_subcommand(cmd);
    }

    let input_root = validate_input(args.path.as_deref())?;
    let config = load_config(&args)?;

    let base = match &args.output {
        Some(path) => path.clone(),
        None => env::current_dir().context("Failed to determine current directory")?,
    };
    let layout = OutputLayout::timestamped(&base, chrono::Local::now());

    info!("Starting UAC triage of {}", input_root.display());
    let collected = run_collection(&config, &input_root, &layout)?;

    let proceed = match args.parse_decision() {
        Some(decision) => decision,
        None => ask_to_parse()?,
    };

    let parse = if proceed {
        Some(run_parse(&config, &layout, &collected)?)
    } else {
        info!("Parsing skipped");
        None
    };

    log_report(&RunReport {
        output_root: layout.root().to_path_buf(),
        collected,
        parse,
    });
    Ok(())
}

/// Initialize logging with the specified verbosity level
fn initialize_logging(verbose: bool) -> Result<()> {
    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ).context("Failed to initialize logger")?;
    Ok(())
}

fn handle_subcommand(cmd: &Commands) -> Result<()> {
    match cmd {
        Commands::InitConfig { path } => {
            info!("Creating default configuration file at {}", path.display());
            TriageConfig::create_default_config_file(path)?;
            info!("Configuration created successfully");
            Ok(())
        }
    }
}

fn validate_input(path: Option<&Path>) -> Result<PathBuf> {
    let path = path.ok_or_else(|| anyhow!("{}: --path is required", ERROR_INVALID_INPUT))?;
    if !path.is_dir() {
        return Err(anyhow!("{}: {}", ERROR_INVALID_INPUT, path.display()));
    }
    Ok(path.to_path_buf())
}

/// Load configuration and apply command-line overrides
fn load_config(args: &Args) -> Result<TriageConfig> {
    let mut config = load_or_default(args.config.as_deref())?;
    if let Some(threshold) = args.threshold {
        config.options.text_threshold = threshold;
        config.normalize_and_validate()?;
    }
    Ok(config)
}

fn ask_to_parse() -> Result<bool> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("Parse collected logs to JSON? (y/n) ");
        stdout.flush().context("Failed to write prompt")?;

        let mut answer = String::new();
        if stdin.lock().read_line(&mut answer).context("Failed to read answer")? == 0 {
            return Ok(false);
        }
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => continue,
        }
    }
}

fn log_report(report: &RunReport) {
    info!("Triage completed, output in {}", report.output_root.display());
    info!("  Collected files: {}", report.collected.len());
    info!("  Hash listings:   {}", report.count_in(CategoryId::Hashes));
    if let Some(parse) = &report.parse {
        info!("  Parsed files:    {}", parse.stats.parsed_files);
        info!("  Skipped files:   {}", parse.stats.ignored_files + parse.stats.failed_files);
        info!("  Records:         {}", parse.records.len());
    }
}
