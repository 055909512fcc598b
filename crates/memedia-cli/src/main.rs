use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use memedia_factory::{
    match_url, CapabilityResult, FactoryConfig, FactoryError, FactoryModule, ModuleLookup,
    PlayerFactory, SupportTables,
};
use memedia_host::HostModules;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Factory(#[from] FactoryError),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Inspect what the Media Engine player factory accepts.
#[derive(Debug, Parser)]
#[command(name = "memedia", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check whether URLs can be played. Exits with 1 if any is rejected.
    Probe {
        #[arg(required = true)]
        urls: Vec<String>,
        /// Print results as JSON.
        #[arg(long)]
        json: bool,
        /// Extra support tables merged over the built-in ones.
        #[arg(long, value_name = "FILE")]
        tables: Option<PathBuf>,
    },
    /// Print the effective support tables.
    Tables {
        #[arg(long)]
        json: bool,
        #[arg(long, value_name = "FILE")]
        tables: Option<PathBuf>,
    },
    /// Start the factory against an in-process host and report its metadata.
    Info {
        #[arg(long, value_name = "FILE")]
        tables: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
struct ProbeReport<'a> {
    url: &'a str,
    #[serde(flatten)]
    result: CapabilityResult,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(cli.command);
    if let Err(e) = &result {
        eprintln!("error: {e}");
    }
    ExitCode::from(exit_status(&result))
}

/// 0 when everything was accepted, 1 on any rejection, 2 on error.
fn exit_status(result: &Result<bool, CliError>) -> u8 {
    match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "memedia=info",
        1 => "memedia=debug",
        _ => "memedia=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns `Ok(false)` when the command ran but reported a rejection.
fn run(command: Command) -> Result<bool, CliError> {
    match command {
        Command::Probe { urls, json, tables } => {
            probe(&urls, json, &load_tables(tables.as_deref())?)
        }
        Command::Tables { json, tables } => {
            print_tables(&load_tables(tables.as_deref())?, json)?;
            Ok(true)
        }
        Command::Info { tables } => {
            info(load_tables(tables.as_deref())?);
            Ok(true)
        }
    }
}

/// Built-in tables merged with an explicit file, or with the user config file.
fn load_tables(path: Option<&Path>) -> Result<SupportTables, FactoryError> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using explicit support tables");
            let mut tables = SupportTables::embedded();
            tables.merge_user(&SupportTables::load_user(path)?);
            Ok(tables)
        }
        None => FactoryConfig::load(),
    }
}

fn probe(urls: &[String], json: bool, tables: &SupportTables) -> Result<bool, CliError> {
    tracing::debug!(count = urls.len(), "probing urls");
    let reports = probe_reports(urls, tables);
    let all_accepted = reports.iter().all(|r| r.result.accepted);

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            let verdict = if report.result.accepted { "ACCEPT" } else { "REJECT" };
            println!("{verdict}  {}", report.url);
            for diagnostic in &report.result.diagnostics {
                println!("        {:?}: {}", diagnostic.severity, diagnostic.message);
            }
        }
    }

    Ok(all_accepted)
}

fn probe_reports<'a>(urls: &'a [String], tables: &SupportTables) -> Vec<ProbeReport<'a>> {
    urls.iter()
        .map(|url| ProbeReport {
            url: url.as_str(),
            result: match_url(url, tables),
        })
        .collect()
}

fn print_tables(tables: &SupportTables, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(tables)?);
        return Ok(());
    }

    let join = |items: Vec<&str>| items.join(", ");
    println!("schemes:    {}", join(tables.schemes.iter().map(String::as_str).collect()));
    println!("extensions: {}", join(tables.extensions.iter().map(String::as_str).collect()));
    println!("platforms:  {}", join(tables.platforms.iter().map(String::as_str).collect()));
    Ok(())
}

fn info(tables: SupportTables) {
    let modules = Arc::new(HostModules::with_media());
    let lookup = Arc::clone(&modules) as Arc<dyn ModuleLookup>;
    let mut module = FactoryModule::with_tables(lookup, tables);
    module.startup();

    if let Some(factory) = module.factory() {
        println!("name:         {}", factory.name());
        println!("display name: {}", factory.display_name());
        println!("platforms:    {}", factory.supported_platforms().join(", "));
    }
    println!("registration: {:?}", module.state());

    let registered = modules.media().map(|m| m.factory_names()).unwrap_or_default();
    println!("host factories: {}", registered.join(", "));

    // No engine module is loaded in this process, so the factory declines.
    let created = module.factory().and_then(|f| f.create_player()).is_some();
    let outcome = if created {
        "created"
    } else {
        "declined (engine not loaded)"
    };
    println!("create player: {outcome}");

    module.shutdown();
}
