//! Command-line interface for running the suite from a terminal or CI job.

use std::path::PathBuf;
use std::process::ExitCode;

use adprobe::api::{AdsClient, Endpoints};
use adprobe::config::{ConfigOverrides, SuiteConfig};
use adprobe::extract::extract_id;
use adprobe::http::{ClientConfig, HttpClient};
use adprobe::suite::{Scenario, ScenarioFilter, ScenarioGroup, SuiteRunner};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::error;

#[derive(Parser)]
#[command(name = "adprobe")]
#[command(about = "Functional test suite for the classified-ads API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run scenarios against the service and delete what they created
    Run(RunArgs),
    /// Print the scenario catalog
    List,
    /// Print the item id carried by a creation response body
    Extract {
        /// Response body as JSON text
        json: String,
    },
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Service root, e.g. https://qa-internship.avito.com
    #[arg(long)]
    pub base_url: Option<String>,

    /// Seller id that scenario seller ids are offset from
    #[arg(long, allow_hyphen_values = true)]
    pub seller_base: Option<String>,

    /// Per-request timeout; unset or 0 disables it
    #[arg(long)]
    pub timeout_ms: Option<String>,

    /// Only run these groups (repeatable)
    #[arg(long = "group")]
    pub groups: Vec<ScenarioGroup>,

    /// Only run scenarios whose code contains this text
    #[arg(long = "case")]
    pub case: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also write the JSON report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub async fn handle_command(command: Command) -> ExitCode {
    match command {
        Command::Run(args) => handle_run(args).await,
        Command::List => {
            for scenario in Scenario::ALL {
                println!("{} [{}] {}", scenario.code(), scenario.group(), scenario.title());
            }
            ExitCode::SUCCESS
        }
        Command::Extract { json } => handle_extract(&json),
    }
}

async fn handle_run(args: RunArgs) -> ExitCode {
    let overrides = ConfigOverrides {
        base_url: args.base_url,
        seller_base: args.seller_base,
        timeout_ms: args.timeout_ms,
    };
    let config = match SuiteConfig::load(&overrides) {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return ExitCode::from(2);
        }
    };

    let http = match HttpClient::new(&ClientConfig {
        timeout: config.timeout,
    }) {
        Ok(http) => http,
        Err(err) => {
            error!("{err}");
            return ExitCode::from(2);
        }
    };

    let api = AdsClient::new(http, Endpoints::new(&config.base_url));
    let runner = SuiteRunner::new(api, config.seller_base);
    let filter = ScenarioFilter {
        groups: args.groups,
        code: args.case,
    };

    let report = runner.run(&filter).await;

    match args.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => match report.to_json() {
            Ok(json) => println!("{json}"),
            Err(err) => error!("{err}"),
        },
    }

    if let Some(path) = &args.report {
        if let Err(err) = report.write_to(path) {
            error!("{err}");
        }
    }

    if report.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn handle_extract(raw: &str) -> ExitCode {
    let body: serde_json::Value = match serde_json::from_str(raw) {
        Ok(body) => body,
        Err(err) => {
            error!("Invalid JSON: {err}");
            return ExitCode::from(2);
        }
    };

    match extract_id(&body) {
        Some(id) => {
            println!("{id}");
            ExitCode::SUCCESS
        }
        None => {
            error!("No identifier found in response");
            ExitCode::FAILURE
        }
    }
}
