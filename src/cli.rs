use crate::app::App;
use crate::constants::env;
use crate::errors::NodeError;
use crate::managers::node::InputRecord;
use crate::services::config::NodeConfig;
use crate::services::credentials::AttioCredentials;
use crate::services::logger::{LogLevel, Logger};
use crate::services::routing_table::RoutingTable;
use crate::utils::input::{into_items, read_json_source};
use crate::utils::labels::label_for;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "attio-node", version, about = "Translate Attio operations into HTTP requests")]
pub struct Cli {
    /// error, warn, info or debug; defaults to LOG_LEVEL
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build and dispatch one request per input record
    Execute(RunArgs),
    /// Build requests without sending them; credentials are redacted
    Build(RunArgs),
    /// List routing table entries with display labels
    Operations {
        #[arg(long)]
        routing_table: PathBuf,
        #[arg(long)]
        resource: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(long)]
    pub routing_table: PathBuf,
    /// JSON file with an array of records, or `-` for stdin
    #[arg(long, default_value = "-")]
    pub input: String,
    #[arg(long, env = env::ACCESS_TOKEN, hide_env_values = true)]
    pub access_token: Option<String>,
    #[arg(long)]
    pub base_url: Option<String>,
    #[arg(long)]
    pub timeout_ms: Option<u64>,
    #[arg(long)]
    pub continue_on_fail: bool,
}

impl RunArgs {
    fn app(&self, logger: &Logger, require_credentials: bool) -> Result<App, NodeError> {
        let table = RoutingTable::load(&self.routing_table)?;
        let config = NodeConfig::from_env()?
            .with_base_url(self.base_url.clone())
            .with_timeout_ms(self.timeout_ms)
            .with_continue_on_fail(self.continue_on_fail);
        let credentials = match self.access_token.as_deref() {
            Some(token) => Some(AttioCredentials::new(token)?),
            None if require_credentials => {
                return Err(NodeError::invalid_config("Attio access token is required")
                    .with_hint(format!("Set {} or pass --access-token", env::ACCESS_TOKEN)))
            }
            None => None,
        };
        App::initialize(logger.clone(), table, config, credentials)
    }

    fn records(&self) -> Result<Vec<InputRecord>, NodeError> {
        into_items(read_json_source(&self.input)?)
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item).map_err(|err| {
                    NodeError::invalid_params(format!("Invalid input record {}: {}", index, err))
                })
            })
            .collect()
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), NodeError> {
    let text =
        serde_json::to_string_pretty(value).map_err(|err| NodeError::internal(err.to_string()))?;
    println!("{}", text);
    Ok(())
}

fn list_operations(table: &RoutingTable, resource: Option<&str>) -> Value {
    let rows: Vec<Value> = table
        .entries()
        .iter()
        .filter(|entry| resource.map_or(true, |r| entry.resource.trim() == r))
        .map(|entry| {
            let label = match (entry.method.as_deref(), entry.url.as_deref()) {
                (Some(method), Some(url)) => label_for(method, url),
                _ => entry.operation.clone(),
            };
            serde_json::json!({
                "resource": entry.resource,
                "operation": entry.operation,
                "label": label,
            })
        })
        .collect();
    Value::Array(rows)
}

pub async fn run(cli: Cli) -> Result<(), NodeError> {
    let mut logger = Logger::new("attio");
    if let Some(level) = cli.log_level.as_deref() {
        logger.set_level(LogLevel::parse(level));
    }

    match cli.command {
        Command::Execute(args) => {
            let app = args.app(&logger, true)?;
            let records = args.records()?;
            let items = app.node.execute(&records).await?;
            print_json(&items)
        }
        Command::Build(args) => {
            let app = args.app(&logger, false)?;
            let records = args.records()?;
            let items = app.node.build_requests(&records)?;
            print_json(&items)
        }
        Command::Operations {
            routing_table,
            resource,
        } => {
            let table = RoutingTable::load(&routing_table)?;
            print_json(&list_operations(&table, resource.as_deref()))
        }
    }
}
