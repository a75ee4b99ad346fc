//! WasteWatch registry command line host
//!
//! Keeps a participant registry in a local sled database and applies calls to
//! it one ledger height at a time.

mod config;
mod host;

use crate::config::{AppConfig, Overrides};
use crate::host::{RegistryHost, ScriptEntry};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wastewatch_registry::{
    BulkTargets, CallReceipt, Identity, ParticipantRegistry, RegistryCall, RegistryStore, Role,
    SledRegistryStore,
};

const EXIT_SUCCESS: u8 = 0;
/// Operational failure: bad input, config or storage.
const EXIT_FAILURE: u8 = 1;
/// The registry rejected at least one call.
const EXIT_REJECTED: u8 = 2;

#[derive(Parser)]
#[command(name = "wastewatch")]
#[command(about = "WasteWatch participant registry host", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Data directory (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<String>,
    /// Log level or filter directive (overrides config)
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Log format: pretty or json (overrides config)
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a fresh registry administered by the deployer
    Init {
        /// Deployer identity, becomes the first administrator
        #[arg(long)]
        admin: Identity,
    },
    /// Apply one call at the next ledger height
    Call {
        /// Authenticated caller identity
        #[arg(long)]
        caller: Identity,
        #[command(subcommand)]
        action: CallCommands,
    },
    /// Apply a JSON array of {"caller": .., "op": .., ...} entries in order
    Apply {
        file: PathBuf,
    },
    /// Read-only queries
    Query {
        #[command(subcommand)]
        action: QueryCommands,
    },
    /// List every participant record
    List,
    /// Show height, admin, pause flag, role counts and state root
    Status,
    /// Show stored call receipts
    Receipts,
    /// Show stored registry events
    Events,
    /// Derive the identity for a label (handy for local testing)
    Identity {
        label: String,
    },
}

#[derive(Subcommand)]
enum CallCommands {
    /// Self-register the caller
    Register {
        #[arg(long)]
        role: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Verify a participant (admin only)
    Verify { target: Identity },
    /// Update the caller's name and description
    UpdateProfile {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Deactivate a participant (self or admin)
    Deactivate { target: Identity },
    /// Change a participant's role (admin only)
    ChangeRole {
        target: Identity,
        #[arg(long)]
        role: String,
    },
    /// Pause gated operations (admin only)
    Pause,
    /// Resume gated operations (admin only)
    Unpause,
    /// Hand administration to another identity (admin only)
    SetAdmin { new_admin: Identity },
    /// Verify up to ten participants (admin only)
    BulkVerify {
        #[arg(required = true)]
        targets: Vec<Identity>,
    },
}

#[derive(Subcommand)]
enum QueryCommands {
    /// Full record for an identity
    Info { user: Identity },
    /// Whether an identity has a record
    Registered { user: Identity },
    /// Whether an identity is verified
    Verified { user: Identity },
    /// Whether an identity is verified, active and holds a role
    HasRole { user: Identity, role: Role },
    /// Active members holding a role
    RoleCount { role: Role },
    /// Current administrator
    Admin,
    /// Current pause flag
    Paused,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let status = match run(cli) {
        Ok(status) => status,
        Err(err) => {
            eprintln!("error: {err:#}");
            EXIT_FAILURE
        }
    };
    ExitCode::from(status)
}

fn run(cli: Cli) -> Result<u8> {
    let overrides = Overrides {
        data_dir: cli.data_dir.clone(),
        log_level: cli.log_level.clone(),
        log_format: cli.log_format.clone(),
    };
    let config = AppConfig::load(cli.config.as_deref(), &overrides)?;
    init_logging(&config)?;
    execute(cli.command, &config)
}

fn execute(command: Commands, config: &AppConfig) -> Result<u8> {
    if let Commands::Identity { label } = &command {
        println!("{}", Identity::from_label(label));
        return Ok(EXIT_SUCCESS);
    }

    fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("creating data directory {}", config.data_dir))?;
    let store = SledRegistryStore::open(config.db_path())
        .with_context(|| format!("opening registry database {}", config.db_path().display()))?;

    match command {
        Commands::Init { admin } => {
            let host = RegistryHost::init(store, admin)?;
            print_json(&json!({
                "admin": host.registry().get_contract_admin(),
                "height": host.height(),
            }))?;
            Ok(EXIT_SUCCESS)
        }
        Commands::Call { caller, action } => {
            let mut host = RegistryHost::open(store)?;
            let receipt = host.submit(caller, to_registry_call(action)?)?;
            print_json(&receipt)?;
            Ok(exit_status(std::slice::from_ref(&receipt)))
        }
        Commands::Apply { file } => {
            let raw = fs::read_to_string(&file)
                .with_context(|| format!("reading call script {}", file.display()))?;
            let entries: Vec<ScriptEntry> = serde_json::from_str(&raw)
                .with_context(|| format!("parsing call script {}", file.display()))?;
            let mut host = RegistryHost::open(store)?;
            let receipts = host.run_script(entries)?;
            print_json(&receipts)?;
            Ok(exit_status(&receipts))
        }
        Commands::Query { action } => {
            let host = RegistryHost::open(store)?;
            handle_query(host.registry(), action)?;
            Ok(EXIT_SUCCESS)
        }
        Commands::List => {
            let host = RegistryHost::open(store)?;
            let participants: Vec<_> = host
                .registry()
                .participants()
                .map(|(identity, record)| json!({ "identity": identity, "record": record }))
                .collect();
            print_json(&participants)?;
            Ok(EXIT_SUCCESS)
        }
        Commands::Status => {
            let host = RegistryHost::open(store)?;
            let registry = host.registry();
            print_json(&json!({
                "height": host.height(),
                "admin": registry.get_contract_admin(),
                "paused": registry.is_contract_paused(),
                "role_counts": registry.role_counts(),
                "total_active": registry.total_active(),
                "state_root": hex::encode(registry.snapshot().state_root()?),
            }))?;
            Ok(EXIT_SUCCESS)
        }
        Commands::Receipts => {
            print_json(&store.receipts()?)?;
            Ok(EXIT_SUCCESS)
        }
        Commands::Events => {
            print_json(&store.events()?)?;
            Ok(EXIT_SUCCESS)
        }
        Commands::Identity { .. } => Ok(EXIT_SUCCESS),
    }
}

fn to_registry_call(action: CallCommands) -> Result<RegistryCall> {
    let call = match action {
        CallCommands::Register {
            role,
            name,
            description,
        } => RegistryCall::Register {
            role,
            name,
            description,
        },
        CallCommands::Verify { target } => RegistryCall::Verify { target },
        CallCommands::UpdateProfile { name, description } => {
            RegistryCall::UpdateProfile { name, description }
        }
        CallCommands::Deactivate { target } => RegistryCall::Deactivate { target },
        CallCommands::ChangeRole { target, role } => RegistryCall::ChangeRole { target, role },
        CallCommands::Pause => RegistryCall::Pause,
        CallCommands::Unpause => RegistryCall::Unpause,
        CallCommands::SetAdmin { new_admin } => RegistryCall::SetAdmin { admin: new_admin },
        CallCommands::BulkVerify { targets } => RegistryCall::BulkVerify {
            targets: BulkTargets::try_from(targets)?,
        },
    };
    Ok(call)
}

fn handle_query(registry: &ParticipantRegistry, cmd: QueryCommands) -> Result<()> {
    let value = match cmd {
        QueryCommands::Info { user } => json!(registry.get_user_info(&user)),
        QueryCommands::Registered { user } => json!(registry.is_registered(&user)),
        QueryCommands::Verified { user } => json!(registry.is_verified(&user)),
        QueryCommands::HasRole { user, role } => json!(registry.has_role(&user, role)),
        QueryCommands::RoleCount { role } => json!(registry.get_role_count(role)),
        QueryCommands::Admin => json!(registry.get_contract_admin()),
        QueryCommands::Paused => json!(registry.is_contract_paused()),
    };
    print_json(&value)
}

fn exit_status(receipts: &[CallReceipt]) -> u8 {
    if receipts.iter().all(CallReceipt::is_success) {
        EXIT_SUCCESS
    } else {
        EXIT_REJECTED
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    // Logs go to stderr; stdout carries command output.
    if config.log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()?;
    }

    Ok(())
}
