/// conference-admin - management API command line client
///
/// Lists, inspects and changes configuration/v1 resources on a conferencing
/// platform's management node.
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use conference_admin::configuration::{
    LicenceRequestCreateRequest, LogLevelCreateRequest, LogLevelUpdateRequest,
    SoftwareBundleUpdateRequest, StaticRouteCreateRequest, StaticRouteUpdateRequest,
};
use conference_admin::{ApiClient, ClientConfig, ConfigurationService, PostResponse, SearchOptions};

type Service = ConfigurationService<ApiClient>;

#[derive(Parser)]
#[command(name = "conference-admin")]
#[command(about = "Manage conferencing platform configuration over the management API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conference-admin.yaml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate example configuration file
    Init,

    #[command(flatten)]
    Resource(ResourceCommand),
}

/// Commands that talk to the management API
#[derive(Subcommand)]
enum ResourceCommand {
    /// Licence requests
    LicenceRequest {
        #[command(subcommand)]
        action: LicenceRequestAction,
    },

    /// Per-component log levels
    LogLevel {
        #[command(subcommand)]
        action: LogLevelAction,
    },

    /// Static network routes
    StaticRoute {
        #[command(subcommand)]
        action: StaticRouteAction,
    },

    /// Software bundles
    SoftwareBundle {
        #[command(subcommand)]
        action: SoftwareBundleAction,
    },

    /// System backups
    SystemBackup {
        #[command(subcommand)]
        action: SystemBackupAction,
    },
}

/// Filters shared by every list command
#[derive(Args)]
struct ListArgs {
    /// Page size (server default when omitted)
    #[arg(long)]
    limit: Option<u32>,

    /// Number of objects to skip
    #[arg(long)]
    offset: Option<u32>,

    /// Sort field, prefix with '-' for descending
    #[arg(long)]
    ordering: Option<String>,

    /// Case-insensitive name filter
    #[arg(long)]
    search: Option<String>,
}

impl ListArgs {
    fn options(&self) -> SearchOptions {
        SearchOptions::new()
            .limit(self.limit.unwrap_or_default())
            .offset(self.offset.unwrap_or_default())
            .ordering(self.ordering.clone().unwrap_or_default())
            .search(self.search.clone().unwrap_or_default())
    }
}

#[derive(Subcommand)]
enum LicenceRequestAction {
    /// List licence requests
    List(ListArgs),
    /// Show one licence request
    Get { sequence_number: String },
    /// Submit a licence request
    Create {
        #[arg(long)]
        reference: String,
        /// Action verb, e.g. ISSUE or UPGRADE
        #[arg(long)]
        actions: String,
    },
}

#[derive(Subcommand)]
enum LogLevelAction {
    /// List log levels
    List(ListArgs),
    /// Show one log level
    Get { id: i64 },
    /// Create a log level
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        level: String,
    },
    /// Change a log level
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        level: Option<String>,
    },
    /// Delete a log level
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum StaticRouteAction {
    /// List static routes
    List(ListArgs),
    /// Show one static route
    Get { id: i64 },
    /// Create a static route
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        prefix: i64,
        #[arg(long)]
        gateway: String,
    },
    /// Change a static route
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        prefix: Option<i64>,
        #[arg(long)]
        gateway: Option<String>,
    },
    /// Delete a static route
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum SoftwareBundleAction {
    /// List software bundles
    List(ListArgs),
    /// Show one software bundle
    Get { id: i64 },
    /// Select or clear the bundle's revision
    Select {
        id: i64,
        /// Revision to select
        #[arg(long, conflicts_with = "clear", required_unless_present = "clear")]
        revision: Option<String>,
        /// Clear the selected revision
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Subcommand)]
enum SystemBackupAction {
    /// List system backups
    List(ListArgs),
    /// Show one system backup
    Get { filename: String },
    /// Delete a system backup
    Delete { filename: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("conference_admin={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match cli.command {
        Commands::Init => init_config(&cli).await,
        Commands::Resource(ref command) => run(&cli, command).await,
    };

    if let Err(e) = result {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Execute a resource command against the configured management node
async fn run(cli: &Cli, command: &ResourceCommand) -> Result<()> {
    let config = ClientConfig::from_file(&cli.config).context("Failed to load configuration")?;
    let password = config.password()?;
    let client = ApiClient::from_config(&config, &password).context("Failed to create API client")?;
    let service = ConfigurationService::new(client);

    // Ctrl-C aborts the in-flight request
    let ctx = CancellationToken::new();
    let interrupt = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling request");
            interrupt.cancel();
        }
    });

    match command {
        ResourceCommand::LicenceRequest { action } => licence_request(&service, &ctx, action).await,
        ResourceCommand::LogLevel { action } => log_level(&service, &ctx, action).await,
        ResourceCommand::StaticRoute { action } => static_route(&service, &ctx, action).await,
        ResourceCommand::SoftwareBundle { action } => {
            software_bundle(&service, &ctx, action).await
        }
        ResourceCommand::SystemBackup { action } => system_backup(&service, &ctx, action).await,
    }
}

async fn licence_request(
    service: &Service,
    ctx: &CancellationToken,
    action: &LicenceRequestAction,
) -> Result<()> {
    let requests = service.licence_requests();
    match action {
        LicenceRequestAction::List(args) => {
            print_json(&requests.list(ctx, Some(&args.options())).await?)
        }
        LicenceRequestAction::Get { sequence_number } => {
            print_json(&requests.get(ctx, sequence_number).await?)
        }
        LicenceRequestAction::Create { reference, actions } => {
            let request = LicenceRequestCreateRequest {
                reference: reference.clone(),
                actions: actions.clone(),
            };
            report_created(&requests.create(ctx, &request).await?)
        }
    }
}

async fn log_level(service: &Service, ctx: &CancellationToken, action: &LogLevelAction) -> Result<()> {
    let levels = service.log_levels();
    match action {
        LogLevelAction::List(args) => print_json(&levels.list(ctx, Some(&args.options())).await?),
        LogLevelAction::Get { id } => print_json(&levels.get(ctx, *id).await?),
        LogLevelAction::Create { name, level } => {
            let request = LogLevelCreateRequest {
                name: name.clone(),
                level: level.clone(),
            };
            report_created(&levels.create(ctx, &request).await?)
        }
        LogLevelAction::Update { id, name, level } => {
            let request = LogLevelUpdateRequest {
                name: name.clone(),
                level: level.clone(),
            };
            print_json(&levels.update(ctx, *id, &request).await?)
        }
        LogLevelAction::Delete { id } => {
            levels.delete(ctx, *id).await?;
            info!("✓ Log level {} deleted", id);
            Ok(())
        }
    }
}

async fn static_route(
    service: &Service,
    ctx: &CancellationToken,
    action: &StaticRouteAction,
) -> Result<()> {
    let routes = service.static_routes();
    match action {
        StaticRouteAction::List(args) => print_json(&routes.list(ctx, Some(&args.options())).await?),
        StaticRouteAction::Get { id } => print_json(&routes.get(ctx, *id).await?),
        StaticRouteAction::Create {
            name,
            address,
            prefix,
            gateway,
        } => {
            let request = StaticRouteCreateRequest {
                name: name.clone(),
                address: address.clone(),
                prefix: *prefix,
                gateway: gateway.clone(),
            };
            print_json(&routes.create(ctx, &request).await?)
        }
        StaticRouteAction::Update {
            id,
            name,
            address,
            prefix,
            gateway,
        } => {
            let request = StaticRouteUpdateRequest {
                name: name.clone(),
                address: address.clone(),
                prefix: *prefix,
                gateway: gateway.clone(),
            };
            print_json(&routes.update(ctx, *id, &request).await?)
        }
        StaticRouteAction::Delete { id } => {
            routes.delete(ctx, *id).await?;
            info!("✓ Static route {} deleted", id);
            Ok(())
        }
    }
}

async fn software_bundle(
    service: &Service,
    ctx: &CancellationToken,
    action: &SoftwareBundleAction,
) -> Result<()> {
    let bundles = service.software_bundles();
    match action {
        SoftwareBundleAction::List(args) => {
            print_json(&bundles.list(ctx, Some(&args.options())).await?)
        }
        SoftwareBundleAction::Get { id } => print_json(&bundles.get(ctx, *id).await?),
        SoftwareBundleAction::Select {
            id,
            revision,
            clear,
        } => {
            let request = match (revision, clear) {
                (_, true) => SoftwareBundleUpdateRequest::clear(),
                (Some(revision), false) => SoftwareBundleUpdateRequest::select(revision.clone()),
                (None, false) => anyhow::bail!("Either --revision or --clear is required"),
            };
            print_json(&bundles.update(ctx, *id, &request).await?)
        }
    }
}

async fn system_backup(
    service: &Service,
    ctx: &CancellationToken,
    action: &SystemBackupAction,
) -> Result<()> {
    let backups = service.system_backups();
    match action {
        SystemBackupAction::List(args) => {
            print_json(&backups.list(ctx, Some(&args.options())).await?)
        }
        SystemBackupAction::Get { filename } => print_json(&backups.get(ctx, filename).await?),
        SystemBackupAction::Delete { filename } => {
            backups.delete(ctx, filename).await?;
            info!("✓ System backup {} deleted", filename);
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report_created(response: &PostResponse) -> Result<()> {
    if response.resource_uri.is_empty() {
        warn!("Server did not report the new resource's location");
    } else {
        info!("✓ Created {}", response.resource_uri);
    }
    if !response.body.is_empty() {
        println!("{}", String::from_utf8_lossy(&response.body));
    }
    Ok(())
}

/// Initialize example configuration file
async fn init_config(cli: &Cli) -> Result<()> {
    if cli.config.exists() {
        anyhow::bail!(
            "Configuration file already exists: {}",
            cli.config.display()
        );
    }

    let example_config = ClientConfig::example();
    let yaml = serde_yaml::to_string(&example_config)?;

    tokio::fs::write(&cli.config, yaml)
        .await
        .context("Failed to write configuration file")?;

    info!("Example configuration created: {}", cli.config.display());
    info!("");
    info!("Next steps:");
    info!("  1. Set base_url and username for your management node");
    info!("  2. Set the management API password:");
    info!("     export CONFERENCE_ADMIN_PASSWORD=your-password-here");
    info!("  3. Try a read-only command:");
    info!("     conference-admin static-route list");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_list_args_to_options() {
        let cli = Cli::parse_from([
            "conference-admin",
            "static-route",
            "list",
            "--limit",
            "2",
            "--search",
            "route",
        ]);
        let Commands::Resource(ResourceCommand::StaticRoute {
            action: StaticRouteAction::List(args),
        }) = cli.command
        else {
            panic!("expected static-route list");
        };
        assert_eq!(
            args.options().to_query(),
            "limit=2&name__icontains=route"
        );
    }

    #[test]
    fn test_select_requires_revision_or_clear() {
        let result = Cli::try_parse_from(["conference-admin", "software-bundle", "select", "1"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from([
            "conference-admin",
            "software-bundle",
            "select",
            "1",
            "--revision",
            "v28.0.0",
            "--clear",
        ]);
        assert!(result.is_err());
    }
}
