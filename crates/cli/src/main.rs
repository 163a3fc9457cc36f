//! `accessctl` entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration**: load the optional TOML file, apply
//!    environment overrides and `--base-url`, then validate.
//! 2. **Wire observability**: install `tracing-subscriber` with the
//!    configured level and format. Spans emitted by `access-client` for each
//!    request flow through it.
//! 3. **Construct infrastructure**: build an [`AccessManagerClient`] over
//!    the `reqwest` transport with string element codecs.
//! 4. **Run one subcommand**: print results one per line on stdout.

mod config;
mod telemetry;

use std::path::PathBuf;

use access_client::{AccessManagerClient, ElementCodecs};
use access_domain::{AccessManagerEventProcessor, AccessManagerQueryProcessor};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::config::{load_config, validate_config};

type StringClient = AccessManagerClient<String, String, String, String>;

#[derive(Parser, Debug)]
#[command(name = "accessctl", version, about = "Access manager command line client")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to a TOML configuration file.
    #[arg(long, env = "ACCESSCTL_CONFIG")]
    config: Option<PathBuf>,

    /// Access manager base URL; overrides the file and ACCESSCTL_BASE_URL.
    #[arg(long)]
    base_url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all users.
    Users,
    /// List all groups.
    Groups,
    /// List all entity types.
    EntityTypes,
    AddUser {
        user: String,
    },
    /// Remove a user and all of its mappings.
    RemoveUser {
        user: String,
    },
    AddGroup {
        group: String,
    },
    /// Remove a group and all of its mappings.
    RemoveGroup {
        group: String,
    },
    /// Map a user to a group.
    MapUserToGroup {
        user: String,
        group: String,
    },
    /// List the groups a user is mapped to.
    UserGroups {
        user: String,
        /// Include groups reached through group-to-group mappings.
        #[arg(long)]
        indirect: bool,
    },
    AddEntityType {
        entity_type: String,
    },
    AddEntity {
        entity_type: String,
        entity: String,
    },
    /// List the entities of one type.
    Entities {
        entity_type: String,
    },
    /// Check whether a user has access to an entity; prints true or false.
    HasEntityAccess {
        user: String,
        entity_type: String,
        entity: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("loading configuration")?;
    if let Some(base_url) = cli.base_url {
        config.set_base_url(base_url);
    }
    validate_config(&config)?;

    telemetry::init_tracing(&config.log_level, config.log_format)?;

    let client_config = config.client()?;
    debug!(base_url = %client_config.base_url, "connecting to access manager");
    let client: StringClient = AccessManagerClient::new(client_config, ElementCodecs::identity())
        .context("building access manager client")?;

    for line in run(&client, cli.command).await? {
        println!("{line}");
    }
    Ok(())
}

/// Executes `command`, returning the lines to print.
async fn run(client: &StringClient, command: Command) -> Result<Vec<String>> {
    let lines = match command {
        Command::Users => client.users().await?,
        Command::Groups => client.groups().await?,
        Command::EntityTypes => client.entity_types().await?,
        Command::AddUser { user } => {
            client.add_user(&user).await?;
            Vec::new()
        }
        Command::RemoveUser { user } => {
            client.remove_user(&user).await?;
            Vec::new()
        }
        Command::AddGroup { group } => {
            client.add_group(&group).await?;
            Vec::new()
        }
        Command::RemoveGroup { group } => {
            client.remove_group(&group).await?;
            Vec::new()
        }
        Command::MapUserToGroup { user, group } => {
            client.add_user_to_group_mapping(&user, &group).await?;
            Vec::new()
        }
        Command::UserGroups { user, indirect } => {
            client.user_to_group_mappings(&user, indirect).await?
        }
        Command::AddEntityType { entity_type } => {
            client.add_entity_type(&entity_type).await?;
            Vec::new()
        }
        Command::AddEntity {
            entity_type,
            entity,
        } => {
            client.add_entity(&entity_type, &entity).await?;
            Vec::new()
        }
        Command::Entities { entity_type } => client.entities(&entity_type).await?,
        Command::HasEntityAccess {
            user,
            entity_type,
            entity,
        } => {
            let allowed = client
                .has_access_to_entity(&user, &entity_type, &entity)
                .await?;
            vec![allowed.to_string()]
        }
    };
    Ok(lines)
}
