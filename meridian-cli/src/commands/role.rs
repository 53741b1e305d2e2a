//! Custom role command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;

use meridian_core::dto::policy::CreateRole;

use crate::config::Config;

/// Role subcommands
#[derive(Subcommand)]
pub enum RoleCommands {
    /// List the custom roles in an account
    List {
        /// Account ID
        account: String,
    },
    /// Create a custom role
    Create {
        /// Role name used in policies, e.g. PipelineOperator
        name: String,

        /// Human-readable name
        #[arg(long)]
        display_name: String,

        /// Account the role belongs to
        #[arg(long)]
        account: String,

        /// Service the role is scoped to
        #[arg(long)]
        service: String,

        /// Actions the role grants
        #[arg(long, required = true)]
        action: Vec<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Get role details
    Get {
        /// Role ID
        id: String,
    },
    /// Delete a custom role
    Delete {
        /// Role ID
        id: String,
    },
}

/// Handle role commands
pub async fn handle_role_command(command: RoleCommands, config: &Config) -> Result<()> {
    let client = config.iam_client();

    match command {
        RoleCommands::List { account } => {
            let roles = client
                .list_roles(&account)
                .await
                .context("Failed to list roles")?;

            for role in roles {
                println!(
                    "{}  {} ({}) - {} action(s)",
                    role.id.as_deref().unwrap_or("<no id>").bold(),
                    role.name,
                    role.service_name,
                    role.actions.len()
                );
            }
            Ok(())
        }
        RoleCommands::Create {
            name,
            display_name,
            account,
            service,
            action,
            description,
        } => {
            let role = client
                .create_role(CreateRole {
                    name,
                    display_name,
                    description,
                    actions: action,
                    account_id: account,
                    service_name: service,
                })
                .await
                .context("Failed to create role")?;

            println!(
                "{} {} ({})",
                "Created role".green(),
                role.name,
                role.id.as_deref().unwrap_or("<no id>")
            );
            Ok(())
        }
        RoleCommands::Get { id } => {
            let role = client.get_role(&id).await.context("Failed to get role")?;
            println!("{}", role.display_name.bold());
            println!("  name:    {}", role.name);
            println!("  service: {}", role.service_name);
            println!("  account: {}", role.account_id);
            for action in &role.actions {
                println!("  action:  {}", action);
            }
            Ok(())
        }
        RoleCommands::Delete { id } => {
            client
                .delete_role(&id)
                .await
                .context("Failed to delete role")?;
            println!("{} {}", "Deleted role".yellow(), id);
            Ok(())
        }
    }
}
