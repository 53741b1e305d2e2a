//! Policy and access-settings command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;

use meridian_core::domain::policy::{
    AttributeCondition, Control, Grant, Policy, PolicyResource, PolicySubject, PolicyType, RoleRef,
};
use meridian_core::domain::settings::IdentityInteractionState;
use meridian_core::dto::policy::PolicyRequest;

use crate::config::Config;

/// Policy subcommands
#[derive(Subcommand)]
pub enum PolicyCommands {
    /// List the policies in an account
    List {
        /// Account ID
        account: String,
    },
    /// Get policy details
    Get {
        /// Policy ID
        id: String,
    },
    /// Grant a subject roles over a service
    Grant {
        /// Account ID the policy lives in
        #[arg(long)]
        account: String,

        /// IAM ID of the subject (user or service ID)
        #[arg(long)]
        subject: String,

        /// Service the roles apply to
        #[arg(long)]
        service: String,

        /// Role IDs to grant
        #[arg(long, required = true)]
        role: Vec<String>,

        /// Optional description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a policy
    Delete {
        /// Policy ID
        id: String,
    },
}

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show the access-management settings of an account
    Show {
        /// Account ID
        account: String,
    },
    /// Set how external user identities are handled
    SetUserState {
        /// Account ID
        account: String,

        /// One of: enabled, monitor, limited
        state: String,

        /// Allowed external accounts, for the `limited` state
        #[arg(long)]
        allow: Vec<String>,
    },
}

/// Handle policy commands
pub async fn handle_policy_command(command: PolicyCommands, config: &Config) -> Result<()> {
    let client = config.iam_client();

    match command {
        PolicyCommands::List { account } => {
            let policies = client
                .list_policies(&account)
                .await
                .context("Failed to list policies")?;

            for policy in policies {
                print_policy_line(&policy);
            }
            Ok(())
        }
        PolicyCommands::Get { id } => {
            let policy = client.get_policy(&id).await.context("Failed to get policy")?;
            let pretty = serde_json::to_string_pretty(&policy)?;
            println!("{}", pretty);
            Ok(())
        }
        PolicyCommands::Grant {
            account,
            subject,
            service,
            role,
            description,
        } => {
            let req = PolicyRequest {
                policy_type: PolicyType::Access,
                description,
                subject: PolicySubject {
                    attributes: vec![AttributeCondition::equals("iam_id", subject)],
                },
                resource: PolicyResource {
                    attributes: vec![
                        AttributeCondition::equals("accountId", account),
                        AttributeCondition::equals("serviceName", service),
                    ],
                    tags: Vec::new(),
                },
                control: Control {
                    grant: Grant {
                        roles: role.into_iter().map(|role_id| RoleRef { role_id }).collect(),
                    },
                },
                pattern: None,
                rule: None,
            };

            let policy = client
                .create_policy(req)
                .await
                .context("Failed to create policy")?;

            println!(
                "{} {}",
                "Created policy".green(),
                policy.id.as_deref().unwrap_or("<no id>")
            );
            Ok(())
        }
        PolicyCommands::Delete { id } => {
            client
                .delete_policy(&id)
                .await
                .context("Failed to delete policy")?;
            println!("{} {}", "Deleted policy".yellow(), id);
            Ok(())
        }
    }
}

/// Handle settings commands
pub async fn handle_settings_command(command: SettingsCommands, config: &Config) -> Result<()> {
    let client = config.iam_client();

    match command {
        SettingsCommands::Show { account } => {
            let settings = client
                .get_access_settings(&account)
                .await
                .context("Failed to get access settings")?;
            let pretty = serde_json::to_string_pretty(&settings)?;
            println!("{}", pretty);
            Ok(())
        }
        SettingsCommands::SetUserState {
            account,
            state,
            allow,
        } => {
            let state = parse_state(&state)?;
            let mut settings = client
                .get_access_settings(&account)
                .await
                .context("Failed to get access settings")?;

            let user = &mut settings
                .external_account_identity_interaction
                .identity_types
                .user;
            user.state = state;
            user.external_allowed_accounts = allow;

            let updated = client
                .update_access_settings(&account, &settings)
                .await
                .context("Failed to update access settings")?;

            println!(
                "External user identities: {:?}",
                updated
                    .external_account_identity_interaction
                    .identity_types
                    .user
                    .state
            );
            Ok(())
        }
    }
}

fn parse_state(s: &str) -> Result<IdentityInteractionState> {
    match s {
        "enabled" => Ok(IdentityInteractionState::Enabled),
        "monitor" => Ok(IdentityInteractionState::Monitor),
        "limited" => Ok(IdentityInteractionState::Limited),
        other => anyhow::bail!("unknown state `{}`: expected enabled, monitor, or limited", other),
    }
}

fn print_policy_line(policy: &Policy) {
    let roles: Vec<&str> = policy
        .control
        .grant
        .roles
        .iter()
        .map(|r| r.role_id.as_str())
        .collect();
    println!(
        "{}  {} [{}]",
        policy.id.as_deref().unwrap_or("<no id>").bold(),
        policy.policy_type,
        roles.join(", ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_state() {
        assert_eq!(
            parse_state("monitor").unwrap(),
            IdentityInteractionState::Monitor
        );
        assert!(parse_state("off").is_err());
    }
}
