//! Policy template and assignment command handlers
//!
//! Template versions are addressed by composite IDs (`template_id/version`).
//! Assignment creation and deletion can optionally block until propagation
//! reaches a terminal state.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;

use meridian_client::WaitOptions;
use meridian_core::domain::assignment::{AssignmentTarget, AssignmentTemplate, TargetType};
use meridian_core::dto::template::CreateAssignment;
use meridian_core::id;

use crate::config::Config;

/// Template subcommands
#[derive(Subcommand)]
pub enum TemplateCommands {
    /// List the policy templates in an account
    List {
        /// Account ID
        account: String,
    },
    /// Get a template (latest version, or `template_id/version`)
    Get {
        /// Template ID or composite ID
        id: String,
    },
    /// Commit a version, making it immutable and assignable
    Commit {
        /// Composite ID: template_id/version
        id: String,
    },
    /// Delete a template and all its versions
    Delete {
        /// Template ID
        id: String,
    },
}

/// Assignment subcommands
#[derive(Subcommand)]
pub enum AssignmentCommands {
    /// List the policy assignments in an account
    List {
        /// Account ID
        account: String,
    },
    /// Assign a committed template version to a target
    Create {
        /// Composite ID: template_id/version
        template: String,

        /// Target kind: account, account-group, or enterprise
        #[arg(long, default_value = "account")]
        target_type: String,

        /// Target ID
        #[arg(long)]
        target: String,

        /// Block until propagation reaches a terminal state
        #[arg(long)]
        wait: bool,

        /// Overall wait timeout in minutes
        #[arg(long, default_value = "30")]
        timeout_mins: u64,
    },
    /// Get assignment details
    Get {
        /// Assignment ID
        id: String,
    },
    /// Remove an assignment, retracting its policies
    Delete {
        /// Assignment ID
        id: String,

        /// Block until the assignment is gone
        #[arg(long)]
        wait: bool,

        /// Overall wait timeout in minutes
        #[arg(long, default_value = "30")]
        timeout_mins: u64,
    },
}

/// Handle template commands
pub async fn handle_template_command(command: TemplateCommands, config: &Config) -> Result<()> {
    let client = config.iam_client();

    match command {
        TemplateCommands::List { account } => {
            let templates = client
                .list_templates(&account)
                .await
                .context("Failed to list templates")?;

            for template in templates {
                let committed = if template.committed {
                    "committed".green()
                } else {
                    "draft".yellow()
                };
                println!(
                    "{}  {} ({})",
                    id::join(&[&template.id, &template.version]).bold(),
                    template.name,
                    committed
                );
            }
            Ok(())
        }
        TemplateCommands::Get { id } => {
            // a composite ID selects a specific version
            let template = if id.contains('/') {
                let (template_id, version) = id::split2(&id)?;
                client.get_template_version(&template_id, &version).await
            } else {
                client.get_template(&id).await
            }
            .context("Failed to get template")?;

            let pretty = serde_json::to_string_pretty(&template)?;
            println!("{}", pretty);
            Ok(())
        }
        TemplateCommands::Commit { id } => {
            let (template_id, version) = id::split2(&id)?;
            client
                .commit_template_version(&template_id, &version)
                .await
                .context("Failed to commit template version")?;
            println!("{} {} version {}", "Committed".green(), template_id, version);
            Ok(())
        }
        TemplateCommands::Delete { id } => {
            client
                .delete_template(&id)
                .await
                .context("Failed to delete template")?;
            println!("{} {}", "Deleted template".yellow(), id);
            Ok(())
        }
    }
}

/// Handle assignment commands
pub async fn handle_assignment_command(command: AssignmentCommands, config: &Config) -> Result<()> {
    let client = config.iam_client();

    match command {
        AssignmentCommands::List { account } => {
            let assignments = client
                .list_assignments(&account)
                .await
                .context("Failed to list assignments")?;

            for assignment in assignments {
                println!(
                    "{}  {} v{} -> {} ({})",
                    assignment.id.bold(),
                    assignment.template.id,
                    assignment.template.version,
                    assignment.target.id,
                    assignment.status
                );
            }
            Ok(())
        }
        AssignmentCommands::Create {
            template,
            target_type,
            target,
            wait,
            timeout_mins,
        } => {
            let (template_id, version) = id::split2(&template)?;
            let assignment = client
                .create_assignment(CreateAssignment {
                    template: AssignmentTemplate {
                        id: template_id,
                        version,
                    },
                    target: AssignmentTarget {
                        target_type: parse_target_type(&target_type)?,
                        id: target,
                    },
                })
                .await
                .context("Failed to create assignment")?;

            println!(
                "{} {} ({})",
                "Created assignment".green(),
                assignment.id,
                assignment.status
            );

            if wait {
                println!("Waiting for propagation...");
                let done = client
                    .wait_for_assignment(&assignment.id, wait_options(timeout_mins))
                    .await
                    .context("Assignment did not complete")?;
                println!("{} ({})", "Propagation finished".green(), done.status);
            }
            Ok(())
        }
        AssignmentCommands::Get { id } => {
            let assignment = client
                .get_assignment(&id)
                .await
                .context("Failed to get assignment")?;
            let pretty = serde_json::to_string_pretty(&assignment)?;
            println!("{}", pretty);
            Ok(())
        }
        AssignmentCommands::Delete {
            id,
            wait,
            timeout_mins,
        } => {
            client
                .delete_assignment(&id)
                .await
                .context("Failed to delete assignment")?;
            println!("{} {}", "Deleted assignment".yellow(), id);

            if wait {
                println!("Waiting for retraction...");
                client
                    .wait_for_assignment_deleted(&id, wait_options(timeout_mins))
                    .await
                    .context("Assignment was not retracted")?;
                println!("{}", "Retraction finished".green());
            }
            Ok(())
        }
    }
}

fn wait_options(timeout_mins: u64) -> WaitOptions {
    WaitOptions {
        timeout: Duration::from_secs(timeout_mins * 60),
        ..Default::default()
    }
}

fn parse_target_type(s: &str) -> Result<TargetType> {
    match s {
        "account" => Ok(TargetType::Account),
        "account-group" => Ok(TargetType::AccountGroup),
        "enterprise" => Ok(TargetType::Enterprise),
        other => anyhow::bail!(
            "unknown target type `{}`: expected account, account-group, or enterprise",
            other
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target_type() {
        assert_eq!(
            parse_target_type("account-group").unwrap(),
            TargetType::AccountGroup
        );
        assert!(parse_target_type("org").is_err());
    }

    #[test]
    fn test_wait_options_timeout() {
        let options = wait_options(5);
        assert_eq!(options.timeout, Duration::from_secs(300));
        // other fields keep library defaults
        assert_eq!(options.initial_delay, Duration::from_secs(30));
    }
}
