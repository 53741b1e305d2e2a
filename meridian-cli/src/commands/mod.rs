//! Command definitions and dispatch

mod pipeline;
mod policy;
mod role;
mod template;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;
pub use pipeline::PipelineCommands;
pub use policy::{PolicyCommands, SettingsCommands};
pub use role::RoleCommands;
pub use template::{AssignmentCommands, TemplateCommands};

/// Top-level commands
#[derive(Subcommand)]
pub enum Commands {
    /// Manage delivery pipelines and their definitions, properties,
    /// triggers, and runs
    #[command(subcommand)]
    Pipeline(PipelineCommands),
    /// Manage access and authorization policies
    #[command(subcommand)]
    Policy(PolicyCommands),
    /// Manage custom roles
    #[command(subcommand)]
    Role(RoleCommands),
    /// Manage policy templates and their versions
    #[command(subcommand)]
    Template(TemplateCommands),
    /// Manage policy assignments
    #[command(subcommand)]
    Assignment(AssignmentCommands),
    /// Manage account access-management settings
    #[command(subcommand)]
    Settings(SettingsCommands),
}

/// Route a top-level command to its handler
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Pipeline(cmd) => pipeline::handle_pipeline_command(cmd, config).await,
        Commands::Policy(cmd) => policy::handle_policy_command(cmd, config).await,
        Commands::Role(cmd) => role::handle_role_command(cmd, config).await,
        Commands::Template(cmd) => template::handle_template_command(cmd, config).await,
        Commands::Assignment(cmd) => template::handle_assignment_command(cmd, config).await,
        Commands::Settings(cmd) => policy::handle_settings_command(cmd, config).await,
    }
}
