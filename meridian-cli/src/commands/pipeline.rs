//! Pipeline command handlers
//!
//! Covers the pipeline itself plus its definitions, properties, triggers,
//! and runs. Sub-resources are addressed by composite IDs
//! (`pipeline_id/definition_id`, `pipeline_id/trigger_id`) as printed by the
//! list commands.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use uuid::Uuid;

use meridian_core::domain::pipeline::{DefinitionSource, DefinitionSourceProperties, Pipeline};
use meridian_core::dto::pipeline::{CreateDefinition, CreatePipeline, PropertyRequest, WorkerIdentity};
use meridian_core::dto::run::CreateRun;
use meridian_core::dto::trigger::UpdateTrigger;
use meridian_core::id;

use crate::config::Config;

/// Pipeline subcommands
#[derive(Subcommand)]
pub enum PipelineCommands {
    /// Create a pipeline for an existing toolchain pipeline tool
    Create {
        /// ID of the pipeline tool in the parent toolchain
        id: Uuid,

        /// Private worker to run on (defaults to the shared public worker)
        #[arg(long)]
        worker: Option<String>,

        /// Publish run events to the toolchain's notification targets
        #[arg(long)]
        notifications: bool,
    },
    /// Get pipeline details
    Get {
        /// Pipeline ID
        id: Uuid,
    },
    /// Delete a pipeline and everything it owns
    Delete {
        /// Pipeline ID
        id: Uuid,
    },
    /// List the definitions of a pipeline
    Definitions {
        /// Pipeline ID
        pipeline_id: Uuid,
    },
    /// Add a definition from a git repository
    AddDefinition {
        /// Pipeline ID
        pipeline_id: Uuid,

        /// Repository URL
        #[arg(long)]
        url: String,

        /// Branch to read (exclusive with --tag)
        #[arg(long)]
        branch: Option<String>,

        /// Tag to read (exclusive with --branch)
        #[arg(long)]
        tag: Option<String>,

        /// Path to the YAML files inside the repository
        #[arg(long, default_value = ".tekton")]
        path: String,
    },
    /// Remove a definition
    RemoveDefinition {
        /// Composite ID: pipeline_id/definition_id
        id: String,
    },
    /// List the environment properties of a pipeline
    Properties {
        /// Pipeline ID
        pipeline_id: Uuid,
    },
    /// Create a text property
    SetProperty {
        /// Pipeline ID
        pipeline_id: Uuid,
        name: String,
        value: String,
    },
    /// Remove a property
    RemoveProperty {
        /// Composite ID: pipeline_id/property_name
        id: String,
    },
    /// List the triggers of a pipeline
    Triggers {
        /// Pipeline ID
        pipeline_id: Uuid,
    },
    /// Enable or disable a trigger
    ToggleTrigger {
        /// Composite ID: pipeline_id/trigger_id
        id: String,

        #[arg(long)]
        enabled: bool,
    },
    /// Duplicate a trigger under a new name
    DuplicateTrigger {
        /// Composite ID: pipeline_id/trigger_id
        id: String,

        /// Name of the copy
        name: String,
    },
    /// List the runs of a pipeline
    Runs {
        /// Pipeline ID
        pipeline_id: Uuid,
    },
    /// Start a run by firing a trigger
    Run {
        /// Pipeline ID
        pipeline_id: Uuid,

        /// Name of the manual or generic trigger to fire
        #[arg(long)]
        trigger: String,

        /// Property overrides as key=value pairs
        #[arg(short, long, value_parser = parse_key_val)]
        param: Vec<(String, String)>,
    },
    /// Cancel a run
    CancelRun {
        /// Pipeline ID
        pipeline_id: Uuid,

        /// Run ID
        run_id: Uuid,

        /// Stop the run's pods immediately
        #[arg(long)]
        force: bool,
    },
}

/// Parse a single key=value pair
fn parse_key_val(s: &str) -> Result<(String, String)> {
    let pos = s
        .find('=')
        .ok_or_else(|| anyhow::anyhow!("invalid KEY=value: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Handle pipeline commands
pub async fn handle_pipeline_command(command: PipelineCommands, config: &Config) -> Result<()> {
    let client = config.pipeline_client();

    match command {
        PipelineCommands::Create {
            id,
            worker,
            notifications,
        } => {
            let pipeline = client
                .create_pipeline(CreatePipeline {
                    id,
                    worker: worker.map(|id| WorkerIdentity { id }),
                    next_build_number: None,
                    enable_notifications: notifications.then_some(true),
                    enable_partial_cloning: None,
                })
                .await
                .context("Failed to create pipeline")?;

            println!("{} {}", "Created pipeline".green(), pipeline.id);
            print_pipeline(&pipeline);
            Ok(())
        }
        PipelineCommands::Get { id } => {
            let pipeline = client
                .get_pipeline(id)
                .await
                .context("Failed to get pipeline")?;
            print_pipeline(&pipeline);
            Ok(())
        }
        PipelineCommands::Delete { id } => {
            client
                .delete_pipeline(id)
                .await
                .context("Failed to delete pipeline")?;
            println!("{} {}", "Deleted pipeline".yellow(), id);
            Ok(())
        }
        PipelineCommands::Definitions { pipeline_id } => {
            let definitions = client
                .list_definitions(pipeline_id)
                .await
                .context("Failed to list definitions")?;

            for definition in definitions {
                let props = &definition.source.properties;
                let rev = props
                    .branch
                    .as_deref()
                    .or(props.tag.as_deref())
                    .unwrap_or("default");
                println!(
                    "{}  {} @ {} ({})",
                    id::join(&[&pipeline_id.to_string(), &definition.id]).bold(),
                    props.url,
                    rev,
                    props.path
                );
            }
            Ok(())
        }
        PipelineCommands::AddDefinition {
            pipeline_id,
            url,
            branch,
            tag,
            path,
        } => {
            let definition = client
                .create_definition(
                    pipeline_id,
                    CreateDefinition {
                        source: DefinitionSource {
                            source_type: "git".to_string(),
                            properties: DefinitionSourceProperties {
                                url,
                                branch,
                                tag,
                                path,
                                tool: None,
                            },
                        },
                    },
                )
                .await
                .context("Failed to add definition")?;

            println!(
                "{} {}",
                "Added definition".green(),
                id::join(&[&pipeline_id.to_string(), &definition.id])
            );
            Ok(())
        }
        PipelineCommands::RemoveDefinition { id } => {
            let (pipeline_id, definition_id) = id::split2(&id)?;
            let pipeline_id: Uuid = pipeline_id.parse().context("Invalid pipeline ID")?;
            client
                .delete_definition(pipeline_id, &definition_id)
                .await
                .context("Failed to remove definition")?;
            println!("{} {}", "Removed definition".yellow(), definition_id);
            Ok(())
        }
        PipelineCommands::Properties { pipeline_id } => {
            let properties = client
                .list_properties(pipeline_id)
                .await
                .context("Failed to list properties")?;

            for property in properties {
                let value = property.value.as_deref().unwrap_or("<not set>");
                let lock = if property.locked { " [locked]" } else { "" };
                println!(
                    "{}  {} = {} ({}{})",
                    id::join(&[&pipeline_id.to_string(), &property.name]).bold(),
                    property.name,
                    value,
                    property.property_type,
                    lock
                );
            }
            Ok(())
        }
        PipelineCommands::SetProperty {
            pipeline_id,
            name,
            value,
        } => {
            let property = client
                .create_property(pipeline_id, PropertyRequest::text(name, value))
                .await
                .context("Failed to create property")?;
            println!("{} {}", "Created property".green(), property.name);
            Ok(())
        }
        PipelineCommands::RemoveProperty { id } => {
            let (pipeline_id, name) = id::split2(&id)?;
            let pipeline_id: Uuid = pipeline_id.parse().context("Invalid pipeline ID")?;
            client
                .delete_property(pipeline_id, &name)
                .await
                .context("Failed to remove property")?;
            println!("{} {}", "Removed property".yellow(), name);
            Ok(())
        }
        PipelineCommands::Triggers { pipeline_id } => {
            let triggers = client
                .list_triggers(pipeline_id)
                .await
                .context("Failed to list triggers")?;

            for trigger in triggers {
                let state = if trigger.enabled {
                    "enabled".green()
                } else {
                    "disabled".red()
                };
                println!(
                    "{}  {} ({}) -> {} [{}]",
                    id::join(&[&pipeline_id.to_string(), &trigger.id]).bold(),
                    trigger.name,
                    trigger.trigger_type,
                    trigger.event_listener,
                    state
                );
            }
            Ok(())
        }
        PipelineCommands::ToggleTrigger { id, enabled } => {
            let (pipeline_id, trigger_id) = id::split2(&id)?;
            let pipeline_id: Uuid = pipeline_id.parse().context("Invalid pipeline ID")?;
            let trigger = client
                .update_trigger(
                    pipeline_id,
                    &trigger_id,
                    UpdateTrigger {
                        enabled: Some(enabled),
                        ..Default::default()
                    },
                )
                .await
                .context("Failed to update trigger")?;

            let state = if trigger.enabled { "enabled" } else { "disabled" };
            println!("Trigger {} is now {}", trigger.name, state.bold());
            Ok(())
        }
        PipelineCommands::DuplicateTrigger { id, name } => {
            let (pipeline_id, trigger_id) = id::split2(&id)?;
            let pipeline_id: Uuid = pipeline_id.parse().context("Invalid pipeline ID")?;
            let copy = client
                .duplicate_trigger(pipeline_id, &trigger_id, name)
                .await
                .context("Failed to duplicate trigger")?;
            println!(
                "{} {}",
                "Created trigger".green(),
                id::join(&[&pipeline_id.to_string(), &copy.id])
            );
            Ok(())
        }
        PipelineCommands::Runs { pipeline_id } => {
            let runs = client
                .list_runs(pipeline_id)
                .await
                .context("Failed to list runs")?;

            for run in runs {
                let build = run
                    .build_number
                    .map(|n| format!("#{}", n))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{}  {} {} (trigger: {}, {})",
                    run.id.to_string().bold(),
                    build,
                    run.status,
                    run.trigger.name,
                    run.created_at
                );
            }
            Ok(())
        }
        PipelineCommands::Run {
            pipeline_id,
            trigger,
            param,
        } => {
            let mut req = CreateRun::new(trigger);
            for (key, value) in param {
                req.trigger_properties
                    .insert(key, serde_json::Value::String(value));
            }

            let run = client
                .start_run(pipeline_id, req)
                .await
                .context("Failed to start run")?;

            println!("{} {} ({})", "Started run".green(), run.id, run.status);
            Ok(())
        }
        PipelineCommands::CancelRun {
            pipeline_id,
            run_id,
            force,
        } => {
            client
                .cancel_run(pipeline_id, run_id, force)
                .await
                .context("Failed to cancel run")?;
            println!("{} {}", "Cancelled run".yellow(), run_id);
            Ok(())
        }
    }
}

fn print_pipeline(pipeline: &Pipeline) {
    println!("{}", pipeline.name.bold());
    println!("  id:          {}", pipeline.id);
    println!("  status:      {}", pipeline.status);
    println!("  toolchain:   {}", pipeline.toolchain.id);
    println!("  worker:      {}", pipeline.worker.id);
    println!("  definitions: {}", pipeline.definitions.len());
    println!("  properties:  {}", pipeline.properties.len());
    println!("  triggers:    {}", pipeline.triggers.len());
    println!("  runs url:    {}", pipeline.runs_url);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("branch=main").unwrap(),
            ("branch".to_string(), "main".to_string())
        );
        // values may contain '='
        assert_eq!(
            parse_key_val("expr=a=b").unwrap(),
            ("expr".to_string(), "a=b".to_string())
        );
        assert!(parse_key_val("no-separator").is_err());
    }
}
