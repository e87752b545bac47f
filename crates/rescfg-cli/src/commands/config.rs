//! Resource config CLI commands
//!
//! Handles: rescfg config set/unset/show

use clap::{Args, Subcommand};

use rescfg_core::resolve::find_resource;
use rescfg_core::{ConfigPipeline, PatchError, PatchOutcome};

use super::CommandContext;
use crate::error::CliError;
use crate::progress::Spinner;
use crate::settings::resolve_team_scope;

/// Resource config commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Set one or more config values on a custom resource
    Set {
        /// Assignments to apply
        #[arg(value_name = "KEY=VALUE")]
        assignments: Vec<String>,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Unset one or more config values on a custom resource
    Unset {
        /// Keys to remove
        #[arg(value_name = "KEY")]
        keys: Vec<String>,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Show the config values of a resource
    Show {
        #[command(flatten)]
        target: TargetArgs,
    },
}

/// Which resource to act on, and in which team
#[derive(Args)]
pub struct TargetArgs {
    /// Label of the resource
    #[arg(long, value_name = "LABEL")]
    pub resource: String,

    /// Team ID to look the resource up in
    #[arg(long, value_name = "TEAM_ID", conflicts_with = "me")]
    pub team: Option<String>,

    /// Use your personal resources, ignoring any stored team
    #[arg(long)]
    pub me: bool,
}

/// Execute config command
pub async fn execute(cmd: ConfigCommands, ctx: &CommandContext) -> Result<(), CliError> {
    match cmd {
        ConfigCommands::Set {
            assignments,
            target,
        } => execute_set(&assignments, &target, ctx).await,
        ConfigCommands::Unset { keys, target } => execute_unset(&keys, &target, ctx).await,
        ConfigCommands::Show { target } => execute_show(&target, ctx).await,
    }
}

async fn execute_set(
    assignments: &[String],
    target: &TargetArgs,
    ctx: &CommandContext,
) -> Result<(), CliError> {
    let (client, prefs) = ctx.connect()?;
    let scope = resolve_team_scope(target.team.as_deref(), target.me, &prefs);
    let spinner = Spinner::default();

    let outcome = ConfigPipeline::new(&client, &client)
        .with_progress(&spinner)
        .apply_set(&scope, &target.resource, assignments)
        .await
        .map_err(|e| CliError::from_patch(e, "set"))?;

    report(&outcome);
    Ok(())
}

async fn execute_unset(
    keys: &[String],
    target: &TargetArgs,
    ctx: &CommandContext,
) -> Result<(), CliError> {
    let (client, prefs) = ctx.connect()?;
    let scope = resolve_team_scope(target.team.as_deref(), target.me, &prefs);
    let spinner = Spinner::default();

    let outcome = ConfigPipeline::new(&client, &client)
        .with_progress(&spinner)
        .apply_unset(&scope, &target.resource, keys)
        .await
        .map_err(|e| CliError::from_patch(e, "unset"))?;

    report(&outcome);
    Ok(())
}

async fn execute_show(target: &TargetArgs, ctx: &CommandContext) -> Result<(), CliError> {
    let (client, prefs) = ctx.connect()?;
    let scope = resolve_team_scope(target.team.as_deref(), target.me, &prefs);

    let resource = find_resource(&client, &scope, &target.resource)
        .await
        .map_err(CliError::Patch)?;
    let config = client
        .resource_config(&resource.id)
        .await
        .map_err(|e| CliError::Patch(PatchError::Transport(e.to_string())))?;

    if config.is_empty() {
        println!("No configuration set.");
    } else {
        for (key, value) in &config {
            println!("{key}={value}");
        }
    }
    Ok(())
}

fn report(outcome: &PatchOutcome) {
    println!("{}", outcome.confirmation());
    println!();
    println!("{}", outcome.review_hint());
}
