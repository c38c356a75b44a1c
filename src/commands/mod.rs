//! Command implementations for the aichef-bridge CLI.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Every command builds one [`Bridge`], makes one backend
//! call, and prints either formatted text or the decoded JSON payload.

mod render;

use crate::bridge::Bridge;
use crate::cli::{Command, FindArgs, GenerateArgs, GlobalArgs, RawArgs, TipsArgs};
use crate::command::BridgeCommand;
use crate::config::BridgeConfig;
use crate::context::ProjectLayout;
use crate::error::{BridgeError, Result};
use crate::response::Envelope;
use crate::transport::ProcessTransport;
use serde::Serialize;
use std::path::PathBuf;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub fn dispatch(global: &GlobalArgs, command: Command) -> Result<()> {
    let bridge = build_bridge(global)?;

    match command {
        Command::Find(args) => cmd_find(&bridge, global, args),
        Command::Generate(args) => cmd_generate(&bridge, global, args),
        Command::Tips(args) => cmd_tips(&bridge, global, args),
        Command::Recipes => cmd_recipes(&bridge, global),
        Command::Raw(args) => cmd_raw(&bridge, args),
        Command::Resolve => cmd_resolve(&bridge),
    }
}

/// Build the subprocess bridge from global options.
///
/// An explicit `--config` is loaded first so root discovery looks for its
/// `script_name`. Otherwise the root is discovered with the default script
/// name and its `aichef-bridge.yaml` (if any) is loaded.
pub fn build_bridge(global: &GlobalArgs) -> Result<Bridge<ProcessTransport>> {
    let explicit = global.config.as_ref().map(BridgeConfig::load).transpose()?;
    let script_name = match &explicit {
        Some(config) => config.script_name.clone(),
        None => BridgeConfig::default().script_name,
    };

    let project_root: PathBuf = match &global.project_root {
        Some(root) => root.clone(),
        None => ProjectLayout::discover_root(&script_name)?,
    };

    let config = match explicit {
        Some(config) => config,
        None => BridgeConfig::load_from_project(&project_root)?,
    };

    Bridge::from_config(Some(project_root.as_path()), &config)
}

fn cmd_find(bridge: &Bridge, global: &GlobalArgs, args: FindArgs) -> Result<()> {
    let response = bridge.find_recipes(&args.ingredients)?;
    report_backend_error(&response.envelope);

    if global.json {
        return print_json(response.recipes());
    }
    print!("{}", render::recipe_list(&response.records()));
    Ok(())
}

fn cmd_generate(bridge: &Bridge, global: &GlobalArgs, args: GenerateArgs) -> Result<()> {
    if args.prompt.trim().is_empty() {
        return Err(BridgeError::UserError(
            "prompt must not be empty\n\
             Fix: describe the dish, e.g. `aichef-bridge generate \"quick vegan curry\"`."
                .to_string(),
        ));
    }

    let response = bridge.generate_recipe(&args.prompt)?;
    report_backend_error(&response.envelope);

    if global.json {
        return print_json(response.recipe());
    }
    match response.record() {
        Some(record) => print!("{}", render::recipe_detail(&record)),
        None => println!("No recipe was generated."),
    }
    Ok(())
}

fn cmd_tips(bridge: &Bridge, global: &GlobalArgs, args: TipsArgs) -> Result<()> {
    let response = bridge.get_tips(&args.recipe)?;
    report_backend_error(&response.envelope);

    if global.json {
        return print_json(response.tips());
    }
    print!("{}", render::tips(&args.recipe, response.tips()));
    Ok(())
}

fn cmd_recipes(bridge: &Bridge, global: &GlobalArgs) -> Result<()> {
    let response = bridge.get_all_recipes()?;
    report_backend_error(&response.envelope);

    if global.json {
        return print_json(response.recipes());
    }
    print!("{}", render::recipe_list(&response.records()));
    Ok(())
}

fn cmd_raw(bridge: &Bridge, args: RawArgs) -> Result<()> {
    let command = parse_command(&args.command)?;
    let result = bridge.execute(command, args.args)?;
    print_json(&result)
}

fn cmd_resolve(bridge: &Bridge) -> Result<()> {
    let transport = bridge.transport();
    let executable = transport.resolver().resolve();
    print!(
        "{}",
        render::resolution(&executable, &transport.layout().script_path)
    );
    Ok(())
}

fn parse_command(name: &str) -> Result<BridgeCommand> {
    BridgeCommand::parse(name).ok_or_else(|| {
        BridgeError::UserError(format!(
            "unknown backend command '{}'\n\
             Available commands: {}",
            name,
            BridgeCommand::ALL
                .iter()
                .map(BridgeCommand::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })
}

/// Surface a backend-reported error without failing the command.
fn report_backend_error(envelope: &Envelope) {
    if envelope.is_error() {
        eprintln!(
            "Note: backend reported an error: {}",
            envelope.message.as_deref().unwrap_or("(no message)")
        );
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| {
        BridgeError::UserError(format!("failed to render JSON output: {}", e))
    })?;
    println!("{}", text);
    Ok(())
}
