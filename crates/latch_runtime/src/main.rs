//! Latch Script Runner
//!
//! Command-line front end over the script invoker: evaluates plugin
//! scripts or calls functions they declare.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use latch_asset::{DirectoryResources, ResourceRegistry};
use latch_script::{Bindings, ScriptInvoker, ScriptSettings};
use serde_json::Value;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "latch")]
#[command(version)]
#[command(about = "Run scripts from Latch plugin bundles", long_about = None)]
struct Args {
    #[clap(
        short,
        long = "plugin",
        required = true,
        help = "Plugin bundle directory; repeat to search several in order"
    )]
    plugins: Vec<PathBuf>,

    #[clap(long, help = "JSON settings file")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a script and print its result as JSON
    Eval {
        #[clap(help = "Script path relative to the scripts directory")]
        script: String,

        #[clap(
            short,
            long = "bind",
            value_parser = parse_binding,
            help = "Variable for the script, as name=value (value parsed as JSON, else taken as a string)"
        )]
        bindings: Vec<(String, Value)>,
    },
    /// Compile a script and call one of its functions
    Call {
        #[clap(help = "Script path relative to the scripts directory")]
        script: String,

        #[clap(help = "Function to call")]
        function: String,

        #[clap(
            short,
            long = "arg",
            value_parser = parse_value,
            help = "Argument value (JSON, else taken as a string)"
        )]
        args: Vec<Value>,
    },
}

fn parse_value(raw: &str) -> Result<Value, String> {
    Ok(serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())))
}

fn parse_binding(raw: &str) -> Result<(String, Value), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))?;
    if name.is_empty() {
        return Err(format!("missing variable name in '{raw}'"));
    }
    Ok((name.to_string(), parse_value(value)?))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::info!("Latch script runner v{}", latch_script::VERSION);

    let settings = match &args.config {
        Some(path) => ScriptSettings::from_json_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => ScriptSettings::default(),
    };

    let mut registry = ResourceRegistry::new();
    for plugin in &args.plugins {
        anyhow::ensure!(plugin.is_dir(), "plugin bundle {} is not a directory", plugin.display());
        registry.register(DirectoryResources::new(plugin));
    }
    tracing::info!(plugins = registry.len(), root = %settings.scripts_root, "resources registered");

    let invoker = ScriptInvoker::new(settings);
    let result = match args.command {
        Command::Eval { script, bindings } => {
            let bindings: Bindings = bindings.into_iter().collect();
            invoker
                .evaluate(&registry, &script, &bindings)
                .with_context(|| format!("evaluating {script}"))?
        }
        Command::Call {
            script,
            function,
            args,
        } => {
            let compiled = invoker
                .parse_class_any(&registry, &script)
                .with_context(|| format!("compiling {script}"))?;
            compiled
                .call(&function, &args)
                .with_context(|| format!("calling {function} in {script}"))?
        }
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
