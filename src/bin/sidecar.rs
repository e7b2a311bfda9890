// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sidecar probe: resolves configuration and runs the get/set/has sequence.

use clap::Parser;
use sidecfg::adapters::yaml_file::{DEFAULT_APP_NAME, DEFAULT_QUALIFIER};
use sidecfg::domain::Result;
use sidecfg::probe;
use sidecfg::service::{ConfigAccessorBuilder, DefaultConfigAccessor};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Resolve sidecar configuration and report what the accessor sees.
#[derive(Parser, Debug)]
#[command(name = "sidecar", version, about)]
struct Args {
    /// YAML file to seed from instead of the OS-default location.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override a key; may be repeated.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    set: Vec<(String, String)>,
}

fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

fn build_accessor(args: Args) -> Result<DefaultConfigAccessor> {
    let builder = ConfigAccessorBuilder::new().with_env_vars();

    let builder = match args.config {
        Some(path) => builder.with_yaml_file(path)?,
        None => builder.with_default_yaml(DEFAULT_APP_NAME, DEFAULT_QUALIFIER),
    };

    builder.with_cli_pairs(args.set).build()
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let result = build_accessor(args).and_then(|accessor| probe::run(&accessor));
    if let Err(err) = result {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}
