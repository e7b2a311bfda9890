// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layering example for the sidecar accessor.
//!
//! This example demonstrates:
//! - Seeding the namespace from a YAML file, environment variables and CLI overrides
//! - Runtime writes shadowing every seeded layer
//! - `unset` revealing the seeded value again
//! - Scoped views over one subtree
//!
//! To run this example:
//! ```bash
//! export GOTASK__WORKERS=2
//! cargo run --example layering -- --gotask.mode=cli
//! ```

use sidecfg::prelude::*;
use std::env;

fn print_value(accessor: &DefaultConfigAccessor, key: &str) -> Result<()> {
    let value = accessor.get_str(key, "<unset>")?;
    println!("  {:<24} = {}", key, value);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== sidecfg: Layering ===\n");

    let yaml_content = r#"
gotask:
  socket_address: 127.0.0.1:6001
  workers: 1
  mode: file
"#;

    let temp_file = tempfile::Builder::new().suffix(".yaml").tempfile()?;
    std::fs::write(temp_file.path(), yaml_content)?;

    // Priority order (highest to lowest):
    //   runtime writes (4), CLI (3), environment (2), YAML (1)
    let cli_args: Vec<String> = env::args().skip(1).collect();
    let accessor = DefaultConfigAccessor::builder()
        .with_yaml_file(temp_file.path())?
        .with_env_vars()
        .with_cli_args(cli_args)
        .build()?;

    println!("Sources: {:?}\n", accessor.source_names()?);

    println!("--- Seeded values ---");
    for key in ["gotask.socket_address", "gotask.workers", "gotask.mode"] {
        print_value(&accessor, key)?;
    }

    println!("\n--- After set(\"gotask.workers\", \"8\") ---");
    accessor.set_str("gotask.workers", "8")?;
    print_value(&accessor, "gotask.workers")?;

    println!("\n--- After unset(\"gotask.workers\") ---");
    accessor.unset(&ConfigKey::from("gotask.workers"))?;
    print_value(&accessor, "gotask.workers")?;

    println!("\n--- Scoped view on \"gotask\" ---");
    let gotask = accessor.scoped("gotask")?;
    gotask.set_str("non_exist", "exist")?;
    println!("  has(non_exist)            = {}", gotask.has_str("non_exist")?);

    println!("\n--- Effective configuration ---");
    print!("{}", accessor.to_yaml()?);

    Ok(())
}
