// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dynamic reload example.
//!
//! A `FileWatcher` marks the accessor stale when the YAML file changes; the
//! next read picks up the new content. Runtime writes survive the reload.
//!
//! To run this example:
//! ```bash
//! cargo run --example dynamic_reload --features reload
//! ```

use sidecfg::prelude::*;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== sidecfg: Dynamic Reload ===\n");

    let temp_file = tempfile::Builder::new().suffix(".yaml").tempfile()?;
    std::fs::write(temp_file.path(), "gotask:\n  workers: 1\n")?;

    let accessor = DefaultConfigAccessor::builder()
        .with_yaml_file(temp_file.path())?
        .build()?;
    accessor.set_str("gotask.non_exist", "exist")?;

    let watcher = FileWatcher::new(temp_file.path(), Some(Duration::from_millis(200)))?;
    accessor.register_watcher(Box::new(watcher))?;

    println!("workers before: {}", accessor.get_str("gotask.workers", "")?);

    std::fs::write(temp_file.path(), "gotask:\n  workers: 4\n")?;
    println!("File rewritten, waiting for the watcher...");
    thread::sleep(Duration::from_secs(1));

    println!("workers after:  {}", accessor.get_str("gotask.workers", "")?);
    println!("non_exist:      {}", accessor.get_str("gotask.non_exist", "")?);

    Ok(())
}
