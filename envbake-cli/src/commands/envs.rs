//! `envbake envs`

use anyhow::Result;

use envbake_core::EnvPrefix;

pub fn run() -> Result<()> {
    for (i, prefix) in EnvPrefix::all().iter().enumerate() {
        println!("{}. {prefix}", i + 1);
    }
    Ok(())
}
