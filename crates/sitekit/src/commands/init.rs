//! `sitekit init` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use sitekit_model::SectionIdGenerator;
use sitekit_render::SectionRegistry;
use sitekit_store::JsonFileSink;

use crate::commands::starter_site;
use crate::error::CliError;
use crate::output::Output;

const CONFIG_TEMPLATE: &str = r#"[server]
host = "127.0.0.1"
port = 7878

[site]
template = "plumbing"
business = "smith-plumbing"
config_path = "site.json"
directory_path = "businesses.toml"

[agent]
# endpoint = "${SITEKIT_AGENT_URL}"
# api_key = "${SITEKIT_AGENT_KEY}"

[preview]
debounce_ms = 500

[uploads]
dir = "uploads"
base_url = "/uploads"
"#;

const DIRECTORY_TEMPLATE: &str = r#"[[businesses]]
id = "b1"
slug = "smith-plumbing"
template = "plumbing"
name = "Smith Plumbing"
phone = "(555) 010-2000"
city = "Springfield"
rating = 4.8
review_count = 132

[[businesses.services]]
name = "Drain Cleaning"
description = "Clogged drains cleared fast."
price = "$99"

[[businesses.services]]
name = "Water Heater Repair"
description = "Repair and replacement, all brands."
"#;

/// Arguments for the init command.
#[derive(Args)]
pub(crate) struct InitArgs {
    /// Directory to scaffold into.
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Overwrite existing files.
    #[arg(long)]
    force: bool,
}

impl InitArgs {
    /// Execute the init command.
    ///
    /// # Errors
    ///
    /// Returns an error when a target file already exists (without
    /// `--force`) or a write fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        std::fs::create_dir_all(&self.dir)?;

        let config_path = self.dir.join("sitekit.toml");
        let directory_path = self.dir.join("businesses.toml");
        let site_path = self.dir.join("site.json");

        if !self.force {
            for path in [&config_path, &directory_path, &site_path] {
                if path.exists() {
                    return Err(CliError::Validation(format!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    )));
                }
            }
        }

        std::fs::write(&config_path, CONFIG_TEMPLATE)?;
        std::fs::write(&directory_path, DIRECTORY_TEMPLATE)?;
        write_starter_site(&site_path)?;

        output.success(&format!("Scaffolded SiteKit site in {}", self.dir.display()));
        output.info("Next: sitekit serve");
        Ok(())
    }
}

fn write_starter_site(path: &Path) -> Result<(), CliError> {
    let registry = SectionRegistry::builtin();
    let ids = SectionIdGenerator::new();
    let site = starter_site(&registry, &ids);
    JsonFileSink::new(path).write(&site)?;
    Ok(())
}
