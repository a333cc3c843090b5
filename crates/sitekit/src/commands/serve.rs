//! `sitekit serve` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use sitekit_agent::{AgentService, HttpAgentService, UnconfiguredAgent};
use sitekit_config::{CliSettings, Config};
use sitekit_model::SectionIdGenerator;
use sitekit_render::SectionRegistry;
use sitekit_server::{ServerDeps, run_server, server_config_from_config};
use sitekit_store::{FileDirectory, FsImageStore, JsonFileSink, SiteStore, load_site_config};

use crate::commands::starter_site;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover sitekit.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the site document (overrides config).
    #[arg(short, long)]
    site: Option<PathBuf>,

    /// Path to the business directory seed file (overrides config).
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Business slug to edit (overrides config).
    #[arg(short, long)]
    business: Option<String>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (request and reload logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            site_path: self.site,
            directory_path: self.directory,
            business: self.business,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if config.site.business.is_empty() {
            return Err(CliError::Validation(
                "no business slug configured; set [site].business or pass --business".to_owned(),
            ));
        }

        // Registry and id generator: built once, read-only for the process
        // lifetime, passed into everything that needs them.
        let registry = Arc::new(SectionRegistry::builtin());
        let ids = SectionIdGenerator::new();

        // Site document: load it, or scaffold a starter when absent.
        let site = if config.site.config_path.is_file() {
            load_site_config(&config.site.config_path)?
        } else {
            output.info(&format!(
                "No site document at {}, starting from template defaults",
                config.site.config_path.display()
            ));
            starter_site(&registry, &ids)
        };
        let store = Arc::new(SiteStore::new(site));

        // Persist every committed write back to the document file.
        Arc::new(JsonFileSink::new(&config.site.config_path)).attach(&store);

        let directory = Arc::new(FileDirectory::load(&config.site.directory_path)?);

        let agent: Arc<dyn AgentService> = if config.agent.endpoint.is_empty() {
            output.info("Agent channel: disabled (no [agent].endpoint configured)");
            Arc::new(UnconfiguredAgent)
        } else {
            output.info(&format!("Agent endpoint: {}", config.agent.endpoint));
            let mut service = HttpAgentService::new(&config.agent.endpoint);
            if !config.agent.api_key.is_empty() {
                service = service.with_api_key(&config.agent.api_key);
            }
            Arc::new(service)
        };

        let images = Arc::new(FsImageStore::new(&config.uploads.dir, &config.uploads.base_url));

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!("Editing site for '{}'", config.site.business));
        output.info(&format!("Site document: {}", config.site.config_path.display()));

        let server_config = server_config_from_config(&config);
        run_server(server_config, ServerDeps {
            store,
            registry,
            directory,
            agent,
            images,
        })
        .await
        .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
