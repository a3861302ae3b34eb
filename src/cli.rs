use crate::config::{BasePath, DocConfig, RequestContext};
use crate::document::DocumentAssembler;
use crate::error::Error;
use crate::grouper::RouteIndex;
use crate::loader::{load_config, RouteLoader};
use crate::serializer::{serialize_json, serialize_yaml, write_to_file};
use crate::server;
use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{debug, info, warn};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Request base URL used when generating documents outside of a request
const OFFLINE_BASE_URL: &str = "http://localhost";

/// Swagger From Routes - Generate Swagger 1.1 API descriptions from a web API's route table
#[derive(Parser, Debug)]
#[command(name = "swagger-from-routes")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate an API description and print it or write it to a file
    Generate {
        #[command(flatten)]
        doc: DocArgs,

        /// Only document this resource
        #[arg(short = 'r', long = "resource", value_name = "NAME")]
        resource: Option<String>,

        /// Output format (json or yaml)
        #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
        output_format: OutputFormat,

        /// Output file path (if not specified, outputs to stdout)
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output_path: Option<PathBuf>,
    },
    /// Serve the documentation endpoints over HTTP
    Serve {
        #[command(flatten)]
        doc: DocArgs,

        /// Address to listen on
        #[arg(short = 'b', long = "bind", default_value = "127.0.0.1:9292")]
        bind: SocketAddr,
    },
}

/// Options shared by every subcommand
#[derive(Args, Debug)]
pub struct DocArgs {
    /// Route table file, or directory of route table files
    #[arg(value_name = "ROUTES")]
    pub routes_path: PathBuf,

    /// YAML or JSON config file (mount path, default parameters, ...)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// URL prefix of the documentation endpoints
    #[arg(long = "mount-path")]
    pub mount_path: Option<String>,

    /// Base path announced in documents (defaults to the request base URL)
    #[arg(long = "base-path")]
    pub base_path: Option<String>,

    /// Version substituted into {version} placeholders
    #[arg(long = "api-version")]
    pub api_version: Option<String>,

    /// Render route notes from markdown to HTML
    #[arg(long = "markdown")]
    pub markdown: bool,

    /// Leave the documentation endpoints out of the index
    #[arg(long = "hide-documentation-path")]
    pub hide_documentation_path: bool,

    /// Drop the format suffix from paths instead of documenting {format}
    #[arg(long = "hide-format")]
    pub hide_format: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl DocArgs {
    /// Build the configuration: config file first, command-line flags on top
    pub fn to_config(&self) -> Result<DocConfig> {
        let mut config = match &self.config_path {
            Some(path) => load_config(path)?,
            None => DocConfig::new(),
        };

        if let Some(mount_path) = &self.mount_path {
            config = config.with_mount_path(mount_path.clone());
        }
        if let Some(base_path) = &self.base_path {
            config = config.with_base_path(BasePath::Literal(base_path.clone()));
        }
        if let Some(api_version) = &self.api_version {
            config = config.with_api_version(api_version.clone());
        }
        if self.markdown {
            config = config.with_markdown(true);
        }
        if self.hide_documentation_path {
            config = config.with_hide_documentation_path(true);
        }
        if self.hide_format {
            config = config.with_hide_format(true);
        }

        config.validate()?;
        debug!("Documentation config: {:?}", config);
        Ok(config)
    }

    fn load_routes(&self) -> Result<Vec<crate::route::RouteDescriptor>> {
        info!("Loading route table from {}", self.routes_path.display());
        let result = RouteLoader::new(self.routes_path.clone()).load()?;

        for warning in &result.warnings {
            warn!("{}", warning);
        }
        info!(
            "Loaded {} routes from {} files",
            result.routes.len(),
            result.files.len()
        );
        if result.routes.is_empty() {
            warn!("The route table is empty");
        }

        Ok(result.routes)
    }
}

/// Run the selected subcommand
pub fn run(args: CliArgs) -> Result<()> {
    match args.command {
        Command::Generate {
            doc,
            resource,
            output_format,
            output_path,
        } => {
            let config = doc.to_config()?;
            let index = RouteIndex::new(doc.load_routes()?).with_documentation_routes(&config);
            let request = RequestContext::new(OFFLINE_BASE_URL);
            let assembler = DocumentAssembler::new(&config);

            let document = match &resource {
                Some(name) => {
                    let routes = index
                        .resource(name)
                        .ok_or_else(|| Error::ResourceNotFound(name.clone()))?;
                    assembler.build_resource(&routes, &request)
                }
                None => assembler.build_index(&index.groups(), &request),
            };

            let content = match output_format {
                OutputFormat::Json => serialize_json(&document)?,
                OutputFormat::Yaml => serialize_yaml(&document)?,
            };

            if let Some(output_path) = &output_path {
                write_to_file(&content, output_path)?;
                info!("Wrote API description to {}", output_path.display());
            } else {
                println!("{}", content);
            }
            Ok(())
        }
        Command::Serve { doc, bind } => {
            let config = doc.to_config()?;
            let routes = doc.load_routes()?;
            let app = server::router(config, routes)?;

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(bind, app))
        }
    }
}
