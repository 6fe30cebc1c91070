//! CLI runner - executes commands

use crate::backend::{
    DataPipelineBackend, DescribeObjectsOutput, DescribeObjectsRequest, QueryObjectsPage,
    QueryObjectsRequest, Selector,
};
use crate::cli::commands::{Cli, Commands, OutputFormat, QueryArgs};
use crate::client::DataPipelineClient;
use crate::config::ClientConfig;
use crate::error::{Result, ResultExt};
use crate::pagination::PaginationConfig;
use serde_json::json;
use std::time::Instant;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        if self.cli.mock {
            debug!("Using mock backend");
            return self.execute(DataPipelineClient::mock()).await;
        }

        let config = self.load_config()?;
        info!(endpoint = %config.endpoint_url(), "Using HTTP backend");
        let client = DataPipelineClient::from_config(&config)?;
        self.execute(client).await
    }

    /// Resolve client settings: file, then environment, then flags
    pub fn load_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::load(path)?,
            None => {
                let mut config = ClientConfig::default();
                config.apply_env();
                config
            }
        };

        if let Some(region) = &self.cli.region {
            config.region.clone_from(region);
        }
        if let Some(endpoint) = &self.cli.endpoint {
            config.endpoint = Some(endpoint.clone());
        }

        config.validate()?;
        Ok(config)
    }

    async fn execute<B: DataPipelineBackend>(&self, client: DataPipelineClient<B>) -> Result<()> {
        let start = Instant::now();

        match &self.cli.command {
            Commands::Describe {
                pipeline_id,
                object_ids,
                evaluate_expressions,
            } => {
                let mut request = DescribeObjectsRequest::new(pipeline_id, object_ids);
                if *evaluate_expressions {
                    request = request.evaluate_expressions(true);
                }
                let output = client.describe_objects(&request).await?;
                self.print_describe(&output)?;
            }
            Commands::Query { query, marker } => {
                let mut request = build_query_request(query)?;
                if let Some(marker) = marker {
                    request = request.marker(marker);
                }
                let page = client.query_objects(&request).await?;
                self.print_page(&page)?;
            }
            Commands::QueryAll { query, max_pages } => {
                let request = build_query_request(query)?;
                let client = match max_pages {
                    Some(max_pages) => {
                        client.with_pagination(PaginationConfig::with_max_pages(*max_pages))
                    }
                    None => client,
                };
                let ids = client.query_all_objects(&request).await?;
                self.print_ids(&ids)?;
            }
        }

        debug!(elapsed = ?start.elapsed(), "Command finished");
        Ok(())
    }

    fn print_describe(&self, output: &DescribeObjectsOutput) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(output)?),
            OutputFormat::Pretty => {
                for object in &output.pipeline_objects {
                    println!("{} ({})", object.id, object.name);
                    for field in &object.fields {
                        match (&field.string_value, &field.ref_value) {
                            (Some(value), _) => println!("  {} = {}", field.key, value),
                            (None, Some(reference)) => {
                                println!("  {} -> {}", field.key, reference);
                            }
                            (None, None) => println!("  {}", field.key),
                        }
                    }
                }
                if let Some(marker) = output.marker.as_deref().filter(|_| output.has_more_results) {
                    println!("More results at marker {marker}");
                }
            }
        }
        Ok(())
    }

    fn print_page(&self, page: &QueryObjectsPage) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(page)?),
            OutputFormat::Pretty => {
                for id in &page.ids {
                    println!("{id}");
                }
                if let Some(marker) = page.marker.as_deref().filter(|_| page.has_more_results) {
                    println!("More results at marker {marker}");
                }
            }
        }
        Ok(())
    }

    fn print_ids(&self, ids: &[String]) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => {
                let value = json!({ "ids": ids, "count": ids.len() });
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
            OutputFormat::Pretty => {
                for id in ids {
                    println!("{id}");
                }
                println!("{} objects", ids.len());
            }
        }
        Ok(())
    }
}

/// Build a first-page request from command-line arguments
pub fn build_query_request(args: &QueryArgs) -> Result<QueryObjectsRequest> {
    let mut request = QueryObjectsRequest::new(&args.pipeline_id, args.sphere);
    if let Some(limit) = args.limit {
        request = request.limit(limit);
    }
    for raw in &args.selectors {
        let selector: Selector =
            serde_json::from_str(raw).with_context(|| format!("Invalid selector '{raw}'"))?;
        request = request.selector(selector);
    }
    Ok(request)
}
