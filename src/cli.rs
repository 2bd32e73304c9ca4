//! CLI implementation for findings-mcp

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};

use findings_mcp::api::{Impact, ReportedWindow, SortDirection, SortField};
use findings_mcp::config::{ApiConfig, Config};
use findings_mcp::filter::SearchParameters;
use findings_mcp::mcp::{validate_keywords, validate_search_params};
use findings_mcp::{filter, format, ApiError, FindingsClient};

// Exit codes
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    NoResults = 2,
    MissingApiKey = 3,
}

#[derive(Parser)]
#[command(name = "findings-mcp")]
#[command(about = "Search audit findings, or serve them to AI assistants over MCP")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server
    Serve {
        /// Transport type
        #[arg(long, value_enum, default_value_t = Transport::Stdio)]
        transport: Transport,
        /// Bind address for HTTP transport
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port for HTTP transport
        #[arg(long, default_value = "3000")]
        port: u16,
        /// Bearer token required by the HTTP transport
        #[arg(long, env = "FINDINGS_MCP_HTTP_TOKEN", hide_env_values = true)]
        http_token: Option<String>,
    },
    /// Search findings and print a summary
    Search(SearchCmd),
    /// Print the full report for one finding
    Get {
        /// Slug or id of the finding
        slug: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Transport {
    Stdio,
    Http,
}

#[derive(Args)]
struct SearchCmd {
    /// Search keywords
    #[arg(trailing_var_arg = true)]
    keywords: Vec<String>,
    /// Severity (repeatable): HIGH, MEDIUM, LOW, GAS
    #[arg(long)]
    impact: Vec<Impact>,
    /// Audit firm (repeatable)
    #[arg(long = "firm")]
    firms: Vec<String>,
    /// Tag (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,
    /// Protocol name (partial match)
    #[arg(long)]
    protocol: Option<String>,
    /// Protocol category (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,
    /// Language (repeatable)
    #[arg(long = "language")]
    languages: Vec<String>,
    /// Finder handle (partial match)
    #[arg(long)]
    user: Option<String>,
    /// Minimum number of finders
    #[arg(long)]
    min_finders: Option<u32>,
    /// Maximum number of finders
    #[arg(long)]
    max_finders: Option<u32>,
    /// Reported within: 30, 60, 90, alltime
    #[arg(long)]
    reported: Option<ReportedWindow>,
    /// Minimum quality score 0-5
    #[arg(long)]
    quality: Option<f64>,
    /// Minimum rarity score 0-5
    #[arg(long)]
    rarity: Option<f64>,
    /// Sort by: recency, quality, rarity
    #[arg(long)]
    sort: Option<SortField>,
    /// Sort ascending instead of descending
    #[arg(long)]
    asc: bool,
    /// Page number
    #[arg(long)]
    page: Option<u32>,
    /// Results per page (1-100)
    #[arg(long)]
    page_size: Option<u32>,
    /// Print the raw API response as JSON
    #[arg(long)]
    json: bool,
}

impl SearchCmd {
    fn into_params(self, config: &Config) -> SearchParameters {
        let non_empty = |v: Vec<String>| (!v.is_empty()).then_some(v);
        let keywords = self.keywords.join(" ");
        SearchParameters {
            keywords: (!keywords.trim().is_empty()).then_some(keywords),
            impact: (!self.impact.is_empty()).then_some(self.impact),
            firms: non_empty(self.firms),
            tags: non_empty(self.tags),
            protocol: self.protocol,
            protocol_category: non_empty(self.categories),
            languages: non_empty(self.languages),
            user: self.user,
            min_finders: self.min_finders.map(|n| n.to_string()),
            max_finders: self.max_finders.map(|n| n.to_string()),
            reported_days: self.reported,
            quality_score: self.quality,
            rarity_score: self.rarity,
            sort_field: self.sort,
            // --asc only matters alongside a sort field; otherwise leave direction unset
            sort_direction: match (self.sort.is_some(), self.asc) {
                (_, true) => Some(SortDirection::Asc),
                (true, false) => Some(SortDirection::Desc),
                (false, false) => None,
            },
            page: self.page,
            page_size: self.page_size.or(config.default_page_size),
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = Config::load(&cwd);
    let api_config = ApiConfig::from_env(&config);

    let outcome = match cli.command {
        Commands::Serve {
            transport,
            bind,
            port,
            http_token,
        } => cmd_serve(api_config, transport, &bind, port, http_token),
        Commands::Search(cmd) => cmd_search(api_config, cmd, &config),
        Commands::Get { slug } => cmd_get(api_config, &slug),
    };

    match outcome {
        Ok(ExitCode::Success) => Ok(()),
        Ok(code) => std::process::exit(code as i32),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            let code = match e.downcast_ref::<ApiError>() {
                Some(ApiError::Authentication { .. }) => ExitCode::MissingApiKey,
                _ => ExitCode::GeneralError,
            };
            std::process::exit(code as i32)
        }
    }
}

fn cmd_serve(
    config: ApiConfig,
    transport: Transport,
    bind: &str,
    port: u16,
    http_token: Option<String>,
) -> Result<ExitCode> {
    let http_token = http_token.filter(|t| !t.is_empty());
    match transport {
        Transport::Stdio => findings_mcp::serve_stdio(config)?,
        Transport::Http => findings_mcp::serve_http(config, bind, port, http_token)?,
    }
    Ok(ExitCode::Success)
}

fn cmd_search(api_config: ApiConfig, cmd: SearchCmd, config: &Config) -> Result<ExitCode> {
    let json = cmd.json;
    let params = cmd.into_params(config);
    validate_search_params(&params)?;

    let client = FindingsClient::new(api_config)?;
    let response = client.search(&params.to_request())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", format::format_search_response(&response));
    }

    if response.findings.is_empty() {
        Ok(ExitCode::NoResults)
    } else {
        Ok(ExitCode::Success)
    }
}

fn cmd_get(api_config: ApiConfig, slug: &str) -> Result<ExitCode> {
    validate_keywords(slug)?;
    let client = FindingsClient::new(api_config)?;
    let response = client.search(&filter::lookup_request(slug))?;
    println!("{}", format::format_finding_detail(&response, slug));

    if response.findings.is_empty() {
        Ok(ExitCode::NoResults)
    } else {
        Ok(ExitCode::Success)
    }
}
