//! arXiv search - Entry Point
//!
//! Runs the JSON server or one-off searches from the command line.

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use arxiv_search::{
    ArxivClient,
    config::Config,
    digest::DigestRequest,
    formatters::{compact_paper, compact_results, format_papers_markdown, format_results_markdown},
    server::SearchServer,
};

#[derive(Parser, Debug)]
#[command(name = "arxiv-search")]
#[command(about = "Search the arXiv API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the JSON search API
    Serve {
        /// HTTP server port
        #[arg(long, default_value = "8000", env = "PORT")]
        port: u16,
    },
    /// Run a free-text search
    Search {
        /// arXiv query, e.g. `ti:electron AND au:bohr`
        query: String,

        /// 1-based page number
        #[arg(long, default_value = "1")]
        page: u32,

        /// Print compact JSON instead of Markdown
        #[arg(long)]
        json: bool,
    },
    /// Look up papers by arXiv id
    Ids {
        /// arXiv ids, e.g. `2301.00001 hep-th/9901001`
        #[arg(required = true)]
        ids: Vec<String>,

        /// Print compact JSON instead of Markdown
        #[arg(long)]
        json: bool,
    },
    /// Show the papers a digest would contain today
    Digest {
        /// Subscriber keywords (defaults to cat:cs.AI)
        #[arg(long)]
        keywords: Option<String>,
    },
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so search output on stdout stays clean.
    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting arXiv search");

    let config = Config::from_env()?;
    let per_page = config.results_per_page;
    let client = ArxivClient::new(config)?;

    match cli.command {
        Command::Serve { port } => {
            tracing::info!(port, "Running in HTTP mode");
            SearchServer::new(client).run_http(port).await?;
        }
        Command::Search { query, page, json } => {
            let page = page.max(1);
            let result = client.search_page(&query, page).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&compact_results(&result))?);
            } else {
                println!("{}", format_results_markdown(&result, page, per_page));
            }
        }
        Command::Ids { ids, json } => {
            let result = client.get_by_ids(&ids).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&compact_results(&result))?);
            } else {
                println!("{}", format_papers_markdown(&result.papers));
            }
        }
        Command::Digest { keywords } => {
            let request = DigestRequest { keywords, ..DigestRequest::default() };
            let papers = client.recent_papers(&request, chrono::Utc::now()).await?;
            if papers.is_empty() {
                println!("No recent papers for {:?}.", request.query());
            } else {
                let compact: Vec<_> = papers.iter().map(compact_paper).collect();
                println!("{}", serde_json::to_string_pretty(&compact)?);
            }
        }
    }

    Ok(())
}
