use clap::{Parser, Subcommand};
use reqwest::Client;
use std::error::Error;

#[derive(Parser)]
#[command(name = "quotable-cli")]
#[command(about = "Quotable Search CLI", long_about = None)]
struct Cli {
    #[arg(short, long, env = "QUOTABLE_ENDPOINT", default_value = "http://localhost:4000")]
    endpoint: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get a random quote
    Random {
        #[arg(long)]
        min_length: Option<u32>,

        #[arg(long)]
        max_length: Option<u32>,

        /// Tags, `|` or `,` separated
        #[arg(short, long)]
        tags: Option<String>,

        /// Author names, `|` separated
        #[arg(short, long)]
        author: Option<String>,

        #[arg(long)]
        author_id: Option<String>,

        #[arg(short = 's', long)]
        author_slug: Option<String>,
    },

    /// Search quotes
    SearchQuotes {
        #[arg(value_name = "QUERY")]
        query: String,

        /// Fields to search: content, author, tags
        #[arg(short, long)]
        path: Option<String>,

        #[arg(long)]
        slop: Option<u32>,

        #[arg(short, long)]
        limit: Option<u32>,

        #[arg(short = 'k', long)]
        skip: Option<u32>,
    },

    /// Search authors by name
    SearchAuthors {
        #[arg(value_name = "QUERY")]
        query: String,

        /// Treat every word as complete
        #[arg(long)]
        no_autocomplete: bool,

        #[arg(short, long)]
        limit: Option<u32>,

        #[arg(short = 'k', long)]
        skip: Option<u32>,
    },

    /// Check server health
    Health,
}

/// Query pairs for the options that were given
fn query_pairs(options: &[(&'static str, Option<String>)]) -> Vec<(&'static str, String)> {
    options
        .iter()
        .filter_map(|(name, value)| value.clone().map(|v| (*name, v)))
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let client = Client::new();

    let (path, query) = match cli.command {
        Commands::Random {
            min_length,
            max_length,
            tags,
            author,
            author_id,
            author_slug,
        } => (
            "/random",
            query_pairs(&[
                ("minLength", min_length.map(|v| v.to_string())),
                ("maxLength", max_length.map(|v| v.to_string())),
                ("tags", tags),
                ("author", author),
                ("authorId", author_id),
                ("authorSlug", author_slug),
            ]),
        ),

        Commands::SearchQuotes {
            query,
            path,
            slop,
            limit,
            skip,
        } => (
            "/search/quotes",
            query_pairs(&[
                ("query", Some(query)),
                ("path", path),
                ("slop", slop.map(|v| v.to_string())),
                ("limit", limit.map(|v| v.to_string())),
                ("skip", skip.map(|v| v.to_string())),
            ]),
        ),

        Commands::SearchAuthors {
            query,
            no_autocomplete,
            limit,
            skip,
        } => (
            "/search/authors",
            query_pairs(&[
                ("query", Some(query)),
                ("autocomplete", Some((!no_autocomplete).to_string())),
                ("limit", limit.map(|v| v.to_string())),
                ("skip", skip.map(|v| v.to_string())),
            ]),
        ),

        Commands::Health => ("/health", Vec::new()),
    };

    let response = client
        .get(format!("{}{}", cli.endpoint, path))
        .query(&query)
        .send()
        .await?;

    let status = response.status();
    let body: serde_json::Value = response.json().await?;
    println!("{}", serde_json::to_string_pretty(&body)?);

    if !status.is_success() {
        std::process::exit(1);
    }

    Ok(())
}
