use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use legal_query_service::client::{HttpTransport, QueryController, SearchTransport};
use legal_query_service::config::Config;

#[derive(Parser, Debug)]
#[command(name = "legal-query", version, about = "Ask the legal information service")]
struct Cli {
    #[arg(long, help = "Search endpoint (defaults to SEARCH_ENDPOINT)")]
    endpoint: Option<String>,
    #[arg(long, help = "Print the page region markup instead of text")]
    html: bool,
    /// Question to ask; reads one question per line from stdin when omitted.
    query: Vec<String>,
}

async fn ask<T: SearchTransport>(controller: &mut QueryController<T>, raw: &str, html: bool) {
    controller.submit(raw).await;
    let view = controller.view();
    if html {
        println!("{}", view.to_html());
    } else {
        println!("{}\n", view.to_text());
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(endpoint) = cli.endpoint {
        config.client.endpoint = endpoint;
    }

    let transport = HttpTransport::new(&config.client)?;
    let mut controller = QueryController::new(transport);
    info!(endpoint = controller.transport().endpoint(), "ready");

    if !cli.query.is_empty() {
        ask(&mut controller, &cli.query.join(" "), cli.html).await;
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => ask(&mut controller, &line, cli.html).await,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read question: {}", e);
                return Err(e.into());
            }
        }
    }

    Ok(())
}
