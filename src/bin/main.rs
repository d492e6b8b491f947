use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pmsconnect_rs::pms::{Endpoint, PmsConnect};
use pmsconnect_rs::transport::RequestMethod;
use pmsconnect_rs::xml::parse_document;
use pmsconnect_rs::AppError;

#[derive(Parser, Debug)]
#[command(name = "pmsconnect")]
#[command(about = "Normalized views of a Plex Media Server", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "pmsconnect.yaml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Current playback sessions
    Activity,
    /// Metadata for one item
    Metadata { rating_key: String },
    /// Recently added items, newest first
    Recent {
        #[arg(short = 'n', long, default_value_t = 10)]
        count: u32,
    },
    /// Episodes of a season
    Episodes { rating_key: String },
    /// Servers known to the media server
    Servers,
    /// Identity of the media server
    Identity,
    /// Raw document from an endpoint
    Raw {
        endpoint: String,
        arg: Option<String>,
        /// HTTP method: GET, POST, PUT or DELETE
        #[arg(short = 'X', long, default_value = "GET")]
        method: RequestMethod,
        /// Print the parsed element tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve the normalized views over HTTP
    Serve,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pmsconnect_rs=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns false when the media server gave no usable answer.
async fn run(args: Args) -> Result<bool, AppError> {
    let (config, pms) = pmsconnect_rs::load(&args.config)?;

    let printed = match args.command {
        Command::Activity => print_json(pms.get_current_activity().await),
        Command::Metadata { rating_key } => print_json(pms.get_metadata_details(&rating_key).await),
        Command::Recent { count } => print_json(pms.get_recently_added_details(count).await),
        Command::Episodes { rating_key } => print_json(pms.get_season_children(&rating_key).await),
        Command::Servers => print_json(pms.get_servers_info().await),
        Command::Identity => print_json(pms.get_server_identity().await),
        Command::Raw {
            endpoint,
            arg,
            method,
            json,
        } => {
            let endpoint = Endpoint::from_name(&endpoint, arg.as_deref())?;
            print_raw(&pms, &endpoint, method, json).await?
        }
        Command::Serve => {
            pmsconnect_rs::serve(config, pms).await?;
            true
        }
    };

    Ok(printed)
}

fn print_json<T: Serialize>(value: Option<T>) -> bool {
    match serde_json::to_string_pretty(&value) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            return false;
        }
    }
    value.is_some()
}

async fn print_raw(
    pms: &PmsConnect,
    endpoint: &Endpoint,
    method: RequestMethod,
    json: bool,
) -> Result<bool, AppError> {
    let body = pms.request(endpoint, method).await?;

    if !json {
        println!("{}", String::from_utf8_lossy(&body));
        return Ok(true);
    }

    match parse_document(&body) {
        Ok(document) => Ok(print_json(Some(document))),
        Err(e) => {
            eprintln!("Error parsing XML from {}: {}", endpoint, e);
            Ok(false)
        }
    }
}
