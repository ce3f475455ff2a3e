use clap::Parser;
use health_aggregator::AggregateHealth;
use std::process::ExitCode;

/// Fetch the aggregate health report and exit non-zero when it is down.
#[derive(Parser)]
#[command(name = "health-cli")]
#[command(about = "Query a health-aggregator endpoint", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[arg(short, long, default_value = "/health")]
    path: String,

    /// Print only the aggregate status line.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match fetch(&cli).await {
        Ok(health) => {
            if cli.quiet {
                match &health.cause {
                    Some(cause) => println!("{}: {}", health.status, cause),
                    None => println!("{}", health.status),
                }
            } else {
                match serde_json::to_string_pretty(&health) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            if health.is_up() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

async fn fetch(cli: &Cli) -> Result<AggregateHealth, reqwest::Error> {
    let url = format!("{}{}", cli.url.trim_end_matches('/'), cli.path);
    reqwest::Client::new()
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}
