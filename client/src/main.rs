//! Rice Mill Management Platform - command line client
//!
//! Thin operator tool over the REST client: stock snapshot, outstanding
//! dues, and offline sack/weight conversion.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rice_mill_client::{Config, MillApiClient, Session};
use shared::{calculate_total_kg, kg_to_bosta, BostaSize, Pagination, ProductCategory, StockSummary};

#[derive(Parser)]
#[command(name = "rice-mill", about = "Rice mill administration client")]
struct Cli {
    /// Bearer token; overrides RMS__API__TOKEN
    #[arg(long, global = true)]
    token: Option<String>,

    /// Print raw JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the signed-in user's profile
    Profile,
    /// Show current stock by category and type
    Stock {
        /// Include types with zero stock
        #[arg(long)]
        all: bool,
    },
    /// List farmers and customers with an outstanding due
    Dues,
    /// Convert loose kg plus sacks into total kg (no network)
    Convert {
        #[arg(long, default_value = "0")]
        kg: Decimal,
        #[arg(long, default_value = "0")]
        bosta: Decimal,
        /// Sack size in kg (25 or 50); defaults to the configured size
        #[arg(long)]
        size: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rice_mill=info,rice_mill_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load().context("failed to load configuration")?;
    tracing::debug!("Environment: {}", config.environment);

    match cli.command {
        Commands::Convert { kg, bosta, size } => {
            let size = match size {
                Some(size_kg) => BostaSize::try_from(size_kg)?,
                None => config.units.bosta_size()?,
            };
            let total = calculate_total_kg(kg, bosta, size);
            println!("{} kg + {} x {} = {} kg", kg, bosta, size, total);
        }
        Commands::Profile => {
            let client = connect(&cli, &config)?;
            let profile = client.fetch_profile().await.map_err(report("load profile"))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                println!("{} <{}> ({})", profile.name, profile.email, profile.role);
            }
        }
        Commands::Stock { all } => {
            let client = connect(&cli, &config)?;
            let stock = client.fetch_stock().await.map_err(report("load stock"))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stock)?);
            } else {
                print_stock(&stock, all, config.units.bosta_size()?);
            }
        }
        Commands::Dues => {
            let client = connect(&cli, &config)?;
            let pagination = Pagination {
                page: 1,
                per_page: 100,
            };
            let farmers = client
                .list_farmers(&pagination)
                .await
                .map_err(report("load farmers"))?;
            let customers = client
                .list_customers(&pagination)
                .await
                .map_err(report("load customers"))?;

            println!("Payable to farmers");
            for farmer in farmers.iter().filter(|f| f.due_amount > Decimal::ZERO) {
                println!("  {:<30} {:>12} Tk", farmer.name, farmer.due_amount.round_dp(2));
            }
            println!("Receivable from customers");
            for customer in customers.iter().filter(|c| c.due_amount > Decimal::ZERO) {
                println!("  {:<30} {:>12} Tk", customer.name, customer.due_amount.round_dp(2));
            }
        }
    }

    Ok(())
}

/// Build an authenticated client; the flag wins over configuration
fn connect(cli: &Cli, config: &Config) -> Result<MillApiClient> {
    let token = cli
        .token
        .clone()
        .or_else(|| config.api.token.clone())
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| anyhow!("no API token; pass --token or set RMS__API__TOKEN"))?;
    Ok(MillApiClient::new(&config.api, Arc::new(Session::new(token)))?)
}

fn report(action: &'static str) -> impl Fn(rice_mill_client::ClientError) -> anyhow::Error {
    move |e| {
        tracing::error!("Error: {:?}", e);
        anyhow!(e.user_message(action).message_en)
    }
}

fn print_stock(stock: &StockSummary, include_empty: bool, display_size: BostaSize) {
    for category in ProductCategory::ALL {
        let total = stock.category_total(category);
        println!(
            "{}: {} kg ({} x {})",
            category,
            total.total_kg.round_dp(2),
            kg_to_bosta(total.total_kg, display_size).round_dp(1),
            display_size
        );

        let rows: Vec<_> = if include_empty {
            stock
                .category(category)
                .iter()
                .map(|(name, totals)| (name.as_str(), totals))
                .collect()
        } else {
            stock.active_rows(category)
        };

        if rows.is_empty() {
            println!("  (no stock)");
        }
        for (name, totals) in rows {
            println!(
                "  {:<24} {:>12} kg {:>8} bosta",
                name,
                totals.total_kg.round_dp(2),
                totals.total_bosta.round_dp(1)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use rice_mill_client::config::{ApiConfig, UnitsConfig};

    fn config(token: Option<&str>) -> Config {
        Config {
            environment: "test".to_string(),
            api: ApiConfig {
                token: token.map(str::to_string),
                ..ApiConfig::default()
            },
            units: UnitsConfig {
                default_bosta_size: 50,
            },
        }
    }

    #[test]
    fn test_help_parses_without_configuration() {
        let error = Cli::try_parse_from(["rice-mill", "--help"]).err().unwrap();
        assert_eq!(error.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_convert_parses_decimal_arguments() {
        let cli = Cli::try_parse_from([
            "rice-mill", "convert", "--kg", "10", "--bosta", "2", "--size", "25",
        ])
        .unwrap();
        match cli.command {
            Commands::Convert { kg, bosta, size } => {
                assert_eq!(kg, Decimal::from(10));
                assert_eq!(bosta, Decimal::from(2));
                assert_eq!(size, Some(25));
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_connect_requires_token() {
        let cli = Cli::try_parse_from(["rice-mill", "stock"]).unwrap();
        assert!(connect(&cli, &config(None)).is_err());
        assert!(connect(&cli, &config(Some("  "))).is_err());
        assert!(connect(&cli, &config(Some("abc"))).is_ok());

        let cli = Cli::try_parse_from(["rice-mill", "--token", "flag-token", "dues"]).unwrap();
        let client = connect(&cli, &config(Some("config-token"))).unwrap();
        assert_eq!(client.session().token(), "flag-token");
    }
}
