//! Payments CLI
//!
//! Command-line interface for the Payments API.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use payments_client::{ListPaymentsParams, PaymentsClient};
use payments_types::PaymentId;

#[derive(Parser)]
#[command(name = "payments")]
#[command(author, version, about = "Payments API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Payments API
    #[arg(
        long,
        env = "PAYMENTS_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a payment event
    Receive {
        /// Caller-chosen identifier, unique across all payments
        #[arg(long)]
        client_id: String,
        /// Amount, e.g. 120.50
        #[arg(long, allow_hyphen_values = true)]
        amount: Decimal,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Get payment details
    Get {
        /// Payment ID (UUID)
        id: PaymentId,
    },
    /// Cancel a payment
    Cancel {
        /// Payment ID (UUID)
        id: PaymentId,
    },
    /// List payments, newest first
    List {
        /// Start of the range (RFC 3339 or YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        from: Option<DateTime<Utc>>,
        /// End of the range (RFC 3339 or YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        to: Option<DateTime<Utc>>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Check API health
    Health,
}

/// A bare date is taken as midnight UTC.
fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date: {} (use RFC 3339 or YYYY-MM-DD)", s))?;
    Ok(date.and_time(chrono::NaiveTime::MIN).and_utc())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = PaymentsClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Receive {
            client_id,
            amount,
            description,
        } => {
            let payment = client
                .receive_payment(&client_id, amount, &description)
                .await?;
            println!("{}", serde_json::to_string_pretty(&payment)?);
        }

        Commands::Get { id } => {
            let payment = client.get_payment(id).await?;
            println!("{}", serde_json::to_string_pretty(&payment)?);
        }

        Commands::Cancel { id } => {
            let payment = client.cancel_payment(id).await?;
            println!("{}", serde_json::to_string_pretty(&payment)?);
        }

        Commands::List {
            from,
            to,
            page,
            page_size,
        } => {
            let params = ListPaymentsParams {
                start_date: from,
                end_date: to,
                page_number: page,
                page_size,
            };
            let page = client.list_payments(&params).await?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_receive() {
        let cli = Cli::try_parse_from([
            "payments",
            "receive",
            "--client-id",
            "order-7",
            "--amount",
            "19.99",
        ])
        .unwrap();

        match cli.command {
            Commands::Receive {
                client_id, amount, ..
            } => {
                assert_eq!(client_id, "order-7");
                assert_eq!(amount, Decimal::new(1999, 2));
            }
            _ => panic!("expected receive"),
        }
    }

    #[test]
    fn test_parse_date_accepts_both_forms() {
        let expected = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_date("2025-04-01").unwrap(), expected);
        assert_eq!(parse_date("2025-04-01T00:00:00Z").unwrap(), expected);
        assert!(parse_date("April 1st").is_err());
    }

    #[test]
    fn test_parse_list_bare_dates_are_midnight() {
        let cli = Cli::try_parse_from([
            "payments",
            "list",
            "--from",
            "2025-04-01",
            "--to",
            "2025-04-02",
        ])
        .unwrap();

        match cli.command {
            Commands::List { from, to, .. } => {
                assert_eq!(from, Some(Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap()));
                assert_eq!(to, Some(Utc.with_ymd_and_hms(2025, 4, 2, 0, 0, 0).unwrap()));
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_invalid_payment_id_rejected() {
        assert!(Cli::try_parse_from(["payments", "get", "nope"]).is_err());
    }
}
