//! Client example demonstrating the full payment lifecycle against a running server.
//!
//! Run with: cargo run -p payments-app --example client_example --no-default-features --features sqlite

use payments_client::{ListPaymentsParams, PaymentsClient};
use payments_hex::{PaymentService, inbound::HttpServer};
use payments_repo::build_repo;
use rust_decimal::Decimal;
use tempfile::tempdir;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Bind an available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("payments.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    println!("🚀 Starting server on port {port}...");
    println!("   Database: {db_url}");

    // Build repository (handles connection and migration)
    let repo = build_repo(&db_url).await?;

    // Start server in background
    let server = HttpServer::new(PaymentService::new(repo));
    tokio::spawn(async move {
        if let Err(e) = server.serve(listener).await {
            eprintln!("server stopped: {e}");
        }
    });

    let client = PaymentsClient::new(format!("http://127.0.0.1:{port}"));

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: Full payment lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    let first = client
        .receive_payment("order-1001", Decimal::new(12050, 2), "Monthly subscription")
        .await?;
    println!("✅ Received payment {} ({}, {})", first.id, first.amount, first.status);

    let second = client
        .receive_payment("order-1002", Decimal::new(999, 2), "Add-on")
        .await?;
    println!("✅ Received payment {} ({}, {})", second.id, second.amount, second.status);

    // Replaying a client identifier is rejected
    let replay = client
        .receive_payment("order-1001", Decimal::new(12050, 2), "Monthly subscription")
        .await;
    match replay {
        Err(e) if e.status() == Some(409) => println!("✅ Duplicate rejected: {e}"),
        other => anyhow::bail!("expected a conflict, got {:?}", other.map(|p| p.id)),
    }

    let cancelled = client.cancel_payment(second.id).await?;
    println!("✅ Cancelled payment {} -> {}", cancelled.id, cancelled.status);

    let fetched = client.get_payment(second.id).await?;
    println!("   Fetched again: status {}", fetched.status);

    let page = client.list_payments(&ListPaymentsParams::default()).await?;
    println!(
        "\n📋 Payments in the last 30 days ({} total, page {}/{}):",
        page.total_count, page.page_number, page.total_pages
    );
    for p in page.items {
        println!("   - {} {} {} [{}]", p.created_at, p.client_identifier, p.amount, p.status);
    }

    println!("\n🎉 Example completed successfully!");

    Ok(())
}
