// Small dev utility: fetch live courier rates for one order/warehouse pair.
//
// Usage:
//   cargo run --bin quote_rates -- <order_id> <warehouse_id> <weight_kg> [length breadth height]
//
// Env:
//   ECOM_ADMIN_API_BASE_URL   backend base URL (or api_base_url in config_kv)
//   ECOM_ADMIN_API_TOKEN      bearer token
//   ECOM_ADMIN_DB_PATH        local config/audit DB

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use ecom_admin_shipping::app::{get_default_db_path, AppState};
use ecom_admin_shipping::client::Session;
use ecom_admin_shipping::domain::{PackageForm, ShippingProvider};
use ecom_admin_shipping::engine::{validate_package, RateAggregator, RateFetchTicket};
use ecom_admin_shipping::logging;

const USAGE: &str = "usage: quote_rates <order_id> <warehouse_id> <weight_kg> [length breadth height]";

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 3 && args.len() != 6 {
        bail!(USAGE);
    }

    let form = PackageForm::new(
        &args[2],
        args.get(3).map(String::as_str).unwrap_or("20"),
        args.get(4).map(String::as_str).unwrap_or("15"),
        args.get(5).map(String::as_str).unwrap_or("10"),
    );
    let package = validate_package(&form).context("invalid package")?;

    let token = std::env::var("ECOM_ADMIN_API_TOKEN").unwrap_or_default();
    let session = Session::new(token, "quote_rates");
    let db_path = get_default_db_path();
    let state = AppState::new(db_path.clone(), session)
        .await
        .with_context(|| format!("failed to initialise with database {}", db_path))?;

    let ticket = RateFetchTicket {
        generation: 0,
        fetch_seq: 0,
        order_id: args[0].clone(),
        warehouse_id: args[1].clone(),
        package,
        providers: ShippingProvider::RATE_PROVIDERS.to_vec(),
    };

    let outcome = RateAggregator::new(Arc::clone(&state.gateway))
        .fetch_all(&ticket)
        .await;

    if outcome.is_empty() {
        println!("no rates available for {} @ {}", ticket.order_id, ticket.warehouse_id);
    }

    println!("shiprocket:");
    for rate in &outcome.courier_rates {
        println!(
            "  #{:<6} {:<28} ₹{:>9.2}  days={}  cod={}",
            rate.courier_id,
            rate.courier_name,
            rate.rate,
            rate.estimated_delivery_days
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            rate.cod_available,
        );
    }

    println!("delhivery:");
    for rate in &outcome.service_rates {
        println!(
            "  {:<8} ₹{:>9.2}  days={}  cod={}",
            rate.tier.as_str(),
            rate.rate,
            rate.estimated_delivery_days
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            rate.cod_available,
        );
    }

    for failure in &outcome.failures {
        eprintln!(
            "failed: {} {} {}",
            failure.provider,
            failure.tier.map(|t| t.to_string()).unwrap_or_default(),
            failure.reason
        );
    }

    Ok(())
}
