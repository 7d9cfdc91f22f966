mod config;
mod db;
mod error;
mod logging;
mod models;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::models::{ClientLookup, ClientUpdate, PhoneUpdate};

/// Runs the client/phone demonstration against PostgreSQL
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Verbose logging
    #[arg(long)]
    debug: bool,

    /// Print both tables before cleaning up
    #[arg(long)]
    dump: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.debug)?;

    // Load configuration
    let config = config::init()?;
    info!("initializing client manager");

    let mut db = db::init(&config).await?;

    // Start from an empty schema
    db.drop_schema().await?;
    db.initialize_schema().await?;

    let client_id = db
        .create_client("Jane", "Doe", "jane@mail.com", &[79545437777, 79001233322])
        .await?;
    let phones = db.get_phones_by_client(client_id).await?;
    info!(client_id, phones = phones.len(), "created demo client");

    let phone_id = db.add_phone(client_id, 79535433331).await?;
    info!(phone_id, "added phone");

    // The store owns the constraints; these two must be refused
    report_rejection(db.add_phone(client_id, 79545437777).await)?;
    report_rejection(db.add_phone(client_id + 1000, 79000000000).await)?;

    let update = ClientUpdate {
        first_name: Some("Janet".to_string()),
        last_name: Some("Doe".to_string()),
        email: Some("jane@mail.com".to_string()),
        phones: vec![
            PhoneUpdate { number: 79001233321, phone_id: phones[0].id },
            PhoneUpdate { number: 79535433323, phone_id },
        ],
    };
    db.update_client(client_id, &update).await?;

    let by_phone = db.find_client(&ClientLookup::Phone(79001233322)).await?;
    println!("by phone: {by_phone:?}");

    let by_identity = db
        .find_client(&ClientLookup::Identity {
            first_name: "Janet".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@mail.com".to_string(),
        })
        .await?;
    println!("by identity: {by_identity:?}");

    if args.dump {
        db.dump_all().await?;
    }

    db.delete_phone(79001233322).await?;
    db.delete_client(client_id).await?;

    db.close().await?;
    info!("done");

    Ok(())
}

fn report_rejection(result: error::Result<i32>) -> Result<()> {
    match result {
        Ok(phone_id) => anyhow::bail!("phone {phone_id} was accepted despite a constraint violation"),
        Err(err) if err.is_unique_violation() || err.is_foreign_key_violation() => {
            info!(constraint = err.constraint().unwrap_or("unknown"), "insert rejected: {err}");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
