//! # Seed Data Utility
//!
//! Populates the database with sample users, categories, and records.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --package seed-data --bin seed_data
//! ```
//!
//! The program will:
//! 1. Read `DATABASE_URL` (`.env` is honored; no `JWT_SECRET` needed)
//! 2. Connect to the database and apply migrations
//! 3. Insert the embedded seed data in one transaction
//! 4. Report what was inserted
//!
//! Running it twice fails on the duplicate emails and leaves the first
//! load untouched.

mod seed;

use lib_core::{create_pool, run_migrations};
use seed::{database_url, load, SeedFile, EMBEDDED_SEED};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("============================================");
    println!("  Seed Data Utility");
    println!("============================================");
    println!();

    dotenvy::dotenv().ok();
    let database_url = database_url();

    println!("Connecting to database {}...", database_url);
    let pool = create_pool(&database_url).await?;
    run_migrations(&pool).await?;
    println!("Connected successfully.");
    println!();

    let seed = SeedFile::parse(EMBEDDED_SEED)?;
    let summary = load(&pool, &seed).await?;

    println!("Inserted {} user(s).", summary.users);
    println!("Inserted {} category(s).", summary.categories);
    println!("Inserted {} record(s).", summary.records);
    println!();
    println!("Seed data load complete.");

    Ok(())
}
