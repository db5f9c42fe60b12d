//! # Seed Data Generator
//!
//! Populates the database with a test movie catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p reel-db --bin seed
//!
//! # Specify database path
//! cargo run -p reel-db --bin seed -- --db ./data/reel.db
//! ```
//!
//! ## Generated Movies
//! A fixed catalog of well-known titles, each with:
//! - Rental price: $1.99 - $5.99
//! - Sale price: $7.99 - $24.99
//! - Stock: 0 - 12 (a few are deliberately out of stock)
//! - A couple flagged unavailable, to exercise the customer-facing filter

use chrono::Utc;
use reel_db::{generate_movie_id, Database, DbConfig, MovieRow};
use std::env;

/// (title, rental cents, sale cents, stock, available)
const MOVIES: &[(&str, i64, i64, i64, bool)] = &[
    ("The Shawshank Redemption", 399, 1499, 8, true),
    ("The Godfather", 449, 1999, 5, true),
    ("Pulp Fiction", 349, 1299, 10, true),
    ("The Dark Knight", 499, 1799, 12, true),
    ("Twelve Angry Men", 199, 799, 3, true),
    ("Schindler's List", 399, 1599, 4, true),
    ("Inception", 449, 1699, 9, true),
    ("Fight Club", 349, 1199, 6, true),
    ("Forrest Gump", 299, 999, 7, true),
    ("The Matrix", 399, 1499, 11, true),
    ("Goodfellas", 349, 1299, 2, true),
    ("Seven", 299, 1099, 0, true),
    ("Interstellar", 499, 1899, 8, true),
    ("Parasite", 449, 1599, 5, true),
    ("Whiplash", 299, 1099, 0, true),
    ("Alien", 349, 1299, 4, true),
    ("Heat", 299, 1199, 6, true),
    ("Casablanca", 199, 899, 3, true),
    ("Blade Runner Final Cut", 599, 2499, 2, false),
    ("The Room", 199, 799, 1, false),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./reel_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Reel Rental Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./reel_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🎬 Reel Rental Seed Data Generator");
    println!("==================================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    if !db.health_check().await {
        return Err("database is not responding to queries".into());
    }

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing movies
    let existing = db.movies().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} movies", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        db.close().await;
        return Ok(());
    }

    println!();
    println!("Seeding movies...");

    let now = Utc::now();
    let mut seeded = 0;

    for (title, rental_cents, sale_cents, stock, available) in MOVIES {
        let movie = MovieRow {
            id: generate_movie_id(),
            title: title.to_string(),
            stock: *stock,
            rental_price_cents: *rental_cents,
            sale_price_cents: *sale_cents,
            availability: *available,
            images: "[]".to_string(),
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = db.movies().insert(&movie).await {
            eprintln!("Failed to insert {}: {}", title, e);
            continue;
        }

        seeded += 1;
    }

    println!("✓ Seeded {} movies", seeded);
    println!();
    println!("✓ Seed complete!");

    db.close().await;

    Ok(())
}
