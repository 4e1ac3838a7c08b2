//! This example shows:
//! - Building a repository from `RAINDROPIO_API_TOKEN`
//! - Counting the pages of a collection
//! - Printing the raindrops of one random page
//! - Removing duplicate links from a full listing
//!
//! Usage: `cargo run --example collection -- <collection id>`

use std::collections::HashSet;

use raindropio::{ByLink, Config, RaindropIo};
use simple_logger::SimpleLogger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // setting up the logger
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    let collection: i64 = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("missing collection id"))?
        .parse()?;

    let repo = RaindropIo::new(Config::from_env()?);

    let pages = repo.total_pages(collection).await?;
    println!("collection {collection} has {pages} pages");

    for raindrop in repo.bulk_get_random(collection).await? {
        println!(
            "{}\t{}",
            raindrop.title().unwrap_or("<untitled>"),
            raindrop.link().unwrap_or_default()
        );
    }

    let all = repo.bulk_get_all(collection).await?;
    let unique: HashSet<_> = all.iter().map(ByLink).collect();
    println!("{} raindrops, {} unique links", all.len(), unique.len());

    Ok(())
}
