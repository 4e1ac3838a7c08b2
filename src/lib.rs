#![deny(clippy::all, clippy::pedantic)]
#![deny(missing_docs)]
#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]
//! # raindropio
//!
//! raindropio is a wrapper library around the raindrop.io bookmark API.
//!
//! This library can:
//! - get, create, update and delete a single [`Raindrop`]
//! - read whole collections page by page, or one random page
//! - create and update many raindrops at once
//!
//! While respecting:
//! - at most 100 raindrops per bulk request (configurable).
//! - a 1 second pause between consecutive page or chunk requests.
//! - a 5 second pause between clearing and setting tags.
//!
//! Requests are sent one after another; nothing is retried.
//!
//! ## Example: Tagging every raindrop of a collection.
//!
//! ```rust,no_run
//! # type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
//! use raindropio::{Config, RaindropIo};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let repo = RaindropIo::new(Config::from_env()?);
//!     let collection = 46274319;
//!
//!     let raindrops = repo.bulk_get_all(collection).await?;
//!     println!("{} raindrops", raindrops.len());
//!
//!     let tags = vec!["read-later".to_string()];
//!     let modified = repo.bulk_update_tags(collection, &tags, &raindrops, false).await?;
//!     println!("tagged {modified}");
//!     Ok(())
//! }
//! ```
//!
//! [`Raindrop`]: crate::models::raindrop::Raindrop

/// Order-preserving chunking of bulk inputs.
pub mod chunk;

/// Client module contains [`Client`] and the [`Transport`] seam.
///
/// [`Transport`]: crate::client::Transport
pub mod client;

/// Contains [`Config`] and its environment loading.
pub mod config;

/// Contains [`Error`]s that can be thrown by the library.
///
/// [`Error`]: crate::error::Error
pub mod error;

/// Entities, request bodies and endpoint URLs.
pub mod models;

/// Pauses between requests and random page choice.
pub mod policy;

/// Contains [`RaindropIo`], every API operation.
pub mod repository;

pub(crate) mod result;

pub use client::Client;
pub use config::Config;
pub use error::Error;
pub use models::raindrop::{to_raindrop, ByLink, Raindrop, RaindropId};
pub use models::url::Endpoints;
pub use repository::RaindropIo;
pub use result::Result;
