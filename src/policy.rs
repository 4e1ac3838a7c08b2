//! Seams for the client-side rate limiting and the random page choice.
//!
//! The service rate-limits its clients, so paging and bulk
//! loops pause through a [`Pacer`]. Tests swap in [`NoPause`].

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

/// Waits between consecutive requests of one operation.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Blocks the current task for `duration`.
    async fn pause(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sleep;

#[async_trait]
impl Pacer for Sleep {
    async fn pause(&self, duration: Duration) {
        log::debug!("rate-limiting for {duration:?}");
        tokio::time::sleep(duration).await;
    }
}

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPause;

#[async_trait]
impl Pacer for NoPause {
    async fn pause(&self, _duration: Duration) {}
}

/// Chooses which page a random fetch returns.
pub trait PagePicker: Send + Sync {
    /// Returns an index in `0..total_pages`. Never called with zero.
    fn pick(&self, total_pages: u32) -> u32;
}

/// Uniform choice from the thread-local generator. Not reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPage;

impl PagePicker for RandomPage {
    fn pick(&self, total_pages: u32) -> u32 {
        rand::rng().random_range(0..total_pages)
    }
}

/// Always picks the same page, clamped to the last one available.
#[derive(Debug, Clone, Copy)]
pub struct FixedPage(pub u32);

impl PagePicker for FixedPage {
    fn pick(&self, total_pages: u32) -> u32 {
        self.0.min(total_pages.saturating_sub(1))
    }
}
