//! Required-features cache
//!
//! Single-initialization cell: `uninitialized -> populated`, never
//! invalidated. The first successful fetch wins; concurrent callers wait on it
//! instead of issuing their own request. A failed fetch leaves the cell
//! uninitialized.

use std::future::Future;
use std::sync::{Arc, OnceLock};
use tokio::sync::OnceCell;

static SHARED: OnceLock<Arc<RequiredFeaturesCache>> = OnceLock::new();

#[derive(Debug, Default)]
pub struct RequiredFeaturesCache {
    cell: OnceCell<Vec<String>>,
}

impl RequiredFeaturesCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache every connected session uses
    pub fn shared() -> Arc<Self> {
        Arc::clone(SHARED.get_or_init(|| Arc::new(Self::new())))
    }

    /// Pre-populated cache (tests, offline configuration)
    pub fn populated(features: Vec<String>) -> Self {
        Self {
            cell: OnceCell::new_with(Some(features)),
        }
    }

    pub fn get(&self) -> Option<&[String]> {
        self.cell.get().map(Vec::as_slice)
    }

    pub fn is_populated(&self) -> bool {
        self.cell.initialized()
    }

    /// Cached list, or run `fetch` once to populate it
    pub async fn get_or_fetch<F, Fut, E>(&self, fetch: F) -> Result<&[String], E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<String>, E>>,
    {
        self.cell.get_or_try_init(fetch).await.map(Vec::as_slice)
    }
}
