use std::sync::Arc;

use thiserror::Error;

use crate::core::page::{Page, Row};

/// Errors a fetch strategy can return. None of them touch the page stack.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The data source could not be reached. Retrying may help.
    #[error("upstream unavailable: {0}")]
    Unavailable(String),
    /// The selected row's key is not something this level understands.
    #[error("invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },
    /// The key parsed but names nothing.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Produces the page one level below a selected row.
///
/// Each hierarchy level is its own implementation. A strategy hands out the
/// next level by wiring it into the pages it returns, and reports that wiring
/// through [`Fetch::then`] so the chain can be walked without a terminal.
pub trait Fetch: Send + Sync {
    /// Short name of the level this strategy produces.
    fn name(&self) -> &str;

    /// Builds the next page. `viewport_rows` is how many body rows fit on
    /// screen; `arg` is the selected row's key, or empty for the root.
    fn fetch(&self, viewport_rows: usize, arg: &str) -> Result<Page, FetchError>;

    /// The strategy wired into pages this one returns, if any.
    fn then(&self) -> Option<Arc<dyn Fetch>> {
        None
    }
}

/// Produces another sub-page of rows for the page currently on screen.
pub trait FetchRows: Send + Sync {
    /// `arg` is the key of the row at the edge being paged past. An empty
    /// result means there is nothing further in that direction.
    fn fetch_rows(&self, viewport_rows: usize, arg: &str) -> Result<Vec<Row>, FetchError>;
}

/// Upper bound on chain length when walking `then()`, in case of cycles.
const MAX_CHAIN_DEPTH: usize = 32;

/// Names of every strategy reachable from `root`, in drill-down order.
pub fn describe_chain(root: &Arc<dyn Fetch>) -> Vec<String> {
    let mut names = vec![root.name().to_string()];
    let mut current = root.then();
    while let Some(fetch) = current {
        if names.len() >= MAX_CHAIN_DEPTH {
            break;
        }
        names.push(fetch.name().to_string());
        current = fetch.then();
    }
    names
}
