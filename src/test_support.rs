//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::core::page::{Page, Row};
use crate::fetch::{Fetch, FetchError, FetchRows};

/// Rows whose key and display are both the given label.
pub fn rows(labels: &[&str]) -> Vec<Row> {
    labels.iter().map(|l| Row::labeled(*l)).collect()
}

/// Returns a fixed page (or a fixed error) for every call.
pub struct StubFetch {
    result: Result<Page, FetchError>,
}

impl StubFetch {
    pub fn returning(page: Page) -> Arc<dyn Fetch> {
        Arc::new(Self { result: Ok(page) })
    }

    /// A leaf page titled `title` with no rows.
    pub fn ok(title: &str) -> Arc<dyn Fetch> {
        Self::returning(Page::new(title, Vec::new()))
    }

    pub fn failing(message: &str) -> Arc<dyn Fetch> {
        Arc::new(Self {
            result: Err(FetchError::Unavailable(message.to_string())),
        })
    }
}

impl Fetch for StubFetch {
    fn name(&self) -> &str {
        "stub"
    }

    fn fetch(&self, _viewport_rows: usize, _arg: &str) -> Result<Page, FetchError> {
        self.result.clone()
    }
}

/// Returns a fixed page and remembers every `(viewport_rows, arg)` it saw.
pub struct RecordingFetch {
    page: Page,
    calls: Mutex<Vec<(usize, String)>>,
}

impl RecordingFetch {
    pub fn new(page: Page) -> Arc<Self> {
        Arc::new(Self {
            page,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(usize, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Fetch for RecordingFetch {
    fn name(&self) -> &str {
        "recording"
    }

    fn fetch(&self, viewport_rows: usize, arg: &str) -> Result<Page, FetchError> {
        self.calls.lock().unwrap().push((viewport_rows, arg.to_string()));
        Ok(self.page.clone())
    }
}

/// Hands out queued row batches, then empty batches, recording edge keys.
/// A failing stub returns its error on every call instead.
pub struct StubRows {
    batches: Mutex<VecDeque<Vec<Row>>>,
    error: Option<FetchError>,
    calls: Mutex<Vec<String>>,
}

impl StubRows {
    pub fn new(batches: Vec<Vec<Row>>) -> Arc<Self> {
        Arc::new(Self {
            batches: Mutex::new(batches.into()),
            error: None,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            batches: Mutex::new(VecDeque::new()),
            error: Some(FetchError::Unavailable(message.to_string())),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl FetchRows for StubRows {
    fn fetch_rows(&self, _viewport_rows: usize, arg: &str) -> Result<Vec<Row>, FetchError> {
        self.calls.lock().unwrap().push(arg.to_string());
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        Ok(self.batches.lock().unwrap().pop_front().unwrap_or_default())
    }
}
