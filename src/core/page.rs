//! # Pages and Rows
//!
//! A `Page` is one screen of content. It owns one or more row lists
//! ("sub-pages") and the strategies that produce whatever comes after it:
//!
//! ```text
//! Page
//! ├── title: String                     // header label
//! ├── sub_pages: Vec<Vec<Row>>          // never empty
//! ├── current_sub_page: usize           // always < sub_pages.len()
//! ├── on_advance: Option<Arc<dyn Fetch>>      // None = leaf page
//! ├── on_forward: Option<Arc<dyn FetchRows>>  // next sub-page
//! └── on_back: Option<Arc<dyn FetchRows>>     // previous sub-page
//! ```
//!
//! Everything except `current_sub_page` and the loaded sub-pages is fixed
//! once the fetch that built the page returns.

use std::fmt;
use std::sync::Arc;

use crate::core::error::NavError;
use crate::fetch::{Fetch, FetchRows};

/// One selectable line. `key` goes to the next fetch; `display` goes on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    key: String,
    display: String,
}

impl Row {
    pub fn new(key: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display: display.into(),
        }
    }

    /// A row whose key and display text are the same string.
    pub fn labeled(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            key: text.clone(),
            display: text,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn display(&self) -> &str {
        &self.display
    }
}

/// What the host is allowed to see of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub display: String,
}

impl From<&Row> for RowView {
    fn from(row: &Row) -> Self {
        Self {
            display: row.display.clone(),
        }
    }
}

#[derive(Clone)]
pub struct Page {
    title: String,
    sub_pages: Vec<Vec<Row>>,
    current_sub_page: usize,
    on_advance: Option<Arc<dyn Fetch>>,
    on_forward: Option<Arc<dyn FetchRows>>,
    on_back: Option<Arc<dyn FetchRows>>,
}

impl Page {
    /// A single sub-page leaf. Chain `with_advance` to make it drillable.
    pub fn new(title: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            title: title.into(),
            sub_pages: vec![rows],
            current_sub_page: 0,
            on_advance: None,
            on_forward: None,
            on_back: None,
        }
    }

    /// Builds a page from pre-split sub-pages, rejecting an out-of-range index.
    pub fn from_sub_pages(
        title: impl Into<String>,
        sub_pages: Vec<Vec<Row>>,
        current_sub_page: usize,
    ) -> Result<Self, NavError> {
        let page = Self {
            title: title.into(),
            sub_pages,
            current_sub_page,
            on_advance: None,
            on_forward: None,
            on_back: None,
        };
        page.validate()?;
        Ok(page)
    }

    pub fn with_advance(mut self, fetch: Arc<dyn Fetch>) -> Self {
        self.on_advance = Some(fetch);
        self
    }

    pub fn with_forward(mut self, fetch: Arc<dyn FetchRows>) -> Self {
        self.on_forward = Some(fetch);
        self
    }

    pub fn with_back(mut self, fetch: Arc<dyn FetchRows>) -> Self {
        self.on_back = Some(fetch);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn current_sub_page(&self) -> usize {
        self.current_sub_page
    }

    pub fn sub_page_count(&self) -> usize {
        self.sub_pages.len()
    }

    pub fn on_advance(&self) -> Option<&Arc<dyn Fetch>> {
        self.on_advance.as_ref()
    }

    pub fn on_forward(&self) -> Option<&Arc<dyn FetchRows>> {
        self.on_forward.as_ref()
    }

    pub fn on_back(&self) -> Option<&Arc<dyn FetchRows>> {
        self.on_back.as_ref()
    }

    pub fn is_leaf(&self) -> bool {
        self.on_advance.is_none()
    }

    /// Rows of the active sub-page. Empty if the page is somehow invalid.
    pub fn rows(&self) -> &[Row] {
        self.sub_pages
            .get(self.current_sub_page)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn validate(&self) -> Result<(), NavError> {
        if self.current_sub_page >= self.sub_pages.len() {
            return Err(NavError::OutOfRange {
                index: self.current_sub_page,
                len: self.sub_pages.len(),
            });
        }
        Ok(())
    }

    /// Moves to a loaded sub-page.
    pub(crate) fn set_sub_page(&mut self, index: usize) -> Result<(), NavError> {
        if index >= self.sub_pages.len() {
            return Err(NavError::OutOfRange {
                index,
                len: self.sub_pages.len(),
            });
        }
        self.current_sub_page = index;
        Ok(())
    }

    /// Appends a sub-page and makes it current.
    pub(crate) fn push_sub_page(&mut self, rows: Vec<Row>) {
        self.sub_pages.push(rows);
        self.current_sub_page = self.sub_pages.len() - 1;
    }

    /// Prepends a sub-page and makes it current.
    pub(crate) fn prepend_sub_page(&mut self, rows: Vec<Row>) {
        self.sub_pages.insert(0, rows);
        self.current_sub_page = 0;
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("title", &self.title)
            .field("sub_pages", &self.sub_pages)
            .field("current_sub_page", &self.current_sub_page)
            .field("on_advance", &self.on_advance.as_ref().map(|f| f.name()))
            .field("on_forward", &self.on_forward.is_some())
            .field("on_back", &self.on_back.is_some())
            .finish()
    }
}

/// Pages are equal when they show the same content and share the same strategies.
impl PartialEq for Page {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.sub_pages == other.sub_pages
            && self.current_sub_page == other.current_sub_page
            && same_strategy(&self.on_advance, &other.on_advance)
            && same_strategy(&self.on_forward, &other.on_forward)
            && same_strategy(&self.on_back, &other.on_back)
    }
}

fn same_strategy<T: ?Sized>(a: &Option<Arc<T>>, b: &Option<Arc<T>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}
