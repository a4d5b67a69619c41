//! # Page Stack
//!
//! The path from the root to the page on screen. Depth equals drill-down
//! depth, and popping is the only way a page is ever released.

use log::debug;

use crate::core::error::NavError;
use crate::core::page::{Page, Row};

#[derive(Debug)]
pub struct PageStack {
    pages: Vec<Page>,
}

impl PageStack {
    /// Starts a stack with `root` as its only, unpoppable page.
    pub fn new(root: Page) -> Result<Self, NavError> {
        root.validate()?;
        Ok(Self { pages: vec![root] })
    }

    pub fn top(&self) -> Result<&Page, NavError> {
        self.pages.last().ok_or(NavError::EmptyStack)
    }

    pub(crate) fn top_mut(&mut self) -> Result<&mut Page, NavError> {
        self.pages.last_mut().ok_or(NavError::EmptyStack)
    }

    pub fn push(&mut self, page: Page) -> Result<(), NavError> {
        page.validate()?;
        debug!("Push page '{}' at depth {}", page.title(), self.pages.len() + 1);
        self.pages.push(page);
        Ok(())
    }

    /// Removes the top page. Returns `None` and leaves the stack alone when
    /// only the root is left.
    pub fn pop(&mut self) -> Option<Page> {
        if self.pages.len() <= 1 {
            return None;
        }
        let page = self.pages.pop();
        if let Some(ref p) = page {
            debug!("Pop page '{}', depth now {}", p.title(), self.pages.len());
        }
        page
    }

    /// Swaps in a new root page. Only allowed while the root is the top.
    pub(crate) fn replace_root(&mut self, page: Page) -> Result<(), NavError> {
        page.validate()?;
        match self.pages.as_mut_slice() {
            [root] => {
                debug!("Replace root page '{}'", page.title());
                *root = page;
                Ok(())
            }
            pages => Err(NavError::OutOfRange {
                index: 0,
                len: pages.len(),
            }),
        }
    }

    pub fn current_rows(&self) -> Result<&[Row], NavError> {
        Ok(self.top()?.rows())
    }

    pub fn depth(&self) -> usize {
        self.pages.len()
    }

    /// Page titles from root to top.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(Page::title)
    }
}
