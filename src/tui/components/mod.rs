//! # TUI Components
//!
//! The three regions of the screen, one component each:
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ topics › topic 2                         │  HeaderBar  (stateless)
//! ├──────────────────────────────────────────┤
//! │ partition 1                              │
//! │ partition 2                              │  PageList   (PageListState)
//! │ partition 3                              │
//! ├──────────────────────────────────────────┤
//! │ j/k move  enter open ...        page 1/2 │  StatusBar  (stateless)
//! └──────────────────────────────────────────┘
//! ```
//!
//! Components receive external data as props, never by reaching into the
//! controller. Each file holds its state types, rendering and tests.

mod header_bar;
pub mod page_list;
pub mod status_bar;

pub use header_bar::HeaderBar;
pub use page_list::{PageList, PageListState};
pub use status_bar::{StatusBar, StatusLine};
