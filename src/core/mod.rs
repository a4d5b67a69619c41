//! # Core Navigation Logic
//!
//! The page-stack engine. It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Page / Row (data)    │
//!                    │  • PageStack (path)     │
//!                    │  • handle_input()       │
//!                    │                         │
//!                    │  No I/O. No drawing.    │
//!                    └───────────┬─────────────┘
//!                                │ Fetch / FetchRows
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  fixtures  │      │   tests    │
//!     │   host     │      │  (mock)    │      │  (stubs)   │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`page`]: `Row` and `Page`, one screen of content
//! - [`stack`]: `PageStack`, the drill-down path
//! - [`controller`]: `NavigationController`, events in, effects out
//! - [`error`]: `NavError`
//! - [`config`]: layered settings for the binary

pub mod config;
pub mod controller;
pub mod error;
pub mod page;
pub mod stack;

pub use controller::{Effect, NavigationController, NavigationEvent, PageView, Viewport};
pub use error::NavError;
pub use page::{Page, Row, RowView};
pub use stack::PageStack;
