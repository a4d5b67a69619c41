//! # Fetch Strategies
//!
//! The pluggable data side of navigation. [`strategy`] defines the contracts
//! every level implements; [`fixtures`] is the built-in mock hierarchy.

pub mod fixtures;
pub mod strategy;

pub use fixtures::{
    FixtureOptions, MessageFetch, PageDirection, PartitionFetch, TopicFetch, TopicPager,
    TopicsFetch,
};
pub use strategy::{Fetch, FetchError, FetchRows, describe_chain};
