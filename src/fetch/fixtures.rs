//! # Mock Topic Hierarchy
//!
//! Static data shaped like a message broker, wired as a chain:
//!
//! ```text
//! TopicsFetch ──▶ TopicFetch ──▶ PartitionFetch ──▶ MessageFetch ──▶ (leaf)
//!  "topics"        "topic"        "partition"        "message"
//! ```
//!
//! The root page also pages sideways through `TopicPager` when there are more
//! topics than fit on screen.

use std::sync::Arc;

use log::debug;
use serde::Deserialize;

use crate::core::page::{Page, Row};
use crate::fetch::strategy::{Fetch, FetchError, FetchRows};

pub const DEFAULT_TOPIC_COUNT: usize = 100;
pub const DEFAULT_PARTITION_COUNT: usize = 3;

const MESSAGES: [&str; 3] = [
    r#"{"name": "fred"}"#,
    r#"{"name": "craig"}"#,
    r#"{"name": "laura"}"#,
];

const TOPIC_PREFIX: &str = "topic ";

/// Sizes of the mock data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureOptions {
    pub topic_count: usize,
    pub partition_count: usize,
}

impl Default for FixtureOptions {
    fn default() -> Self {
        Self {
            topic_count: DEFAULT_TOPIC_COUNT,
            partition_count: DEFAULT_PARTITION_COUNT,
        }
    }
}

fn topic_row(index: usize) -> Row {
    Row::labeled(format!("{TOPIC_PREFIX}{index}"))
}

fn parse_topic_index(key: &str) -> Result<usize, FetchError> {
    key.strip_prefix(TOPIC_PREFIX)
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| FetchError::InvalidKey {
            key: key.to_string(),
            reason: "expected 'topic <n>'".to_string(),
        })
}

/// Root level: the first screenful of topics.
///
/// With no body rows to fill the page comes back empty; the controller asks
/// again once a resize leaves room.
pub struct TopicsFetch {
    topic_count: usize,
    forward: Arc<TopicPager>,
    backward: Arc<TopicPager>,
    next: Arc<TopicFetch>,
}

impl TopicsFetch {
    pub fn new(options: FixtureOptions) -> Self {
        let message = Arc::new(MessageFetch);
        let partition = Arc::new(PartitionFetch { next: message });
        let topic = Arc::new(TopicFetch {
            partition_count: options.partition_count,
            next: partition,
        });
        Self {
            topic_count: options.topic_count,
            forward: Arc::new(TopicPager::new(options.topic_count, PageDirection::Forward)),
            backward: Arc::new(TopicPager::new(options.topic_count, PageDirection::Backward)),
            next: topic,
        }
    }

    /// The whole chain as a root strategy.
    pub fn root(options: FixtureOptions) -> Arc<dyn Fetch> {
        Arc::new(Self::new(options))
    }
}

impl Fetch for TopicsFetch {
    fn name(&self) -> &str {
        "topics"
    }

    fn fetch(&self, viewport_rows: usize, _arg: &str) -> Result<Page, FetchError> {
        let shown = viewport_rows.min(self.topic_count);
        debug!("Fetching {} of {} topics", shown, self.topic_count);
        let rows = (0..shown).map(topic_row).collect();
        Ok(Page::new("topics", rows)
            .with_advance(self.next.clone())
            .with_forward(self.forward.clone())
            .with_back(self.backward.clone()))
    }

    fn then(&self) -> Option<Arc<dyn Fetch>> {
        Some(self.next.clone())
    }
}

/// Which way a pager walks from the edge key it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Forward,
    Backward,
}

/// Pages through the topic list in screen-sized chunks.
pub struct TopicPager {
    topic_count: usize,
    direction: PageDirection,
}

impl TopicPager {
    pub fn new(topic_count: usize, direction: PageDirection) -> Self {
        Self {
            topic_count,
            direction,
        }
    }

    fn window(&self, viewport_rows: usize, edge: usize) -> Vec<Row> {
        let (start, end) = match self.direction {
            PageDirection::Forward => {
                let start = edge.saturating_add(1);
                (start, start.saturating_add(viewport_rows).min(self.topic_count))
            }
            PageDirection::Backward => {
                let end = edge.min(self.topic_count);
                (end.saturating_sub(viewport_rows), end)
            }
        };
        (start..end).map(topic_row).collect()
    }
}

impl FetchRows for TopicPager {
    fn fetch_rows(&self, viewport_rows: usize, arg: &str) -> Result<Vec<Row>, FetchError> {
        let edge = parse_topic_index(arg)?;
        Ok(self.window(viewport_rows, edge))
    }
}

/// A topic's partitions.
pub struct TopicFetch {
    partition_count: usize,
    next: Arc<PartitionFetch>,
}

impl Fetch for TopicFetch {
    fn name(&self) -> &str {
        "topic"
    }

    fn fetch(&self, _viewport_rows: usize, arg: &str) -> Result<Page, FetchError> {
        let rows = (1..=self.partition_count)
            .map(|n| Row::labeled(format!("partition {n}")))
            .collect();
        Ok(Page::new(arg, rows).with_advance(self.next.clone()))
    }

    fn then(&self) -> Option<Arc<dyn Fetch>> {
        Some(self.next.clone())
    }
}

/// Messages in a partition, keyed by offset.
pub struct PartitionFetch {
    next: Arc<MessageFetch>,
}

impl Fetch for PartitionFetch {
    fn name(&self) -> &str {
        "partition"
    }

    fn fetch(&self, _viewport_rows: usize, arg: &str) -> Result<Page, FetchError> {
        let rows = MESSAGES
            .iter()
            .enumerate()
            .map(|(offset, message)| Row::new(format!(r#"{{"offset": {offset}}}"#), *message))
            .collect();
        Ok(Page::new(arg, rows).with_advance(self.next.clone()))
    }

    fn then(&self) -> Option<Arc<dyn Fetch>> {
        Some(self.next.clone())
    }
}

#[derive(Deserialize)]
struct OffsetKey {
    offset: usize,
}

/// A single message. Pages it returns are leaves.
pub struct MessageFetch;

impl Fetch for MessageFetch {
    fn name(&self) -> &str {
        "message"
    }

    fn fetch(&self, _viewport_rows: usize, arg: &str) -> Result<Page, FetchError> {
        let key: OffsetKey = serde_json::from_str(arg).map_err(|e| FetchError::InvalidKey {
            key: arg.to_string(),
            reason: e.to_string(),
        })?;
        let message = MESSAGES
            .get(key.offset)
            .ok_or_else(|| FetchError::NotFound(format!("offset {}", key.offset)))?;
        Ok(Page::new(arg, vec![Row::new("", *message)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::describe_chain;

    fn displays(page: &Page) -> Vec<&str> {
        page.rows().iter().map(Row::display).collect()
    }

    #[test]
    fn test_chain_is_wired_in_order() {
        let root = TopicsFetch::root(FixtureOptions::default());
        assert_eq!(
            describe_chain(&root),
            vec!["topics", "topic", "partition", "message"]
        );
    }

    #[test]
    fn test_topics_fill_viewport() {
        let page = TopicsFetch::new(FixtureOptions::default()).fetch(3, "").unwrap();
        assert_eq!(page.title(), "topics");
        assert_eq!(displays(&page), vec!["topic 0", "topic 1", "topic 2"]);
        assert_eq!(page.rows()[2].key(), "topic 2");
        assert!(page.on_forward().is_some());
    }

    #[test]
    fn test_topics_capped_by_count() {
        let options = FixtureOptions {
            topic_count: 2,
            ..Default::default()
        };
        let page = TopicsFetch::new(options).fetch(10, "").unwrap();
        assert_eq!(page.rows().len(), 2);
    }

    #[test]
    fn test_topic_lists_partitions() {
        let root = TopicsFetch::new(FixtureOptions::default());
        let page = root.then().unwrap().fetch(10, "topic 4").unwrap();
        assert_eq!(page.title(), "topic 4");
        assert_eq!(
            displays(&page),
            vec!["partition 1", "partition 2", "partition 3"]
        );
    }

    #[test]
    fn test_partition_keys_are_offsets() {
        let page = PartitionFetch {
            next: Arc::new(MessageFetch),
        }
        .fetch(10, "partition 2")
        .unwrap();
        assert_eq!(page.rows()[1].key(), r#"{"offset": 1}"#);
        assert_eq!(page.rows()[1].display(), r#"{"name": "craig"}"#);
    }

    #[test]
    fn test_message_page_is_leaf() {
        let page = MessageFetch.fetch(10, r#"{"offset": 2}"#).unwrap();
        assert!(page.is_leaf());
        assert_eq!(displays(&page), vec![r#"{"name": "laura"}"#]);
    }

    #[test]
    fn test_message_rejects_bad_key() {
        let err = MessageFetch.fetch(10, "not json").unwrap_err();
        assert!(matches!(err, FetchError::InvalidKey { .. }));
    }

    #[test]
    fn test_message_past_end_not_found() {
        let err = MessageFetch.fetch(10, r#"{"offset": 7}"#).unwrap_err();
        assert_eq!(err, FetchError::NotFound("offset 7".to_string()));
    }

    #[test]
    fn test_pager_forward_windows() {
        let pager = TopicPager::new(7, PageDirection::Forward);
        let rows = pager.fetch_rows(3, "topic 2").unwrap();
        let shown: Vec<&str> = rows.iter().map(Row::display).collect();
        assert_eq!(shown, vec!["topic 3", "topic 4", "topic 5"]);
        assert_eq!(pager.fetch_rows(3, "topic 5").unwrap().len(), 1);
        assert!(pager.fetch_rows(3, "topic 6").unwrap().is_empty());
    }

    #[test]
    fn test_pager_backward_windows() {
        let pager = TopicPager::new(7, PageDirection::Backward);
        let rows = pager.fetch_rows(3, "topic 3").unwrap();
        let shown: Vec<&str> = rows.iter().map(Row::display).collect();
        assert_eq!(shown, vec!["topic 0", "topic 1", "topic 2"]);
        assert_eq!(pager.fetch_rows(3, "topic 1").unwrap().len(), 1);
        assert!(pager.fetch_rows(3, "topic 0").unwrap().is_empty());
    }

    #[test]
    fn test_pager_rejects_foreign_key() {
        let pager = TopicPager::new(7, PageDirection::Forward);
        let err = pager.fetch_rows(3, "partition 1").unwrap_err();
        assert!(matches!(err, FetchError::InvalidKey { .. }));
    }
}
