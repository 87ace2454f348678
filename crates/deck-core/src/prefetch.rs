//! Next-topic prefetching.
//!
//! When the user opens a topic, the slides of the following topic are fetched
//! in the background so that navigating forward does not wait on the network.

use crate::loader::{SlideLoader, topic_path};
use crate::{Course, TopicMetaMap};
use tokio::task::JoinHandle;
use tracing::debug;

/// Start loading the topic after `current_topic_id` in the background.
///
/// Nothing is loaded when the current topic is unknown, is the last topic, or
/// the next topic has no entry in `topic_meta_map`. The returned handle can be
/// awaited or dropped; the task never reports a failure (individual slide
/// failures are logged by the loader).
///
/// Must be called from within a tokio runtime.
pub fn preload_next_topic(
    loader: &SlideLoader,
    course: &Course,
    current_topic_id: &str,
    topic_meta_map: &TopicMetaMap,
) -> Option<JoinHandle<()>> {
    let next = course.next_topic(current_topic_id)?;
    let Some(hint) = topic_meta_map.get(&next.id) else {
        debug!(course = %course.id, topic = %next.id, "no load hint for next topic");
        return None;
    };

    let loader = loader.clone();
    let path = topic_path(&course.id, &next.id);
    let pattern = hint.pattern.clone();
    let count = hint.slide_count;

    Some(tokio::spawn(async move {
        let slides = loader.load_topic_slides(&path, &pattern, count).await;
        debug!(topic_path = %path, warmed = slides.len(), "prefetched next topic");
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::{CountingFetcher, cs101_content};
    use crate::{Topic, TopicLoadHint};
    use std::sync::Arc;

    fn cs101_course() -> Course {
        let topic = |id: &str| Topic {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            duration: String::new(),
            slides: Vec::new(),
            completed: false,
        };
        Course {
            id: "cs101".to_string(),
            topics: vec![topic("intro"), topic("loops")],
        }
    }

    fn hints() -> TopicMetaMap {
        ["intro", "loops"]
            .into_iter()
            .map(|id| {
                (
                    id.to_string(),
                    TopicLoadHint {
                        pattern: "slide-{n}.md".to_string(),
                        slide_count: 3,
                    },
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_prefetches_next_topic() {
        let fetcher = Arc::new(CountingFetcher::new(cs101_content()));
        let loader = SlideLoader::new(fetcher.clone());

        let handle = preload_next_topic(&loader, &cs101_course(), "intro", &hints()).unwrap();
        handle.await.unwrap();
        assert_eq!(fetcher.calls(), 3);
    }

    #[tokio::test]
    async fn test_last_topic_loads_nothing() {
        let fetcher = Arc::new(CountingFetcher::new(cs101_content()));
        let loader = SlideLoader::new(fetcher.clone());

        assert!(preload_next_topic(&loader, &cs101_course(), "loops", &hints()).is_none());
        assert!(preload_next_topic(&loader, &cs101_course(), "unknown", &hints()).is_none());
        tokio::task::yield_now().await;
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_hint_loads_nothing() {
        let fetcher = Arc::new(CountingFetcher::new(cs101_content()));
        let loader = SlideLoader::new(fetcher.clone());

        let mut only_intro = hints();
        only_intro.remove("loops");
        assert!(preload_next_topic(&loader, &cs101_course(), "intro", &only_intro).is_none());
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_failing_slides_do_not_escape() {
        let loader = SlideLoader::new(Arc::new(crate::MemoryFetcher::new()));
        let handle = preload_next_topic(&loader, &cs101_course(), "intro", &hints()).unwrap();
        assert!(handle.await.is_ok());
    }
}
