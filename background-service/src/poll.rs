use photowatch_core::{ErrorExt, GalleryItem, PhotoFetcher, Query};
use tracing::{debug, info};

/// Decision produced by one poll cycle. `newest` carries the item a
/// notification should be addressed to and is present iff
/// `should_notify` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOutcome {
    pub last_seen_id: Option<String>,
    pub should_notify: bool,
    pub newest: Option<GalleryItem>,
}

impl PollOutcome {
    fn unchanged(last_seen_id: Option<&str>) -> Self {
        Self {
            last_seen_id: last_seen_id.map(str::to_string),
            should_notify: false,
            newest: None,
        }
    }
}

/// Change detection over a photo feed: compares the top-ranked item of a
/// fresh fetch against the last-seen id and decides whether this cycle
/// found new content. Performs no side effects of its own.
pub struct PollCycle<F> {
    fetcher: F,
}

impl<F: PhotoFetcher> PollCycle<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// One poll-and-decide pass. A fetch failure or an empty feed leaves
    /// the last-seen id untouched and never notifies; a cycle cannot
    /// fail, so a transient miss can never wedge the periodic job.
    pub async fn run(&self, query: &Query, last_seen_id: Option<&str>) -> PollOutcome {
        let items = match self.fetcher.fetch_feed(query).await {
            Ok(items) => items,
            Err(e) => {
                e.log_warn();
                return PollOutcome::unchanged(last_seen_id);
            }
        };

        let Some(newest) = items.into_iter().next() else {
            debug!("Feed is empty, nothing to compare");
            return PollOutcome::unchanged(last_seen_id);
        };

        if last_seen_id == Some(newest.id.as_str()) {
            info!("Got an old result: {}", newest.id);
            return PollOutcome::unchanged(last_seen_id);
        }

        info!("Got a new result: {}", newest.id);
        PollOutcome {
            last_seen_id: Some(newest.id.clone()),
            should_notify: true,
            newest: Some(newest),
        }
    }
}

#[cfg(test)]
pub(crate) use test_fetcher::SequenceFetcher;

#[cfg(test)]
mod test_fetcher {
    use async_trait::async_trait;
    use photowatch_core::{CoreError, GalleryItem, PhotoFetcher, Query};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Fetcher fake that replays a scripted sequence of feed results and
    /// records the queries it was asked for. Clones share state so a
    /// probe handle can outlive the service that consumed the fetcher.
    #[derive(Clone)]
    pub(crate) struct SequenceFetcher {
        responses: Arc<Mutex<VecDeque<Result<Vec<GalleryItem>, CoreError>>>>,
        queries: Arc<Mutex<Vec<Query>>>,
    }

    impl SequenceFetcher {
        pub(crate) fn new(responses: Vec<Result<Vec<GalleryItem>, CoreError>>) -> Self {
            Self {
                responses: Arc::new(Mutex::new(responses.into())),
                queries: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub(crate) fn queries(&self) -> Vec<Query> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PhotoFetcher for SequenceFetcher {
        async fn fetch_feed(&self, query: &Query) -> Result<Vec<GalleryItem>, CoreError> {
            self.queries.lock().unwrap().push(query.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }
}
