use crate::r#trait::AbcRadioClient;
use crate::{RadioSong, Result, SearchParams, SearchResult};

use async_trait::async_trait;
use futures::Stream;

/// Async iterator trait for paginated ABC radio data.
///
/// Items are produced on demand: nothing is prefetched, and at most one request is
/// in flight. Dropping the iterator (or simply not calling [`next`](Self::next)
/// again) is how a traversal is cancelled.
#[async_trait(?Send)]
pub trait AsyncPaginatedIterator<T> {
    /// Fetch the next item from the iterator.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(item))` - Next item in the sequence
    /// - `Ok(None)` - No more items available
    /// - `Err(...)` - Network or decoding error occurred; the traversal ends here
    async fn next(&mut self) -> Result<Option<T>>;

    /// Collect all remaining items into a Vec.
    ///
    /// **Warning**: This method will fetch ALL remaining pages. For an unbounded
    /// search that is the whole play-out history of the API. Use
    /// [`take`](Self::take) for safer bounded collection.
    async fn collect_all(&mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Take up to n items from the iterator.
    async fn take(&mut self, n: usize) -> Result<Vec<T>> {
        let mut items = Vec::new();
        for _ in 0..n {
            match self.next().await? {
                Some(item) => items.push(item),
                None => break,
            }
        }
        Ok(items)
    }

    /// Number of pages fetched so far.
    fn pages_fetched(&self) -> u32;

    /// Total number of matching records, as reported by the most recent page.
    fn total(&self) -> Option<u32> {
        None
    }
}

/// Lazy, forward-only walk over every page of a search.
///
/// The first request uses the caller's parameters unchanged. After each page the
/// next offset is `offset + limit` of that page; while it is below the page's
/// reported `total`, another request is made with only `offset` replaced. `total`
/// and `limit` are re-read from every page, so a `total` that grows while the
/// traversal runs is followed rather than reconciled.
///
/// The iterator owns its client value, so its bookkeeping is independent of any
/// other traversal. No cap is placed on the number of requests.
///
/// # Examples
///
/// ```rust,no_run
/// use abc_radio_plays::{AbcRadioClientImpl, AsyncPaginatedIterator, SearchParams, Station};
/// use chrono::{Duration, Utc};
///
/// # tokio_test::block_on(async {
/// let client = AbcRadioClientImpl::new(Box::new(http_client::native::NativeClient::new()));
/// let now = Utc::now();
/// let params = SearchParams::new()
///     .with_from(now - Duration::minutes(30))
///     .with_to(now)
///     .with_station(Station::TripleJ)
///     .with_limit(100);
///
/// let mut pages = client.continuous_search(params);
/// while let Some(page) = pages.next().await? {
///     println!("{} of {} plays", page.offset + page.radio_songs.len() as u32, page.total);
/// }
/// # Ok::<(), abc_radio_plays::AbcRadioError>(())
/// # });
/// ```
pub struct ContinuousSearch<C: AbcRadioClient> {
    client: C,
    params: SearchParams,
    next_params: Option<SearchParams>,
    pages_fetched: u32,
    total: Option<u32>,
}

impl<C: AbcRadioClient> ContinuousSearch<C> {
    /// Start a traversal. No request is made until the first call to `next`.
    pub fn new(client: C, params: SearchParams) -> Self {
        Self {
            client,
            next_params: Some(params.clone()),
            params,
            pages_fetched: 0,
            total: None,
        }
    }

    /// The client driving this traversal, for inspecting its bookkeeping.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// The parameters the traversal was started with.
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Whether the traversal has ended, by exhaustion or by an error.
    pub fn is_finished(&self) -> bool {
        self.next_params.is_none()
    }

    /// Adapt the traversal into a [`Stream`] of pages.
    pub fn into_stream(self) -> impl Stream<Item = Result<SearchResult>> {
        futures::stream::unfold(self, |mut pages| async move {
            match pages.next().await {
                Ok(Some(page)) => Some((Ok(page), pages)),
                Ok(None) => None,
                Err(e) => Some((Err(e), pages)),
            }
        })
    }

    fn schedule_after(&mut self, page: &SearchResult) {
        let next_offset = page.next_offset();
        if next_offset >= page.total {
            log::debug!(
                "Search exhausted after {} pages (next offset {next_offset}, total {})",
                self.pages_fetched,
                page.total
            );
            return;
        }
        if next_offset <= page.offset {
            log::warn!(
                "Page at offset {} reports limit {}, stopping to avoid refetching it",
                page.offset,
                page.limit
            );
            return;
        }
        self.next_params = Some(self.params.clone().with_offset(next_offset));
    }
}

#[async_trait(?Send)]
impl<C: AbcRadioClient> AsyncPaginatedIterator<SearchResult> for ContinuousSearch<C> {
    async fn next(&mut self) -> Result<Option<SearchResult>> {
        let Some(params) = self.next_params.take() else {
            return Ok(None);
        };

        let page = self.client.search(&params).await?;
        self.pages_fetched += 1;
        self.total = Some(page.total);
        self.schedule_after(&page);
        Ok(Some(page))
    }

    fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    fn total(&self) -> Option<u32> {
        self.total
    }
}

/// Iterator over individual plays of a search, in API order.
///
/// Pages are fetched through an inner [`ContinuousSearch`] only when the plays of
/// the previous page have all been handed out.
pub struct RadioSongsIterator<C: AbcRadioClient> {
    pages: ContinuousSearch<C>,
    buffer: Vec<RadioSong>,
}

impl<C: AbcRadioClient> RadioSongsIterator<C> {
    pub fn new(pages: ContinuousSearch<C>) -> Self {
        Self {
            pages,
            buffer: Vec::new(),
        }
    }

    /// The underlying page traversal.
    pub fn pages(&self) -> &ContinuousSearch<C> {
        &self.pages
    }
}

#[async_trait(?Send)]
impl<C: AbcRadioClient> AsyncPaginatedIterator<RadioSong> for RadioSongsIterator<C> {
    async fn next(&mut self) -> Result<Option<RadioSong>> {
        // Pages can legitimately be empty, keep going until one has plays
        while self.buffer.is_empty() {
            match self.pages.next().await? {
                Some(page) => {
                    self.buffer = page.radio_songs;
                    self.buffer.reverse(); // Reverse so we can pop from end efficiently
                }
                None => return Ok(None),
            }
        }

        Ok(self.buffer.pop())
    }

    fn pages_fetched(&self) -> u32 {
        self.pages.pages_fetched()
    }

    fn total(&self) -> Option<u32> {
        self.pages.total()
    }
}
