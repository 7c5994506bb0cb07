use crate::iterator::{ContinuousSearch, RadioSongsIterator};
use crate::parsing::parse_search_response;
use crate::query::construct_query_string;
use crate::r#trait::AbcRadioClient;
use crate::types::{
    ClientConfig, ClientEvent, ClientEventReceiver, ClientEventWatcher, RequestInfo,
    SharedEventBroadcaster,
};
use crate::{AbcRadioError, Result, SearchParams, SearchResult};
use async_trait::async_trait;
use http_client::{HttpClient, Request};
use http_types::{Method, Url};
use std::sync::Arc;

/// Client for the ABC radio play-out search API.
///
/// Every call to [`search`](AbcRadioClient::search) issues one GET request and
/// decodes the response into a [`SearchResult`]. For result sets larger than one
/// page, [`continuous_search`](Self::continuous_search) walks the pages lazily.
///
/// Cloning is cheap: clones share the HTTP transport and the event broadcaster,
/// but each clone keeps its own latest-search bookkeeping.
///
/// # Examples
///
/// ```rust,no_run
/// use abc_radio_plays::{AbcRadioClient, AbcRadioClientImpl, Result, SearchParams, Station};
///
/// #[tokio::main]
/// async fn main() -> Result<()> {
///     let http_client = http_client::native::NativeClient::new();
///     let mut client = AbcRadioClientImpl::new(Box::new(http_client));
///
///     let page = client
///         .search(&SearchParams::new().with_station(Station::TripleJ).with_limit(5))
///         .await?;
///     for play in &page.radio_songs {
///         println!("{play}");
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct AbcRadioClientImpl {
    client: Arc<dyn HttpClient + Send + Sync>,
    config: ClientConfig,
    broadcaster: Arc<SharedEventBroadcaster>,
    latest_search_parameters: Option<SearchParams>,
    latest_offset: Option<u32>,
}

impl AbcRadioClientImpl {
    /// Create a new client for the default ABC endpoint.
    ///
    /// # Arguments
    ///
    /// * `client` - Any HTTP client implementation that implements [`HttpClient`]
    pub fn new(client: Box<dyn HttpClient + Send + Sync>) -> Self {
        Self::with_config(client, ClientConfig::default())
    }

    /// Create a new client with custom configuration.
    ///
    /// This is useful for testing against a local server.
    pub fn with_config(client: Box<dyn HttpClient + Send + Sync>, config: ClientConfig) -> Self {
        Self {
            client: Arc::from(client),
            config,
            broadcaster: Arc::new(SharedEventBroadcaster::new()),
            latest_search_parameters: None,
            latest_offset: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full request URL for a parameter set.
    pub fn search_url(&self, params: &SearchParams) -> String {
        format!("{}{}", self.config.base_url, construct_query_string(params))
    }

    /// Subscribe to request and page events from this client and all its clones.
    pub fn subscribe(&self) -> ClientEventReceiver {
        self.broadcaster.subscribe()
    }

    /// Watch the most recent event.
    pub fn watch_events(&self) -> ClientEventWatcher {
        self.broadcaster.watch()
    }

    pub fn latest_event(&self) -> Option<ClientEvent> {
        self.broadcaster.latest_event()
    }

    /// Lazily walk every page matching `params`.
    ///
    /// The first request uses `params` exactly as given. Each following request
    /// repeats them with `offset` moved past the previous page, until the server's
    /// reported `total` is reached.
    ///
    /// **Warning**: no cap is applied. Without a narrow `from`/`to` window, driving
    /// the iterator to exhaustion walks the entire play-out history of the API
    /// (hundreds of thousands of records) one page per request.
    pub fn continuous_search(&self, params: SearchParams) -> ContinuousSearch<AbcRadioClientImpl> {
        ContinuousSearch::new(self.clone(), params)
    }

    /// Like [`continuous_search`](Self::continuous_search), yielding individual plays
    /// instead of pages.
    pub fn radio_songs(&self, params: SearchParams) -> RadioSongsIterator<AbcRadioClientImpl> {
        RadioSongsIterator::new(self.continuous_search(params))
    }

    async fn get_body(&self, url: &str) -> Result<String> {
        let parsed_url = url
            .parse::<Url>()
            .map_err(|e| AbcRadioError::InvalidUrl(format!("{url}: {e}")))?;
        let request_info = RequestInfo::from_url_and_method(&parsed_url, "GET");

        let mut request = Request::new(Method::Get, parsed_url);
        request.insert_header("User-Agent", self.config.user_agent.as_str());
        request.insert_header("Accept", "application/json");

        log::debug!("Requesting {}", request_info.short_description());
        let request_start = std::time::Instant::now();
        self.broadcaster
            .broadcast_event(ClientEvent::RequestStarted {
                request: request_info.clone(),
            });

        let mut response = self
            .client
            .send(request)
            .await
            .map_err(|e| AbcRadioError::Http(e.to_string()))?;

        let status_code: u16 = response.status().into();
        self.broadcaster
            .broadcast_event(ClientEvent::RequestCompleted {
                request: request_info,
                status_code,
                duration_ms: request_start.elapsed().as_millis() as u64,
            });

        if !response.status().is_success() {
            log::debug!("Search request failed with status {status_code}");
            return Err(AbcRadioError::Status {
                status: status_code,
                url: url.to_string(),
            });
        }

        response
            .body_string()
            .await
            .map_err(|e| AbcRadioError::Http(e.to_string()))
    }
}

impl std::fmt::Debug for AbcRadioClientImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbcRadioClientImpl")
            .field("config", &self.config)
            .field("latest_search_parameters", &self.latest_search_parameters)
            .field("latest_offset", &self.latest_offset)
            .finish()
    }
}

#[async_trait(?Send)]
impl AbcRadioClient for AbcRadioClientImpl {
    async fn search(&mut self, params: &SearchParams) -> Result<SearchResult> {
        let url = self.search_url(params);
        let body = self.get_body(&url).await?;
        let result = parse_search_response(&body)?;

        log::debug!(
            "Fetched {} plays (offset {}, limit {}, total {})",
            result.radio_songs.len(),
            result.offset,
            result.limit,
            result.total
        );
        self.broadcaster.broadcast_event(ClientEvent::PageFetched {
            total: result.total,
            offset: result.offset,
            limit: result.limit,
            entries: result.radio_songs.len(),
        });

        self.latest_offset = Some(result.offset);
        self.latest_search_parameters = Some(params.clone());
        Ok(result)
    }

    fn latest_search_parameters(&self) -> Option<SearchParams> {
        self.latest_search_parameters.clone()
    }

    fn latest_offset(&self) -> Option<u32> {
        self.latest_offset
    }
}
