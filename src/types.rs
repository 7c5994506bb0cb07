//! Data types for ABC radio play-out records and client plumbing.
//!
//! This module contains the record hierarchy reconstructed from search responses
//! (artwork, albums, artists, songs, plays and result pages), the client
//! configuration, and the event types broadcast while requests are in flight.
//!
//! Decoding from JSON lives in [`crate::parsing`].
//!
//! The serde derives on the records describe the crate's own shape, as written by
//! the `abc-radio --json` output. They do not read API responses: use
//! [`parse_search_response`](crate::parse_search_response) or the `from_json`
//! constructors for those.

use chrono::{DateTime, FixedOffset};
use http_types::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::{broadcast, watch};

/// Default search endpoint of the ABC radio music API.
pub const BASE_URL: &str = "https://music.abcradio.net.au/api/v1/plays/search.json";

/// Default User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("abc-radio-plays/", env!("CARGO_PKG_VERSION"));

// ================================================================================================
// PLAY-OUT RECORDS
// ================================================================================================

/// One image format/size of an [`Artwork`].
///
/// Typical use is picking a thumbnail or a large image for a given interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtworkSize {
    /// Direct URL of the image in this size
    pub url: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Aspect ratio as reported by the API, e.g. `"16x9"`
    pub aspect_ratio: String,
}

impl ArtworkSize {
    /// The aspect ratio as a floating point number (`width / height`).
    ///
    /// Returns `None` when `aspect_ratio` is not of the form `"WxH"` or the height
    /// part is zero.
    ///
    /// ```rust
    /// use abc_radio_plays::ArtworkSize;
    ///
    /// let size = ArtworkSize {
    ///     url: "https://example.com/cover.jpg".to_string(),
    ///     width: 1600,
    ///     height: 900,
    ///     aspect_ratio: "16x9".to_string(),
    /// };
    /// assert!((size.aspect_ratio_float().unwrap() - 16.0 / 9.0).abs() < f64::EPSILON);
    /// ```
    pub fn aspect_ratio_float(&self) -> Option<f64> {
        let (width, height) = self.aspect_ratio.split_once('x')?;
        let width: u32 = width.trim().parse().ok()?;
        let height: u32 = height.trim().parse().ok()?;
        if height == 0 {
            return None;
        }
        Some(f64::from(width) / f64::from(height))
    }
}

/// Artwork attached to an album.
///
/// An album can reference several artworks upstream; only the first one is kept.
/// Each artwork comes in several sizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Artwork {
    /// URL of the original image
    pub url: String,
    /// Artwork kind as tagged by the API (e.g. `"cover"`)
    #[serde(rename = "type")]
    pub artwork_type: String,
    /// Available renditions, in API order
    pub sizes: Vec<ArtworkSize>,
}

/// An album, called a "release" by the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Album {
    /// First external link (usually MusicBrainz), if any
    pub url: Option<String>,
    /// The album title
    pub title: String,
    /// First artwork of the release, if any
    pub artwork: Option<Artwork>,
    /// Release year; `None` when the API reports null, zero or an empty value
    pub release_year: Option<i32>,
}

/// A performing artist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Artist {
    /// First external link (usually MusicBrainz), if any
    pub url: Option<String>,
    /// Name of the artist
    pub name: String,
    /// Whether the artist is Australian.
    ///
    /// `None` means unknown, which is what the API reports most of the time. It is
    /// not the same as `Some(false)`.
    pub is_australian: Option<bool>,
}

/// A song, called a "recording" by the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Song {
    /// The song title
    pub title: String,
    /// Duration in seconds
    pub duration: u32,
    /// Artists credited on the release; empty when no release information exists
    pub artists: Vec<Artist>,
    /// The release the song was played from, if known
    pub album: Option<Album>,
    /// First external link of the recording, if any
    pub url: Option<String>,
}

impl Song {
    /// Artist names joined with `", "`.
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|artist| artist.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The first artwork size of the album, if the album, its artwork and at least
    /// one size are all present.
    pub fn thumbnail(&self) -> Option<&ArtworkSize> {
        self.album.as_ref()?.artwork.as_ref()?.sizes.first()
    }
}

/// A song played on a specific channel at a specific time.
///
/// This is the atomic unit of the play-out history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RadioSong {
    /// When the song was played, with the offset reported by the API
    pub played_time: DateTime<FixedOffset>,
    /// Station identifier the song was played on, e.g. `"triplej"`
    pub channel: String,
    /// The song itself
    pub song: Song,
}

/// One page of search results.
///
/// `total` counts every record matching the query, not just this page. `offset`
/// is the zero-based index of the first record of this page within that total, and
/// `limit` is the page size the server actually used.
///
/// # Examples
///
/// ```rust
/// use abc_radio_plays::SearchResult;
///
/// let page = SearchResult {
///     total: 25,
///     offset: 20,
///     limit: 10,
///     radio_songs: vec![],
/// };
///
/// assert_eq!(page.next_offset(), 30);
/// assert!(!page.has_next_page());
/// ```
///
/// `Deserialize` reads this crate's serialized form back, not the API payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Total number of matching records across all pages
    pub total: u32,
    /// Index of the first record of this page
    pub offset: u32,
    /// Page size used by the server
    pub limit: u32,
    /// Plays on this page, in API order
    pub radio_songs: Vec<RadioSong>,
}

impl SearchResult {
    /// Offset of the page following this one.
    pub fn next_offset(&self) -> u32 {
        self.offset.saturating_add(self.limit)
    }

    /// Whether this page reports more records after it.
    pub fn has_next_page(&self) -> bool {
        self.next_offset() < self.total
    }

    /// Whether the page carries no plays.
    pub fn is_empty(&self) -> bool {
        self.radio_songs.is_empty()
    }
}

impl fmt::Display for Artist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.artists.is_empty() {
            write!(f, "{}", self.title)?;
        } else {
            write!(f, "{} - {}", self.artist_names(), self.title)?;
        }
        if let Some(album) = &self.album {
            write!(f, " [{album}]")?;
        }
        Ok(())
    }
}

impl fmt::Display for RadioSong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.played_time.to_rfc3339(),
            self.channel,
            self.song
        )
    }
}

// ================================================================================================
// CONFIGURATION
// ================================================================================================

/// Configuration for [`AbcRadioClientImpl`](crate::AbcRadioClientImpl).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Search endpoint, without query string
    pub base_url: String,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different search endpoint (useful for testing)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Send a different User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

// ================================================================================================
// EVENT SYSTEM
// ================================================================================================

/// Request information for client events
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestInfo {
    /// The HTTP method
    pub method: String,
    /// The full URI being requested
    pub uri: String,
    /// Query parameters as key-value pairs, in request order
    pub query_params: Vec<(String, String)>,
    /// Path without query parameters
    pub path: String,
}

impl RequestInfo {
    /// Create RequestInfo from a parsed URL and method
    pub fn from_url_and_method(url: &Url, method: &str) -> Self {
        Self {
            method: method.to_string(),
            uri: url.to_string(),
            query_params: url.query_pairs().into_owned().collect(),
            path: url.path().to_string(),
        }
    }

    /// Get a short description of the request for logging
    pub fn short_description(&self) -> String {
        let mut desc = format!("{} {}", self.method, self.path);
        if !self.query_params.is_empty() {
            let params: Vec<String> = self
                .query_params
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect();
            if params.len() <= 2 {
                desc.push_str(&format!("?{}", params.join("&")));
            } else {
                desc.push_str(&format!("?{}...", params[0]));
            }
        }
        desc
    }
}

/// Event type to describe internal HTTP client activity
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ClientEvent {
    /// Request started
    RequestStarted {
        /// Request details
        request: RequestInfo,
    },
    /// Response received (any status)
    RequestCompleted {
        /// Request details
        request: RequestInfo,
        /// HTTP status code
        status_code: u16,
        /// Duration of the request in milliseconds
        duration_ms: u64,
    },
    /// A response was decoded into a page
    PageFetched {
        /// Total matching records reported by the page
        total: u32,
        /// Offset of the page
        offset: u32,
        /// Page size reported by the page
        limit: u32,
        /// Number of plays on the page
        entries: usize,
    },
}

/// Type alias for the broadcast receiver
pub type ClientEventReceiver = broadcast::Receiver<ClientEvent>;

/// Type alias for the watch receiver
pub type ClientEventWatcher = watch::Receiver<Option<ClientEvent>>;

/// Shared event broadcasting state that persists across client clones
#[derive(Clone)]
pub struct SharedEventBroadcaster {
    event_tx: broadcast::Sender<ClientEvent>,
    last_event_tx: watch::Sender<Option<ClientEvent>>,
}

impl SharedEventBroadcaster {
    /// Create a new shared event broadcaster
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(100);
        let (last_event_tx, _) = watch::channel(None);

        Self {
            event_tx,
            last_event_tx,
        }
    }

    /// Broadcast an event to all subscribers
    pub fn broadcast_event(&self, event: ClientEvent) {
        let _ = self.event_tx.send(event.clone());
        self.last_event_tx.send_replace(Some(event));
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> ClientEventReceiver {
        self.event_tx.subscribe()
    }

    /// Watch the latest event
    pub fn watch(&self) -> ClientEventWatcher {
        self.last_event_tx.subscribe()
    }

    /// Get the latest event
    pub fn latest_event(&self) -> Option<ClientEvent> {
        self.last_event_tx.borrow().clone()
    }
}

impl Default for SharedEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SharedEventBroadcaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedEventBroadcaster")
            .field("subscribers", &self.event_tx.receiver_count())
            .finish()
    }
}
