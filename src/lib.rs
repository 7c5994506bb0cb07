//! # abc-radio-plays
//!
//! A client for the ABC radio music API's play-out search. It retrieves what was
//! played on ABC stations (triple j, Double J, ABC Jazz, ...) over a time window,
//! decodes the loosely-shaped JSON into typed records, and pages through result
//! sets larger than one page.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use abc_radio_plays::{AbcRadioClientImpl, AsyncPaginatedIterator, Result, SearchParams, Station};
//! use chrono::{Duration, Utc};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = AbcRadioClientImpl::new(Box::new(http_client::native::NativeClient::new()));
//!
//!     let now = Utc::now();
//!     let mut plays = client.radio_songs(
//!         SearchParams::new()
//!             .with_from(now - Duration::minutes(30))
//!             .with_to(now)
//!             .with_station(Station::TripleJ)
//!             .with_limit(100),
//!     );
//!
//!     while let Some(play) = plays.next().await? {
//!         println!("{play}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Core Types
//!
//! - [`AbcRadioClient`] / [`AbcRadioClientImpl`] - single-page search over HTTP
//! - [`ContinuousSearch`] - lazy walk over every page of a search
//! - [`SearchParams`] / [`Station`] - what to search for
//! - [`SearchResult`], [`RadioSong`], [`Song`], [`Album`], [`Artist`], [`Artwork`] -
//!   the decoded records
//! - [`AbcRadioError`] / [`DecodeError`] - transport and decoding failures

pub mod client;
pub mod error;
pub mod iterator;
pub mod parsing;
pub mod query;
pub mod r#trait;
pub mod types;

pub use client::AbcRadioClientImpl;
pub use error::{AbcRadioError, DecodeError};
pub use iterator::{AsyncPaginatedIterator, ContinuousSearch, RadioSongsIterator};
pub use parsing::{parse_search_response, DecodeResult};
pub use query::{construct_query_string, format_timestamp, SearchParams, Station};
pub use r#trait::AbcRadioClient;
pub use types::{
    Album, Artist, Artwork, ArtworkSize, ClientConfig, ClientEvent, ClientEventReceiver,
    ClientEventWatcher, RadioSong, RequestInfo, SearchResult, SharedEventBroadcaster, Song,
    BASE_URL,
};

#[cfg(feature = "mock")]
pub use r#trait::MockAbcRadioClient;

pub type Result<T> = std::result::Result<T, AbcRadioError>;
