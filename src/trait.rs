use crate::{Result, SearchParams, SearchResult};
use async_trait::async_trait;

/// Trait for ABC radio search operations that can be mocked for testing.
///
/// The paging iterators are generic over this trait, so a traversal can be driven
/// by the real HTTP client or by a scripted mock.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockAbcRadioClient`
/// that implements this trait using the `mockall` library.
///
/// # Bookkeeping
///
/// Implementations remember the parameters and the reported offset of their most
/// recent successful search. This state lives on the client value and is only
/// meant for inspection; it is not shared between clones and must not be relied
/// upon by concurrent traversals.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait(?Send)]
pub trait AbcRadioClient {
    /// Fetch and decode a single page of plays.
    ///
    /// Issues exactly one HTTP GET. Transport failures and undecodable responses
    /// are returned as errors without any retry.
    async fn search(&mut self, params: &SearchParams) -> Result<SearchResult>;

    /// Parameters of the most recent successful search, if any.
    fn latest_search_parameters(&self) -> Option<SearchParams>;

    /// Offset reported by the most recent successfully decoded page, if any.
    fn latest_offset(&self) -> Option<u32>;
}
