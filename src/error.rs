use thiserror::Error;

/// Error types for ABC radio search operations.
///
/// Errors fall into two families: transport failures, where the HTTP exchange
/// itself did not succeed, and decode failures, where a response arrived but could
/// not be turned into a [`SearchResult`](crate::SearchResult). Neither family is
/// retried internally; both propagate to the caller of
/// [`search`](crate::AbcRadioClient::search) or of the paging iterator.
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use abc_radio_plays::{AbcRadioClient, AbcRadioClientImpl, AbcRadioError, SearchParams};
///
/// #[tokio::main]
/// async fn main() {
///     let mut client = AbcRadioClientImpl::new(Box::new(http_client::native::NativeClient::new()));
///
///     match client.search(&SearchParams::new().with_limit(10)).await {
///         Ok(page) => println!("{} plays in total", page.total),
///         Err(AbcRadioError::Status { status, .. }) => eprintln!("Server answered {status}"),
///         Err(AbcRadioError::Decode(e)) => eprintln!("Malformed response: {e}"),
///         Err(e) => eprintln!("Other error: {e}"),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum AbcRadioError {
    /// HTTP/network related errors.
    ///
    /// This includes connection failures, DNS errors, and failures while reading
    /// the response body.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP status {status} for {url}")]
    Status {
        /// Status code returned by the server
        status: u16,
        /// The requested URL
        url: String,
    },

    /// The configured base URL combined with the query string is not a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body could not be decoded into the record model.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl AbcRadioError {
    /// Whether the HTTP exchange itself failed.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AbcRadioError::Http(_) | AbcRadioError::Status { .. } | AbcRadioError::InvalidUrl(_)
        )
    }

    /// Whether the response arrived but could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, AbcRadioError::Decode(_))
    }
}

/// Failure to decode a JSON payload into a typed record.
///
/// Only required fields produce these errors. Optional fields that are missing or
/// null decode to `None` (or an empty list) instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The body is not valid JSON at all.
    #[error("Response body is not valid JSON: {0}")]
    InvalidJson(String),

    /// A value that should be a JSON object is something else.
    #[error("{entity}: expected a JSON object")]
    NotAnObject {
        /// The record type being decoded
        entity: &'static str,
    },

    /// A required field is missing or null.
    #[error("{entity}: missing required field '{field}'")]
    MissingField {
        /// The record type being decoded
        entity: &'static str,
        /// The JSON key that was expected
        field: &'static str,
    },

    /// A field is present but has the wrong shape.
    #[error("{entity}: invalid field '{field}': {reason}")]
    InvalidField {
        /// The record type being decoded
        entity: &'static str,
        /// The offending JSON key
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },
}

impl DecodeError {
    /// The record type that failed to decode, if known.
    pub fn entity(&self) -> Option<&'static str> {
        match self {
            DecodeError::InvalidJson(_) => None,
            DecodeError::NotAnObject { entity }
            | DecodeError::MissingField { entity, .. }
            | DecodeError::InvalidField { entity, .. } => Some(entity),
        }
    }

    /// The JSON key responsible for the failure, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            DecodeError::MissingField { field, .. } | DecodeError::InvalidField { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }
}
