//! Article retrieval request body.

use serde::Serialize;

/// Body posted to the retrieval endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetrieveRequest<'a> {
    /// Application consumer key.
    pub consumer_key: &'a str,
    /// User access token.
    pub access_token: &'a str,
    /// Only return items carrying this tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<&'a str>,
}
