//! Content API client.

#[cfg(not(feature = "mock"))]
use gloo_net::http::Request;
use futures::future::LocalBoxFuture;
use thiserror::Error;

use crate::{
    config::{SearchConfig, SEARCH_RESULT_LIMIT},
    models::Post,
};
#[cfg(not(feature = "mock"))]
use crate::models::PostsResponse;

/// Why a search request produced no usable result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The request never got a response.
    #[error("Network error: {0}")]
    Network(String),
    /// The API answered with a non-2xx status.
    #[error("HTTP error: {0}")]
    Status(u16),
    /// The body was not the expected JSON.
    #[error("Parse error: {0}")]
    Decode(String),
}

/// Read-only access to posts matching a title query.
pub trait ContentApi: 'static {
    /// Newest posts whose title contains `query`.
    fn search_posts(&self, query: &str) -> LocalBoxFuture<'static, Result<Vec<Post>, SearchError>>;
}

/// Content API search URL for `query`.
///
/// Title substring filter, newest first, capped at [`SEARCH_RESULT_LIMIT`].
pub fn posts_search_url(config: &SearchConfig, query: &str) -> String {
    format!(
        "{}/ghost/api/content/posts/?key={}&limit={}&fields=title,url,excerpt,feature_image,published_at&order=published_at%20desc&filter=title:~'{}'",
        config.api_url,
        urlencoding::encode(&config.content_key),
        SEARCH_RESULT_LIMIT,
        urlencoding::encode(query),
    )
}

/// [`ContentApi`] over HTTP with `gloo-net`.
#[derive(Debug, Clone)]
pub struct GhostContentApi {
    config: SearchConfig,
}

impl GhostContentApi {
    /// Client for the site described by `config`.
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }
}

impl ContentApi for GhostContentApi {
    fn search_posts(&self, query: &str) -> LocalBoxFuture<'static, Result<Vec<Post>, SearchError>> {
        #[cfg(feature = "mock")]
        {
            log::debug!("mock search for {query:?} (api_url={})", self.config.api_url);
            let needle = query.to_lowercase();
            let posts = crate::models::get_mock_posts()
                .into_iter()
                .filter(|post| post.title.to_lowercase().contains(&needle))
                .take(SEARCH_RESULT_LIMIT)
                .collect();
            return Box::pin(futures::future::ready(Ok(posts)));
        }

        #[cfg(not(feature = "mock"))]
        {
            let url = posts_search_url(&self.config, query);
            Box::pin(async move {
                let response = Request::get(&url)
                    .header("Accept", "application/json")
                    .send()
                    .await
                    .map_err(|e| SearchError::Network(format!("{e:?}")))?;

                if !response.ok() {
                    return Err(SearchError::Status(response.status()));
                }

                let body: PostsResponse = response
                    .json()
                    .await
                    .map_err(|e| SearchError::Decode(format!("{e:?}")))?;

                Ok(body.posts)
            })
        }
    }
}
