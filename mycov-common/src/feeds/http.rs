//! HTTP feed retrieval

use async_trait::async_trait;
use std::time::Duration;

use super::{Feed, FeedSource};
use crate::{Error, Result};

const USER_AGENT: &str = concat!("mycov/", env!("CARGO_PKG_VERSION"));

/// Fetches feeds from a raw-file HTTP host
pub struct HttpFeedSource {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpFeedSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL of `feed`
    pub fn url(&self, feed: Feed) -> String {
        format!("{}/{}", self.base_url, feed.path())
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, feed: Feed) -> Result<String> {
        let url = self.url(feed);
        tracing::debug!(feed = %feed, url = %url, "Fetching feed");

        let response = self.http_client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Feed {
                feed,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(feed = %feed, bytes = body.len(), "Fetched feed");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_path() {
        let source = HttpFeedSource::new("https://example.org/repo/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            source.url(Feed::RegionIcu),
            "https://example.org/repo/epidemic/icu.csv"
        );
    }
}
