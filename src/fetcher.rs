use futures::future::try_join_all;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::UpstreamConfig;
use crate::error::{ProxyError, Result};
use crate::posts::{Post, PostsBody};

/// Client for the upstream blog posts API.
pub struct Fetcher {
    client: Client,
    base_url: String,
}

impl Fetcher {
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the posts carrying a single tag.
    pub async fn fetch_tag(&self, tag: &str) -> Result<Vec<Post>> {
        debug!("Fetching posts for tag '{}'", tag);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("tag", tag)])
            .send()
            .await
            .map_err(|e| {
                warn!("Upstream request for tag '{}' failed: {}", tag, e);
                ProxyError::upstream(None, format!("Upstream request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream returned {} for tag '{}'", status, tag);
            return Err(ProxyError::upstream(
                Some(status.as_u16()),
                format!("Request failed with status code {}", status.as_u16()),
            ));
        }

        let body: PostsBody = response.json().await.map_err(|e| {
            warn!("Malformed upstream payload for tag '{}': {}", tag, e);
            ProxyError::upstream(None, format!("Malformed upstream response: {}", e))
        })?;

        debug!("Tag '{}' returned {} posts", tag, body.posts.len());
        Ok(body.posts)
    }

    /// Fetch every tag concurrently and concatenate the results in tag order.
    ///
    /// The first failure aborts the whole fetch; requests still in flight are
    /// dropped and nothing fetched so far is returned.
    pub async fn fetch_all(&self, tags: &[String]) -> Result<Vec<Post>> {
        let per_tag = try_join_all(tags.iter().map(|tag| self.fetch_tag(tag))).await?;

        let posts: Vec<Post> = per_tag.into_iter().flatten().collect();
        info!("Fetched {} posts across {} tags", posts.len(), tags.len());
        Ok(posts)
    }
}
