//! Seed fetched with an HTTP `GET`.

use taskboard_proto::{Board, codec};
use url::Url;

use super::{SeedError, SeedSource};

/// Fetches the seed board as JSON from a URL.
#[derive(Debug, Clone)]
pub struct HttpSeed {
    client: reqwest::Client,
    url: Url,
}

impl HttpSeed {
    /// Creates a seed that fetches `url` with a default client.
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Creates a seed using an existing client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }

    /// The URL fetched by this seed.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

impl SeedSource for HttpSeed {
    async fn fetch(&self) -> Result<Board, SeedError> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SeedError::Status(status.as_u16()));
        }
        let text = response.text().await?;
        Ok(codec::decode_board(&text)?)
    }
}
