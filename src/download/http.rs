//! Direct image downloading over HTTP.

use std::fmt;
use std::path::Path;
use std::pin::pin;
use std::time::Duration;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use reqwest::{header, Client};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::config::NetworkConfig;
use crate::download::fetch::ImageFetcher;
use crate::error::{Error, Result};

/// Image fetcher backed by a shared `reqwest` client.
pub struct HttpImageFetcher {
    client: Client,
    referer: String,
}

impl HttpImageFetcher {
    /// Build the HTTP client from network settings.
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.image_timeout_seconds))
            .build()
            .map_err(|e| Error::Download(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            referer: config.referer.clone(),
        })
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<bool> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(header::REFERER, &self.referer)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Image request returned HTTP {}: {}", status, url);
            return Ok(false);
        }

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        save_body(response.bytes_stream(), dest).await?;

        Ok(true)
    }
}

/// Stream a response body into `dest`.
///
/// Any failure removes what was written; the skip-check only tests existence.
async fn save_body<S, B, E>(stream: S, dest: &Path) -> Result<()>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: fmt::Display,
{
    let result: Result<()> = async {
        let mut file = File::create(dest).await?;
        let mut stream = pin!(stream);

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
            file.write_all(chunk.as_ref()).await?;
        }

        file.flush().await?;
        Ok(())
    }
    .await;

    if result.is_err() && dest.is_file() {
        let _ = tokio::fs::remove_file(dest).await;
    }

    result
}
