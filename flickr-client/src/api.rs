use async_trait::async_trait;
use photowatch_core::{CoreError, FlickrApiError, GalleryItem, PhotoFetcher, Query};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

const FLICKR_API_BASE: &str = "https://api.flickr.com/services/rest";

// Flickr error code for a rejected API key
const INVALID_API_KEY_CODE: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlickrResponse {
    pub stat: String,
    #[serde(default)]
    pub photos: Option<PhotoPage>,
    #[serde(default)]
    pub code: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoPage {
    pub page: u32,
    pub pages: u32,
    pub perpage: u32,
    #[serde(default)]
    pub photo: Vec<PhotoData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoData {
    pub id: String,
    pub owner: String,
    pub secret: String,
    pub server: String,
    pub title: String,
    #[serde(default)]
    pub url_s: Option<String>,
}

#[derive(Debug)]
pub struct FlickrApiClient {
    http_client: Client,
    api_key: String,
}

impl FlickrApiClient {
    pub fn new(api_key: String) -> Result<Self, CoreError> {
        let http_client = Client::builder()
            .user_agent(concat!("photowatch/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            api_key,
        })
    }

    async fn make_request(
        &self,
        method: &str,
        extra_params: &[(&str, &str)],
    ) -> Result<FlickrResponse, CoreError> {
        let mut url = Url::parse(FLICKR_API_BASE).map_err(|e| CoreError::Internal {
            message: format!("invalid API base URL: {e}"),
        })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("method", method)
                .append_pair("api_key", &self.api_key)
                .append_pair("format", "json")
                .append_pair("nojsoncallback", "1")
                .append_pair("extras", "url_s");
            for (key, value) in extra_params {
                pairs.append_pair(key, value);
            }
        }

        debug!("Making Flickr API request: {}", method);
        let response = match self.http_client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Network error for {}: {}", method, e);
                if e.is_timeout() {
                    return Err(CoreError::FlickrApi(FlickrApiError::RequestTimeout));
                }
                return Err(CoreError::Network(e));
            }
        };

        let status = response.status();
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            warn!("Rate limited by Flickr, retry after {} seconds", retry_after);
            return Err(CoreError::FlickrApi(FlickrApiError::RateLimitExceeded {
                retry_after,
            }));
        }
        if status.is_server_error() {
            error!("Flickr server error {} for {}", status, method);
            return Err(CoreError::FlickrApi(FlickrApiError::ServerError {
                status_code: status.as_u16(),
            }));
        }

        let envelope: FlickrResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Flickr response for {}: {}", method, e);
            CoreError::FlickrApi(FlickrApiError::InvalidResponse {
                details: format!("failed to parse response for {method}"),
            })
        })?;

        if envelope.stat != "ok" {
            let code = envelope.code.unwrap_or(0);
            let message = envelope
                .message
                .clone()
                .unwrap_or_else(|| "unknown failure".to_string());
            error!("Flickr reported failure for {}: {} ({})", method, message, code);
            if code == INVALID_API_KEY_CODE {
                return Err(CoreError::FlickrApi(FlickrApiError::InvalidApiKey));
            }
            return Err(CoreError::FlickrApi(FlickrApiError::ApiFailure {
                code,
                message,
            }));
        }

        Ok(envelope)
    }

    pub async fn fetch_interesting_photos(&self) -> Result<Vec<GalleryItem>, CoreError> {
        let envelope = self
            .make_request("flickr.interestingness.getList", &[])
            .await?;

        let items = page_items(envelope);
        info!("Retrieved {} interesting photos", items.len());
        Ok(items)
    }

    pub async fn search_photos(&self, text: &str) -> Result<Vec<GalleryItem>, CoreError> {
        let envelope = self
            .make_request("flickr.photos.search", &[("text", text)])
            .await?;

        let items = page_items(envelope);
        info!("Retrieved {} photos for search \"{}\"", items.len(), text);
        Ok(items)
    }
}

/// Flatten a response envelope into display-ready items. A `stat=ok`
/// envelope without a photos object counts as an empty feed; photos
/// lacking a small-image URL are skipped.
pub(crate) fn page_items(envelope: FlickrResponse) -> Vec<GalleryItem> {
    let Some(page) = envelope.photos else {
        warn!("Flickr response carried no photos object, treating as empty feed");
        return Vec::new();
    };

    page.photo
        .into_iter()
        .filter(|photo| photo.url_s.as_deref().is_some_and(|url| !url.is_empty()))
        .map(GalleryItem::from)
        .collect()
}

impl From<PhotoData> for GalleryItem {
    fn from(photo: PhotoData) -> Self {
        Self {
            id: photo.id,
            title: photo.title,
            url: photo.url_s.unwrap_or_default(),
            owner: photo.owner,
        }
    }
}

#[async_trait]
impl PhotoFetcher for FlickrApiClient {
    async fn fetch_feed(&self, query: &Query) -> Result<Vec<GalleryItem>, CoreError> {
        match query.search_text() {
            Some(text) => self.search_photos(text).await,
            None => self.fetch_interesting_photos().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_creation() {
        let client = FlickrApiClient::new("test-api-key".to_string()).unwrap();
        assert_eq!(client.api_key, "test-api-key");
    }

    #[test]
    fn test_gallery_item_conversion() {
        let photo = PhotoData {
            id: "53210001".to_string(),
            owner: "12345678@N00".to_string(),
            secret: "abcdef0123".to_string(),
            server: "65535".to_string(),
            title: "Evening light".to_string(),
            url_s: Some("https://live.staticflickr.com/65535/53210001_m.jpg".to_string()),
        };

        let item: GalleryItem = photo.into();
        assert_eq!(item.id, "53210001");
        assert_eq!(item.title, "Evening light");
        assert_eq!(
            item.url,
            "https://live.staticflickr.com/65535/53210001_m.jpg"
        );
        assert_eq!(item.owner, "12345678@N00");
    }
}
