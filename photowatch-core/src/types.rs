use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub id: String,
    pub title: String,
    pub url: String,
    pub owner: String,
}

impl GalleryItem {
    /// Web page for the photo, used as the notification's click target.
    pub fn page_url(&self) -> Option<Url> {
        let base = Url::parse("https://www.flickr.com/photos/").ok()?;
        base.join(&format!("{}/{}", self.owner, self.id)).ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub text: String,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Empty or whitespace-only text selects the interestingness feed.
    pub fn search_text(&self) -> Option<&str> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }

    pub fn is_search(&self) -> bool {
        self.search_text().is_some()
    }
}
