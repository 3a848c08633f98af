use async_trait::async_trait;
use photowatch_core::{GalleryItem, NotifyError};

/// Capability for raising a user-visible alert about a new photo.
/// Fire-and-forget; the alert carries the photo's web page link as its
/// click-through target.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_user(&self, item: &GalleryItem) -> Result<(), NotifyError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }
}

pub(crate) fn notification_content(item: &GalleryItem) -> (String, String) {
    let summary = "New pictures".to_string();
    let body = match item.page_url() {
        Some(page) => format!("{}\n{}", item.title, page),
        None => item.title.clone(),
    };
    (summary, body)
}

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn notify_user(&self, item: &GalleryItem) -> Result<(), NotifyError> {
        let (summary, body) = notification_content(item);
        let id = item.id.clone();
        // Notification::show() is synchronous on some platforms; run it on
        // tokio's bounded blocking pool so the poll loop is never held up.
        tokio::task::spawn_blocking(move || {
            match notify_rust::Notification::new()
                .summary(&summary)
                .body(&body)
                .show()
            {
                Ok(_) => tracing::debug!("Desktop notification sent for {}", id),
                Err(e) => tracing::warn!("Desktop notification failed for {}: {}", id, e),
            }
        });
        Ok(())
    }
}

#[cfg(test)]
pub(crate) use fake::FakeNotifier;

#[cfg(test)]
mod fake {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Recording notifier for tests.
    #[derive(Clone, Default)]
    pub(crate) struct FakeNotifier {
        calls: Arc<Mutex<Vec<GalleryItem>>>,
    }

    impl FakeNotifier {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn calls(&self) -> Vec<GalleryItem> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Notifier for FakeNotifier {
        async fn notify_user(&self, item: &GalleryItem) -> Result<(), NotifyError> {
            self.calls.lock().unwrap().push(item.clone());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> GalleryItem {
        GalleryItem {
            id: "53210001".to_string(),
            title: "Evening light".to_string(),
            url: "https://live.staticflickr.com/65535/53210001_m.jpg".to_string(),
            owner: "12345678@N00".to_string(),
        }
    }

    #[test]
    fn test_notification_content_includes_page_link() {
        let (summary, body) = notification_content(&item());

        assert_eq!(summary, "New pictures");
        assert!(body.starts_with("Evening light\n"));
        assert!(body.contains("https://www.flickr.com/photos/12345678@N00/53210001"));
    }

    #[tokio::test]
    async fn test_fake_notifier_records_addressed_item() {
        let notifier = FakeNotifier::new();

        notifier.notify_user(&item()).await.unwrap();

        let calls = notifier.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "53210001");
    }
}
