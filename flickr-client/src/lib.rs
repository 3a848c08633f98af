pub mod api;

pub use api::{FlickrApiClient, FlickrResponse, PhotoData, PhotoPage};
