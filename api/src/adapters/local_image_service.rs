use crate::domain::ImageService;

/// Images published under `/images` on the host that served the page.
#[derive(Debug, Default, Clone)]
pub struct LocalImageService;

impl ImageService for LocalImageService {
    fn image_url(&self, origin: &str, image_name: &str) -> String {
        format!("{}/images/{}", origin.trim_end_matches('/'), image_name)
    }
}
