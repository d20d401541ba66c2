use crate::domain::ImageService;

/// Images published in a blob container, typically fronted by a CDN.
///
/// Container URLs are case sensitive, so names are used as given.
#[derive(Debug, Clone)]
pub struct ContainerImageService {
    container_url: String,
}

impl ContainerImageService {
    pub fn new(container_url: impl Into<String>) -> Self {
        let container_url: String = container_url.into();
        Self {
            container_url: container_url.trim_end_matches('/').to_string(),
        }
    }
}

impl ImageService for ContainerImageService {
    fn image_url(&self, _origin: &str, image_name: &str) -> String {
        format!("{}/{}", self.container_url, image_name)
    }
}
