/// Resolves the public URL of an image shown on the newsletter pages.
///
/// Serving the files is left to whatever sits behind the URL.
pub trait ImageService: Send + Sync {
    /// `origin` is the `{scheme}://{host}` the current request came in on.
    fn image_url(&self, origin: &str, image_name: &str) -> String;
}
