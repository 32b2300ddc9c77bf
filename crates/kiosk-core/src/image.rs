//! Resolve capture image references into display URLs.

use crate::{Capture, GalleryIssue};

/// Pixel widths requested from the image service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageWidth {
    /// Grid thumbnails.
    Preview,
    /// Focused viewer and comparison panes.
    Full,
}

impl ImageWidth {
    pub fn default_pixels(self) -> u32 {
        match self {
            Self::Preview => 600,
            Self::Full => 1600,
        }
    }
}

/// Turns an opaque image reference into a URL at a requested width.
pub trait ImageResolver: Send + Sync {
    /// `None` means the reference cannot be displayed.
    fn resolve(&self, image_ref: &str, width: ImageWidth) -> Option<String>;
}

/// Inserts an on-the-fly transform into Cloudinary delivery URLs.
#[derive(Debug, Clone)]
pub struct CloudinaryResolver {
    pub preview_width: u32,
    pub full_width: u32,
}

impl Default for CloudinaryResolver {
    fn default() -> Self {
        Self {
            preview_width: ImageWidth::Preview.default_pixels(),
            full_width: ImageWidth::Full.default_pixels(),
        }
    }
}

impl ImageResolver for CloudinaryResolver {
    fn resolve(&self, image_ref: &str, width: ImageWidth) -> Option<String> {
        if image_ref.trim().is_empty() {
            return None;
        }
        let px = match width {
            ImageWidth::Preview => self.preview_width,
            ImageWidth::Full => self.full_width,
        };
        Some(image_ref.replacen("/upload/", &format!("/upload/f_auto,q_auto,w_{px}/"), 1))
    }
}

/// What the UI should show in place of a capture's image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageView {
    Image { url: String },
    /// Placeholder: no reference, or the resolver produced nothing.
    Missing,
}

impl ImageView {
    pub fn has_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Image { url } => Some(url),
            Self::Missing => None,
        }
    }
}

/// Resolve a capture's image. The resolver is not consulted when the capture
/// has no reference.
pub fn image_view(capture: &Capture, width: ImageWidth, resolver: &dyn ImageResolver) -> ImageView {
    let url = capture
        .image_ref
        .as_deref()
        .filter(|r| !r.is_empty())
        .and_then(|r| resolver.resolve(r, width));
    match url {
        Some(url) => ImageView::Image { url },
        None => {
            let issue = GalleryIssue::ImageMissing { id: capture.id };
            tracing::trace!(%issue, ?width, "showing placeholder");
            ImageView::Missing
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::{ImageResolver, ImageWidth};

    /// Resolver that counts calls and echoes the reference back.
    #[derive(Default)]
    pub struct CountingResolver {
        pub calls: AtomicUsize,
    }

    impl CountingResolver {
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ImageResolver for CountingResolver {
        fn resolve(&self, image_ref: &str, _width: ImageWidth) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Some(image_ref.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::CountingResolver;
    use super::*;
    use crate::testutil::{capture, capture_without_image};

    #[test]
    fn cloudinary_inserts_width_transform() {
        let resolver = CloudinaryResolver::default();
        let url = "https://res.cloudinary.com/demo/image/upload/kiosk247/bbc.com/a.jpg";
        assert_eq!(
            resolver.resolve(url, ImageWidth::Preview).unwrap(),
            "https://res.cloudinary.com/demo/image/upload/f_auto,q_auto,w_600/kiosk247/bbc.com/a.jpg"
        );
        assert!(
            resolver
                .resolve(url, ImageWidth::Full)
                .unwrap()
                .contains("/upload/f_auto,q_auto,w_1600/")
        );
    }

    #[test]
    fn cloudinary_leaves_foreign_urls_alone() {
        let resolver = CloudinaryResolver::default();
        let url = "https://example.com/shot.jpg";
        assert_eq!(resolver.resolve(url, ImageWidth::Full).as_deref(), Some(url));
        assert_eq!(resolver.resolve("  ", ImageWidth::Full), None);
    }

    #[test]
    fn missing_ref_never_calls_resolver() {
        let resolver = CountingResolver::default();
        let view = image_view(&capture_without_image(1, "a.com", 9, 0), ImageWidth::Full, &resolver);
        assert_eq!(view, ImageView::Missing);
        assert!(!view.has_image());
        assert_eq!(resolver.call_count(), 0);
    }

    #[test]
    fn present_ref_resolves_once() {
        let resolver = CountingResolver::default();
        let view = image_view(&capture(1, "a.com", 9, 0), ImageWidth::Preview, &resolver);
        assert!(view.has_image());
        assert_eq!(resolver.call_count(), 1);
    }
}
