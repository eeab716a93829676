//! Runtime configuration for the catalog front end.
//!
//! # Design
//! - One value object built at boot and shared read-only through context.
//! - Defaults mirror the production deployment; the API base is overridden at startup.

/// Backend origin used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";
/// Provider image CDN prefix for relative poster/profile paths.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
/// Bundled placeholder shown when a record has no image.
pub const PLACEHOLDER_IMAGE: &str = "No_image_available.png";

/// Per-list display caps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListCaps {
    /// Entries per trending row.
    pub trending: usize,
    /// Entries per search result section.
    pub search: usize,
    /// Billed cast entries on the detail page.
    pub cast: usize,
}

impl Default for ListCaps {
    fn default() -> Self {
        Self {
            trending: 15,
            search: 12,
            cast: 5,
        }
    }
}

/// Identifiers for the third-party email widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailWidget {
    /// Service identifier.
    pub service_id: String,
    /// Template identifier.
    pub template_id: String,
}

impl Default for EmailWidget {
    fn default() -> Self {
        Self {
            service_id: "service_bofseos".to_string(),
            template_id: "template_yi4ythq".to_string(),
        }
    }
}

/// Front-end configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct UiConfig {
    /// Backend origin without a trailing slash.
    pub api_base_url: String,
    /// Image CDN prefix for relative paths.
    pub image_base_url: String,
    /// Placeholder image path.
    pub placeholder_image: String,
    /// List display caps.
    pub caps: ListCaps,
    /// Lifetime of an issued verification code.
    pub verification_ttl_ms: i64,
    /// Email widget identifiers.
    pub email: EmailWidget,
    /// Default log filter directive.
    pub log_level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            placeholder_image: PLACEHOLDER_IMAGE.to_string(),
            caps: ListCaps::default(),
            verification_ttl_ms: 10 * 60 * 1000,
            email: EmailWidget::default(),
            log_level: "info".to_string(),
        }
    }
}

impl UiConfig {
    /// Replace the backend origin, normalising away trailing slashes.
    #[must_use]
    pub fn with_api_base_url(mut self, base: &str) -> Self {
        let trimmed = base.trim().trim_end_matches('/');
        if !trimmed.is_empty() {
            self.api_base_url = trimmed.to_string();
        }
        self
    }

    /// Resolve an image from an absolute URL, a provider-relative path, or the placeholder.
    #[must_use]
    pub fn image_url(&self, absolute: Option<&str>, relative: Option<&str>) -> String {
        if let Some(url) = absolute.map(str::trim).filter(|url| !url.is_empty()) {
            return url.to_string();
        }
        match relative.map(str::trim).filter(|path| !path.is_empty()) {
            Some(path) if path.starts_with("http://") || path.starts_with("https://") => {
                path.to_string()
            }
            Some(path) if path.starts_with('/') => format!("{}{path}", self.image_base_url),
            Some(path) => format!("{}/{path}", self.image_base_url),
            None => self.placeholder_image.clone(),
        }
    }
}
