use crate::{Error, Result};
use std::path::Path;

/// What to load into the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    Url(String),
    Html(String),
}

impl PageSource {
    /// Build a URL source, adding `https://` when no scheme is given
    pub fn url(input: &str) -> Self {
        let input = input.trim();
        // Schemes are case-insensitive
        let lowered = input.to_ascii_lowercase();
        let has_scheme = ["http://", "https://", "file://", "about:", "data:"]
            .iter()
            .any(|scheme| lowered.starts_with(scheme));

        if has_scheme {
            PageSource::Url(input.to_string())
        } else {
            PageSource::Url(format!("https://{}", input))
        }
    }

    pub fn html(content: impl Into<String>) -> Self {
        PageSource::Html(content.into())
    }

    /// Read HTML from a file, which must exist and be a regular file
    pub fn html_file(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            Error::Browser(format!("Cannot read HTML file {}: {}", path.display(), e))
        })?;

        if !metadata.is_file() {
            return Err(Error::Browser(format!(
                "Not a regular file: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        Ok(PageSource::Html(content))
    }

    /// Short description for logs and progress messages
    pub fn describe(&self) -> String {
        match self {
            PageSource::Url(url) => url.clone(),
            PageSource::Html(html) => format!("inline HTML ({} bytes)", html.len()),
        }
    }
}
