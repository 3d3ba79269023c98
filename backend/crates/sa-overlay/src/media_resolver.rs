use crate::{OverlayError, Result};

use std::fmt;
use std::path::Path;

use url::Url;

const PASSTHROUGH_SCHEMES: [&str; 3] = ["http", "https", "file"];

/// Location a render surface loads one media file from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource(Url);

impl MediaSource {
    pub fn url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Turns the `file_path` values of a payload into loadable URLs
#[derive(Debug, Clone)]
pub struct MediaResolver {
    base: Url,
}

impl MediaResolver {
    /// `base` is treated as a directory even without a trailing slash
    pub fn new(base: &str) -> Result<Self> {
        let mut base = Url::parse(base).map_err(|e| OverlayError::url(base, e))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn resolve(&self, file_path: &str) -> Result<MediaSource> {
        let file_path = file_path.trim();

        if let Ok(url) = Url::parse(file_path) {
            if PASSTHROUGH_SCHEMES.contains(&url.scheme()) {
                return Ok(MediaSource(url));
            }
            return Err(OverlayError::unsupported_scheme(url.scheme()));
        }

        let path = Path::new(file_path);
        if path.is_absolute() {
            return Url::from_file_path(path)
                .map(MediaSource)
                .map_err(|()| OverlayError::url(file_path, url::ParseError::RelativeUrlWithoutBase));
        }

        self.base
            .join(file_path.trim_start_matches("./"))
            .map(MediaSource)
            .map_err(|e| OverlayError::url(file_path, e))
    }
}
