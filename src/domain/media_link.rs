use anyhow::{Result, anyhow};
use std::collections::HashMap;
use url::Url;

const FRONTMATTER_KEYS: [&str; 2] = ["media_link", "media"];
const SHORT_LINK_HOST: &str = "youtu.be";

/// The video URL a note points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLink {
    raw: String,
    url: Url,
}

impl MediaLink {
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let url = Url::parse(raw).map_err(|e| anyhow!("Invalid media link {raw}: {e}"))?;
        Ok(MediaLink {
            raw: raw.to_string(),
            url,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Stable key for a video regardless of extra query parameters.
    pub fn media_id(&self) -> Option<String> {
        if self.url.host_str() == Some(SHORT_LINK_HOST) {
            return self
                .url
                .path_segments()
                .and_then(|mut segments| segments.next())
                .filter(|id| !id.is_empty())
                .map(str::to_string);
        }

        self.query_value("v").filter(|id| !id.is_empty())
    }

    /// Start offset carried by a `t=` parameter, in whole seconds.
    pub fn start_seconds(&self) -> Option<u64> {
        self.query_value("t")
            .and_then(|t| t.trim_end_matches('s').parse::<u64>().ok())
    }

    pub fn timestamped_url(&self, seconds: f64) -> String {
        let mut url = self.url.clone();
        let kept = self
            .url
            .query_pairs()
            .filter(|(k, _)| k != "t")
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect::<Vec<_>>();

        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair("t", &(seconds.max(0.0).floor() as u64).to_string());

        url.to_string()
    }

    fn query_value(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

pub fn media_link_from_frontmatter(frontmatter: &HashMap<String, String>) -> Option<&str> {
    FRONTMATTER_KEYS
        .iter()
        .filter_map(|key| frontmatter.get(*key))
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
}
