//! Parsing context for HTML extraction
//!
//! Carries the immutable site origin used to resolve relative links, plus the
//! page being parsed for log provenance.

use url::Url;

use super::{ParsingError, ParsingResult};

/// Context information for listing page parsing
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// Page being parsed
    pub page_url: String,

    /// Site origin for resolving relative links
    pub base_url: Url,
}

impl ParseContext {
    /// Create new parse context
    pub fn new(page_url: impl Into<String>, base_url: &str) -> ParsingResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ParsingError::UrlResolutionFailed {
            url: base_url.to_string(),
            reason: format!("Invalid base URL: {e}"),
            base_url: None,
        })?;

        Ok(Self {
            page_url: page_url.into(),
            base_url,
        })
    }

    /// Resolve a relative, root-relative or protocol-relative link
    ///
    /// Protocol-relative links take the scheme of the base URL, which is
    /// `https` for the configured site.
    pub fn resolve_url(&self, href: &str) -> ParsingResult<String> {
        let href = href.trim();
        if href.is_empty() {
            return Err(ParsingError::UrlResolutionFailed {
                url: href.to_string(),
                reason: "Empty link".to_string(),
                base_url: Some(self.base_url.to_string()),
            });
        }

        let resolved = self
            .base_url
            .join(href)
            .map_err(|e| ParsingError::UrlResolutionFailed {
                url: href.to_string(),
                reason: format!("Failed to join URL: {e}"),
                base_url: Some(self.base_url.to_string()),
            })?;

        match resolved.scheme() {
            "http" | "https" => Ok(resolved.to_string()),
            other => Err(ParsingError::UrlResolutionFailed {
                url: href.to_string(),
                reason: format!("Unsupported scheme '{other}'"),
                base_url: Some(self.base_url.to_string()),
            }),
        }
    }
}

/// Context for a single property detail page
#[derive(Debug, Clone)]
pub struct DetailParseContext {
    /// Detail page URL
    pub url: String,

    /// Site origin for resolving relative resources
    pub base_url: Url,
}

impl DetailParseContext {
    pub fn new(url: impl Into<String>, base_url: Url) -> Self {
        Self {
            url: url.into(),
            base_url,
        }
    }

    pub fn listing_context(&self) -> ParseContext {
        ParseContext {
            page_url: self.url.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/chintai/jnc_000012345/", "https://suumo.jp/chintai/jnc_000012345/")]
    #[case("//img01.suumo.com/front/gazo/a.jpg", "https://img01.suumo.com/front/gazo/a.jpg")]
    #[case("https://suumo.jp/chintai/x/", "https://suumo.jp/chintai/x/")]
    #[case("http://example.com/a.jpg", "http://example.com/a.jpg")]
    #[case("chintai/y/", "https://suumo.jp/chintai/y/")]
    fn test_url_resolution(#[case] href: &str, #[case] expected: &str) {
        let context = ParseContext::new("https://suumo.jp/jj/chintai/ichiran/", "https://suumo.jp").unwrap();
        assert_eq!(context.resolve_url(href).unwrap(), expected);
    }

    #[test]
    fn test_url_resolution_rejects_empty_and_data_links() {
        let context = ParseContext::new("page", "https://suumo.jp").unwrap();
        assert!(context.resolve_url("  ").is_err());
        assert!(context.resolve_url("data:image/gif;base64,R0lGOD").is_err());
    }
}
