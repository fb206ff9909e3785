//! Parsing error types for listing and detail page extraction
//!
//! Only block-level and page-level failures are errors; missing optional
//! fields are `None` and never reach this type.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("Required field '{field}' not found in HTML")]
    RequiredFieldMissing {
        field: String,
        context: Option<String>,
    },

    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("No valid selectors compiled for {field}: {errors}")]
    NoValidSelectors { field: String, errors: String },

    #[error("No listing blocks found on {page_url}")]
    NoListingsFound {
        page_url: String,
        tried_selectors: Vec<String>,
    },

    #[error("URL resolution failed: {url} - {reason}")]
    UrlResolutionFailed {
        url: String,
        reason: String,
        base_url: Option<String>,
    },
}

impl ParsingError {
    /// Create a required field missing error with context
    pub fn required_field_missing(field: &str, context: Option<&str>) -> Self {
        Self::RequiredFieldMissing {
            field: field.to_string(),
            context: context.map(ToString::to_string),
        }
    }

    /// Create a no listings found error with tried selectors
    pub fn no_listings_found(page_url: &str, tried_selectors: Vec<String>) -> Self {
        Self::NoListingsFound {
            page_url: page_url.to_string(),
            tried_selectors,
        }
    }

    /// Block-level errors skip one listing; the others invalidate the page
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::RequiredFieldMissing { .. } | Self::UrlResolutionFailed { .. } => true,
            Self::InvalidSelector { .. }
            | Self::NoValidSelectors { .. }
            | Self::NoListingsFound { .. } => false,
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;
