use std::fmt;
use thiserror::Error;

/// Errors that can occur during recipe import operations
#[derive(Error, Debug)]
pub enum ImportError {
    /// The URL is malformed or uses a scheme other than http/https
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The PDF could not be decoded to text
    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    /// The source page could not be fetched
    #[error("Failed to fetch URL: {0}")]
    FetchFailed(FetchFailure),

    /// Neither structured data nor the generative fallback yielded a usable recipe
    #[error("No recipe found: {0}")]
    NoRecipeFound(String),

    /// Generative provider credentials are missing or were rejected
    #[error("AI provider not configured: {0}")]
    ProviderNotConfigured(String),

    /// The generative provider answered 429
    #[error("AI provider rate limited: {0}")]
    ProviderRateLimited(String),

    /// Any other generative provider failure
    #[error("AI provider error: {0}")]
    Provider(String),
}

/// Why a page fetch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    Timeout,
    NotFound,
    Status(u16),
    Network(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Timeout => f.write_str("request timeout - URL took too long to respond"),
            FetchFailure::NotFound => f.write_str("URL not found (404)"),
            FetchFailure::Status(status) => write!(f, "HTTP error: {status}"),
            FetchFailure::Network(message) => f.write_str(message),
        }
    }
}

/// The closed set of failure kinds callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    FetchFailed,
    NoRecipeFound,
    ProviderNotConfigured,
    ProviderRateLimited,
    ProviderError,
}

impl ErrorKind {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::FetchFailed => "FETCH_FAILED",
            ErrorKind::NoRecipeFound => "NO_RECIPE_FOUND",
            ErrorKind::ProviderNotConfigured => "PROVIDER_NOT_CONFIGURED",
            ErrorKind::ProviderRateLimited => "PROVIDER_RATE_LIMITED",
            ErrorKind::ProviderError => "PROVIDER_ERROR",
        }
    }

    /// Message safe to show to an end user. Never includes provider output.
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => {
                "The URL or file could not be read. Please check it and try again."
            }
            ErrorKind::FetchFailed => {
                "Could not access the recipe URL. Please check the address or try again later."
            }
            ErrorKind::NoRecipeFound => {
                "No recipe was found. Try adding the recipe manually."
            }
            ErrorKind::ProviderNotConfigured => {
                "Recipe extraction is temporarily unavailable."
            }
            ErrorKind::ProviderRateLimited => {
                "Too many import requests. Please try again in a few minutes."
            }
            ErrorKind::ProviderError => "Recipe import failed. Please try again later.",
        }
    }

    /// HTTP status a web layer should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorKind::InvalidInput => 400,
            ErrorKind::FetchFailed => 502,
            ErrorKind::NoRecipeFound => 422,
            ErrorKind::ProviderNotConfigured => 503,
            ErrorKind::ProviderRateLimited => 429,
            ErrorKind::ProviderError => 502,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl ImportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImportError::InvalidUrl(_) | ImportError::InvalidPdf(_) => ErrorKind::InvalidInput,
            ImportError::FetchFailed(_) => ErrorKind::FetchFailed,
            ImportError::NoRecipeFound(_) => ErrorKind::NoRecipeFound,
            ImportError::ProviderNotConfigured(_) => ErrorKind::ProviderNotConfigured,
            ImportError::ProviderRateLimited(_) => ErrorKind::ProviderRateLimited,
            ImportError::Provider(_) => ErrorKind::ProviderError,
        }
    }

    /// Shorthand for `self.kind().user_message()`.
    pub fn user_message(&self) -> &'static str {
        self.kind().user_message()
    }

    /// Whether retrying the same request later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::FetchFailed | ErrorKind::ProviderRateLimited
        )
    }
}

impl From<FetchFailure> for ImportError {
    fn from(failure: FetchFailure) -> Self {
        ImportError::FetchFailed(failure)
    }
}
