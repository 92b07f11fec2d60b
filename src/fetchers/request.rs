use crate::config::FetchConfig;
use crate::error::{FetchFailure, ImportError};
use log::debug;
use reqwest::{redirect, Client, StatusCode};

/// Plain HTTP page fetcher with a hard timeout covering connect, headers and body.
#[derive(Clone)]
pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, ImportError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .redirect(redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| {
                ImportError::FetchFailed(FetchFailure::Network(format!(
                    "failed to create HTTP client: {e}"
                )))
            })?;

        Ok(Self { client })
    }

    /// GET `url` and return the body as text. Any non-2xx status is an error.
    pub async fn fetch(&self, url: &str) -> Result<String, ImportError> {
        let response = self.client.get(url).send().await.map_err(classify)?;

        let status = response.status();
        debug!("GET {url} -> {status}");
        if status == StatusCode::NOT_FOUND {
            return Err(FetchFailure::NotFound.into());
        }
        if !status.is_success() {
            return Err(FetchFailure::Status(status.as_u16()).into());
        }

        let body = response.text().await.map_err(classify)?;
        Ok(body)
    }
}

fn classify(err: reqwest::Error) -> ImportError {
    if err.is_timeout() {
        FetchFailure::Timeout.into()
    } else {
        FetchFailure::Network(err.to_string()).into()
    }
}
