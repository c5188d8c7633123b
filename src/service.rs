//! Client side of the remote plot service.
//!
//! The service accepts a [`PlotRequest`] at `POST {base_url}/generate` and answers
//! with a JSON [`PlotResponse`] for both success and failure statuses.
//!
//! Typical usage:
//! ```no_run
//! # use azel_rs::service::{HttpPlotService, PlotService};
//! # use azel_rs::store::Store;
//! let service = HttpPlotService::new("http://localhost:8000")?;
//! let request = Store::default().plot_request().expect("default state is plottable");
//! let reply = service.generate(&request)?;
//! println!("HTTP {} with {} target errors", reply.status, reply.body.errors.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::error::TransportError;
use crate::models::{PlotRequest, PlotResponse};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// A response that arrived, whatever its status.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceReply {
    pub status: u16,
    pub body: PlotResponse,
}

impl ServiceReply {
    pub fn ok(body: PlotResponse) -> Self {
        Self { status: 200, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can turn a plot request into a reply.
///
/// Calls are made from worker threads, so implementations must be shareable.
pub trait PlotService: Send + Sync {
    fn generate(&self, request: &PlotRequest) -> Result<ServiceReply, TransportError>;
}

/// Synchronous HTTP client for the plot service.
#[derive(Debug, Clone)]
pub struct HttpPlotService {
    pub base_url: String,
    http: HttpClient,
}

impl HttpPlotService {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let http = HttpClient::builder()
            .timeout(timeout) // plot rendering can take a while
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("azel_rs/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/generate", self.base_url)
    }
}

impl PlotService for HttpPlotService {
    fn generate(&self, request: &PlotRequest) -> Result<ServiceReply, TransportError> {
        let url = self.endpoint();
        log::debug!(
            "POST {} ({} targets, {} @ {})",
            url,
            request.targets.len(),
            request.date,
            request.site
        );
        let resp = self.http.post(&url).json(request).send()?;
        let status = resp.status().as_u16();
        let text = resp.text()?;
        // a body that is not JSON counts as no usable response
        let body: PlotResponse = serde_json::from_str(&text).map_err(|e| {
            TransportError::Decode(format!("HTTP {status}: {e}"))
        })?;
        Ok(ServiceReply { status, body })
    }
}
