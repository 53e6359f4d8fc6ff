// API client module: a small blocking HTTP client that POSTs requests to
// the live room service. Every call blocks until the service answers or the
// connection fails. No timeout and no retries.

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::request::CommonResponse;

/// Endpoint paths exposed by the service, relative to the base url.
pub mod paths {
    pub const CREATE_ROOM: &str = "/api1/ial/create_room";
    pub const ADD_NEW_INPUT: &str = "/api1/ial/add_new_input_stream";
    pub const ADD_NEW_OUTPUT: &str = "/api1/ial/add_new_output";
    pub const CLOSE_ONE_INPUT: &str = "/api1/ial/close_one_input_stream";
    pub const CLOSE_ONE_OUTPUT: &str = "/api1/ial/close_one_output";
    pub const QUERY_INPUT_INFO: &str = "/api1/ial/input_stream_info";
    pub const QUERY_OUTPUT_INFO: &str = "/api1/ial/output_stream_info";
    pub const MUTE_UNMUTE: &str = "/api1/ial/mute_unmute_stream";
    pub const MIX_LAYOUT_CHANGE: &str = "/api1/ial/mix_layout_change";
    pub const MIX_BACKGROUD_UPDATE: &str = "/api1/ial/mix_backgroud_update";
    pub const STOP: &str = "/api1/ial/stop";
}

/// What came back from one POST. The body is kept raw; the status is
/// recorded but never acted on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub url: String,
    pub status: u16,
    pub body: String,
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("failed to send request to {url}")]
    Send {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read response body from {url}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
}

/// Anything that can deliver a POST to the service. `body` is `None` for
/// requests without a payload.
pub trait Transport {
    fn post(&self, path: &str, body: Option<String>) -> Result<ApiResponse, TransportError>;
}

/// Blocking client bound to one service base url.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    show_progress: bool,
}

impl ApiClient {
    /// Build a client for `base_url` (e.g. `http://127.0.0.1:8080`). A
    /// trailing slash is ignored.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(TransportError::Client)?;
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            show_progress: false,
        })
    }

    /// Show a spinner on stderr while a request is in flight.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request url for an endpoint path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn spinner(&self, path: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(format!("POST {path}"));
        spinner.enable_steady_tick(Duration::from_millis(100));
        Some(spinner)
    }
}

impl Transport for ApiClient {
    fn post(&self, path: &str, body: Option<String>) -> Result<ApiResponse, TransportError> {
        let url = self.url_for(path);
        info!(%url, has_body = body.is_some(), "sending request");

        let mut req = self.client.post(&url);
        if let Some(body) = body {
            req = req.header(CONTENT_TYPE, "application/json").body(body);
        }

        let spinner = self.spinner(path);
        let res = req.send();
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        let res = res.map_err(|source| TransportError::Send {
            url: url.clone(),
            source,
        })?;

        let status = res.status().as_u16();
        let effective_url = res.url().to_string();
        let text = res.text().map_err(|source| TransportError::Body {
            url: url.clone(),
            source,
        })?;

        match CommonResponse::parse(&text) {
            Some(cr) => debug!(status, code = cr.code, msg = %cr.msg, "service replied"),
            None => debug!(status, "service reply is not a CommonResponse"),
        }

        Ok(ApiResponse {
            url: effective_url,
            status,
            body: text,
        })
    }
}
