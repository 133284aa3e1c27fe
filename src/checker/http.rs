// src/checker/http.rs
// =============================================================================
// This module probes URLs with real HTTP requests.
//
// Key functionality:
// - The Prober trait: "give me a URL, I'll tell you what happened"
// - HttpProber: the reqwest implementation used by the CLI
// - Turning reqwest errors into a small set of fault categories
//
// A probe never returns an error. Whatever goes wrong on the wire becomes
// a ProbeOutcome::Fault, so one bad link can't stop the others.
//
// Rust concepts:
// - Traits: so tests can swap in a fake prober
// - async/await: for non-blocking network I/O
// - Enums: to represent the different ways a request can fail
// =============================================================================

use crate::config::ProbeConfig;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use serde::Serialize;
use std::error::Error as StdError;
use std::fmt;
use url::Url;

// What a single probe produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The server answered with this status code
    Status(u16),
    /// The request never got an answer
    Fault(ProbeFault),
}

/// Category of a transport-level failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// The link isn't a valid absolute URL
    InvalidUrl,
    /// Could not resolve hostname
    Dns,
    /// The host actively refused the connection
    ConnectionRefused,
    /// Other connection failure (unreachable, reset, ...)
    Connect,
    /// Request timed out
    Timeout,
    /// SSL/TLS certificate error
    Tls,
    /// Too many redirects (redirect loop)
    TooManyRedirects,
    /// Anything else that went wrong while sending the request
    Request,
}

impl FaultKind {
    fn label(self) -> &'static str {
        match self {
            FaultKind::InvalidUrl => "invalid URL",
            FaultKind::Dns => "could not resolve hostname",
            FaultKind::ConnectionRefused => "connection refused",
            FaultKind::Connect => "connection failed",
            FaultKind::Timeout => "request timed out",
            FaultKind::Tls => "SSL certificate error",
            FaultKind::TooManyRedirects => "too many redirects",
            FaultKind::Request => "request failed",
        }
    }
}

/// A transport failure: its category plus a readable description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeFault {
    pub kind: FaultKind,
    pub message: String,
}

impl ProbeFault {
    /// Builds a fault whose message starts with the category label
    pub fn new(kind: FaultKind, detail: impl fmt::Display) -> Self {
        Self {
            kind,
            message: format!("{}: {}", kind.label(), detail),
        }
    }
}

impl fmt::Display for ProbeFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Something that can check whether a URL is alive
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, url: &str) -> ProbeOutcome;
}

/// Probes links with a single reqwest GET each
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    // Builds the HTTP client once and shares it across probes
    //
    // Idle connections are never pooled, so every probe opens its own
    // connection and releases it when the response is dropped.
    pub fn new(config: &ProbeConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .redirect(Policy::limited(config.max_redirects))
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        // Reject garbage before touching the network
        if let Err(e) = Url::parse(url) {
            return ProbeOutcome::Fault(ProbeFault::new(FaultKind::InvalidUrl, format!("{url} ({e})")));
        }

        match self.client.get(url).send().await {
            // Only the status matters; the body is never read
            Ok(response) => ProbeOutcome::Status(response.status().as_u16()),
            Err(e) => ProbeOutcome::Fault(categorize_error(&e)),
        }
    }
}

// Categorizes a reqwest error into a ProbeFault
//
// reqwest only exposes a few is_*() checks, so the finer categories
// (refused, DNS, TLS) come from the error's causes. The top-level text
// embeds the URL and is left out of the search.
fn categorize_error(error: &reqwest::Error) -> ProbeFault {
    let detail = error_chain(error);
    let lowered = error.source().map(error_chain).unwrap_or_default().to_lowercase();

    let kind = if error.is_timeout() {
        FaultKind::Timeout
    } else if error.is_redirect() {
        FaultKind::TooManyRedirects
    } else if error.is_builder() {
        FaultKind::InvalidUrl
    } else if is_connection_refused(error) || lowered.contains("connection refused") {
        FaultKind::ConnectionRefused
    } else if lowered.contains("dns") || lowered.contains("failed to lookup address") {
        FaultKind::Dns
    } else if lowered.contains("certificate") || lowered.contains("tls") || lowered.contains("ssl") {
        FaultKind::Tls
    } else if error.is_connect() {
        FaultKind::Connect
    } else {
        FaultKind::Request
    };

    ProbeFault::new(kind, detail)
}

// Joins an error and all its sources into one line: "outer: inner: root"
fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        // hyper often repeats the inner message in the outer one
        if !parts.iter().any(|p| p.contains(&text)) {
            parts.push(text);
        }
        source = cause.source();
    }
    parts.join(": ")
}

fn is_connection_refused(error: &(dyn StdError + 'static)) -> bool {
    let mut source = Some(error);
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::ConnectionRefused {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why #[async_trait]?
//    - It lets a trait declare async methods that work behind generics
//      and trait objects, and adds the Send bound tokio needs
//
// 2. What is downcast_ref?
//    - Errors are passed around as &dyn Error (the concrete type is hidden)
//    - downcast_ref::<T>() gives back Some(&T) if the error really is a T
//    - We use it to find the std::io::Error buried inside reqwest's error
//
// 3. Why is the client built once if connections aren't reused?
//    - Building a Client loads TLS roots and settings; that happens once
//    - pool_max_idle_per_host(0) keeps it from holding on to connections,
//      so each probe still connects and disconnects on its own
// -----------------------------------------------------------------------------
