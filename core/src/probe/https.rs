use std::error::Error;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::SERVER;

use super::{HttpProber, HttpReply, ProbeError};

/// [`HttpProber`] backed by a shared `reqwest` client.
///
/// The client follows redirects like a browser would, so the final response
/// is the one that gets classified.
pub struct ReqwestProber {
    client: Client,
    timeout: Duration,
}

impl ReqwestProber {
    pub fn new(timeout: Duration, accept_invalid_certs: bool) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;

        Ok(Self { client, timeout })
    }

    fn map_error(&self, e: reqwest::Error) -> ProbeError {
        if e.is_timeout() {
            return ProbeError::Timeout(self.timeout);
        }
        ProbeError::Transport(error_chain(&e))
    }
}

#[async_trait]
impl HttpProber for ReqwestProber {
    async fn get(&self, url: &str) -> Result<HttpReply, ProbeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let server = response
            .headers()
            .get(SERVER)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

        Ok(HttpReply {
            status: response.status().as_u16(),
            server,
        })
    }
}

/// Joins an error and all of its sources, since reqwest keeps the useful
/// part (refused, reset, bad certificate) in the source chain.
fn error_chain(e: &dyn Error) -> String {
    let mut text = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.ends_with(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
