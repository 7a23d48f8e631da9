//! Ticket printing through an external print relay.
//!
//! [`PrintRelay`] POSTs a JSON-encoded [`TicketSummary`] to the configured
//! relay URL. One attempt per request; the caller decides what to tell the
//! user when it fails.

use std::time::Duration;

use paella_core::ticket::TicketSummary;

/// HTTP timeout for a single print request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    /// `PRINT_RELAY_URL` is not set.
    #[error("Ticket printing is not configured")]
    NotConfigured,

    /// The request could not be completed (network, DNS, timeout).
    #[error("Print relay request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The relay answered with a non-2xx status code.
    #[error("Print relay returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// PrintRelay
// ---------------------------------------------------------------------------

pub struct PrintRelay {
    client: reqwest::Client,
    url: Option<String>,
}

impl PrintRelay {
    /// Build a relay client. `None` disables printing.
    pub fn new(url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, url }
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Send a ticket to the relay.
    pub async fn send(&self, ticket: &TicketSummary) -> Result<(), PrintError> {
        let url = self.url.as_deref().ok_or(PrintError::NotConfigured)?;

        let response = self.client.post(url).json(ticket).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PrintError::HttpStatus(status.as_u16()));
        }

        tracing::info!(
            client_id = ticket.client_id,
            lines = ticket.lines.len(),
            "Ticket sent to print relay"
        );
        Ok(())
    }
}
