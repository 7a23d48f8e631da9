//! Ticket summaries sent to the print relay.

use serde::Serialize;

use crate::notes::OrderAnnotation;
use crate::orders::PaellaStatus;
use crate::types::{DbId, Timestamp};

/// One printed line per paella.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketLine {
    pub paella_id: DbId,
    pub servings: i32,
    pub rice_type: Option<String>,
    pub status: PaellaStatus,
    pub notes: String,
    pub deposit: f64,
    pub price: Option<f64>,
}

impl TicketLine {
    pub fn new(
        paella_id: DbId,
        servings: i32,
        rice_type: Option<String>,
        status: PaellaStatus,
        annotation: &OrderAnnotation,
    ) -> Self {
        Self {
            paella_id,
            servings,
            rice_type,
            status,
            notes: annotation.free_text.clone(),
            deposit: annotation.effective_deposit(),
            price: annotation.price,
        }
    }
}

/// Everything the print service needs to print a client's ticket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketSummary {
    pub client_id: DbId,
    pub client_name: String,
    pub phone: Option<String>,
    pub lines: Vec<TicketLine>,
    pub total_deposit: f64,
    /// Sum of the prices that are known. Unpriced lines are left out.
    pub total_price: f64,
    /// Number of lines without a price yet.
    pub unpriced_lines: usize,
    pub issued_at: Timestamp,
}

impl TicketSummary {
    pub fn build(
        client_id: DbId,
        first_name: &str,
        last_name: &str,
        phone: Option<String>,
        lines: Vec<TicketLine>,
        issued_at: Timestamp,
    ) -> Self {
        let total_deposit = lines.iter().map(|l| l.deposit).sum();
        let total_price = lines.iter().filter_map(|l| l.price).sum();
        let unpriced_lines = lines.iter().filter(|l| l.price.is_none()).count();

        Self {
            client_id,
            client_name: format!("{first_name} {last_name}").trim().to_string(),
            phone,
            lines,
            total_deposit,
            total_price,
            unpriced_lines,
            issued_at,
        }
    }
}
