//! Dashboard search, status filtering and summary counters.
//!
//! The dashboard works over the full client list (clients with their paellas)
//! and narrows it in memory: a free-text search over name and phone plus a
//! coarse status filter.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::CoreError;
use crate::notes::OrderAnnotation;
use crate::orders::{ClientStatus, PaellaStatus, VALID_CLIENT_STATUSES, VALID_PAELLA_STATUSES};

/// Query value meaning "no status filter".
pub const STATUS_FILTER_ALL: &str = "all";

/// Client status filter selected on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(ClientStatus),
}

impl StatusFilter {
    /// Parse a `?status=` query value. Missing, empty or `all` means no filter.
    pub fn from_param(param: Option<&str>) -> Result<Self, CoreError> {
        match param.map(str::trim) {
            None | Some("") | Some(STATUS_FILTER_ALL) => Ok(Self::All),
            Some(other) => ClientStatus::from_str(other).map(Self::Only),
        }
    }

    pub fn accepts(&self, status: ClientStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

/// The fields of a client the dashboard search looks at.
#[derive(Debug, Clone, Copy)]
pub struct ClientFacts<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub phone: Option<&'a str>,
    pub status: ClientStatus,
}

/// Combined search term + status filter.
#[derive(Debug, Clone)]
pub struct ClientFilter {
    /// Lower-cased, trimmed search term. Empty matches everything.
    term: String,
    status: StatusFilter,
}

impl ClientFilter {
    pub fn new(search: Option<&str>, status: StatusFilter) -> Self {
        Self {
            term: search.unwrap_or_default().trim().to_lowercase(),
            status,
        }
    }

    /// A client matches when its status passes the filter and the term is
    /// empty or contained in `"first last"` or in the phone number.
    pub fn matches(&self, client: &ClientFacts<'_>) -> bool {
        self.status.accepts(client.status) && self.matches_search(client)
    }

    fn matches_search(&self, client: &ClientFacts<'_>) -> bool {
        if self.term.is_empty() {
            return true;
        }
        let full_name = format!("{} {}", client.first_name, client.last_name).to_lowercase();
        let phone = client.phone.unwrap_or_default().to_lowercase();
        full_name.contains(&self.term) || phone.contains(&self.term)
    }
}

/// Counters shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_clients: u64,
    pub client_status_counts: BTreeMap<String, u64>,
    pub total_paellas: u64,
    pub paella_status_counts: BTreeMap<String, u64>,
    /// Paellas still pending or cooking.
    pub active_paellas: u64,
    /// Sum of effective deposits over all paellas.
    pub total_deposits: f64,
}

impl Default for DashboardSummary {
    fn default() -> Self {
        let zeroed = |statuses: &[&str]| {
            statuses
                .iter()
                .map(|s| (s.to_string(), 0))
                .collect::<BTreeMap<_, _>>()
        };
        Self {
            total_clients: 0,
            client_status_counts: zeroed(VALID_CLIENT_STATUSES),
            total_paellas: 0,
            paella_status_counts: zeroed(VALID_PAELLA_STATUSES),
            active_paellas: 0,
            total_deposits: 0.0,
        }
    }
}

impl DashboardSummary {
    pub fn record_client(&mut self, status: ClientStatus) {
        self.total_clients += 1;
        *self
            .client_status_counts
            .entry(status.as_str().to_string())
            .or_default() += 1;
    }

    pub fn record_paella(&mut self, status: PaellaStatus, annotation: &OrderAnnotation) {
        self.total_paellas += 1;
        *self
            .paella_status_counts
            .entry(status.as_str().to_string())
            .or_default() += 1;
        if status.is_active() {
            self.active_paellas += 1;
        }
        self.total_deposits += annotation.effective_deposit();
    }
}

/// Sum of effective deposits for one client's paellas.
pub fn total_deposit<'a>(annotations: impl IntoIterator<Item = &'a OrderAnnotation>) -> f64 {
    annotations
        .into_iter()
        .map(OrderAnnotation::effective_deposit)
        .sum()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn facts<'a>(first: &'a str, last: &'a str, phone: Option<&'a str>) -> ClientFacts<'a> {
        ClientFacts {
            first_name: first,
            last_name: last,
            phone,
            status: ClientStatus::Pending,
        }
    }

    #[test]
    fn empty_search_matches_everything() {
        let filter = ClientFilter::new(Some("   "), StatusFilter::All);
        assert!(filter.matches(&facts("Ana", "García", None)));
    }

    #[test]
    fn search_over_full_name_is_case_insensitive() {
        let filter = ClientFilter::new(Some(" ana GAR "), StatusFilter::All);
        assert!(filter.matches(&facts("Ana", "García", None)));
        assert!(!filter.matches(&facts("Luis", "Pérez", None)));
    }

    #[test]
    fn search_over_phone() {
        let filter = ClientFilter::new(Some("612"), StatusFilter::All);
        assert!(filter.matches(&facts("Luis", "Pérez", Some("+34 612 000 111"))));
        assert!(!filter.matches(&facts("Luis", "Pérez", None)));
    }

    #[test]
    fn status_filter_narrows() {
        let filter = ClientFilter::new(None, StatusFilter::Only(ClientStatus::Returned));
        let mut client = facts("Ana", "García", None);
        assert!(!filter.matches(&client));
        client.status = ClientStatus::Returned;
        assert!(filter.matches(&client));
    }

    #[test]
    fn status_filter_param_parsing() {
        assert_eq!(StatusFilter::from_param(None).unwrap(), StatusFilter::All);
        assert_eq!(StatusFilter::from_param(Some("all")).unwrap(), StatusFilter::All);
        assert_eq!(
            StatusFilter::from_param(Some("delivered")).unwrap(),
            StatusFilter::Only(ClientStatus::Delivered)
        );
        assert_matches!(
            StatusFilter::from_param(Some("cooking")),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn summary_counts_and_deposits() {
        let mut summary = DashboardSummary::default();
        summary.record_client(ClientStatus::Pending);
        summary.record_client(ClientStatus::Returned);
        summary.record_paella(PaellaStatus::Pending, &OrderAnnotation::default());
        summary.record_paella(
            PaellaStatus::Cooking,
            &OrderAnnotation::new("", Some(25.0), None),
        );
        summary.record_paella(
            PaellaStatus::Delivered,
            &OrderAnnotation::new("", Some(0.0), Some(60.0)),
        );

        assert_eq!(summary.total_clients, 2);
        assert_eq!(summary.client_status_counts["pending"], 1);
        assert_eq!(summary.client_status_counts["delivered"], 0);
        assert_eq!(summary.total_paellas, 3);
        assert_eq!(summary.paella_status_counts["ready"], 0);
        assert_eq!(summary.active_paellas, 2);
        assert_eq!(summary.total_deposits, 35.0);
    }

    #[test]
    fn client_total_deposit_uses_default_for_unset() {
        let annotations = [
            OrderAnnotation::default(),
            OrderAnnotation::new("", Some(15.0), None),
        ];
        assert_eq!(total_deposit(&annotations), 25.0);
    }
}
