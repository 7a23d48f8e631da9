//! Response shapes for clients and paellas, and the loaders that build them.
//!
//! Paellas are never returned with their raw `notes` column: the stored text
//! is decoded into remarks, deposit and price first.

use std::collections::HashMap;

use paella_core::dashboard::{self, ClientFacts};
use paella_core::error::CoreError;
use paella_core::notes::{self, OrderAnnotation};
use paella_core::orders::{ClientStatus, PaellaStatus};
use paella_core::types::{DbId, Timestamp};
use paella_db::models::client::Client;
use paella_db::models::paella::Paella;
use paella_db::repositories::{ClientRepo, PaellaRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::AppResult;

/// A paella with its annotation decoded.
#[derive(Debug, Clone, Serialize)]
pub struct PaellaView {
    pub id: DbId,
    pub client_id: DbId,
    pub servings: i32,
    pub rice_type: Option<String>,
    pub status: PaellaStatus,
    pub scheduled_for: Option<Timestamp>,
    pub notes_text: String,
    pub deposit: Option<f64>,
    pub price: Option<f64>,
    /// `deposit`, or the default deposit when unset.
    pub effective_deposit: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip)]
    pub annotation: OrderAnnotation,
}

impl PaellaView {
    pub fn from_row(row: Paella) -> AppResult<Self> {
        let status = stored_paella_status(row.id, &row.status)?;
        let annotation = notes::decode(row.notes.as_deref());

        Ok(Self {
            id: row.id,
            client_id: row.client_id,
            servings: row.servings,
            rice_type: row.rice_type,
            status,
            scheduled_for: row.scheduled_for,
            notes_text: annotation.free_text.clone(),
            deposit: annotation.deposit,
            price: annotation.price,
            effective_deposit: annotation.effective_deposit(),
            created_at: row.created_at,
            updated_at: row.updated_at,
            annotation,
        })
    }
}

/// A client together with all of their paellas.
#[derive(Debug, Clone, Serialize)]
pub struct ClientView {
    #[serde(flatten)]
    pub client: Client,
    pub paellas: Vec<PaellaView>,
    /// Sum of the effective deposits of `paellas`.
    pub total_deposit: f64,
}

impl ClientView {
    pub fn new(client: Client, paellas: Vec<PaellaView>) -> Self {
        let total_deposit = dashboard::total_deposit(paellas.iter().map(|p| &p.annotation));
        Self {
            client,
            paellas,
            total_deposit,
        }
    }

    pub fn status(&self) -> AppResult<ClientStatus> {
        stored_client_status(self.client.id, &self.client.status)
    }

    pub fn facts(&self) -> AppResult<ClientFacts<'_>> {
        Ok(ClientFacts {
            first_name: &self.client.first_name,
            last_name: &self.client.last_name,
            phone: self.client.phone.as_deref(),
            status: self.status()?,
        })
    }
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Load one client and their paellas, or 404.
pub async fn load_client_view(pool: &PgPool, client_id: DbId) -> AppResult<ClientView> {
    let client = ClientRepo::find_by_id(pool, client_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Client",
            id: client_id,
        })?;

    let paellas = PaellaRepo::list_by_client(pool, client_id)
        .await?
        .into_iter()
        .map(PaellaView::from_row)
        .collect::<AppResult<Vec<_>>>()?;

    Ok(ClientView::new(client, paellas))
}

/// Load every client (newest first) with their paellas, using one query for
/// clients and one for all of their paellas.
pub async fn load_client_views(pool: &PgPool) -> AppResult<Vec<ClientView>> {
    let clients = ClientRepo::list(pool).await?;
    let ids: Vec<DbId> = clients.iter().map(|c| c.id).collect();

    let mut by_client: HashMap<DbId, Vec<PaellaView>> = HashMap::new();
    for row in PaellaRepo::list_by_clients(pool, &ids).await? {
        let view = PaellaView::from_row(row)?;
        by_client.entry(view.client_id).or_default().push(view);
    }

    Ok(clients
        .into_iter()
        .map(|client| {
            let paellas = by_client.remove(&client.id).unwrap_or_default();
            ClientView::new(client, paellas)
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

// Statuses are guarded by check constraints, so a parse failure here means
// the schema and the code disagree.

fn stored_client_status(id: DbId, raw: &str) -> AppResult<ClientStatus> {
    ClientStatus::from_str(raw).map_err(|_| {
        CoreError::Internal(format!("Client {id} has unknown stored status '{raw}'")).into()
    })
}

fn stored_paella_status(id: DbId, raw: &str) -> AppResult<PaellaStatus> {
    PaellaStatus::from_str(raw).map_err(|_| {
        CoreError::Internal(format!("Paella {id} has unknown stored status '{raw}'")).into()
    })
}
