//! Handlers for the `/clients` resource: the order dashboard, order intake,
//! edits and ticket printing.
//!
//! A client and their paellas are written as separate statements without a
//! surrounding transaction. All input is validated before the first write so
//! that a rejected request leaves nothing behind; a database failure part-way
//! through a multi-row write is logged with what was already applied.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use paella_core::dashboard::{ClientFilter, StatusFilter};
use paella_core::error::CoreError;
use paella_core::notes::{parse_amount_input, OrderAnnotation};
use paella_core::orders::{
    non_blank, validate_client_name, validate_rice_type, validate_servings, ClientStatus,
    DEFAULT_DEPOSIT, DEFAULT_RICE_TYPE,
};
use paella_core::ticket::{TicketLine, TicketSummary};
use paella_core::types::{DbId, Timestamp};
use paella_db::models::client::{CreateClient, UpdateClient};
use paella_db::models::paella::{CreatePaella, UpdatePaella};
use paella_db::repositories::{ClientRepo, PaellaRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::print::PrintError;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::{load_client_view, load_client_views, ClientView};

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// An amount as typed into a form: a JSON number or text such as `"12,50"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    /// Empty text means unset.
    pub fn resolve(&self) -> Result<Option<f64>, CoreError> {
        match self {
            AmountInput::Number(n) if n.is_finite() && *n >= 0.0 => Ok(Some(*n)),
            AmountInput::Number(n) => Err(CoreError::Validation(format!(
                "Check the amounts entered for deposit or price: {n} is not a valid amount"
            ))),
            AmountInput::Text(text) => parse_amount_input(text),
        }
    }
}

fn resolve_amount(input: Option<&AmountInput>) -> Result<Option<f64>, CoreError> {
    input.map_or(Ok(None), AmountInput::resolve)
}

#[derive(Debug, Deserialize)]
pub struct ListClientsQuery {
    pub search: Option<String>,
    /// `all`, `pending`, `delivered` or `returned`.
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub paellas: Vec<NewPaellaRequest>,
}

fn default_has_deposit() -> bool {
    true
}

/// One paella in a new order.
#[derive(Debug, Deserialize)]
pub struct NewPaellaRequest {
    pub servings: i32,
    /// Defaults to `Mixta`.
    pub rice_type: Option<String>,
    pub scheduled_for: Option<Timestamp>,
    pub notes: Option<String>,
    /// `false` records the order without a deposit.
    #[serde(default = "default_has_deposit")]
    pub has_deposit: bool,
    /// Defaults to the standard deposit when `has_deposit` is set.
    pub deposit: Option<AmountInput>,
    pub price: Option<AmountInput>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateClientRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub paellas: Vec<EditPaellaRequest>,
}

/// Edit of an existing paella. Remarks, deposit and price replace the stored
/// annotation; an empty or missing deposit leaves it unset.
#[derive(Debug, Deserialize)]
pub struct EditPaellaRequest {
    pub id: DbId,
    pub servings: i32,
    pub rice_type: Option<String>,
    pub scheduled_for: Option<Timestamp>,
    pub notes: Option<String>,
    pub deposit: Option<AmountInput>,
    pub price: Option<AmountInput>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateClientStatusRequest {
    pub status: String,
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

fn validate_names(first_name: &str, last_name: &str) -> Result<(), CoreError> {
    validate_client_name("First name", first_name)?;
    validate_client_name("Last name", last_name)
}

fn optional_rice_type(rice_type: Option<String>) -> Result<Option<String>, CoreError> {
    let rice_type = non_blank(rice_type).map(|r| r.trim().to_string());
    if let Some(r) = &rice_type {
        validate_rice_type(r)?;
    }
    Ok(rice_type)
}

/// A validated new paella, waiting for its client row.
#[derive(Debug)]
struct PaellaDraft {
    servings: i32,
    rice_type: String,
    scheduled_for: Option<Timestamp>,
    notes: String,
}

impl PaellaDraft {
    fn for_client(self, client_id: DbId) -> CreatePaella {
        CreatePaella {
            client_id,
            servings: self.servings,
            rice_type: Some(self.rice_type),
            scheduled_for: self.scheduled_for,
            notes: Some(self.notes),
        }
    }
}

impl NewPaellaRequest {
    fn prepare(self) -> Result<PaellaDraft, CoreError> {
        validate_servings(self.servings)?;
        let rice_type =
            optional_rice_type(self.rice_type)?.unwrap_or_else(|| DEFAULT_RICE_TYPE.to_string());

        let deposit = if self.has_deposit {
            Some(resolve_amount(self.deposit.as_ref())?.unwrap_or(DEFAULT_DEPOSIT))
        } else {
            None
        };
        let price = resolve_amount(self.price.as_ref())?;
        let annotation = OrderAnnotation::new(self.notes.unwrap_or_default(), deposit, price);

        Ok(PaellaDraft {
            servings: self.servings,
            rice_type,
            scheduled_for: self.scheduled_for,
            notes: annotation.encode(),
        })
    }
}

impl EditPaellaRequest {
    fn prepare(self) -> Result<(DbId, UpdatePaella), CoreError> {
        validate_servings(self.servings)?;
        let rice_type = optional_rice_type(self.rice_type)?;
        let annotation = OrderAnnotation::new(
            self.notes.unwrap_or_default(),
            resolve_amount(self.deposit.as_ref())?,
            resolve_amount(self.price.as_ref())?,
        );

        Ok((
            self.id,
            UpdatePaella {
                servings: self.servings,
                rice_type,
                scheduled_for: self.scheduled_for,
                notes: Some(annotation.encode()),
            },
        ))
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/clients?search=&status=
///
/// Every client with their paellas, newest first, narrowed by a free-text
/// search over name and phone and by client status.
pub async fn list_clients(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<ListClientsQuery>,
) -> AppResult<Json<DataResponse<Vec<ClientView>>>> {
    let filter = ClientFilter::new(
        params.search.as_deref(),
        StatusFilter::from_param(params.status.as_deref())?,
    );

    let mut matching = Vec::new();
    for view in load_client_views(&state.pool).await? {
        if filter.matches(&view.facts()?) {
            matching.push(view);
        }
    }

    Ok(Json(DataResponse { data: matching }))
}

/// POST /api/v1/clients
///
/// Register a client together with one or more paellas.
pub async fn create_client(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateClientRequest>,
) -> AppResult<impl IntoResponse> {
    validate_names(&input.first_name, &input.last_name)?;
    if input.paellas.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "An order needs at least one paella".into(),
        )));
    }
    let paellas = input
        .paellas
        .into_iter()
        .map(NewPaellaRequest::prepare)
        .collect::<Result<Vec<_>, _>>()?;

    let client = ClientRepo::create(
        &state.pool,
        &CreateClient {
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            phone: non_blank(input.phone),
            notes: non_blank(input.notes),
        },
    )
    .await?;

    for (created, draft) in paellas.into_iter().enumerate() {
        let paella = draft.for_client(client.id);
        if let Err(e) = PaellaRepo::create(&state.pool, &paella).await {
            tracing::error!(
                client_id = client.id,
                paellas_created = created,
                error = %e,
                "Order intake stopped part-way"
            );
            return Err(e.into());
        }
    }

    let view = load_client_view(&state.pool, client.id).await?;
    tracing::info!(
        client_id = client.id,
        paellas = view.paellas.len(),
        user_id = user.user_id,
        "Client order created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

/// GET /api/v1/clients/{id}
pub async fn get_client(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(client_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ClientView>>> {
    let view = load_client_view(&state.pool, client_id).await?;
    Ok(Json(DataResponse { data: view }))
}

/// PUT /api/v1/clients/{id}
///
/// Overwrite a client's details, then each listed paella in turn, and return
/// the refreshed client.
pub async fn update_client(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(client_id): Path<DbId>,
    Json(input): Json<UpdateClientRequest>,
) -> AppResult<Json<DataResponse<ClientView>>> {
    validate_names(&input.first_name, &input.last_name)?;
    let edits = input
        .paellas
        .into_iter()
        .map(EditPaellaRequest::prepare)
        .collect::<Result<Vec<_>, _>>()?;

    let existing = PaellaRepo::list_by_client(&state.pool, client_id).await?;
    if let Some((id, _)) = edits
        .iter()
        .find(|(id, _)| !existing.iter().any(|p| p.id == *id))
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Paella",
            id: *id,
        }));
    }

    ClientRepo::update(
        &state.pool,
        client_id,
        &UpdateClient {
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            phone: non_blank(input.phone),
            notes: non_blank(input.notes),
        },
    )
    .await?
    .ok_or(CoreError::NotFound {
        entity: "Client",
        id: client_id,
    })?;

    for (applied, (paella_id, edit)) in edits.iter().enumerate() {
        match PaellaRepo::update(&state.pool, *paella_id, edit).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                tracing::warn!(client_id, paella_id, "Paella vanished during client edit");
            }
            Err(e) => {
                tracing::error!(
                    client_id,
                    paella_id,
                    paellas_updated = applied,
                    error = %e,
                    "Client edit stopped part-way"
                );
                return Err(e.into());
            }
        }
    }

    let view = load_client_view(&state.pool, client_id).await?;
    tracing::info!(
        client_id,
        paellas_updated = edits.len(),
        user_id = admin.user_id,
        "Client updated"
    );

    Ok(Json(DataResponse { data: view }))
}

/// PUT /api/v1/clients/{id}/status
pub async fn update_client_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(client_id): Path<DbId>,
    Json(input): Json<UpdateClientStatusRequest>,
) -> AppResult<Json<DataResponse<ClientView>>> {
    let status = ClientStatus::from_str(input.status.trim())?;

    ClientRepo::update_status(&state.pool, client_id, status.as_str())
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Client",
            id: client_id,
        })?;

    tracing::info!(
        client_id,
        status = status.as_str(),
        user_id = admin.user_id,
        "Client status changed"
    );

    let view = load_client_view(&state.pool, client_id).await?;
    Ok(Json(DataResponse { data: view }))
}

/// DELETE /api/v1/clients/{id}
///
/// Remove the client's paellas, then the client. Returns 204 No Content.
pub async fn delete_client(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(client_id): Path<DbId>,
) -> AppResult<StatusCode> {
    ClientRepo::find_by_id(&state.pool, client_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Client",
            id: client_id,
        })?;

    let paellas_deleted = PaellaRepo::delete_by_client(&state.pool, client_id).await?;

    if !ClientRepo::delete(&state.pool, client_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id: client_id,
        }));
    }

    tracing::info!(client_id, paellas_deleted, user_id = admin.user_id, "Client deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/clients/{id}/ticket
///
/// Build the client's ticket and hand it to the print relay.
pub async fn print_ticket(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(client_id): Path<DbId>,
) -> AppResult<Json<DataResponse<TicketSummary>>> {
    if !state.print_relay.is_configured() {
        return Err(AppError::ServiceUnavailable(
            PrintError::NotConfigured.to_string(),
        ));
    }

    let view = load_client_view(&state.pool, client_id).await?;
    let ticket = build_ticket(&view);

    state.print_relay.send(&ticket).await.map_err(|e| match e {
        PrintError::NotConfigured => AppError::ServiceUnavailable(e.to_string()),
        other => AppError::Upstream(other.to_string()),
    })?;

    tracing::info!(client_id, user_id = user.user_id, "Ticket printed");
    Ok(Json(DataResponse { data: ticket }))
}

fn build_ticket(view: &ClientView) -> TicketSummary {
    let lines = view
        .paellas
        .iter()
        .map(|p| {
            TicketLine::new(
                p.id,
                p.servings,
                p.rice_type.clone(),
                p.status,
                &p.annotation,
            )
        })
        .collect();

    TicketSummary::build(
        view.client.id,
        &view.client.first_name,
        &view.client.last_name,
        view.client.phone.clone(),
        lines,
        chrono::Utc::now(),
    )
}
