//! Integration tests for the client / paella / profile repositories.
//!
//! Exercises the repository layer against a real database:
//! - Create a client with its paellas and fetch them back
//! - Batched relational fetch across clients
//! - Status updates and check constraints
//! - Delete ordering (paellas first, then client)

use paella_core::notes::{self, OrderAnnotation};
use paella_db::models::client::{CreateClient, UpdateClient};
use paella_db::models::paella::{CreatePaella, UpdatePaella};
use paella_db::models::profile::CreateProfile;
use paella_db::models::user::CreateUser;
use paella_db::repositories::{ClientRepo, PaellaRepo, ProfileRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_client(first: &str, last: &str) -> CreateClient {
    CreateClient {
        first_name: first.to_string(),
        last_name: last.to_string(),
        phone: Some("600111222".to_string()),
        notes: None,
    }
}

fn new_paella(client_id: i64, servings: i32, annotation: &OrderAnnotation) -> CreatePaella {
    CreatePaella {
        client_id,
        servings,
        rice_type: Some("Mixta".to_string()),
        scheduled_for: None,
        notes: Some(annotation.encode()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_client_with_paellas(pool: PgPool) {
    let client = ClientRepo::create(&pool, &new_client("Ana", "García"))
        .await
        .unwrap();
    assert_eq!(client.status, "pending");

    let annotation = OrderAnnotation::new("sin marisco", Some(15.0), None);
    let paella = PaellaRepo::create(&pool, &new_paella(client.id, 4, &annotation))
        .await
        .unwrap();
    assert_eq!(paella.status, "pending");
    assert_eq!(notes::decode(paella.notes.as_deref()), annotation);

    let paellas = PaellaRepo::list_by_client(&pool, client.id).await.unwrap();
    assert_eq!(paellas.len(), 1);
    assert_eq!(paellas[0].id, paella.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_by_clients_batches(pool: PgPool) {
    let a = ClientRepo::create(&pool, &new_client("Ana", "García")).await.unwrap();
    let b = ClientRepo::create(&pool, &new_client("Luis", "Pérez")).await.unwrap();
    let annotation = OrderAnnotation::default();
    PaellaRepo::create(&pool, &new_paella(a.id, 2, &annotation)).await.unwrap();
    PaellaRepo::create(&pool, &new_paella(b.id, 6, &annotation)).await.unwrap();
    PaellaRepo::create(&pool, &new_paella(b.id, 8, &annotation)).await.unwrap();

    let paellas = PaellaRepo::list_by_clients(&pool, &[a.id, b.id]).await.unwrap();
    assert_eq!(paellas.len(), 3);

    let none = PaellaRepo::list_by_clients(&pool, &[]).await.unwrap();
    assert!(none.is_empty());

    let clients = ClientRepo::list(&pool).await.unwrap();
    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0].id, b.id, "most recent client first");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn servings_below_two_rejected(pool: PgPool) {
    let client = ClientRepo::create(&pool, &new_client("Ana", "García")).await.unwrap();
    let result =
        PaellaRepo::create(&pool, &new_paella(client.id, 1, &OrderAnnotation::default())).await;
    assert!(result.is_err(), "check constraint must reject 1 serving");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_status_rejected(pool: PgPool) {
    let client = ClientRepo::create(&pool, &new_client("Ana", "García")).await.unwrap();
    let result = ClientRepo::update_status(&pool, client.id, "cooking").await;
    assert!(result.is_err(), "clients cannot be cooking");

    let updated = ClientRepo::update_status(&pool, client.id, "returned")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, "returned");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_client_clears_optional_fields(pool: PgPool) {
    let client = ClientRepo::create(&pool, &new_client("Ana", "García")).await.unwrap();
    let updated = ClientRepo::update(
        &pool,
        client.id,
        &UpdateClient {
            first_name: "Ana María".to_string(),
            last_name: "García".to_string(),
            phone: None,
            notes: Some("recoge a las 14h".to_string()),
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.first_name, "Ana María");
    assert_eq!(updated.phone, None);
    assert_eq!(updated.notes.as_deref(), Some("recoge a las 14h"));

    let missing = ClientRepo::update(
        &pool,
        999_999,
        &UpdateClient {
            first_name: "x".into(),
            last_name: "y".into(),
            phone: None,
            notes: None,
        },
    )
    .await
    .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_paella_replaces_annotation(pool: PgPool) {
    let client = ClientRepo::create(&pool, &new_client("Ana", "García")).await.unwrap();
    let paella = PaellaRepo::create(
        &pool,
        &new_paella(client.id, 4, &OrderAnnotation::new("a", Some(10.0), None)),
    )
    .await
    .unwrap();

    let replacement = OrderAnnotation::new("", None, Some(55.5));
    let updated = PaellaRepo::update(
        &pool,
        paella.id,
        &UpdatePaella {
            servings: 6,
            rice_type: Some("Negra".to_string()),
            scheduled_for: None,
            notes: Some(replacement.encode()),
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.servings, 6);
    assert_eq!(notes::decode(updated.notes.as_deref()), replacement);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_paellas_then_client(pool: PgPool) {
    let client = ClientRepo::create(&pool, &new_client("Ana", "García")).await.unwrap();
    let annotation = OrderAnnotation::default();
    PaellaRepo::create(&pool, &new_paella(client.id, 2, &annotation)).await.unwrap();
    PaellaRepo::create(&pool, &new_paella(client.id, 3, &annotation)).await.unwrap();

    let removed = PaellaRepo::delete_by_client(&pool, client.id).await.unwrap();
    assert_eq!(removed, 2);
    assert!(ClientRepo::delete(&pool, client.id).await.unwrap());
    assert!(!ClientRepo::delete(&pool, client.id).await.unwrap());
    assert!(ClientRepo::find_by_id(&pool, client.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn profiles_by_role(pool: PgPool) {
    assert!(!ProfileRepo::exists_with_role(&pool, "admin").await.unwrap());

    let user = UserRepo::create(
        &pool,
        &CreateUser {
            email: "jefa@paellas.test".to_string(),
            password_hash: "hash".to_string(),
        },
    )
    .await
    .unwrap();
    ProfileRepo::create(
        &pool,
        &CreateProfile {
            id: user.id,
            role: "admin".to_string(),
            full_name: Some("Jefa".to_string()),
        },
    )
    .await
    .unwrap();

    assert!(ProfileRepo::exists_with_role(&pool, "admin").await.unwrap());
    let profile = ProfileRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(profile.role, "admin");

    let bad_role = UserRepo::create(
        &pool,
        &CreateUser {
            email: "otro@paellas.test".to_string(),
            password_hash: "hash".to_string(),
        },
    )
    .await
    .unwrap();
    let result = ProfileRepo::create(
        &pool,
        &CreateProfile {
            id: bad_role.id,
            role: "chef".to_string(),
            full_name: None,
        },
    )
    .await;
    assert!(result.is_err(), "role check constraint must reject 'chef'");
}
