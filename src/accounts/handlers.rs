use axum::{extract::State, http::StatusCode, routing::post, Router};
use tracing::{info, instrument, warn};

use crate::{
    accounts::{
        dto::CreateAccountRequest, error::AccountError, extractors::ValidatedJson, password,
        repo::UserStore,
    },
    state::AppState,
};

pub fn account_routes() -> Router<AppState> {
    Router::new().route("/accounts", post(create_account))
}

/// `POST /accounts` — create a user account.
///
/// Succeeds with `201 Created` and an empty body. The password is stored
/// only as a bcrypt hash.
#[instrument(skip(state, payload))]
pub async fn create_account(
    State(state): State<AppState>,
    ValidatedJson(mut payload): ValidatedJson<CreateAccountRequest>,
) -> Result<StatusCode, AccountError> {
    payload.email = payload.email.trim().to_lowercase();

    // Fast path only; the unique index on users.email decides races.
    if state.store.find_by_email(&payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(AccountError::EmailTaken);
    }

    let cost = state.config.bcrypt_cost;
    let plain = payload.password;
    // bcrypt is CPU-bound; keep it off the async workers.
    let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&plain, cost))
        .await
        .map_err(anyhow::Error::from)??;

    let user = state
        .store
        .insert_user(&payload.name, &payload.email, &password_hash)
        .await?;

    info!(user_id = %user.id, email = %user.email, "account created");
    Ok(StatusCode::CREATED)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, password: &str) -> CreateAccountRequest {
        CreateAccountRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    async fn create(state: &AppState, req: CreateAccountRequest) -> Result<StatusCode, AccountError> {
        create_account(State(state.clone()), ValidatedJson(req)).await
    }

    #[tokio::test]
    async fn creates_account_with_hashed_password() {
        let state = AppState::fake();

        let status = create(&state, request("Ada Lovelace", "ada@example.com", "s3cret"))
            .await
            .expect("create should succeed");
        assert_eq!(status, StatusCode::CREATED);

        let user = state
            .store
            .find_by_email("ada@example.com")
            .await
            .unwrap()
            .expect("user should be stored");
        assert_eq!(user.name, "Ada Lovelace");
        assert_ne!(user.password_hash, "s3cret");
        assert!(password::verify_password("s3cret", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_and_keeps_first_record() {
        let state = AppState::fake();

        create(&state, request("Ada Lovelace", "ada@example.com", "s3cret"))
            .await
            .expect("first create should succeed");

        let err = create(&state, request("Ada Again", "ada@example.com", "other"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::EmailTaken));

        let user = state
            .store
            .find_by_email("ada@example.com")
            .await
            .unwrap()
            .expect("user should still exist");
        assert_eq!(user.name, "Ada Lovelace");
        assert!(password::verify_password("s3cret", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn email_is_normalized_before_lookup_and_insert() {
        let state = AppState::fake();

        create(&state, request("Ada Lovelace", "  Ada@Example.COM ", "s3cret"))
            .await
            .expect("create should succeed");

        let user = state
            .store
            .find_by_email("ada@example.com")
            .await
            .unwrap()
            .expect("stored under normalized email");
        assert_eq!(user.email, "ada@example.com");

        let err = create(&state, request("Ada Again", "ADA@example.com", "other"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::EmailTaken));
    }

    #[tokio::test]
    async fn empty_password_is_accepted() {
        let state = AppState::fake();

        let status = create(&state, request("Ada Lovelace", "ada@example.com", ""))
            .await
            .expect("create should succeed");
        assert_eq!(status, StatusCode::CREATED);

        let user = state
            .store
            .find_by_email("ada@example.com")
            .await
            .unwrap()
            .expect("user should be stored");
        assert!(!user.password_hash.is_empty());
        assert!(password::verify_password("", &user.password_hash).unwrap());
    }
}
