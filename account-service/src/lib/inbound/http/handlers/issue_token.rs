use axum::extract::State;
use axum::Form;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::router::AppState;

/// OAuth2 password grant: exchange an email and password for a bearer token.
///
/// The response follows RFC 6749 section 5.1 and is therefore not wrapped in
/// the usual `ApiResponseBody` envelope.
pub async fn issue_token<R>(
    State(state): State<AppState<R>>,
    Form(form): Form<TokenRequestForm>,
) -> Result<Json<TokenResponseData>, ApiError>
where
    R: UserRepository,
{
    let user = state
        .authenticator
        .authenticate(&form.username, &form.password)
        .await?;

    let claims = auth::Claims::new().with_subject(user.email.as_str());

    let access_token = state
        .authenticator
        .issue_token(&claims, state.access_token_ttl)
        .map_err(|e| ApiError::InternalServerError(format!("Token generation failed: {}", e)))?;

    Ok(Json(TokenResponseData {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: state.access_token_ttl.num_seconds(),
    }))
}

/// Form fields of an OAuth2 password grant. `username` carries the email.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenRequestForm {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}
