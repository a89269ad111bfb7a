use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::router::AppState;

/// Extension type carrying the user resolved from the bearer token
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Middleware that validates bearer tokens and adds the resolved user to
/// request extensions.
///
/// Every rejection, whether the header is missing or the token fails any
/// check, produces the same 401 response.
pub async fn require_bearer<R>(
    State(state): State<AppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    R: UserRepository,
{
    let Some(token) = bearer_token(&req).map(str::to_owned) else {
        tracing::debug!("Missing or malformed Authorization header");
        return Err(auth::AuthenticationError.into());
    };

    let user = state.authenticator.validate_token(&token).await?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

/// Token from an `Authorization: Bearer <token>` header. The scheme name is
/// matched case-insensitively.
fn bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
