use crate::{
    auth::jwt::{generate_session_token, verify_token},
    config::Config,
    session::SessionStore,
};
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "annielyn")]
    pub username: String,
    #[schema(example = "secret")]
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Login handler. Both fields must be non-empty, but NO credential
/// verification is performed: any non-empty pair opens a session.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session opened", body = LoginResponse),
        (status = 400, description = "Empty username or password")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(store, config, user),
    fields(username = %user.username)
)]
pub async fn login(
    user: web::Json<LoginRequest>,
    store: web::Data<SessionStore>,
    config: web::Data<Config>,
) -> impl Responder {
    info!("Login request received");

    if user.username.trim().is_empty() || user.password.trim().is_empty() {
        info!("Validation failed: empty username or password");
        return HttpResponse::BadRequest().body("Username or password required");
    }

    debug!("Opening session");

    let username = user.username.trim();
    let session_id = store.create(username).await;

    debug!(%session_id, "Generating access token");

    let access_token = generate_session_token(
        username,
        &session_id,
        &config.jwt_secret,
        config.access_token_ttl,
    );

    info!("Login successful");

    HttpResponse::Ok().json(LoginResponse { access_token })
}

/// Logout handler. Invalidates the server-side session named by the
/// bearer token; always answers 204, even for missing or bad tokens.
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 204, description = "Session invalidated (idempotent)")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn logout(
    req: HttpRequest,
    store: web::Data<SessionStore>,
    config: web::Data<Config>,
) -> impl Responder {
    let header = match req.headers().get("Authorization") {
        Some(h) => h.to_str().unwrap_or(""),
        None => return HttpResponse::NoContent().finish(),
    };

    let token = match header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return HttpResponse::NoContent().finish(),
    };

    let claims = match verify_token(token, &config.jwt_secret) {
        Ok(c) => c,
        Err(_) => return HttpResponse::NoContent().finish(),
    };

    if let Some(session) = store.get(&claims.sid).await {
        info!(
            session_id = %claims.sid,
            username = %session.username,
            logged_in_at = %session.logged_in_at,
            "Session invalidated"
        );
    }
    store.invalidate(&claims.sid).await;

    // 204 even if the session was already gone
    HttpResponse::NoContent().finish()
}
