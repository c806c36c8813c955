use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::error;
use uuid::Uuid;

use pullboard_types::api::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

use crate::state::{AppState, with_db};

const MAX_NAME_CHARS: usize = 32;

/// Register a user. Names are not unique: a second registration under an
/// existing name creates a separate account with its own uid.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let name = req.name.trim().to_string();
    if name.is_empty() || name.chars().count() > MAX_NAME_CHARS || req.password.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| {
            error!("Password hashing failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .to_string();

    let uid = Uuid::new_v4().to_string();
    let icon = req.icon;
    let new_uid = uid.clone();
    with_db(&state, move |db| {
        db.create_user(&new_uid, &name, &password_hash, icon.as_deref())
    })
    .await?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { uid })))
}

/// Check a name/password pair. With duplicate names, the oldest account
/// whose password matches wins.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let name = req.name.trim().to_string();
    let candidates = with_db(&state, move |db| db.get_users_by_name(&name)).await?;

    for user in candidates {
        let Ok(parsed) = PasswordHash::new(&user.password) else {
            error!("Corrupt password hash for user '{}'", user.uid);
            continue;
        };
        if Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed)
            .is_ok()
        {
            return Ok(Json(LoginResponse {
                uid: user.uid,
                name: user.name,
            }));
        }
    }

    Err(StatusCode::UNAUTHORIZED)
}

pub async fn names(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let names = with_db(&state, |db| db.user_names()).await?;
    Ok(Json(names))
}
