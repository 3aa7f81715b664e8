use crate::{
    auth::{LoginRequest, PasswordVault, RegisterRequest, SessionAuth, TokenResponse},
    error::AppError,
    store::UserStore,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// 401 body when registering an email that already has an account.
pub const MSG_EMAIL_IN_USE: &str = "Email is already in use";

/// 401 body for a failed login. A missing account and a wrong password are
/// deliberately the same message.
pub const MSG_BAD_CREDENTIALS: &str = "Email or password is incorrect";

/// Register a new user
///
/// Protects the password through the vault and persists the resulting stored
/// secret. The vault work is deliberately slow, so it runs on the blocking
/// pool instead of an async worker.
#[post("/register")]
pub async fn register(
    users: web::Data<UserStore>,
    vault: web::Data<PasswordVault>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let existing_user = users.find_by_email(&register_data.email).await?;
    if existing_user.is_some() {
        return Err(AppError::Unauthorized(MSG_EMAIL_IN_USE.into()));
    }

    let vault = vault.get_ref().clone();
    let password = register_data.password.clone();
    let stored_secret = web::block(move || vault.protect(&password)).await??;

    users
        .create(&register_data.email, &register_data.name, &stored_secret)
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "User created successfully"
    })))
}

/// Login user
///
/// Verifies the candidate password against the stored secret and issues a
/// one-hour session token on success.
#[post("/login")]
pub async fn login(
    users: web::Data<UserStore>,
    vault: web::Data<PasswordVault>,
    session: web::Data<SessionAuth>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let user = match users.find_by_email(&login_data.email).await? {
        Some(user) => user,
        None => return Err(AppError::Unauthorized(MSG_BAD_CREDENTIALS.into())),
    };

    let vault = vault.get_ref().clone();
    let password = login_data.password.clone();
    let stored_secret = user.password.clone();
    let valid_password =
        web::block(move || vault.verify(&password, Some(&stored_secret))).await??;

    if !valid_password {
        return Err(AppError::Unauthorized(MSG_BAD_CREDENTIALS.into()));
    }

    let token = session.issue(user.id)?;

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
