use actix_web::{error::{ErrorBadRequest, ErrorInternalServerError, ErrorUnauthorized}, web, HttpResponse};
use anyhow::Context;
use secrecy::SecretString;
use serde::Deserialize;

use crate::{
    db_interaction::get_user_from_email,
    domain::user_email::UserEmail,
    password::verify_password,
    session_state::TypedSession,
    utils::{get_pooled_connection, DbPool},
};

#[derive(Deserialize, Debug)]
pub struct LoginForm{
    pub email: String,
    pub password: SecretString
}

#[tracing::instrument(
    "Logging in user",
    skip(pool, session)
)]
pub async fn login(
    pool: web::Data<DbPool>,
    form: web::Form<LoginForm>,
    session: TypedSession
) -> Result<HttpResponse, actix_web::Error>{
    let email = UserEmail::parse(form.0.email)
                    .map_err(ErrorBadRequest)?;

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let user = match get_user_from_email(conn, email.0).await
                        .map_err(ErrorInternalServerError)?{
        Some(user) => user,
        None => return Err(ErrorUnauthorized("Email or password is incorrect"))
    };

    let verified = verify_password(form.0.password, user.password.clone())
        .await
        .map_err(ErrorInternalServerError)?;

    if !verified {
        tracing::info!("Passwords did not match");
        return Err(ErrorUnauthorized("Email or password is incorrect"))
    }

    session.renew();
    session.insert_user_id(user.user_id)
        .context("Failed to insert associated user_id to session")
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().body("Successfully logged in"))
}
