use actix_web::{error::{ErrorBadRequest, ErrorInternalServerError}, web, HttpResponse};
use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    db_interaction::{insert_user, users::UserInsertError},
    domain::user_email::UserEmail,
    models::User,
    password::compute_password_hash,
    telemetry::spawn_blocking_with_tracing,
    utils::{get_pooled_connection, DbPool},
};

#[derive(Deserialize, Debug)]
pub struct RegistrationForm{
    pub email: String,
    pub name: String,
    pub password: SecretString,
    pub confirm_password: SecretString
}

#[tracing::instrument(
    "Registering user",
    skip(pool, form)
)]
pub async fn register(
    pool: web::Data<DbPool>,
    form: web::Form<RegistrationForm>
) -> Result<HttpResponse, actix_web::Error> {
    let form = form.into_inner();

    if form.password.expose_secret() != form.confirm_password.expose_secret(){
        return Err(ErrorBadRequest("the password and confirm passwords don't match"))
    }

    let email = UserEmail::parse(form.email)
        .map_err(ErrorBadRequest)?;

    let password = form.password;
    let password_hash = spawn_blocking_with_tracing(move || {
        compute_password_hash(password)
    })
    .await
    .context("Failed due to threadpool error")
    .map_err(ErrorInternalServerError)?
    .map_err(ErrorInternalServerError)?;

    let user = User{
        user_id: Uuid::new_v4(),
        name: form.name,
        email: email.0,
        password: password_hash.expose_secret().to_string()
    };

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    insert_user(conn, user)
        .await
        .map_err(|e| match e {
            UserInsertError::EmailNotUnique(_) => ErrorBadRequest(e),
            other => ErrorInternalServerError(other)
        })?;

    Ok(HttpResponse::Ok().finish())
}
