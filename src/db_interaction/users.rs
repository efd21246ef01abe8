use std::{error::Error, fmt::Debug};

use anyhow::Context;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl};
use thiserror::Error;

use crate::{models::User, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

// Function to query a user by email
pub async fn get_user_from_email(
    mut conn: DbConnection,
    email: String
) -> Result<Option<User>, anyhow::Error> {
    let res = spawn_blocking_with_tracing(move || {
        use crate::schema::users;

        users::table
            .filter(users::email.eq(email))
            .first::<User>(&mut conn)
            .optional()
            .context("Failed to query user by email")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

// Error associated with inserting a user into the users table
#[derive(Error)]
pub enum UserInsertError{
    #[error("email field is not unique")]
    EmailNotUnique(#[source] anyhow::Error),
    #[error("unexpected database error occured")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for UserInsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Inserting user into the database",
    skip_all
)]
pub async fn insert_user(
    mut conn: DbConnection,
    user: User
) -> Result<(), UserInsertError> {

    spawn_blocking_with_tracing(move || {
        use crate::schema::users;

        diesel::insert_into(users::table)
            .values(user)
            .execute(&mut conn)
            .map_err(|e| {
                match e {
                    diesel::result::Error::DatabaseError(
                        diesel::result::DatabaseErrorKind::UniqueViolation,
                        info
                    ) => UserInsertError::EmailNotUnique(anyhow::anyhow!(info.message().to_string())),

                    other => UserInsertError::UnexpectedError(
                        anyhow::Error::from(other).context("Failed to insert user")
                    )
                }
            })
    })
    .await
    .context("Failed due to threadpool error")
    .map_err(UserInsertError::UnexpectedError)??;

    Ok(())
}
