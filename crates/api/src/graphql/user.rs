//! Users, login and registration.

use async_graphql::{Context, ID, InputObject, Object, SimpleObject};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use flow_core::auth::{
    Operation, Role, hash_password, validate_new_password, verify_against_dummy, verify_password,
};
use flow_db::{RepositoryError, UserRepository};
use flow_db::entities::users;
use flow_db::repositories::NewUser;
use flow_shared::{AppError, TokenSubject};

use super::error::{GraphqlResultExt, password_error, to_graphql_error, token_error};
use super::scalars::{RoleValue, parse_id, timestamp, to_id};
use super::{db, guard, jwt};

/// A user account. The password hash never leaves the server.
pub struct User(pub users::Model);

#[Object]
impl User {
    async fn id(&self) -> ID {
        to_id(self.0.id)
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn role(&self) -> RoleValue {
        Role::from(self.0.role).into()
    }

    async fn created_at(&self) -> DateTime<Utc> {
        timestamp(self.0.created_at)
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        timestamp(self.0.updated_at)
    }
}

/// Login result.
#[derive(SimpleObject)]
pub struct AuthPayload {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The signed-in user.
    pub user: User,
}

/// Login credentials.
#[derive(InputObject)]
pub struct LoginInput {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// New user fields.
#[derive(InputObject)]
pub struct RegisterInput {
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Plain-text password.
    pub password: String,
    /// Role; STAFF when omitted.
    pub role: Option<RoleValue>,
}

fn issue_token(ctx: &Context<'_>, user: &users::Model) -> async_graphql::Result<String> {
    jwt(ctx)?
        .generate_token(TokenSubject {
            id: user.id,
            email: &user.email,
            name: &user.name,
            role: Role::from(user.role).as_str(),
        })
        .map_err(token_error)
}

/// A concurrent registration can pass the `email_exists` check and still lose
/// the insert to the unique index on `users.email`.
fn registration_error(err: RepositoryError) -> async_graphql::Error {
    if err.is_unique_violation() {
        to_graphql_error(AppError::UserExists)
    } else {
        to_graphql_error(err.into())
    }
}

/// User queries.
#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// The caller, or null when anonymous.
    async fn me(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<User>> {
        let Some(identity) = guard(ctx, Operation::Me)? else {
            return Ok(None);
        };
        let user = UserRepository::new(db(ctx)?)
            .find_by_id(identity.id)
            .await
            .gql()?;
        Ok(user.map(User))
    }

    async fn users(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<User>> {
        guard(ctx, Operation::Users)?;
        let users = UserRepository::new(db(ctx)?).list().await.gql()?;
        Ok(users.into_iter().map(User).collect())
    }

    async fn user(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<User>> {
        guard(ctx, Operation::User)?;
        let user = UserRepository::new(db(ctx)?)
            .find_by_id(parse_id(&id)?)
            .await
            .gql()?;
        Ok(user.map(User))
    }
}

/// Login and registration.
#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    /// Exchanges credentials for a token. Unknown emails and wrong passwords
    /// fail identically.
    async fn login(
        &self,
        ctx: &Context<'_>,
        input: LoginInput,
    ) -> async_graphql::Result<AuthPayload> {
        guard(ctx, Operation::Login)?;
        let repo = UserRepository::new(db(ctx)?);

        let Some(user) = repo.find_by_email(&input.email).await.gql()? else {
            verify_against_dummy(&input.password);
            warn!(email = %input.email, "Login attempt for non-existent user");
            return Err(to_graphql_error(AppError::InvalidCredentials));
        };

        if !verify_password(&input.password, &user.password_hash).map_err(password_error)? {
            warn!(user_id = %user.id, "Failed login attempt - invalid password");
            return Err(to_graphql_error(AppError::InvalidCredentials));
        }

        let token = issue_token(ctx, &user)?;
        info!(user_id = %user.id, "User logged in");

        Ok(AuthPayload {
            token,
            user: User(user),
        })
    }

    /// Creates a user and returns a token for them.
    async fn register(
        &self,
        ctx: &Context<'_>,
        input: RegisterInput,
    ) -> async_graphql::Result<AuthPayload> {
        let admin = guard(ctx, Operation::Register)?;
        let repo = UserRepository::new(db(ctx)?);

        if repo.email_exists(&input.email).await.gql()? {
            return Err(to_graphql_error(AppError::UserExists));
        }
        validate_new_password(&input.password).map_err(password_error)?;
        let password_hash = hash_password(&input.password).map_err(password_error)?;

        let role = input.role.map_or(Role::Staff, Role::from);
        let user = repo
            .create(NewUser {
                email: input.email,
                name: input.name,
                password_hash,
                role: role.into(),
            })
            .await
            .map_err(registration_error)?;

        let token = issue_token(ctx, &user)?;
        info!(
            user_id = %user.id,
            role = %role,
            registered_by = ?admin.map(|a| a.id),
            "User registered"
        );

        Ok(AuthPayload {
            token,
            user: User(user),
        })
    }
}
