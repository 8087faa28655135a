//! Login form: credentials in, session token stored on success.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use tracing::{info, warn};
use wire::Credentials;

use crate::form::{FormSchema, Validation, filled};
use crate::nav::{Navigator, Route};
use crate::net::Api;
use crate::notify::Notifier;
use crate::session::{Session, SessionError};
use crate::storage::Storage;

pub const SUCCESS_MESSAGE: &str = "Login succeed";
pub const FAILURE_MESSAGE: &str = "Login failed";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

fn schema() -> FormSchema<LoginForm> {
    FormSchema::<LoginForm>::new()
        .rule("username", "Please input your username!", |f| filled(&f.username))
        .rule("password", "Please input your password!", |f| filled(&f.password))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Invalid,
    LoggedIn,
    Failed,
}

/// Login form. A successful login stores the issued token in the session.
#[derive(Clone, Debug, Default)]
pub struct LoginState {
    pub form: LoginForm,
    pub errors: Validation,
}

impl LoginState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.form.username = username.into();
        let fresh = schema().validate_fields(&self.form, &["username"]);
        self.errors.apply(&["username"], fresh);
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = password.into();
        let fresh = schema().validate_fields(&self.form, &["password"]);
        self.errors.apply(&["password"], fresh);
    }

    /// # Errors
    ///
    /// Returns an error only if the token cannot be written to storage.
    pub async fn submit<A, S, N, V>(
        &mut self,
        api: &A,
        session: &mut Session<S>,
        notifier: &mut N,
        navigator: &mut V,
    ) -> Result<LoginOutcome, SessionError>
    where
        A: Api + ?Sized,
        S: Storage,
        N: Notifier + ?Sized,
        V: Navigator + ?Sized,
    {
        self.errors = schema().validate(&self.form);
        if !self.errors.is_valid() {
            return Ok(LoginOutcome::Invalid);
        }

        let credentials = Credentials { username: self.form.username.clone(), password: self.form.password.clone() };
        match api.login(&credentials).await {
            Ok(token) if !token.is_empty() => {
                session.set_token(&token)?;
                info!(username = %credentials.username, "login succeeded");
                self.form.password.clear();
                notifier.success(SUCCESS_MESSAGE);
                navigator.navigate(Route::Home);
                Ok(LoginOutcome::LoggedIn)
            }
            Ok(_) => {
                warn!(username = %credentials.username, "login returned an empty token");
                notifier.error(FAILURE_MESSAGE);
                Ok(LoginOutcome::Failed)
            }
            Err(e) => {
                warn!(username = %credentials.username, error = %e, "login failed");
                notifier.error(FAILURE_MESSAGE);
                Ok(LoginOutcome::Failed)
            }
        }
    }
}
