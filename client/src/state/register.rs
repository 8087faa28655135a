//! Registration form.
//!
//! `confirm` is checked against `password`. Once the confirm box has been
//! left with a value in it (`confirm_dirty`), editing the password
//! re-validates `confirm` too, so a stale mismatch error never lingers.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use tracing::{info, warn};
use wire::Credentials;

use crate::form::{FormSchema, Validation, filled};
use crate::nav::{Navigator, Route};
use crate::net::Api;
use crate::notify::Notifier;

pub const SUCCESS_MESSAGE: &str = "Registration Succeed";
pub const FAILURE_MESSAGE: &str = "Registration Failed";
pub const MISMATCH_MESSAGE: &str = "Two passwords that you enter is inconsistent!";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm: String,
}

fn schema() -> FormSchema<RegisterForm> {
    FormSchema::<RegisterForm>::new()
        .rule("username", "Please input your username!", |f| filled(&f.username))
        .rule("password", "Please input your password!", |f| filled(&f.password))
        .rule("confirm", "Please confirm your password!", |f| filled(&f.confirm))
        .rule("confirm", MISMATCH_MESSAGE, |f| f.confirm == f.password)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterOutcome {
    Invalid,
    Registered,
    Failed,
}

#[derive(Clone, Debug, Default)]
pub struct RegisterState {
    pub form: RegisterForm,
    pub errors: Validation,
    pub confirm_dirty: bool,
}

impl RegisterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.form.username = username.into();
        self.revalidate(&["username"]);
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = password.into();
        if filled(&self.form.password) && self.confirm_dirty {
            self.revalidate(&["password", "confirm"]);
        } else {
            self.revalidate(&["password"]);
        }
    }

    pub fn set_confirm(&mut self, confirm: impl Into<String>) {
        self.form.confirm = confirm.into();
        self.revalidate(&["confirm"]);
    }

    /// Focus left the confirm box.
    pub fn confirm_blur(&mut self) {
        self.confirm_dirty = self.confirm_dirty || filled(&self.form.confirm);
    }

    fn revalidate(&mut self, fields: &[&str]) {
        let fresh = schema().validate_fields(&self.form, fields);
        self.errors.apply(fields, fresh);
    }

    /// Validate everything and, if clean, sign up. On success navigates to
    /// the login route exactly once.
    pub async fn submit<A, N, V>(&mut self, api: &A, notifier: &mut N, navigator: &mut V) -> RegisterOutcome
    where
        A: Api + ?Sized,
        N: Notifier + ?Sized,
        V: Navigator + ?Sized,
    {
        self.errors = schema().validate(&self.form);
        if !self.errors.is_valid() {
            return RegisterOutcome::Invalid;
        }

        let credentials = Credentials { username: self.form.username.clone(), password: self.form.password.clone() };
        match api.signup(&credentials).await {
            Ok(body) => {
                info!(username = %credentials.username, response = %body.trim(), "signup succeeded");
                notifier.success(SUCCESS_MESSAGE);
                navigator.navigate(Route::Login);
                RegisterOutcome::Registered
            }
            Err(e) => {
                warn!(username = %credentials.username, error = %e, "signup failed");
                notifier.error(FAILURE_MESSAGE);
                RegisterOutcome::Failed
            }
        }
    }
}
