//! Top-level layout: a top bar over the main content area.
//!
//! `Main` shows one page per route. Auth gates the routes: signed-in users
//! never see the login/register pages, anonymous users never see home.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use tracing::info;

use crate::nav::{Navigator, Route};
use crate::session::{Session, SessionError};
use crate::storage::Storage;

pub const TITLE: &str = "Around";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TopBar {
    pub title: &'static str,
    pub show_logout: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub top_bar: TopBar,
    pub main: Route,
}

/// Route `Main` renders when `requested` is asked for.
#[must_use]
pub fn resolve(requested: Option<Route>, logged_in: bool) -> Route {
    match (requested, logged_in) {
        (_, true) => Route::Home,
        (Some(Route::Register), false) => Route::Register,
        (_, false) => Route::Login,
    }
}

impl Layout {
    #[must_use]
    pub fn compose(path: &str, logged_in: bool) -> Self {
        Self {
            top_bar: TopBar { title: TITLE, show_logout: logged_in },
            main: resolve(Route::from_path(path), logged_in),
        }
    }
}

/// Top-bar logout: forget the token and go to the login page.
///
/// # Errors
///
/// Returns an error if the token cannot be removed from storage.
pub fn logout<S, V>(session: &mut Session<S>, navigator: &mut V) -> Result<(), SessionError>
where
    S: Storage,
    V: Navigator + ?Sized,
{
    session.clear_token()?;
    info!("logged out");
    navigator.navigate(Route::Login);
    Ok(())
}
