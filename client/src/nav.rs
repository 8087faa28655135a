//! Client routes and the navigation seam.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Home,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Home => "/home",
        }
    }

    /// Parse a path; a trailing slash is ignored.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "/login" => Some(Self::Login),
            "/register" => Some(Self::Register),
            "/home" => Some(Self::Home),
            _ => None,
        }
    }
}

/// Something that can move the user to another route (a router history in
/// a browser shell).
pub trait Navigator {
    fn navigate(&mut self, route: Route);
}
