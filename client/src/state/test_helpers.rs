//! Shared mocks for state-model tests.

use std::sync::Mutex;

use wire::{Credentials, Location, Post, SearchQuery};

use crate::nav::{Navigator, Route};
use crate::net::{Api, ApiError, ImageFile, NewPost};
use crate::notify::{Level, Notifier};
use crate::session::Session;
use crate::storage::MemoryStorage;

/// Scripted [`Api`]: every call succeeds unless `fail_status` is set, and
/// every call is recorded.
#[derive(Default)]
pub struct MockApi {
    pub fail_status: Option<u16>,
    pub token: String,
    pub posts: Vec<Post>,
    pub signups: Mutex<Vec<Credentials>>,
    pub logins: Mutex<Vec<Credentials>>,
    pub created: Mutex<Vec<(String, NewPost)>>,
    pub searches: Mutex<Vec<(String, SearchQuery)>>,
}

impl MockApi {
    pub fn ok() -> Self {
        Self { token: "tok-123".into(), ..Self::default() }
    }

    pub fn failing(status: u16) -> Self {
        Self { fail_status: Some(status), ..Self::default() }
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self { posts, ..Self::ok() }
    }

    fn outcome(&self) -> Result<(), ApiError> {
        match self.fail_status {
            Some(status) => Err(ApiError::Status { status, body: "boom".into() }),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl Api for MockApi {
    async fn signup(&self, credentials: &Credentials) -> Result<String, ApiError> {
        self.signups.lock().unwrap().push(credentials.clone());
        self.outcome().map(|()| "User added successfully.".to_owned())
    }

    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        self.logins.lock().unwrap().push(credentials.clone());
        self.outcome().map(|()| self.token.clone())
    }

    async fn create_post(&self, token: &str, post: NewPost) -> Result<(), ApiError> {
        self.created.lock().unwrap().push((token.to_owned(), post));
        self.outcome()
    }

    async fn search(&self, token: &str, query: SearchQuery) -> Result<Vec<Post>, ApiError> {
        self.searches.lock().unwrap().push((token.to_owned(), query));
        self.outcome().map(|()| self.posts.clone())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub events: Vec<(Level, String)>,
}

impl RecordingNotifier {
    pub fn count(&self, level: Level) -> usize {
        self.events.iter().filter(|(l, _)| *l == level).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, level: Level, message: &str) {
        self.events.push((level, message.to_owned()));
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: Vec<Route>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, route: Route) {
        self.routes.push(route);
    }
}

pub fn session_with(token: Option<&str>, position: Option<Location>) -> Session<MemoryStorage> {
    let mut session = Session::new(MemoryStorage::new());
    if let Some(token) = token {
        session.set_token(token).unwrap();
    }
    if let Some(position) = position {
        session.set_position(position).unwrap();
    }
    session
}

pub fn image() -> ImageFile {
    ImageFile { file_name: "pier.png".into(), content_type: "image/png".into(), bytes: vec![0x89, b'P', b'N', b'G'] }
}

pub fn post(user: &str, lat: f64, lon: f64) -> Post {
    Post {
        user: user.to_owned(),
        message: format!("hello from {user}"),
        url: format!("http://localhost:8080/images/{user}.png"),
        location: Location { lat, lon },
    }
}
