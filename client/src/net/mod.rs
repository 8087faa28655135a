//! Network access to the Around REST service.

pub mod api;

pub use api::{Api, ApiError, HttpApi, ImageFile, NewPost};
