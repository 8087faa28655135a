//! Domain services behind the HTTP routes.

pub mod media;
pub mod posts;
pub mod session;
pub mod users;
