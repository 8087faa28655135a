//! # client
//!
//! UI-independent core of the Around social map front end.
//!
//! Each screen of the app is a plain state model in [`state`]: the
//! create-post modal, the registration and login forms, the nearby-post
//! list with its marker popups, and the top-level layout. Models receive
//! their collaborators explicitly (an [`net::Api`], a
//! [`session::SessionProvider`], a [`notify::Notifier`], a
//! [`nav::Navigator`]) so any front end (the `cli` crate, a WASM shell,
//! tests) can drive them.

pub mod config;
pub mod form;
pub mod geo;
pub mod nav;
pub mod net;
pub mod notify;
pub mod session;
pub mod state;
pub mod storage;
