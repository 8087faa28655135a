//! Per-screen state models.
//!
//! DESIGN
//! ======
//! State is split by component (`create_post`, `register`, `marker`, etc.)
//! so a front end can hold exactly the models it renders. Async flows take
//! `&mut self`, which keeps one interaction in flight per model.

pub mod create_post;
pub mod layout;
pub mod login;
pub mod marker;
pub mod nearby;
pub mod register;

#[cfg(test)]
pub(crate) mod test_helpers;
