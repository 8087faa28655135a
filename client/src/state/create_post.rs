//! Create-post modal: form, loading gate, and the submission flow.
//!
//! FLOW
//! ====
//! validate form -> read cached position + token -> jitter coordinates ->
//! multipart `POST /post` -> on success reset + close + reload nearby posts
//! + success toast; on failure stay open + error toast.
//!
//! A missing position or token is a caller error ([`SubmitError`]); it is
//! returned before any state changes and without a notification.

#[cfg(test)]
#[path = "create_post_test.rs"]
mod create_post_test;

use std::fmt::Display;

use rand::Rng;
use tracing::{info, warn};

use crate::config::LOC_SHAKE;
use crate::form::{FormSchema, Validation, filled};
use crate::geo::jitter_location;
use crate::net::{Api, ImageFile, NewPost};
use crate::notify::Notifier;
use crate::session::{SessionError, SessionProvider};

pub const SUCCESS_MESSAGE: &str = "Post created successfully!";
pub const FAILURE_MESSAGE: &str = "Failed to create the post.";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PostForm {
    pub message: String,
    pub images: Vec<ImageFile>,
}

fn schema() -> FormSchema<PostForm> {
    FormSchema::<PostForm>::new()
        .rule("message", "Please input a message.", |f| filled(&f.message))
        .rule("image", "Please select an image.", |f| f.images.len() == 1)
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight; nothing happened.
    Busy,
    /// The form failed validation; see [`CreatePostState::errors`].
    Invalid,
    Created,
    Failed,
}

#[derive(Clone, Debug)]
pub struct CreatePostState {
    pub visible: bool,
    pub confirm_loading: bool,
    pub form: PostForm,
    pub errors: Validation,
    loc_shake: f64,
}

impl Default for CreatePostState {
    fn default() -> Self {
        Self::new(LOC_SHAKE)
    }
}

impl CreatePostState {
    /// New closed modal jittering coordinates by up to `loc_shake` degrees.
    #[must_use]
    pub fn new(loc_shake: f64) -> Self {
        Self { visible: false, confirm_loading: false, form: PostForm::default(), errors: Validation::default(), loc_shake }
    }

    pub fn show_modal(&mut self) {
        self.visible = true;
    }

    /// Close without submitting. Form contents are kept.
    pub fn cancel(&mut self) {
        self.visible = false;
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.form.message = message.into();
        let fresh = schema().validate_fields(&self.form, &["message"]);
        self.errors.apply(&["message"], fresh);
    }

    /// Attach the image, replacing any previous one.
    pub fn set_image(&mut self, image: ImageFile) {
        self.form.images = vec![image];
        let fresh = schema().validate_fields(&self.form, &["image"]);
        self.errors.apply(&["image"], fresh);
    }

    pub fn reset_fields(&mut self) {
        self.form = PostForm::default();
        self.errors = Validation::default();
    }

    /// Run the submission flow.
    ///
    /// `reload` refreshes the nearby post list after a successful create;
    /// its failure is reported like a failed create.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] when the session has no cached position or
    /// no token. No request is made in that case.
    pub async fn submit<A, P, N, R, F, Fut, E>(
        &mut self,
        api: &A,
        session: &P,
        notifier: &mut N,
        rng: &mut R,
        reload: F,
    ) -> Result<SubmitOutcome, SubmitError>
    where
        A: Api + ?Sized,
        P: SessionProvider + ?Sized,
        N: Notifier + ?Sized,
        R: Rng + ?Sized,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Display,
    {
        if self.confirm_loading {
            return Ok(SubmitOutcome::Busy);
        }

        let validation = schema().validate(&self.form);
        if !validation.is_valid() {
            self.errors = validation;
            return Ok(SubmitOutcome::Invalid);
        }
        self.errors = validation;

        let position = session.position()?;
        let token = session.token()?;
        let Some(image) = self.form.images.first().cloned() else {
            return Ok(SubmitOutcome::Invalid);
        };

        let post = NewPost {
            location: jitter_location(position, self.loc_shake, rng),
            message: self.form.message.clone(),
            image,
        };
        info!(message = %post.message, image = %post.image.file_name, "creating post");

        self.confirm_loading = true;
        let result = match api.create_post(&token, post).await {
            Ok(()) => {
                self.reset_fields();
                self.visible = false;
                self.confirm_loading = false;
                reload().await.map_err(|e| e.to_string())
            }
            Err(e) => Err(e.to_string()),
        };

        match result {
            Ok(()) => {
                notifier.success(SUCCESS_MESSAGE);
                Ok(SubmitOutcome::Created)
            }
            Err(e) => {
                warn!(error = %e, "post creation failed");
                self.confirm_loading = false;
                notifier.error(FAILURE_MESSAGE);
                Ok(SubmitOutcome::Failed)
            }
        }
    }
}
