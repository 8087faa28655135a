//! Map marker with a hover popup showing the post image and caption.

#[cfg(test)]
#[path = "marker_test.rs"]
mod marker_test;

use wire::{Location, Post};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PopupState {
    #[default]
    Closed,
    Open,
}

/// Contents of an open info popup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopupInfo<'a> {
    pub image_url: &'a str,
    pub alt: &'a str,
    pub caption: String,
}

/// A post pinned on the map with its hover popup.
///
/// Transitions: `Closed -> Open` on hover-enter, `Open -> Closed` on
/// hover-exit or close. Everything else is ignored.
#[derive(Clone, Debug)]
pub struct MarkerPopup {
    post: Post,
    state: PopupState,
}

impl MarkerPopup {
    #[must_use]
    pub fn new(post: Post) -> Self {
        Self { post, state: PopupState::Closed }
    }

    #[must_use]
    pub fn post(&self) -> &Post {
        &self.post
    }

    #[must_use]
    pub fn position(&self) -> Location {
        self.post.location
    }

    #[must_use]
    pub fn state(&self) -> PopupState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == PopupState::Open
    }

    /// Returns whether the popup changed state.
    pub fn hover_enter(&mut self) -> bool {
        self.transition(PopupState::Closed, PopupState::Open)
    }

    /// Returns whether the popup changed state.
    pub fn hover_exit(&mut self) -> bool {
        self.transition(PopupState::Open, PopupState::Closed)
    }

    /// Close button on the popup. Returns whether the popup changed state.
    pub fn close(&mut self) -> bool {
        self.transition(PopupState::Open, PopupState::Closed)
    }

    /// Popup contents, only while open.
    #[must_use]
    pub fn info(&self) -> Option<PopupInfo<'_>> {
        self.is_open().then(|| PopupInfo {
            image_url: &self.post.url,
            alt: &self.post.message,
            caption: self.post.caption(),
        })
    }

    fn transition(&mut self, from: PopupState, to: PopupState) -> bool {
        if self.state != from {
            return false;
        }
        self.state = to;
        true
    }
}
