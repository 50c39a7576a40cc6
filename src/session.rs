use crate::constants::{DEFAULT_BUDGET, DEFAULT_COLOR_PALETTE, DEFAULT_SPACE_TYPE, DEFAULT_STORES};
use crate::design::{DesignResult, Location};
use std::path::{Path, PathBuf};

/// The four display states of the client. Only an explicit [`Session::reset`]
/// leaves `Result` or `Error`.
#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Idle,
    Loading,
    Result(DesignResult),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageInput {
    pub path: PathBuf,
    pub mime_type: String,
}

/// Everything the user has entered plus where the request currently stands.
/// Rendering reads this; it never drives transitions itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    state: AppState,
    inline_error: Option<String>,
    pub image: Option<ImageInput>,
    pub budget: f64,
    pub space_type: String,
    pub color_palette: String,
    pub preferred_stores: Vec<String>,
    pub location: Option<Location>,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            state: AppState::Idle,
            inline_error: None,
            image: None,
            budget: DEFAULT_BUDGET,
            space_type: DEFAULT_SPACE_TYPE.to_string(),
            color_palette: DEFAULT_COLOR_PALETTE.to_string(),
            preferred_stores: DEFAULT_STORES.iter().map(|s| s.to_string()).collect(),
            location: None,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Validation message shown inline while still in `Idle`.
    pub fn inline_error(&self) -> Option<&str> {
        self.inline_error.as_deref()
    }

    pub fn attach_image(&mut self, path: &Path, mime_type: &str) {
        self.image = Some(ImageInput {
            path: path.to_path_buf(),
            mime_type: mime_type.to_string(),
        });
        self.inline_error = None;
    }

    /// Gate into `Loading`. A missing image or non-positive budget blocks the
    /// submission: the session stays `Idle` with an inline message and no
    /// request may be sent.
    pub fn begin(&mut self) -> bool {
        if self.image.is_none() || self.budget <= 0.0 {
            self.inline_error = Some("Please provide an image and set a valid budget.".to_string());
            return false;
        }
        self.inline_error = None;
        self.state = AppState::Loading;
        true
    }

    pub fn complete(&mut self, result: DesignResult) {
        self.state = AppState::Result(result);
    }

    pub fn fail(&mut self, message: String) {
        self.state = AppState::Error(message);
    }

    /// Back to `Idle`: clears the image and any result or error, and restores
    /// every preference to its default.
    pub fn reset(&mut self) {
        *self = Session::default();
    }
}
