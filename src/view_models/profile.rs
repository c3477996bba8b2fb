//! Profile page: the signed-in member's details and the edit form.

use std::sync::Arc;

use super::state::{MutationOutcome, Notice, ViewError, ViewHandle, ViewState};
use crate::api::models::{Profile, ProfileUpdate};
use crate::traits::LibraryApi;

pub const LOAD_FAILED: &str = "Failed to load profile";
pub const UPDATE_FAILED: &str = "Update failed";
pub const UPDATED: &str = "Profile updated";

/// Editable copy of the profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub username: String,
    /// Write-only; blank means "keep the current password".
    pub password: String,
}

impl ProfileForm {
    fn from_profile(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            username: profile.username.clone(),
            password: String::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.name.is_empty()
            && self.email.is_empty()
            && self.username.is_empty()
            && self.password.is_empty()
    }

    fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            name: self.name.clone(),
            email: self.email.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

pub struct ProfileViewModel<A: LibraryApi> {
    api: Arc<A>,
    handle: ViewHandle,
    state: ViewState<Profile>,
    form: ProfileForm,
    error: Option<ViewError>,
    notice: Option<Notice>,
}

impl<A: LibraryApi> ProfileViewModel<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            handle: ViewHandle::new(),
            state: ViewState::Idle,
            form: ProfileForm::default(),
            error: None,
            notice: None,
        }
    }

    pub fn state(&self) -> &ViewState<Profile> {
        &self.state
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.state.snapshot()
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProfileForm {
        &mut self.form
    }

    pub fn error(&self) -> Option<&ViewError> {
        self.error.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn handle(&self) -> ViewHandle {
        self.handle.clone()
    }

    /// Fetch the profile and reset the form from it. On failure the form is
    /// left blank.
    pub async fn load(&mut self) {
        if !self.handle.is_active() {
            return;
        }
        self.state = ViewState::Loading;
        let result = self.api.my_profile().await;
        if !self.handle.is_active() {
            tracing::debug!("Profile view torn down, dropping response");
            return;
        }
        self.form = match &result {
            Ok(profile) => ProfileForm::from_profile(profile),
            Err(e) => {
                tracing::warn!("Loading profile failed: {}", e);
                ProfileForm::default()
            }
        };
        self.state = ViewState::settle(result, LOAD_FAILED);
    }

    /// PUT /api/members/me with the form contents, then re-fetch.
    ///
    /// A failure keeps what the user typed.
    pub async fn update(&mut self) -> MutationOutcome {
        if !self.handle.is_active() {
            return MutationOutcome::Ignored;
        }
        let Some(_in_flight) = self.handle.try_begin() else {
            return MutationOutcome::Busy;
        };

        let update = self.form.to_update();
        let result = self.api.update_profile(&update).await;
        if !self.handle.is_active() {
            return MutationOutcome::Ignored;
        }

        match result {
            Ok(()) => {
                tracing::info!("Profile updated");
                self.error = None;
                self.notice = Some(Notice::Success(UPDATED.to_string()));
                self.form.password.clear();
                self.load().await;
                MutationOutcome::Applied
            }
            Err(e) => {
                tracing::warn!("Profile update failed: {}", e);
                let error = ViewError::from_api(&e, UPDATE_FAILED);
                self.error = Some(error.clone());
                self.notice = Some(Notice::Failure(error.message.clone()));
                MutationOutcome::Failed(error)
            }
        }
    }
}
