//! Authenticated session handed explicitly to the API client

use shared::{Role, UserProfile};

/// Bearer credential plus the profile it belongs to, once known
#[derive(Clone)]
pub struct Session {
    token: String,
    profile: Option<UserProfile>,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            profile: None,
        }
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.profile.as_ref().map(|p| p.role)
    }
}

// Keep the credential out of logs
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"***")
            .field("profile", &self.profile)
            .finish()
    }
}
