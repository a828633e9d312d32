use crate::contract::model::{Role, SessionUser};

/// The signed-in user, if any.
///
/// Owned by whoever dispatches commands and handed to each auth operation;
/// there is no process-wide current user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<SessionUser>,
}

impl Session {
    /// A session with nobody signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub(crate) fn signed_in(user: SessionUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_seller(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role == Role::Seller)
    }

    pub(crate) fn set(&mut self, user: SessionUser) {
        self.user = Some(user);
    }

    pub(crate) fn clear(&mut self) {
        self.user = None;
    }
}
