use serde::{Deserialize, Serialize};
use zehnly_core::AdminUser;

/// The console's view of the login session.
///
/// `is_authenticated` is true exactly when a user was written by a
/// successful login and no 401 has been observed since.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Session {
    pub user: Option<AdminUser>,
    pub is_authenticated: bool,
}

impl Session {
    /// A session with nobody signed in
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// A session for a freshly logged-in user
    pub fn authenticated(user: AdminUser) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_out_default() {
        let session = Session::signed_out();
        assert!(session.user.is_none());
        assert!(!session.is_authenticated);
    }
}
