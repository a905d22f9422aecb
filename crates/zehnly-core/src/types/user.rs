use serde::{Deserialize, Serialize};

/// The signed-in console operator.
///
/// This is the value the session store persists between runs; it is not a
/// full account record, just enough to label the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub email: String,
    pub role: String,
}

impl AdminUser {
    pub fn new(id: i64, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            role: role.into(),
        }
    }
}
