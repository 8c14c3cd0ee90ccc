use serde::{Deserialize, Serialize};

/// The authenticated user's identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Persisted as `name`; `username` is accepted when reading
    #[serde(rename = "name", alias = "username")]
    pub username: String,
}

impl Session {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// A stored username/password pair
///
/// The password is kept and compared in plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_serializes_as_name() {
        let json = serde_json::to_string(&Session::new("ana")).unwrap();
        assert_eq!(json, r#"{"name":"ana"}"#);
    }

    #[test]
    fn test_session_accepts_username_alias() {
        let session: Session = serde_json::from_str(r#"{"username":"ana"}"#).unwrap();
        assert_eq!(session, Session::new("ana"));
    }
}
