//! Data Transfer Objects - request/response shapes of the mock auth API.
//!
//! The backend is a `json-server-auth` instance: `/login` and `/register`
//! take `{ email, password }` and answer `{ accessToken, user }`. Field
//! names are camelCase on the wire.

use serde::{Deserialize, Serialize};

/// Request to register a new user. The server requires a password of at
/// least 6 characters; callers validate before sending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The user object the auth endpoints return and the session holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub email: String,
}

/// Response of both `/login` and `/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub user: SessionUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_response_matches_wire_shape() {
        let json = r#"{
            "accessToken": "eyJhbGciOi.token.value",
            "user": { "id": 3, "email": "a@b.c" }
        }"#;

        let parsed: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.access_token, "eyJhbGciOi.token.value");
        assert_eq!(parsed.user.id, 3);
        assert_eq!(parsed.user.email, "a@b.c");

        let out = serde_json::to_value(&parsed).unwrap();
        assert!(out.get("accessToken").is_some());
    }
}
