//! Who is using the storefront.

/// Authentication state that decides where the cart lives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthStatus {
    /// Cart kept in local storage.
    #[default]
    Anonymous,
    /// Cart kept on the server, reached with a bearer token.
    Authenticated { token: String },
}

impl AuthStatus {
    pub fn authenticated(token: impl Into<String>) -> Self {
        AuthStatus::Authenticated {
            token: token.into(),
        }
    }

    /// Blank tokens count as signed out.
    pub fn from_token(token: Option<String>) -> Self {
        match token {
            Some(token) if !token.trim().is_empty() => Self::authenticated(token.trim()),
            _ => AuthStatus::Anonymous,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthStatus::Authenticated { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            AuthStatus::Anonymous => None,
            AuthStatus::Authenticated { token } => Some(token),
        }
    }
}
