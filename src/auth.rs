//! Admin credential check injected into the web layer (replaces a hard-coded password).

/// Session key set once the admin password has been verified.
pub const ADMIN_SESSION_KEY: &str = "admin";

/// Admin password from ADMIN_PASSWORD. `None` leaves the admin endpoints open (local use).
#[derive(Clone, Debug, Default)]
pub struct AdminCredential {
    password: Option<String>,
}

impl AdminCredential {
    pub fn new(password: Option<String>) -> Self {
        Self {
            password: password.filter(|p| !p.is_empty()),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var("ADMIN_PASSWORD").ok())
    }

    /// True when no password is configured.
    pub fn is_open(&self) -> bool {
        self.password.is_none()
    }

    pub fn verify(&self, candidate: &str) -> bool {
        match &self.password {
            Some(password) => password.as_bytes() == candidate.as_bytes(),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_password_must_match() {
        let cred = AdminCredential::new(Some("s3cret".to_string()));
        assert!(!cred.is_open());
        assert!(cred.verify("s3cret"));
        assert!(!cred.verify("S3CRET"));
        assert!(!cred.verify(""));
    }

    #[test]
    fn empty_password_means_open() {
        let cred = AdminCredential::new(Some(String::new()));
        assert!(cred.is_open());
        assert!(cred.verify("anything"));
    }
}
