//! Custom domain type definitions

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

/// A user-configured alternate host for share links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// Opaque id, assigned at creation and never changed
    pub id: String,
    /// User-facing label, e.g. "My blog"
    pub name: String,
    /// Absolute http/https URL, e.g. `https://myblog.com`
    pub url: String,
    /// Disabled domains stay in storage but are not offered as share options
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Domain {
    /// Creates an enabled domain with a fresh id.
    ///
    /// `url` is stored as given; callers normalize and validate it first.
    #[must_use]
    pub fn new(name: String, url: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            url,
            enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_domain_is_enabled_with_unique_id() {
        let a = Domain::new("Blog".into(), "https://blog.me".into());
        let b = Domain::new("Blog".into(), "https://blog.me".into());
        assert!(a.enabled);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn missing_enabled_flag_defaults_to_true() {
        let d: Domain =
            serde_json::from_str(r#"{"id":"d1","name":"Blog","url":"https://blog.me"}"#).unwrap();
        assert!(d.enabled);
    }
}
