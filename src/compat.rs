//! Protocol version negotiation.

use crate::config::{ConfigLoadError, ServerConfig};

/// Ordered set of supported protocol versions. Never empty; the first entry is
/// the fallback advertised to clients outside the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityPolicy {
    versions: Vec<i32>,
}

impl CompatibilityPolicy {
    pub fn new(versions: Vec<i32>) -> Result<Self, ConfigLoadError> {
        if versions.is_empty() {
            return Err(ConfigLoadError::Invalid(
                "compatible_versions must list at least one protocol version".into(),
            ));
        }
        Ok(Self { versions })
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, ConfigLoadError> {
        Self::new(config.compatible_versions.clone())
    }

    #[must_use]
    pub fn is_compatible(&self, version: i32) -> bool {
        self.versions.contains(&version)
    }

    #[must_use]
    pub fn default_version(&self) -> i32 {
        self.versions[0]
    }

    /// The client's own version when supported, otherwise the default.
    #[must_use]
    pub fn preferred_advertised(&self, version: i32) -> i32 {
        if self.is_compatible(version) {
            version
        } else {
            self.default_version()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_decides_compatibility() {
        let policy = CompatibilityPolicy::new(vec![404, 401]).unwrap();
        assert!(policy.is_compatible(404));
        assert!(policy.is_compatible(401));
        assert!(!policy.is_compatible(47));
    }

    #[test]
    fn incompatible_clients_see_the_first_version() {
        let policy = CompatibilityPolicy::new(vec![404, 401]).unwrap();
        assert_eq!(policy.preferred_advertised(401), 401);
        assert_eq!(policy.preferred_advertised(47), 404);
        assert_eq!(policy.preferred_advertised(0), 404);
    }

    #[test]
    fn empty_set_is_rejected() {
        assert!(CompatibilityPolicy::new(Vec::new()).is_err());
    }
}
