//! Naming-convention fallback for artifact ids.
//!
//! Most plugins publish an artifact named `<key>-plugin`, so a plugin key can
//! be turned into a plausible artifact id without consulting any source. The
//! convention is known not to hold for every plugin:
//!
//! | plugin key           | real artifact id                      | derived                     |
//! |----------------------|---------------------------------------|-----------------------------|
//! | `stripe`             | `stripe-plugin`                       | `stripe-plugin`             |
//! | `dev:adyen`          | `adyen-plugin`                        | `adyen-plugin`              |
//! | `email-notification` | `killbill-email-notifications-plugin` | `email-notification-plugin` |
//!
//! This is why the resolver only uses it to patch a missing artifact id once a
//! version is already known, and never to supply a version.

/// Suffix appended to a plugin name to form its artifact id.
pub const PLUGIN_ARTIFACT_SUFFIX: &str = "-plugin";

/// Derives an artifact id from a plugin key.
///
/// Implementations must be pure and deterministic.
#[cfg_attr(test, mockall::automock)]
pub trait NamingHeuristic: Send + Sync {
    /// Best-guess artifact id for `plugin_key`.
    fn derive_artifact_id(&self, plugin_key: &str) -> String;
}

/// The `<name>-plugin` convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionalNaming;

impl NamingHeuristic for ConventionalNaming {
    fn derive_artifact_id(&self, plugin_key: &str) -> String {
        derive_artifact_id(plugin_key)
    }
}

/// Strip an optional `namespace:` prefix from a plugin key.
pub fn plugin_name(plugin_key: &str) -> &str {
    plugin_key
        .split_once(':')
        .map_or(plugin_key, |(_, name)| name)
}

/// Apply the `<name>-plugin` convention to a plugin key.
pub fn derive_artifact_id(plugin_key: &str) -> String {
    let name = plugin_name(plugin_key.trim());
    if name.ends_with(PLUGIN_ARTIFACT_SUFFIX) {
        name.to_string()
    } else {
        format!("{name}{PLUGIN_ARTIFACT_SUFFIX}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_suffix() {
        assert_eq!(derive_artifact_id("stripe"), "stripe-plugin");
        assert_eq!(derive_artifact_id("analytics"), "analytics-plugin");
    }

    #[test]
    fn test_keeps_existing_suffix() {
        assert_eq!(derive_artifact_id("avatax-plugin"), "avatax-plugin");
    }

    #[test]
    fn test_strips_namespace() {
        assert_eq!(derive_artifact_id("dev:adyen"), "adyen-plugin");
        assert_eq!(plugin_name("stripe"), "stripe");
    }

    #[test]
    fn test_irregular_names_are_not_corrected() {
        assert_eq!(
            derive_artifact_id("email-notification"),
            "email-notification-plugin"
        );
    }

    #[test]
    fn test_trait_matches_function() {
        let naming = ConventionalNaming;
        assert_eq!(naming.derive_artifact_id("stripe"), derive_artifact_id("stripe"));
    }
}
