//! Per-method signing policy.
//!
//! Methods opt into signature enforcement when they are registered at
//! startup. Anything not registered runs unsigned.

use std::collections::HashMap;

/// Whether a method needs a valid signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignPolicy {
    /// Calls are rejected unless the signature verifies
    Required,
    /// Calls run without a signature check
    Optional,
}

/// Registry of method name to signing policy
#[derive(Debug, Clone, Default)]
pub struct MethodRegistry {
    methods: HashMap<String, SignPolicy>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method with an explicit policy, replacing any earlier one.
    pub fn register(&mut self, method: impl Into<String>, policy: SignPolicy) {
        self.methods.insert(method.into(), policy);
    }

    /// Builder form of `register(method, SignPolicy::Required)`.
    pub fn require(mut self, method: impl Into<String>) -> Self {
        self.register(method, SignPolicy::Required);
        self
    }

    /// Builder form of `register(method, SignPolicy::Optional)`.
    pub fn allow_unsigned(mut self, method: impl Into<String>) -> Self {
        self.register(method, SignPolicy::Optional);
        self
    }

    pub fn policy(&self, method: &str) -> Option<SignPolicy> {
        self.methods.get(method).copied()
    }

    /// True only for methods registered as `Required`.
    pub fn requires_signature(&self, method: &str) -> bool {
        self.policy(method) == Some(SignPolicy::Required)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for MethodRegistry {
    /// Collect method names as signature-required.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.extend(iter);
        registry
    }
}

impl<S: Into<String>> Extend<S> for MethodRegistry {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for method in iter {
            self.register(method, SignPolicy::Required);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unregistered_method_is_unsigned() {
        let registry = MethodRegistry::new();
        assert!(!registry.requires_signature("GetUserInfo"));
        assert_eq!(registry.policy("GetUserInfo"), None);
    }

    #[test]
    fn test_required_method() {
        let registry = MethodRegistry::new()
            .require("TransferFunds")
            .allow_unsigned("Ping");

        assert!(registry.requires_signature("TransferFunds"));
        assert!(!registry.requires_signature("Ping"));
        assert_eq!(registry.policy("Ping"), Some(SignPolicy::Optional));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_method_names_are_exact() {
        let registry = MethodRegistry::new().require("TransferFunds");
        assert!(!registry.requires_signature("transferfunds"));
    }

    #[test]
    fn test_collect_from_names() {
        let registry: MethodRegistry = ["a", "b"].into_iter().collect();
        assert!(registry.requires_signature("a"));
        assert!(registry.requires_signature("b"));
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_later_registration_wins() {
        let mut registry = MethodRegistry::new().require("a");
        registry.register("a", SignPolicy::Optional);
        assert!(!registry.requires_signature("a"));
    }
}
