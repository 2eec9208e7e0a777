//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the mount node id is usable
//! - Detect invalid patterns, unreachable duplicates, name clashes, extra defaults
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::routing::{validate_entries, ConfigurationError};

/// A single semantic problem in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("mount_node must not be empty")]
    EmptyMountNode,

    #[error("mount_node `{0}` must not contain whitespace")]
    InvalidMountNode(String),

    #[error(transparent)]
    Routes(#[from] ConfigurationError),
}

/// Validate a loaded configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.mount_node.is_empty() {
        errors.push(ValidationError::EmptyMountNode);
    } else if config.mount_node.chars().any(char::is_whitespace) {
        errors.push(ValidationError::InvalidMountNode(config.mount_node.clone()));
    }

    let entries = config.entries();
    let fallback = config.fallback_entry();
    errors.extend(
        validate_entries(&entries, fallback.as_ref())
            .into_iter()
            .map(ValidationError::from),
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;
    use crate::views::Page;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&RouterConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.mount_node = "main content".into();
        config.routes.push(RouteConfig::new("job/:job_id", Page::Job, "job"));
        config.fallback = None;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors[0],
            ValidationError::InvalidMountNode("main content".into())
        );
        assert!(errors.contains(&ValidationError::Routes(
            ConfigurationError::MissingFallback(5)
        )));
        assert!(errors.contains(&ValidationError::Routes(
            ConfigurationError::DuplicateName("job".into())
        )));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::Routes(ConfigurationError::DuplicatePattern { .. }))));
    }

    #[test]
    fn test_empty_mount_node() {
        let config = RouterConfig {
            mount_node: String::new(),
            ..Default::default()
        };
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::EmptyMountNode])
        );
    }
}
