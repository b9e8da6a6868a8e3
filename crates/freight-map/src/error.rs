//! Error types for column resolution.

use freight_model::Role;
use thiserror::Error;

/// Errors from column resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// Roles the caller requires could not be resolved.
    #[error("missing required column roles: {}", join_roles(.roles))]
    MissingRoles { roles: Vec<Role> },
}

fn join_roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for column resolution.
pub type Result<T> = std::result::Result<T, MapError>;
