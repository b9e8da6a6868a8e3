//! Column role resolution.
//!
//! Maps the free-form headers of a dispatch export to the roles the
//! dashboards need (DATE, PRODUCT, TONNAGE, COMPANY, DESTINATION, DURATION).
//! Matching is keyword based; see [`resolve`] for the ordering rules and
//! [`detect_date_columns`] for the DATE special case.

#![deny(unsafe_code)]

mod date;
mod error;
mod resolver;

pub use date::{detect_date_columns, resolve_frame};
pub use error::{MapError, Result};
pub use resolver::{ResolvedRoles, RoleMatch, resolve};
