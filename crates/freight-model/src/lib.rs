pub mod alias;
pub mod config;
pub mod enums;
pub mod error;
pub mod hint;

pub use alias::{AliasGroup, AliasTable};
pub use config::{DashboardConfig, ExecutiveThresholds, MatchingOptions, RoleKeywords};
pub use enums::{ColumnMatchMode, CompanyMatchMode, Role};
pub use error::{ModelError, Result};
pub use hint::ColumnHint;
