//! Employee validation
//!
//! - [`field`]: one pure check per field
//! - [`record`]: composes the field checks over a whole draft
//! - [`FieldPath`]: the closed set of addressable paths errors are keyed by

pub mod field;
mod path;
mod record;

pub use path::{FieldPath, UnknownFieldPath};
pub use record::{DraftScope, ValidatedEmployee, ValidationErrors, check, validate};
