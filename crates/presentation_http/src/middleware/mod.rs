//! HTTP middleware components
//!
//! The cross-cutting stages of the request pipeline. Composition order is
//! fixed in `routes::build_app`; each layer documents what it relies on
//! from the stages before it.

pub mod current_user;
pub mod method_override;
pub mod sanitize;
pub mod security_headers;
pub mod validation;

pub use current_user::{CurrentUserLayer, CurrentUserService};
pub use method_override::{MethodOverride, MethodOverrideLayer};
pub use sanitize::{Sanitize, SanitizeLayer};
pub use security_headers::{SecurityHeaders, SecurityHeadersLayer};
pub use validation::ValidatedForm;
