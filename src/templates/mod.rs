//! Pull request template management.

pub mod kind;
pub mod store;

pub use kind::{TemplateKind, TemplateMetadata, title_case};
pub use store::{Template, TemplateEntry, TemplateStore, is_valid_template_name};
