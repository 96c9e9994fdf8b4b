//! Content module - coach-published items and their access settings.

#[allow(clippy::module_inception)]
mod content;
mod errors;

pub use content::{
    allowed_extension, AccessSetting, Content, ContentBody, ContentType, NewContent,
    ALLOWED_EXTENSIONS,
};
pub use errors::ContentError;
