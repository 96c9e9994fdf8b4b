//! Content handlers: upload, gated retrieval and coach listings.

mod get_content;
mod list_coach_content;
mod upload_content;

pub use get_content::{GetContentHandler, GetContentQuery, GetContentResult};
pub use list_coach_content::{ListCoachContentHandler, ListCoachContentQuery};
pub use upload_content::{
    UploadContentCommand, UploadContentHandler, UploadContentResult, UploadedFile,
};
