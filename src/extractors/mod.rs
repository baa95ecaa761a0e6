//! Request extractors whose rejections render as the uniform JSON error body.

mod entity_id;
mod form;

pub use entity_id::EntityId;
pub use form::FormBody;
