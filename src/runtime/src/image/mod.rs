//! Image naming and host image access.
//!
//! - `reference`: registry-style normalization of image references
//! - `retag`: whether an image already inside a node needs an extra tag
//! - `source`: the host image store images are exported from

pub mod reference;
pub mod retag;
mod source;

pub use reference::{normalize, same_image, CanonicalReference};
pub use retag::{check_retag, decide, ImageTags, RetagDecision};
pub use source::ImageSource;
