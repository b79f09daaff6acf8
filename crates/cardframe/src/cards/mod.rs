//! Card implementations shipped with the crate.

pub mod bookmark;
