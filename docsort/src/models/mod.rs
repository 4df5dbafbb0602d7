mod common;
mod document;

pub use common::*;
pub use document::*;
