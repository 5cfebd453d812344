//! PDF rendering modules for quadrant composition
//!
//! This module handles all PDF-specific operations:
//! - Creating Form XObjects from source pages
//! - Building the output page and its document structure
//! - Generating fill and placement operators

mod page;
mod xobject;

pub use page::*;
pub use xobject::{copy_object_deep, create_page_xobject, get_page_box};
