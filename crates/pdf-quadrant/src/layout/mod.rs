//! Layout calculation modules for quadrant composition
//!
//! This module handles the geometric calculations for a four-up sheet:
//! - Quadrant regions (partitioning the page)
//! - Content placement (contain-fit scaling and centering)

mod fit;
mod quadrants;
mod types;

pub use fit::*;
pub use quadrants::*;
pub use types::*;
