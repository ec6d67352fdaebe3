//! Domain model for ticklist.
//!
//! There is exactly one entity: [`Todo`], a text item with a completed flag
//! and a creation timestamp. Everything else in this module is the request
//! bodies the API accepts for it.

mod todo;

pub use todo::*;
