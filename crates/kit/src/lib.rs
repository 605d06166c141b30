// Small value utilities shared by the workspace
// This crate provides JSON value predicates, deep merge/omit and simple sorts

pub mod guard;
pub mod object;
pub mod sort;

pub use object::{merge, merge_all, merge_into, omit};
pub use sort::{bubble, bubble_by, quick, quick_by};
