// src/filtering/mod.rs

//! Name and path checks applied while walking a repository.

mod patterns;

pub use patterns::PatternFilter;
