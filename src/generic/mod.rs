//! Generic structures and algorithms, independent of the search.
//!
//! - [index_heap] is a max heap over a fixed set of indicies, used for decisions by the exact oracle.
//! - [luby] is an iterator over the luby sequence, used to schedule restarts of the exact oracle.
//! - [minimal_pcg] is the source of rng for a search.

pub mod index_heap;
pub mod luby;
pub mod minimal_pcg;
