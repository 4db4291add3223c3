//! Types used throughout the library, for the moment limited to errors.

pub mod err;
