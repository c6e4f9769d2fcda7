//! Core domain types for the libdex catalog.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

pub mod package;
pub mod reference;
pub mod release;
pub mod selection;
