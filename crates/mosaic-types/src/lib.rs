//! Shared data types for the Mosaic token-action pipeline.
//!
//! Everything in this crate is plain serde data: the option structs each
//! action accepts, the success payloads each action returns, the
//! `ActionResult` envelope, authority roles and the token-creation
//! configuration. No network access happens here.

pub mod authority;
pub mod creation;
pub mod options;
pub mod outcome;

pub use authority::*;
pub use creation::*;
pub use options::*;
pub use outcome::*;
