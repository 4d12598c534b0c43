//! # envbake-copy
//!
//! Fan-out directory copier.
//!
//! Call [`copy_to_many`] to replicate one source tree into several
//! destinations at once. Each destination is copied on its own thread by
//! [`copy_one`]; the call returns only after every copy finished or failed,
//! with one [`CopyReport`] per destination in input order.

pub mod error;
pub mod fanout;
pub mod pipeline;
pub mod tree;

pub use error::{CopyError, CopyErrorKind};
pub use fanout::fan_out;
pub use pipeline::{copy_to_many, CopyReport};
pub use tree::{copy_one, CopyStats};
