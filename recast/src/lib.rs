#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

// so that `#[derive(Recast)]` output, which names `::recast`, works inside this crate
extern crate self as recast;

pub use recast_core::*;
pub use recast_macros::Recast;

mod tracing_macros;
pub(crate) use tracing_macros::{debug, trace};

mod error;
pub use error::*;

mod options;
pub use options::*;

mod schema;
pub use schema::*;

mod dispatch;
pub use dispatch::{Convert, Converter, dispatch};

pub mod cache;

mod recaster;
pub use recaster::*;

mod report;
pub use report::*;
