//! Crate-local `trace!` and `debug!`.
//!
//! They are `tracing`'s own macros when the `tracing` feature is on, and in
//! unit tests. Otherwise they expand to nothing and `tracing` is not linked.

#[cfg(any(test, feature = "tracing"))]
pub(crate) use tracing::{debug, trace};

#[cfg(not(any(test, feature = "tracing")))]
macro_rules! discard {
    ($($arg:tt)*) => {};
}

#[cfg(not(any(test, feature = "tracing")))]
pub(crate) use {discard as debug, discard as trace};
