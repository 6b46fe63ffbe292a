#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod parse;
pub use parse::*;

mod emit;
pub use emit::*;

use proc_macro2::TokenStream;

/// Expands `#[derive(Recast)]` on `input`.
///
/// Errors are reported as `compile_error!` invocations in the returned stream.
pub fn derive_recast(input: TokenStream) -> TokenStream {
    match PRecord::parse(input) {
        Ok(record) => emit_recast_impl(&record),
        Err(err) => err.to_compile_error(),
    }
}
