#![forbid(unsafe_code)]
//! Proc macro for deriving the `Recast` trait. Use it through the `recast` crate.

/// Derives `Recast` for a struct with named fields.
///
/// Field attributes:
/// - `#[recast("alias,mode,arg,flag")]`: conversion annotation
/// - `#[recast(flatten)]`: promote the fields of an embedded record
///
/// Container attribute:
/// - `#[recast(methods(a, b))]`: register conversion methods that fields can bind to with `func`
#[proc_macro_derive(Recast, attributes(recast))]
pub fn recast_macros(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    recast_macros_impl::derive_recast(input.into()).into()
}
