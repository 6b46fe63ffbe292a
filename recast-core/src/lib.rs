#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

extern crate alloc;

mod typeid;
pub use typeid::*;

mod shape;
pub use shape::*;

mod def;
pub use def::*;

mod field;
pub use field::*;

mod method;
pub use method::*;

mod params;
pub use params::*;

mod value;
pub use value::*;

mod impls_core;

mod impls_alloc;

mod impls_std;
pub use impls_std::DynamicValue;

pub mod spez;

/// Allows querying the [`Shape`] of a type, which in turn lets the conversion
/// engine walk, copy and build values of that type without knowing it statically.
///
/// Implemented for the standard library types the engine understands, and for
/// records through `#[derive(Recast)]`.
pub trait Recast: core::any::Any {
    /// The shape of this type
    const SHAPE: &'static Shape;
}
