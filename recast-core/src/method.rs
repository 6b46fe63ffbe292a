use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::{Params, Peek};

/// Error type returned by conversion methods.
pub type BoxError = Box<dyn core::error::Error + Send + Sync>;

/// Type-erased conversion method.
///
/// Receives the record that declares the bound field, the whole source value,
/// and the external parameters. Returns the value to assign into the bound field,
/// if any.
pub type MethodFn =
    for<'a> fn(dst: &mut dyn Any, src: Peek<'a>, params: &Params) -> Result<Option<Returned>, BoxError>;

/// A named conversion method that a field can be bound to.
#[derive(Clone, Copy)]
pub struct Method {
    /// name the method is resolved by
    pub name: &'static str,

    /// the method itself
    pub call: MethodFn,
}

impl Method {
    /// Creates a method from a name and a function.
    pub const fn new(name: &'static str, call: MethodFn) -> Self {
        Method { name, call }
    }

    /// Address of the function, used to tell methods with the same name apart.
    pub fn addr(&self) -> usize {
        self.call as usize
    }
}

impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.addr() == other.addr()
    }
}

impl Eq for Method {}

impl core::hash::Hash for Method {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.addr().hash(state);
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Method({} @ {:#x})", self.name, self.addr())
    }
}

/// A value returned by a conversion method, waiting to be assigned.
pub struct Returned {
    /// the value
    pub value: Box<dyn Any>,

    /// `core::any::type_name` of the value, for error messages
    pub type_name: &'static str,
}

impl Returned {
    /// Boxes a value; unit values mean "nothing to assign".
    pub fn of<T: Any>(value: T) -> Option<Self> {
        if TypeId::of::<T>() == TypeId::of::<()>() {
            return None;
        }
        Some(Returned {
            value: Box::new(value),
            type_name: core::any::type_name::<T>(),
        })
    }
}

impl fmt::Debug for Returned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Returned({})", self.type_name)
    }
}

/// What a method registered with `#[recast(methods(...))]` may return.
pub trait IntoMethodOutput {
    /// Normalizes the return value.
    fn into_method_output(self) -> Result<Option<Returned>, BoxError>;
}

impl IntoMethodOutput for () {
    fn into_method_output(self) -> Result<Option<Returned>, BoxError> {
        Ok(None)
    }
}

impl<T: Any, E: Into<BoxError>> IntoMethodOutput for Result<T, E> {
    fn into_method_output(self) -> Result<Option<Returned>, BoxError> {
        match self {
            Ok(value) => Ok(Returned::of(value)),
            Err(e) => Err(e.into()),
        }
    }
}

/// Error raised when a method is handed a receiver of the wrong type.
#[derive(Debug)]
pub struct ReceiverMismatch {
    /// the receiver type the method expects
    pub expected: &'static str,
}

impl fmt::Display for ReceiverMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "method receiver is not a {}", self.expected)
    }
}

impl core::error::Error for ReceiverMismatch {}
