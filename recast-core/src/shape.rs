use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use crate::{ConstTypeId, Def, Field, Recast, StructDef};

/// Schema for reflection of a type: identity, category and type-erased operations.
#[derive(Clone, Copy)]
pub struct Shape {
    /// Unique type identifier, provided by the compiler.
    pub id: ConstTypeId,

    /// Bare type name without generic parameters (`Vec`, `i32`, `User`).
    ///
    /// The full name is available through the `Display` impl, which walks
    /// the inner shapes.
    pub type_identifier: &'static str,

    /// What kind of value this is: a scalar, a list, a record...
    pub def: Def,

    /// Operations every shape supports.
    pub vtable: ValueVTable,
}

/// Allocates the zero value of a type, if it has one.
pub type DefaultFn = fn() -> Option<Box<dyn Any>>;

/// Copies a value. Returns `None` when the value (or one of its parts) cannot be copied,
/// or when the value is not of the expected type.
pub type CloneFn = fn(value: &dyn Any) -> Option<Box<dyn Any>>;

/// Whether a value is the zero value of its type.
pub type IsZeroFn = fn(value: &dyn Any) -> bool;

/// Moves a boxed value into a location of the same type.
///
/// Hands the value back when either side is not of the expected type.
pub type ReplaceFn = fn(dst: &mut dyn Any, value: Box<dyn Any>) -> Result<(), Box<dyn Any>>;

/// Type-erased operations shared by every shape.
#[derive(Clone, Copy)]
pub struct ValueVTable {
    /// cf. [`DefaultFn`]
    pub default_value: DefaultFn,
    /// cf. [`CloneFn`]
    pub clone_value: CloneFn,
    /// cf. [`IsZeroFn`]
    pub is_zero: IsZeroFn,
    /// cf. [`ReplaceFn`]
    pub replace: ReplaceFn,
}

impl ValueVTable {
    /// Vtable for a plain value type whose zero value is its `Default`.
    pub const fn scalar<T: Any + Clone + Default + PartialEq>() -> Self {
        ValueVTable {
            default_value: default_of::<T>,
            clone_value: clone_of::<T>,
            is_zero: is_default::<T>,
            replace: replace_value::<T>,
        }
    }
}

/// [`DefaultFn`] for types implementing `Default`.
pub fn default_of<T: Any + Default>() -> Option<Box<dyn Any>> {
    Some(Box::new(T::default()))
}

/// [`DefaultFn`] for types without a zero value.
pub fn no_default() -> Option<Box<dyn Any>> {
    None
}

/// [`CloneFn`] for types implementing `Clone`.
pub fn clone_of<T: Any + Clone>(value: &dyn Any) -> Option<Box<dyn Any>> {
    Some(Box::new(value.downcast_ref::<T>()?.clone()))
}

/// [`CloneFn`] for types that cannot be copied.
pub fn no_clone(_value: &dyn Any) -> Option<Box<dyn Any>> {
    None
}

/// [`IsZeroFn`] comparing against `Default`.
pub fn is_default<T: Any + Default + PartialEq>(value: &dyn Any) -> bool {
    value.downcast_ref::<T>().is_some_and(|v| *v == T::default())
}

/// [`IsZeroFn`] for types that are never zero.
pub fn never_zero(_value: &dyn Any) -> bool {
    false
}

/// [`ReplaceFn`] for any `'static` type.
pub fn replace_value<T: Any>(dst: &mut dyn Any, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
    let value = value.downcast::<T>()?;
    match dst.downcast_mut::<T>() {
        Some(slot) => {
            *slot = *value;
            Ok(())
        }
        None => Err(value),
    }
}

/// Copies a value through its shape, which works for records that do not implement `Clone`.
pub fn clone_through_shape<T: Recast>(value: &T) -> Option<T> {
    T::SHAPE.clone_value(value)?.downcast::<T>().ok().map(|b| *b)
}

/// Zero value of a type, through its shape.
pub fn default_through_shape<T: Recast>() -> Option<T> {
    T::SHAPE.default_value()?.downcast::<T>().ok().map(|b| *b)
}

impl Shape {
    /// Check if this shape is of the given type.
    #[inline]
    pub fn is_type<T: ?Sized + 'static>(&self) -> bool {
        self.id == ConstTypeId::of::<T>()
    }

    /// Whether two shapes describe the same type.
    #[inline]
    pub fn is_same(&self, other: &Shape) -> bool {
        self.id == other.id
    }

    /// Returns the struct definition if this is a record.
    pub fn struct_def(&self) -> Option<StructDef> {
        match self.def {
            Def::Struct(sd) => Some(sd),
            _ => None,
        }
    }

    /// Declared fields, empty for anything that is not a record.
    pub fn fields(&self) -> &'static [Field] {
        self.struct_def().map(|sd| sd.fields).unwrap_or(&[])
    }

    /// Allocate the zero value.
    #[inline]
    pub fn default_value(&self) -> Option<Box<dyn Any>> {
        (self.vtable.default_value)()
    }

    /// Copy `value`, which must be of this shape.
    #[inline]
    pub fn clone_value(&self, value: &dyn Any) -> Option<Box<dyn Any>> {
        (self.vtable.clone_value)(value)
    }

    /// Whether `value`, which must be of this shape, is zero.
    #[inline]
    pub fn is_zero(&self, value: &dyn Any) -> bool {
        (self.vtable.is_zero)(value)
    }

    /// Move `value` into `dst`, both of this shape.
    #[inline]
    pub fn replace(&self, dst: &mut dyn Any, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        (self.vtable.replace)(dst, value)
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.is_same(other)
    }
}

impl Eq for Shape {}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.def {
            Def::Option(od) => write!(f, "Option<{}>", od.t),
            Def::Pointer(pd) => write!(f, "{}<{}>", self.type_identifier, pd.pointee),
            Def::List(ld) => write!(f, "{}<{}>", self.type_identifier, ld.t),
            Def::Array(ad) => write!(f, "[{}; {}]", ad.t, ad.n),
            Def::Map(md) => write!(f, "{}<{}, {}>", self.type_identifier, md.k, md.v),
            _ => f.write_str(self.type_identifier),
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({self}, {:?})", self.def)
    }
}
