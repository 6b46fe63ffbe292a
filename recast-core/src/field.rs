use core::any::Any;
use core::fmt;

use crate::Shape;

/// Projects a record onto one of its fields.
pub type FieldGetFn = fn(record: &dyn Any) -> Option<&dyn Any>;

/// Mutably projects a record onto one of its fields.
pub type FieldGetMutFn = fn(record: &mut dyn Any) -> Option<&mut dyn Any>;

/// Describes a field in a record.
#[derive(Clone, Copy)]
pub struct Field {
    /// declared name of the field
    pub name: &'static str,

    /// shape of the field's type
    ///
    /// the layer of indirection allows for recursive type definitions
    pub shape: fn() -> &'static Shape,

    /// the annotation string from `#[recast("...")]`, empty when absent
    pub annotation: &'static str,

    /// visibility and embedding
    pub flags: FieldFlags,

    /// cf. [`FieldGetFn`]
    pub get: FieldGetFn,

    /// cf. [`FieldGetMutFn`]
    pub get_mut: FieldGetMutFn,
}

impl Field {
    /// Returns the shape of the field's type
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        (self.shape)()
    }

    /// Whether the field is declared `pub`.
    #[inline]
    pub fn is_public(&self) -> bool {
        self.flags.contains(FieldFlags::PUBLIC)
    }

    /// Whether the field is an embedded record whose fields are promoted.
    #[inline]
    pub fn is_flattened(&self) -> bool {
        self.flags.contains(FieldFlags::FLATTEN)
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("shape", &format_args!("{}", self.shape()))
            .field("annotation", &self.annotation)
            .field("flags", &self.flags)
            .finish()
    }
}

/// Flags describing how a field was declared.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldFlags(u8);

impl FieldFlags {
    /// No flags.
    pub const EMPTY: Self = FieldFlags(0);

    /// Declared `pub`: visible to the conversion engine.
    pub const PUBLIC: Self = FieldFlags(1 << 0);

    /// `#[recast(flatten)]`: an embedded record.
    pub const FLATTEN: Self = FieldFlags(1 << 1);

    /// Union of two flag sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        FieldFlags(self.0 | other.0)
    }

    /// Whether all of `other` is set.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl fmt::Debug for FieldFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_set();
        if self.contains(Self::PUBLIC) {
            list.entry(&"PUBLIC");
        }
        if self.contains(Self::FLATTEN) {
            list.entry(&"FLATTEN");
        }
        list.finish()
    }
}
