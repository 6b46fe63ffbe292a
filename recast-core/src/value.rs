use alloc::rc::Rc;
use alloc::sync::Arc;
use core::any::Any;
use core::fmt;

use crate::{Def, Recast, Shape};

/// A read-only view of a value, paired with its shape.
#[derive(Clone, Copy)]
pub struct Peek<'a> {
    value: &'a dyn Any,
    shape: &'static Shape,
}

impl<'a> Peek<'a> {
    /// Creates a view of a value.
    pub fn new<T: Recast>(value: &'a T) -> Self {
        Peek {
            value,
            shape: T::SHAPE,
        }
    }

    /// Creates a view from an already type-erased value.
    ///
    /// `value` must be of type `shape`; the engine checks this before using it.
    pub fn from_parts(value: &'a dyn Any, shape: &'static Shape) -> Self {
        Peek { value, shape }
    }

    /// Shape of the value.
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// The underlying value.
    #[inline]
    pub fn value(&self) -> &'a dyn Any {
        self.value
    }

    /// Downcasts the value.
    pub fn get<T: Any>(&self) -> Option<&'a T> {
        self.value.downcast_ref::<T>()
    }

    /// Whether the value is zero.
    pub fn is_zero(&self) -> bool {
        self.shape.is_zero(self.value)
    }

    /// Follows pointers and `Some` options down to the first non-pointer value.
    ///
    /// Stops at a `None`.
    pub fn innermost(self) -> Peek<'a> {
        let mut current = self;
        loop {
            let next = match current.shape.def {
                Def::Pointer(pd) => (pd.vtable.borrow)(current.value).map(|v| Peek::from_parts(v, pd.pointee)),
                Def::Option(od) => (od.vtable.get)(current.value).map(|v| Peek::from_parts(v, od.t)),
                _ => None,
            };
            match next {
                Some(next) => current = next,
                None => return current,
            }
        }
    }

    /// Gets a field of a record by declared name, looking into flattened records
    /// when the record itself has no such field.
    pub fn field(&self, name: &str) -> Option<Peek<'a>> {
        let record = self.innermost();
        let sd = record.shape.struct_def()?;
        if let Some(field) = sd.field(name) {
            return (field.get)(record.value).map(|v| Peek::from_parts(v, field.shape()));
        }
        sd.fields
            .iter()
            .filter(|f| f.is_flattened())
            .find_map(|f| {
                let inner = (f.get)(record.value)?;
                Peek::from_parts(inner, f.shape()).field(name)
            })
    }
}

impl fmt::Debug for Peek<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Peek({})", self.shape)
    }
}

/// A writable handle on a value, paired with its shape.
///
/// A `Poke` may be non-addressable: it knows the destination's shape but cannot
/// reach the value, e.g. the pointee of an `Arc` that has other owners.
pub struct Poke<'a> {
    value: Option<&'a mut dyn Any>,
    shape: &'static Shape,
}

impl<'a> Poke<'a> {
    /// Creates a handle on a value.
    pub fn new<T: Recast>(value: &'a mut T) -> Self {
        Poke {
            value: Some(value as &mut dyn Any),
            shape: T::SHAPE,
        }
    }

    /// Creates a handle from an already type-erased value.
    pub fn from_parts(value: &'a mut dyn Any, shape: &'static Shape) -> Self {
        Poke {
            value: Some(value),
            shape,
        }
    }

    /// A handle on the pointee of an `Arc`, addressable only if this is the sole owner.
    pub fn from_arc<T: Recast>(arc: &'a mut Arc<T>) -> Self {
        Poke {
            value: Arc::get_mut(arc).map(|v| v as &mut dyn Any),
            shape: T::SHAPE,
        }
    }

    /// A handle on the pointee of an `Rc`, addressable only if this is the sole owner.
    pub fn from_rc<T: Recast>(rc: &'a mut Rc<T>) -> Self {
        Poke {
            value: Rc::get_mut(rc).map(|v| v as &mut dyn Any),
            shape: T::SHAPE,
        }
    }

    /// Shape of the value.
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Whether the value can be written to.
    #[inline]
    pub fn is_addressable(&self) -> bool {
        self.value.is_some()
    }

    /// Borrows the value mutably.
    pub fn value_mut(&mut self) -> Option<&mut dyn Any> {
        self.value.as_deref_mut()
    }

    /// Gives the borrowed value back.
    pub fn into_inner(self) -> Option<&'a mut dyn Any> {
        self.value
    }

    /// Downcasts the value.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.value.as_deref_mut()?.downcast_mut::<T>()
    }
}

impl fmt::Debug for Poke<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_addressable() {
            write!(f, "Poke({})", self.shape)
        } else {
            write!(f, "Poke({}, not addressable)", self.shape)
        }
    }
}
