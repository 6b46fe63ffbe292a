use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};

/// `TypeId` equivalent that can be built in const contexts.
///
/// `TypeId::of` is not callable in a const initializer, so we store the
/// monomorphized function and call it when the id is needed.
#[derive(Clone, Copy)]
pub struct ConstTypeId {
    type_id_fn: fn() -> TypeId,
}

impl ConstTypeId {
    /// Create a [`ConstTypeId`] for a type.
    #[must_use]
    pub const fn of<T: ?Sized + 'static>() -> Self {
        ConstTypeId {
            type_id_fn: TypeId::of::<T>,
        }
    }

    /// Get the underlying [`TypeId`].
    #[inline]
    pub fn get(self) -> TypeId {
        (self.type_id_fn)()
    }
}

impl fmt::Debug for ConstTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.get(), f)
    }
}

impl PartialEq for ConstTypeId {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl PartialEq<TypeId> for ConstTypeId {
    #[inline]
    fn eq(&self, other: &TypeId) -> bool {
        self.get() == *other
    }
}

impl Eq for ConstTypeId {}

impl Hash for ConstTypeId {
    // the fn pointer itself is not stable across codegen units, the id is
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.get().hash(state);
    }
}
