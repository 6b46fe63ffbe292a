use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::any::Any;
use core::fmt;

/// A value stored in [`Params`].
pub struct ParamValue {
    value: Box<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl ParamValue {
    /// Borrows the value.
    pub fn value(&self) -> &dyn Any {
        &*self.value
    }

    /// `core::any::type_name` of the value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Downcasts the value.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }
}

/// External parameters, consulted for fields bound with `param`.
///
/// The engine only ever reads from it.
#[derive(Default)]
pub struct Params {
    entries: BTreeMap<String, ParamValue>,
}

impl Params {
    /// No parameters.
    pub const fn new() -> Self {
        Params {
            entries: BTreeMap::new(),
        }
    }

    /// Sets a parameter, returning `self` for chaining.
    #[must_use]
    pub fn with<T: Any + Send + Sync>(mut self, name: impl Into<String>, value: T) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a parameter, replacing any previous value under that name.
    pub fn insert<T: Any + Send + Sync>(&mut self, name: impl Into<String>, value: T) {
        self.entries.insert(
            name.into(),
            ParamValue {
                value: Box::new(value),
                type_name: core::any::type_name::<T>(),
            },
        );
    }

    /// Looks a parameter up.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.get(name)
    }

    /// Whether a parameter is set.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v.type_name)))
            .finish()
    }
}
