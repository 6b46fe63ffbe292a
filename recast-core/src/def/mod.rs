use core::fmt;

mod array;
pub use array::*;

mod list;
pub use list::*;

mod map;
pub use map::*;

mod option;
pub use option::*;

mod pointer;
pub use pointer::*;

mod struct_;
pub use struct_::*;

/// The semantic definition of a shape: is it more like a scalar, a map, a list?
///
/// The conversion engine picks its strategy from the destination's `Def`.
#[derive(Clone, Copy)]
#[non_exhaustive]
pub enum Def {
    /// Scalar: not composed of other things, copied by value.
    ///
    /// e.g. `u32`, `String`, `bool`
    Scalar,

    /// Fixed-size array of homogeneous values
    ///
    /// e.g. `[T; 4]`
    Array(ArrayDef),

    /// Ordered list of homogeneous values, variable size
    ///
    /// e.g. `Vec<T>`
    List(ListDef),

    /// Keyed collection
    ///
    /// e.g. `HashMap<K, V>`, `BTreeMap<K, V>`
    Map(MapDef),

    /// Nullable value; `None` plays the part of a null pointer.
    ///
    /// e.g. `Option<T>`
    Option(OptionDef),

    /// Non-null pointer types
    ///
    /// e.g. `Box<T>`, `Rc<T>`, `Arc<T>`
    Pointer(PointerDef),

    /// A record with named fields, described by `#[derive(Recast)]`.
    Struct(StructDef),

    /// A value whose type is only known at runtime.
    Dynamic,

    /// Function pointers.
    Function,

    /// Sending or receiving halves of a channel.
    Channel,
}

impl fmt::Debug for Def {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Def::Scalar => write!(f, "Scalar"),
            Def::Array(ad) => write!(f, "Array<{}; {}>", ad.t, ad.n),
            Def::List(ld) => write!(f, "List<{}>", ld.t),
            Def::Map(md) => write!(f, "Map<{}, {}>", md.k, md.v),
            Def::Option(od) => write!(f, "Option<{}>", od.t),
            Def::Pointer(pd) => write!(f, "Pointer<{}>", pd.pointee),
            Def::Struct(sd) => write!(f, "Struct({} fields)", sd.fields.len()),
            Def::Dynamic => write!(f, "Dynamic"),
            Def::Function => write!(f, "Function"),
            Def::Channel => write!(f, "Channel"),
        }
    }
}

impl Def {
    /// Whether this is a fixed-width primitive, a string, or a fixed-size array.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Def::Scalar | Def::Array(_))
    }

    /// Whether this is an `Option` or a smart pointer.
    pub fn is_pointer_like(&self) -> bool {
        matches!(self, Def::Option(_) | Def::Pointer(_))
    }
}
