use alloc::boxed::Box;
use core::any::Any;

use crate::Shape;

/// Number of entries in a map.
pub type MapLenFn = fn(map: &dyn Any) -> Option<usize>;

/// Iterator over the `(key, value)` entries of a map.
pub type MapEntries<'a> = Box<dyn Iterator<Item = (&'a dyn Any, &'a dyn Any)> + 'a>;

/// Iterates over all entries; `None` when the map is of the wrong type.
pub type MapIterFn = for<'a> fn(map: &'a dyn Any) -> Option<MapEntries<'a>>;

/// Allocates an empty map with room for `capacity` entries.
pub type MapWithCapacityFn = fn(capacity: usize) -> Box<dyn Any>;

/// Inserts a boxed entry, handing both halves back if either is of the wrong type.
pub type MapInsertFn = fn(
    map: &mut dyn Any,
    key: Box<dyn Any>,
    value: Box<dyn Any>,
) -> Result<(), (Box<dyn Any>, Box<dyn Any>)>;

/// Keyed collection definition.
#[derive(Clone, Copy)]
pub struct MapDef {
    /// shape of the keys
    pub k: &'static Shape,

    /// shape of the values
    pub v: &'static Shape,

    /// vtable for interacting with the map
    pub vtable: MapVTable,
}

/// Operations on a map.
#[derive(Clone, Copy)]
pub struct MapVTable {
    /// cf. [`MapLenFn`]
    pub len: MapLenFn,
    /// cf. [`MapIterFn`]
    pub iter: MapIterFn,
    /// cf. [`MapWithCapacityFn`]
    pub with_capacity: MapWithCapacityFn,
    /// cf. [`MapInsertFn`]
    pub insert: MapInsertFn,
}
