use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::any::Any;

use crate::{
    ConstTypeId, Def, MapDef, MapEntries, MapVTable, Recast, Shape, ValueVTable,
    clone_through_shape, replace_value,
};

impl<K: Recast + Ord, V: Recast> Recast for BTreeMap<K, V> {
    const SHAPE: &'static Shape = &const {
        fn default_value<K: Recast + Ord, V: Recast>() -> Option<Box<dyn Any>> {
            Some(Box::new(BTreeMap::<K, V>::new()))
        }

        fn clone_value<K: Recast + Ord, V: Recast>(value: &dyn Any) -> Option<Box<dyn Any>> {
            let map = value.downcast_ref::<BTreeMap<K, V>>()?;
            let mut copy = BTreeMap::new();
            for (k, v) in map {
                copy.insert(clone_through_shape(k)?, clone_through_shape(v)?);
            }
            Some(Box::new(copy))
        }

        fn is_zero<K: Recast + Ord, V: Recast>(value: &dyn Any) -> bool {
            value
                .downcast_ref::<BTreeMap<K, V>>()
                .is_some_and(BTreeMap::is_empty)
        }

        fn len<K: Recast + Ord, V: Recast>(map: &dyn Any) -> Option<usize> {
            map.downcast_ref::<BTreeMap<K, V>>().map(BTreeMap::len)
        }

        fn iter<K: Recast + Ord, V: Recast>(map: &dyn Any) -> Option<MapEntries<'_>> {
            let map = map.downcast_ref::<BTreeMap<K, V>>()?;
            Some(Box::new(
                map.iter().map(|(k, v)| (k as &dyn Any, v as &dyn Any)),
            ))
        }

        // a BTreeMap has no capacity to reserve
        fn with_capacity<K: Recast + Ord, V: Recast>(_capacity: usize) -> Box<dyn Any> {
            Box::new(BTreeMap::<K, V>::new())
        }

        fn insert<K: Recast + Ord, V: Recast>(
            map: &mut dyn Any,
            key: Box<dyn Any>,
            value: Box<dyn Any>,
        ) -> Result<(), (Box<dyn Any>, Box<dyn Any>)> {
            let Some(map) = map.downcast_mut::<BTreeMap<K, V>>() else {
                return Err((key, value));
            };
            let key = match key.downcast::<K>() {
                Ok(key) => key,
                Err(key) => return Err((key, value)),
            };
            let value = match value.downcast::<V>() {
                Ok(value) => value,
                Err(value) => return Err((key as Box<dyn Any>, value)),
            };
            map.insert(*key, *value);
            Ok(())
        }

        Shape {
            id: ConstTypeId::of::<BTreeMap<K, V>>(),
            type_identifier: "BTreeMap",
            def: Def::Map(MapDef {
                k: K::SHAPE,
                v: V::SHAPE,
                vtable: MapVTable {
                    len: len::<K, V>,
                    iter: iter::<K, V>,
                    with_capacity: with_capacity::<K, V>,
                    insert: insert::<K, V>,
                },
            }),
            vtable: ValueVTable {
                default_value: default_value::<K, V>,
                clone_value: clone_value::<K, V>,
                is_zero: is_zero::<K, V>,
                replace: replace_value::<BTreeMap<K, V>>,
            },
        }
    };
}
