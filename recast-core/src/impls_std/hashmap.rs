use alloc::boxed::Box;
use std::collections::HashMap;
use std::hash::Hash;
use core::any::Any;

use crate::{
    ConstTypeId, Def, MapDef, MapEntries, MapVTable, Recast, Shape, ValueVTable,
    clone_through_shape, replace_value,
};

impl<K: Recast + Eq + Hash, V: Recast> Recast for HashMap<K, V> {
    const SHAPE: &'static Shape = &const {
        fn default_value<K: Recast + Eq + Hash, V: Recast>() -> Option<Box<dyn Any>> {
            Some(Box::new(HashMap::<K, V>::new()))
        }

        fn clone_value<K: Recast + Eq + Hash, V: Recast>(value: &dyn Any) -> Option<Box<dyn Any>> {
            let map = value.downcast_ref::<HashMap<K, V>>()?;
            let mut copy = HashMap::with_capacity(map.len());
            for (k, v) in map {
                copy.insert(clone_through_shape(k)?, clone_through_shape(v)?);
            }
            Some(Box::new(copy))
        }

        fn is_zero<K: Recast + Eq + Hash, V: Recast>(value: &dyn Any) -> bool {
            value
                .downcast_ref::<HashMap<K, V>>()
                .is_some_and(HashMap::is_empty)
        }

        fn len<K: Recast + Eq + Hash, V: Recast>(map: &dyn Any) -> Option<usize> {
            map.downcast_ref::<HashMap<K, V>>().map(HashMap::len)
        }

        fn iter<K: Recast + Eq + Hash, V: Recast>(map: &dyn Any) -> Option<MapEntries<'_>> {
            let map = map.downcast_ref::<HashMap<K, V>>()?;
            Some(Box::new(
                map.iter().map(|(k, v)| (k as &dyn Any, v as &dyn Any)),
            ))
        }

        fn with_capacity<K: Recast + Eq + Hash, V: Recast>(capacity: usize) -> Box<dyn Any> {
            Box::new(HashMap::<K, V>::with_capacity(capacity))
        }

        fn insert<K: Recast + Eq + Hash, V: Recast>(
            map: &mut dyn Any,
            key: Box<dyn Any>,
            value: Box<dyn Any>,
        ) -> Result<(), (Box<dyn Any>, Box<dyn Any>)> {
            let Some(map) = map.downcast_mut::<HashMap<K, V>>() else {
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
            id: ConstTypeId::of::<HashMap<K, V>>(),
            type_identifier: "HashMap",
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
                replace: replace_value::<HashMap<K, V>>,
            },
        }
    };
}
