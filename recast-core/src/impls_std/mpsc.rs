use std::sync::mpsc::{Receiver, Sender, SyncSender};

use crate::{
    ConstTypeId, Def, Recast, Shape, ValueVTable, clone_of, never_zero, no_clone, no_default,
    replace_value,
};

impl<T: 'static> Recast for Sender<T> {
    const SHAPE: &'static Shape = &const {
        Shape {
            id: ConstTypeId::of::<Sender<T>>(),
            type_identifier: "Sender",
            def: Def::Channel,
            vtable: ValueVTable {
                default_value: no_default,
                clone_value: clone_of::<Sender<T>>,
                is_zero: never_zero,
                replace: replace_value::<Sender<T>>,
            },
        }
    };
}

impl<T: 'static> Recast for SyncSender<T> {
    const SHAPE: &'static Shape = &const {
        Shape {
            id: ConstTypeId::of::<SyncSender<T>>(),
            type_identifier: "SyncSender",
            def: Def::Channel,
            vtable: ValueVTable {
                default_value: no_default,
                clone_value: clone_of::<SyncSender<T>>,
                is_zero: never_zero,
                replace: replace_value::<SyncSender<T>>,
            },
        }
    };
}

impl<T: 'static> Recast for Receiver<T> {
    const SHAPE: &'static Shape = &const {
        Shape {
            id: ConstTypeId::of::<Receiver<T>>(),
            type_identifier: "Receiver",
            def: Def::Channel,
            vtable: ValueVTable {
                default_value: no_default,
                clone_value: no_clone,
                is_zero: never_zero,
                replace: replace_value::<Receiver<T>>,
            },
        }
    };
}
