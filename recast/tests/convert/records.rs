use recast::{ConvertError, Params, Recast, Recaster};
use recast_testhelpers::test;

#[derive(Recast, Default)]
struct Wide {
    pub v1: i32,
    pub v2: f64,
    pub v3: f32,
    pub v4: String,
}

#[derive(Recast, Default, Debug, PartialEq)]
struct Narrow {
    pub v1: i32,
    pub v2: f64,
    pub v3: f32,
}

#[test]
fn destination_fields_are_picked_from_a_wider_source() {
    let src = Wide {
        v1: 1,
        v2: 2.1,
        v3: 3.1,
        v4: "extra".into(),
    };
    let mut dst = Narrow::default();
    Recaster::new()
        .convert(&src, &mut dst, None, &Params::new())
        .unwrap();
    assert_eq!(
        dst,
        Narrow {
            v1: 1,
            v2: 2.1,
            v3: 3.1
        }
    );
}

#[test]
fn missing_source_field_fails() {
    let mut dst = Wide::default();
    let err = Recaster::new()
        .convert(&Narrow::default(), &mut dst, None, &Params::new())
        .unwrap_err();
    let ConvertError::FieldNotFound { alias, .. } = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(alias, "v4");
    assert_eq!(err.to_string(), "field v4 of Wide does not exist in Narrow");
}

#[derive(Recast, Default)]
struct Base {
    pub v1: i32,
}

#[derive(Recast, Default)]
struct Embedding {
    pub v5: String,
    #[recast(flatten)]
    base: Base,
}

#[derive(Recast, Default, Debug, PartialEq)]
struct Flat {
    pub v1: i32,
    pub v5: String,
}

#[test]
fn flattened_fields_are_promoted() {
    let src = Embedding {
        base: Base { v1: 7 },
        v5: "five".into(),
    };
    let mut dst = Flat::default();
    Recaster::new()
        .convert(&src, &mut dst, None, &Params::new())
        .unwrap();
    assert_eq!(
        dst,
        Flat {
            v1: 7,
            v5: "five".into()
        }
    );
}

#[test]
fn flattened_destination_fields_are_filled_through_the_embedding() {
    let src = Flat {
        v1: 3,
        v5: "x".into(),
    };
    let mut dst = Embedding::default();
    Recaster::new()
        .convert(&src, &mut dst, None, &Params::new())
        .unwrap();
    assert_eq!(dst.base.v1, 3);
    assert_eq!(dst.v5, "x");
}

#[test]
fn private_fields_are_left_alone() {
    #[derive(Recast, Default)]
    struct Src {
        pub shown: i32,
    }

    #[derive(Recast, Default)]
    struct Dst {
        pub shown: i32,
        private: i32,
    }

    let mut dst = Dst {
        shown: 0,
        private: 8,
    };
    Recaster::new()
        .convert(&Src { shown: 1 }, &mut dst, None, &Params::new())
        .unwrap();
    assert_eq!(dst.shown, 1);
    assert_eq!(dst.private, 8);
}

#[test]
fn nested_records_convert_in_place() {
    #[derive(Recast, Default)]
    struct Address {
        pub city: String,
        pub zip: String,
    }

    #[derive(Recast, Default)]
    struct Person {
        pub name: String,
        pub address: Address,
    }

    #[derive(Recast, Default)]
    struct City {
        pub city: String,
    }

    #[derive(Recast, Default)]
    struct PersonView {
        pub name: String,
        pub address: City,
    }

    let src = Person {
        name: "ada".into(),
        address: Address {
            city: "london".into(),
            zip: "n1".into(),
        },
    };
    let mut dst = PersonView::default();
    Recaster::new()
        .convert(&src, &mut dst, None, &Params::new())
        .unwrap();
    assert_eq!(dst.name, "ada");
    assert_eq!(dst.address.city, "london");
}

#[test]
fn record_destination_needs_a_record_source() {
    let err = Recaster::new()
        .convert(&1i32, &mut Narrow::default(), None, &Params::new())
        .unwrap_err();
    assert!(matches!(err, ConvertError::SourceNotStruct { .. }));
}

#[test]
fn records_without_clone_are_copied_field_by_field() {
    #[derive(Recast, Default)]
    struct Src {
        pub inner: Option<Box<Named>>,
    }

    #[derive(Recast, Default)]
    struct Dst {
        pub inner: Option<Box<Named>>,
    }

    #[derive(Recast, Default, Debug, PartialEq)]
    struct Named {
        pub name: String,
    }

    let src = Src {
        inner: Some(Box::new(Named { name: "n".into() })),
    };
    let mut dst = Dst::default();
    Recaster::new()
        .convert(&src, &mut dst, None, &Params::new())
        .unwrap();
    assert_eq!(dst.inner.as_deref(), Some(&Named { name: "n".into() }));
}
