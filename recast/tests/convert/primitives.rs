use recast::{ConvertError, Options, Params, Recast, Recaster};
use recast_testhelpers::test;

#[test]
fn scalars_copy_into_the_same_type() {
    let cx = Recaster::new();

    let mut dst = 0i32;
    cx.convert(&42i32, &mut dst, None, &Params::new()).unwrap();
    assert_eq!(dst, 42);

    let mut dst = String::new();
    cx.convert(&String::from("hello"), &mut dst, None, &Params::new())
        .unwrap();
    assert_eq!(dst, "hello");

    let mut dst = 0.0f64;
    cx.convert(&2.5f64, &mut dst, None, &Params::new()).unwrap();
    assert_eq!(dst, 2.5);
}

#[test]
fn scalars_of_different_types_do_not_assign() {
    let mut dst = 0i64;
    let err = Recaster::new()
        .convert(&7i32, &mut dst, None, &Params::new())
        .unwrap_err();
    assert!(matches!(err, ConvertError::CannotAssign { .. }));
    assert_eq!(err.to_string(), "cannot assign i32 in src to i64 in dst");
    assert_eq!(dst, 0);
}

#[test]
fn arrays_are_copied_by_value() {
    let src = [1u8, 2, 3];
    let options = Options::new().deep_copy(true);
    for options in [None, Some(&options)] {
        let mut dst = [0u8; 3];
        Recaster::new()
            .convert(&src, &mut dst, options, &Params::new())
            .unwrap();
        assert_eq!(dst, [1, 2, 3]);
    }
}

#[test]
fn none_into_a_scalar_is_a_nil_source() {
    #[derive(Recast, Default)]
    struct Src {
        pub v: Option<i32>,
    }

    #[derive(Recast, Default)]
    struct Dst {
        pub v: i32,
    }

    let mut dst = Dst { v: 9 };
    let err = Recaster::new()
        .convert(&Src::default(), &mut dst, None, &Params::new())
        .unwrap_err();
    assert_eq!(err.to_string(), "value of Option<i32> in src is nil");
    assert!(err.is_retryable());
    assert_eq!(dst.v, 9);
}
