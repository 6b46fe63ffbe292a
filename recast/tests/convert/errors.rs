use std::sync::mpsc;

use recast::{ConvertError, ErrorCategory, Params, Recast, Recaster};
use recast_testhelpers::{IPanic, test};

#[derive(Recast, Default)]
struct Plain {
    pub v: i32,
}

#[test]
fn question_mark_works_in_tests() -> Result<(), IPanic> {
    let mut dst = Plain::default();
    Recaster::new().convert(&Plain { v: 3 }, &mut dst, None, &Params::new())?;
    assert_eq!(dst.v, 3);
    Ok(())
}

#[test]
fn function_pointers_are_unsupported() {
    fn one() -> i32 {
        1
    }

    #[derive(Recast)]
    struct Callback {
        pub call: fn() -> i32,
    }

    let src = Callback { call: one };
    let mut dst = Callback { call: one };
    let err = Recaster::new()
        .convert(&src, &mut dst, None, &Params::new())
        .unwrap_err();
    assert!(matches!(err, ConvertError::Unsupported { .. }));
    assert_eq!(err.category(), ErrorCategory::Structural);
    assert!(!err.is_retryable());
}

#[test]
fn channels_are_unsupported() {
    #[derive(Recast)]
    struct Wire {
        pub tx: mpsc::Sender<u8>,
    }

    let (tx, _rx) = mpsc::channel();
    let src = Wire { tx: tx.clone() };
    let mut dst = Wire { tx };
    let err = Recaster::new()
        .convert(&src, &mut dst, None, &Params::new())
        .unwrap_err();
    assert!(matches!(err, ConvertError::Unsupported { .. }));
}

#[test]
fn configuration_errors_are_classified() {
    #[derive(Recast, Default)]
    struct Twice {
        #[recast("v")]
        pub a: i32,
        pub v: i32,
    }

    let err = Recaster::new()
        .convert(&Plain::default(), &mut Twice::default(), None, &Params::new())
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Configuration);
}

#[test]
fn failed_conversions_leave_earlier_fields_written() {
    #[derive(Recast, Default)]
    struct Src {
        pub a: i32,
        pub b: Option<i32>,
    }

    #[derive(Recast, Default)]
    struct Dst {
        pub a: i32,
        pub b: i32,
    }

    let mut dst = Dst::default();
    let err = Recaster::new()
        .convert(&Src { a: 1, b: None }, &mut dst, None, &Params::new())
        .unwrap_err();
    assert!(matches!(err, ConvertError::NilSource { .. }));
    assert_eq!(dst.a, 1);
}

#[test]
fn failures_are_not_cached() {
    let cx = Recaster::new();
    let err = cx
        .convert(&Plain::default(), &mut 0i32, None, &Params::new())
        .unwrap_err();
    assert!(matches!(err, ConvertError::CannotAssign { .. }));

    let err = cx
        .convert(&1i32, &mut Plain::default(), None, &Params::new())
        .unwrap_err();
    assert!(matches!(err, ConvertError::SourceNotStruct { .. }));
    assert_eq!(cx.cached_schemas(), 0);
}
