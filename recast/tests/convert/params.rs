use recast::{ConvertError, Options, Params, Recast, Recaster, Rule, RuleGroup};
use recast_testhelpers::test;

#[derive(Recast, Default)]
struct Request {
    pub path: String,
}

#[derive(Recast, Default, Debug)]
struct Audited {
    pub path: String,
    #[recast("user,param")]
    pub user: String,
    #[recast("trace,param,trace_id,ignoreEmpty")]
    pub trace: u64,
}

fn request() -> Request {
    Request {
        path: "/index".into(),
    }
}

#[test]
fn param_fields_read_the_params() {
    let params = Params::new()
        .with("user", String::from("root"))
        .with("trace_id", 42u64);
    let mut dst = Audited::default();
    Recaster::new()
        .convert(&request(), &mut dst, None, &params)
        .unwrap();
    assert_eq!(dst.path, "/index");
    assert_eq!(dst.user, "root");
    assert_eq!(dst.trace, 42);
}

#[test]
fn absent_param_with_ignore_empty_is_skipped() {
    let params = Params::new().with("user", String::from("root"));
    let mut dst = Audited {
        trace: 7,
        ..Audited::default()
    };
    Recaster::new()
        .convert(&request(), &mut dst, None, &params)
        .unwrap();
    assert_eq!(dst.trace, 7);
}

#[test]
fn absent_param_fails() {
    let err = Recaster::new()
        .convert(&request(), &mut Audited::default(), None, &Params::new())
        .unwrap_err();
    let ConvertError::MissingParam { name, field, .. } = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(name, "user");
    assert_eq!(*field, "user");
    assert!(err.is_retryable());
}

#[test]
fn param_of_another_type_does_not_assign() {
    let params = Params::new().with("user", 5i32);
    let err = Recaster::new()
        .convert(&request(), &mut Audited::default(), None, &params)
        .unwrap_err();
    let ConvertError::CannotAssign { src, .. } = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(src, "i32");
}

#[test]
fn rules_bind_and_unbind_params() {
    #[derive(Recast, Default)]
    struct Src {
        pub path: String,
        pub user: String,
    }

    let options = Options::new().rule_group(
        RuleGroup::new("")
            .rule(Rule::new("path").param("override"))
            .rule(Rule::new("user").clear_param())
            .rule(Rule::new("trace").ignore_empty(true)),
    );
    let src = Src {
        path: "/src".into(),
        user: "from-src".into(),
    };
    let params = Params::new().with("override", String::from("/param"));
    let mut dst = Audited::default();
    Recaster::new()
        .convert(&src, &mut dst, Some(&options), &params)
        .unwrap();
    assert_eq!(dst.path, "/param");
    assert_eq!(dst.user, "from-src");
}

#[test]
fn params_are_not_consumed() {
    let params = Params::new()
        .with("user", String::from("root"))
        .with("unused", ());
    let cx = Recaster::new();
    for _ in 0..2 {
        let mut dst = Audited::default();
        cx.convert(&request(), &mut dst, None, &params).unwrap();
        assert_eq!(dst.user, "root");
    }
    assert_eq!(params.len(), 2);
}
