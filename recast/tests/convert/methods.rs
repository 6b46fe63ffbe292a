use core::any::Any;

use recast::{
    BoxError, ConvertError, Method, Options, Params, Peek, Recast, Recaster, Returned, Rule,
    RuleGroup,
};
use recast_testhelpers::test;

#[derive(Recast, Default)]
struct Account {
    pub name: String,
    pub visits: u32,
}

#[derive(Recast, Default, Debug)]
#[recast(methods(make_label, count_visits, fail))]
struct Badge {
    pub name: String,
    #[recast("label,func,make_label")]
    pub label: String,
    #[recast("visits,func,count_visits")]
    pub visits: u32,
    touched: bool,
}

impl Badge {
    fn make_label(&mut self, src: Peek<'_>, _params: &Params) -> Result<String, BoxError> {
        let name = src
            .field("name")
            .and_then(|name| name.get::<String>())
            .ok_or("source has no name")?;
        Ok(format!("{name}123"))
    }

    // writes the receiver itself and returns nothing to assign
    fn count_visits(&mut self, src: Peek<'_>, _params: &Params) {
        self.visits = src.get::<Account>().map_or(0, |a| a.visits * 10);
        self.touched = true;
    }

    fn fail(&mut self, _src: Peek<'_>, _params: &Params) -> Result<u32, BoxError> {
        Err("no luck".into())
    }
}

#[test]
fn func_fields_take_the_method_result() {
    let src = Account {
        name: "yokel".into(),
        visits: 2,
    };
    let mut dst = Badge::default();
    Recaster::new()
        .convert(&src, &mut dst, None, &Params::new())
        .unwrap();
    assert_eq!(dst.name, "yokel");
    assert_eq!(dst.label, "yokel123");
    assert_eq!(dst.visits, 20);
    assert!(dst.touched);
}

#[test]
fn rules_rebind_a_field_to_another_method() {
    let fail = Badge::SHAPE
        .struct_def()
        .and_then(|sd| sd.method("fail"))
        .copied()
        .unwrap();
    let options =
        Options::new().rule_group(RuleGroup::new("").rule(Rule::new("label").func(fail)));
    let src = Account {
        name: "yokel".into(),
        visits: 1,
    };
    let err = Recaster::new()
        .convert(&src, &mut Badge::default(), Some(&options), &Params::new())
        .unwrap_err();
    let ConvertError::Custom { method, .. } = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(*method, "fail");
    assert_eq!(err.to_string(), "method fail failed: no luck");
}

fn shout(_dst: &mut dyn Any, src: Peek<'_>, params: &Params) -> Result<Option<Returned>, BoxError> {
    let name = src
        .field("name")
        .and_then(|name| name.get::<String>())
        .ok_or("source has no name")?;
    let suffix = params
        .get("suffix")
        .and_then(|p| p.get::<&'static str>())
        .copied()
        .unwrap_or("!");
    Ok(Returned::of(format!("{}{suffix}", name.to_uppercase())))
}

#[test]
fn free_functions_bind_through_rules() {
    #[derive(Recast, Default)]
    struct Loud {
        pub name: String,
    }

    let options = Options::new()
        .rule_group(RuleGroup::new("").rule(Rule::new("name").func(Method::new("shout", shout))));
    let src = Account {
        name: "quiet".into(),
        visits: 0,
    };

    let mut dst = Loud::default();
    let cx = Recaster::new();
    cx.convert(&src, &mut dst, Some(&options), &Params::new())
        .unwrap();
    assert_eq!(dst.name, "QUIET!");

    cx.convert(
        &src,
        &mut dst,
        Some(&options),
        &Params::new().with("suffix", "?!"),
    )
    .unwrap();
    assert_eq!(dst.name, "QUIET?!");
}

#[test]
fn clearing_a_func_binding_falls_back_to_the_source_field() {
    #[derive(Recast, Default)]
    struct Src {
        pub name: String,
        pub label: String,
        pub visits: u32,
    }

    let options = Options::new().rule_group(
        RuleGroup::new("")
            .rule(Rule::new("label").clear_func())
            .rule(Rule::new("visits").clear_func()),
    );
    let src = Src {
        name: "n".into(),
        label: "plain".into(),
        visits: 5,
    };
    let mut dst = Badge::default();
    Recaster::new()
        .convert(&src, &mut dst, Some(&options), &Params::new())
        .unwrap();
    assert_eq!(dst.label, "plain");
    assert_eq!(dst.visits, 5);
    assert!(!dst.touched);
}

#[test]
fn methods_of_embedded_records_receive_the_embedded_record() {
    #[derive(Recast, Default)]
    #[recast(methods(fill_code))]
    struct Coded {
        #[recast("code,func,fill_code")]
        pub code: String,
    }

    impl Coded {
        fn fill_code(&mut self, src: Peek<'_>, _params: &Params) -> Result<String, BoxError> {
            let name = src
                .field("name")
                .and_then(|name| name.get::<String>())
                .ok_or("source has no name")?;
            Ok(format!("{name}-code"))
        }
    }

    #[derive(Recast, Default)]
    struct Outer {
        #[recast(flatten)]
        coded: Coded,
        pub name: String,
    }

    let src = Account {
        name: "acme".into(),
        visits: 0,
    };
    let mut dst = Outer::default();
    Recaster::new()
        .convert(&src, &mut dst, None, &Params::new())
        .unwrap();
    assert_eq!(dst.coded.code, "acme-code");
    assert_eq!(dst.name, "acme");
}

#[test]
fn unresolvable_methods_fail() {
    #[derive(Recast, Default)]
    struct Lost {
        #[recast("x,func,nowhere")]
        pub x: i32,
    }

    let err = Recaster::new()
        .convert(&Lost::default(), &mut Lost::default(), None, &Params::new())
        .unwrap_err();
    let ConvertError::MethodNotFound { method, .. } = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(method, "nowhere");
}

#[test]
fn method_results_of_the_wrong_type_do_not_assign() {
    #[derive(Recast, Default)]
    struct Counter {
        pub name: u32,
    }

    let options = Options::new()
        .rule_group(RuleGroup::new("").rule(Rule::new("name").func(Method::new("shout", shout))));
    let mut dst = Counter::default();
    let err = Recaster::new()
        .convert(&Account::default(), &mut dst, Some(&options), &Params::new())
        .unwrap_err();
    assert!(matches!(err, ConvertError::CannotAssign { .. }));
    assert_eq!(dst.name, 0);
}
