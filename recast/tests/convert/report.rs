use recast::{ConvertError, Options, Params, Recast, Recaster, Rule, RuleGroup};
use recast_testhelpers::test;

#[derive(Recast, Default)]
struct Address {
    pub city: String,
}

#[derive(Recast, Default)]
struct User {
    pub name: String,
    #[recast("avatar")]
    pub picture: String,
    pub address: Address,
}

#[derive(Recast, Default)]
struct Town {
    pub city: String,
}

#[derive(Recast, Default)]
#[recast(methods(greet))]
struct UserView {
    pub name: String,
    #[recast("avatar")]
    pub image: String,
    #[recast("greeting,func,greet")]
    pub greeting: String,
    #[recast("token,param,ignoreEmpty")]
    pub token: String,
    pub address: Town,
    #[recast("-")]
    pub cache: String,
}

impl UserView {
    fn greet(&mut self, _src: recast::Peek<'_>, _params: &Params) -> Result<String, recast::BoxError> {
        Ok("hi".into())
    }
}

#[test]
fn report_lists_every_field() {
    let report = Recaster::new().report::<User, UserView>(None).unwrap();
    assert!(report.dst.is_type::<UserView>());
    assert_eq!(report.fingerprint, 0);

    let names: Vec<&str> = report.fields.iter().map(|f| f.name).collect();
    assert_eq!(
        names,
        ["name", "image", "greeting", "token", "address", "cache"]
    );

    let image = &report.fields[1];
    assert_eq!(image.alias.as_deref(), Some("avatar"));
    assert_eq!(image.source.as_deref(), Some("User.picture"));

    let greeting = &report.fields[2];
    assert_eq!(greeting.method, Some("greet"));
    assert_eq!(greeting.source, None);

    let token = &report.fields[3];
    assert_eq!(token.param.as_deref(), Some("token"));
    assert!(token.ignore_empty);

    let address = &report.fields[4];
    let nested = address.nested.as_ref().unwrap();
    assert!(nested.dst.is_type::<Town>());
    assert_eq!(nested.fields[0].source.as_deref(), Some("Address.city"));

    assert!(report.fields[5].hidden);
}

#[test]
fn report_renders_as_a_tree() {
    let options = Options::new()
        .rule_group(RuleGroup::new("address").rule(Rule::new("city").ignore_empty(true)));
    let report = Recaster::new()
        .report::<User, UserView>(Some(&options))
        .unwrap();
    let rendered = report.to_string();

    let mut lines = rendered.lines();
    assert_eq!(
        lines.next(),
        Some(format!("UserView (fingerprint {})", options.fingerprint()).as_str())
    );
    assert!(rendered.contains("\n  name <- User.name\n"));
    assert!(rendered.contains("\n  image as \"avatar\" <- User.picture\n"));
    assert!(rendered.contains("\n  greeting <- func greet\n"));
    assert!(rendered.contains("\n  token <- param \"token\" [ignoreEmpty]\n"));
    assert!(rendered.contains("\n    city <- Address.city [ignoreEmpty]\n"));
    assert!(rendered.contains("\n  cache (hidden)\n"));
}

#[test]
fn report_surfaces_schema_errors() {
    #[derive(Recast, Default)]
    struct Broken {
        #[recast("x,func,missing")]
        pub x: i32,
    }

    let err = Recaster::new().report::<User, Broken>(None).unwrap_err();
    assert!(matches!(err, ConvertError::MethodNotFound { .. }));
}

#[test]
fn report_fails_where_conversion_fails() {
    #[derive(Recast, Default)]
    struct Source {
        pub x: i32,
        #[recast("-")]
        pub secret: i32,
    }

    #[derive(Recast, Default)]
    struct Unmatched {
        pub x: i32,
        pub missing: i32,
    }

    #[derive(Recast, Default)]
    struct Peeking {
        pub x: i32,
        pub secret: i32,
    }

    let cx = Recaster::new();
    let err = cx.report::<Source, Unmatched>(None).unwrap_err();
    assert!(
        matches!(&err, ConvertError::FieldNotFound { alias, .. } if alias == "missing"),
        "{err}"
    );
    let converted = cx.convert(&Source::default(), &mut Unmatched::default(), None, &Params::new());
    assert!(matches!(converted, Err(ConvertError::FieldNotFound { .. })));

    let err = cx.report::<Source, Peeking>(None).unwrap_err();
    assert!(
        matches!(&err, ConvertError::SourceFieldHidden { alias, .. } if alias == "secret"),
        "{err}"
    );
}
