use recast::{ConvertError, DynamicValue, Params, Recast, Recaster};
use recast_testhelpers::test;

#[derive(Recast, Default)]
struct User {
    pub name: String,
    #[recast("avatar")]
    pub picture: String,
    #[recast("-")]
    pub password: String,
}

#[derive(Recast, Default, Debug, PartialEq)]
struct Profile {
    pub name: String,
    #[recast("avatar")]
    pub image: String,
    #[recast("-")]
    pub secret: String,
}

#[test]
fn fields_match_by_alias() {
    let src = User {
        name: "amos".into(),
        picture: "hello.jpg".into(),
        password: "hunter2".into(),
    };
    let mut dst = Profile::default();
    Recaster::new()
        .convert(&src, &mut dst, None, &Params::new())
        .unwrap();
    assert_eq!(dst.image, "hello.jpg");
    assert_eq!(dst.name, "amos");
    assert_eq!(dst.secret, "");
}

#[test]
fn every_destination_claiming_an_alias_receives_it() {
    #[derive(Recast, Default)]
    struct Card {
        pub avatar: String,
    }

    let src = User {
        name: "amos".into(),
        picture: "hello.jpg".into(),
        password: "hunter2".into(),
    };
    let cx = Recaster::new();

    let mut profile = Profile::default();
    cx.convert(&src, &mut profile, None, &Params::new()).unwrap();
    let mut card = Card::default();
    cx.convert(&src, &mut card, None, &Params::new()).unwrap();

    assert_eq!(profile.image, "hello.jpg");
    assert_eq!(card.avatar, "hello.jpg");
}

#[test]
fn hidden_destination_fields_keep_their_value() {
    let mut dst = Profile {
        secret: "kept".into(),
        ..Profile::default()
    };
    Recaster::new()
        .convert(&User::default(), &mut dst, None, &Params::new())
        .unwrap();
    assert_eq!(dst.secret, "kept");
}

#[test]
fn hidden_source_fields_cannot_be_read() {
    #[derive(Recast, Default)]
    struct Leaky {
        pub password: String,
    }

    let err = Recaster::new()
        .convert(&User::default(), &mut Leaky::default(), None, &Params::new())
        .unwrap_err();
    let ConvertError::SourceFieldHidden { alias, .. } = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(alias, "password");
}

#[test]
fn ignore_empty_keeps_the_destination() {
    #[derive(Recast, Default)]
    struct Src {
        pub title: String,
        pub count: u32,
    }

    #[derive(Recast, Default)]
    struct Dst {
        #[recast(",ignoreEmpty")]
        pub title: String,
        #[recast(",ignoreEmpty")]
        pub count: u32,
    }

    let mut dst = Dst {
        title: "keep".into(),
        count: 3,
    };
    Recaster::new()
        .convert(
            &Src {
                title: String::new(),
                count: 4,
            },
            &mut dst,
            None,
            &Params::new(),
        )
        .unwrap();
    assert_eq!(dst.title, "keep");
    assert_eq!(dst.count, 4);
}

#[test]
fn ignore_empty_skips_values_that_cannot_be_converted() {
    #[derive(Recast, Default)]
    struct Holder {
        #[recast(",ignoreEmpty")]
        pub extra: DynamicValue,
    }

    Recaster::new()
        .convert(&Holder::default(), &mut Holder::default(), None, &Params::new())
        .unwrap();

    let src = Holder {
        extra: DynamicValue::new(1u8),
    };
    let err = Recaster::new()
        .convert(&src, &mut Holder::default(), None, &Params::new())
        .unwrap_err();
    assert!(matches!(err, ConvertError::Unsupported { .. }));
    assert_eq!(err.to_string(), "unexpected type DynamicValue is not supported");
}

#[test]
fn duplicate_aliases_are_rejected() {
    #[derive(Recast, Default)]
    struct Twice {
        #[recast("x")]
        pub a: i32,
        pub x: i32,
    }

    let err = Recaster::new()
        .convert(&Twice::default(), &mut Twice::default(), None, &Params::new())
        .unwrap_err();
    let ConvertError::DuplicateField { alias, .. } = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(alias, "x");
}

#[test]
fn hidden_field_may_share_a_visible_alias() {
    #[derive(Recast, Default)]
    struct Shadowed {
        #[recast("-")]
        pub old: i32,
        #[recast("old")]
        pub new: i32,
    }

    let mut dst = Shadowed::default();
    Recaster::new()
        .convert(&Shadowed { old: 1, new: 2 }, &mut dst, None, &Params::new())
        .unwrap();
    assert_eq!(dst.new, 2);
    assert_eq!(dst.old, 0);
}

#[test]
fn unknown_options_are_rejected() {
    #[derive(Recast, Default)]
    struct Odd {
        #[recast("a,sometimes")]
        pub a: i32,
    }

    let err = Recaster::new()
        .convert(&Odd::default(), &mut Odd::default(), None, &Params::new())
        .unwrap_err();
    let ConvertError::InvalidAnnotation { reason, .. } = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(*reason, "unknown option");
}

#[test]
fn two_binding_modes_are_rejected() {
    #[derive(Recast, Default)]
    struct Odd {
        #[recast("a,param,p,func")]
        pub a: i32,
    }

    let err = Recaster::new()
        .convert(&Odd::default(), &mut Odd::default(), None, &Params::new())
        .unwrap_err();
    let ConvertError::InvalidAnnotation { reason, .. } = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(*reason, "a field takes a single binding mode");
}
