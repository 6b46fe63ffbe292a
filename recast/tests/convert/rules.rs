use recast::{ConvertError, Options, Params, Recast, Recaster, Rule, RuleGroup};
use recast_testhelpers::test;

#[derive(Recast, Default, Clone)]
struct Leaf {
    pub note: String,
    pub score: i32,
}

#[derive(Recast, Default, Clone)]
struct Branch {
    pub leaf: Leaf,
    pub leaves: Vec<Leaf>,
    pub tag: String,
}

#[derive(Recast, Default, Clone)]
struct Tree {
    pub branch: Branch,
    pub name: String,
}

fn tree() -> Tree {
    Tree {
        branch: Branch {
            leaf: Leaf {
                note: String::new(),
                score: 0,
            },
            leaves: vec![Leaf {
                note: String::new(),
                score: 1,
            }],
            tag: String::new(),
        },
        name: "oak".into(),
    }
}

fn filled() -> Tree {
    Tree {
        branch: Branch {
            leaf: Leaf {
                note: "keep".into(),
                score: 5,
            },
            leaves: Vec::new(),
            tag: "kept-tag".into(),
        },
        name: String::new(),
    }
}

#[test]
fn rule_groups_apply_at_their_path_only() {
    let options = Options::new()
        .rule_group(RuleGroup::new("branch.leaf").rule(Rule::new("note").ignore_empty(true)));
    let mut dst = filled();
    Recaster::new()
        .convert(&tree(), &mut dst, Some(&options), &Params::new())
        .unwrap();
    assert_eq!(dst.name, "oak");
    assert_eq!(dst.branch.leaf.note, "keep");
    assert_eq!(dst.branch.leaf.score, 0);
    assert_eq!(dst.branch.tag, "");
}

#[test]
fn root_rules_do_not_leak_into_nested_records() {
    #[derive(Recast, Default)]
    struct Named {
        pub note: String,
        pub inner: Leaf,
    }

    let options =
        Options::new().rule_group(RuleGroup::new("").rule(Rule::new("note").ignore_empty(true)));
    let src = Named::default();
    let mut dst = Named {
        note: "outer".into(),
        inner: Leaf {
            note: "inner".into(),
            score: 0,
        },
    };
    Recaster::new()
        .convert(&src, &mut dst, Some(&options), &Params::new())
        .unwrap();
    assert_eq!(dst.note, "outer");
    assert_eq!(dst.inner.note, "");
}

#[test]
fn rules_reach_records_inside_sequences() {
    let options = Options::new()
        .deep_copy(true)
        .rule_group(RuleGroup::new("branch.leaves").rule(Rule::new("note").param("stamp")));
    let params = Params::new().with("stamp", String::from("stamped"));
    let mut dst = Tree::default();
    Recaster::new()
        .convert(&tree(), &mut dst, Some(&options), &params)
        .unwrap();
    assert_eq!(dst.branch.leaves.len(), 1);
    assert_eq!(dst.branch.leaves[0].note, "stamped");
    assert_eq!(dst.branch.leaves[0].score, 1);
    assert_eq!(dst.branch.leaf.note, "");
}

#[test]
fn rule_paths_are_matched_by_segment() {
    #[derive(Recast, Default)]
    struct Pair {
        pub leaf: Leaf,
        pub leafy: Leaf,
    }

    let options = Options::new()
        .rule_group(RuleGroup::new("leaf").rule(Rule::new("note").ignore_empty(true)));
    let keep = || Leaf {
        note: "keep".into(),
        score: 0,
    };
    let mut dst = Pair {
        leaf: keep(),
        leafy: keep(),
    };
    Recaster::new()
        .convert(&Pair::default(), &mut dst, Some(&options), &Params::new())
        .unwrap();
    assert_eq!(dst.leaf.note, "keep");
    assert_eq!(dst.leafy.note, "");
}

#[test]
fn rules_for_unknown_fields_fail() {
    let options = Options::new()
        .rule_group(RuleGroup::new("branch").rule(Rule::new("nope").ignore_empty(true)));
    let err = Recaster::new()
        .convert(&tree(), &mut Tree::default(), Some(&options), &Params::new())
        .unwrap_err();
    let ConvertError::RuleFieldNotFound { record, field } = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(field, "nope");
    assert!(record.is_type::<Branch>());
}

#[test]
fn later_ops_win() {
    let options = Options::new().rule_group(
        RuleGroup::new("")
            .rule(Rule::new("name").ignore_empty(true))
            .rule(Rule::new("name").ignore_empty(false)),
    );
    let mut dst = filled();
    dst.name = "old".into();
    let mut src = tree();
    src.name = String::new();
    Recaster::new()
        .convert(&src, &mut dst, Some(&options), &Params::new())
        .unwrap();
    assert_eq!(dst.name, "");
}
