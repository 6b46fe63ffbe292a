use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::OnceLock;

use crate::{ConvertError, Method};

/// One operation of a [`Rule`], applied to a field's descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleOp {
    /// Bind the field to a method, or drop an existing method binding.
    Func(Option<Method>),
    /// Set or clear the ignore-empty flag.
    IgnoreEmpty(bool),
    /// Bind the field to a parameter, or drop an existing parameter binding.
    Param(Option<String>),
}

/// Overrides for one field, named by alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    field: String,
    ops: Vec<RuleOp>,
}

impl Rule {
    /// A rule with no operations for the field aliased `field`.
    pub fn new(field: impl Into<String>) -> Self {
        Rule {
            field: field.into(),
            ops: Vec::new(),
        }
    }

    /// Binds the field to `method`.
    #[must_use]
    pub fn func(self, method: Method) -> Self {
        self.op(RuleOp::Func(Some(method)))
    }

    /// Removes a method binding declared by the field's annotation.
    #[must_use]
    pub fn clear_func(self) -> Self {
        self.op(RuleOp::Func(None))
    }

    /// Sets the ignore-empty flag.
    #[must_use]
    pub fn ignore_empty(self, ignore_empty: bool) -> Self {
        self.op(RuleOp::IgnoreEmpty(ignore_empty))
    }

    /// Binds the field to the parameter `name`.
    #[must_use]
    pub fn param(self, name: impl Into<String>) -> Self {
        self.op(RuleOp::Param(Some(name.into())))
    }

    /// Removes a parameter binding declared by the field's annotation.
    #[must_use]
    pub fn clear_param(self) -> Self {
        self.op(RuleOp::Param(None))
    }

    /// Appends an operation. Operations apply in order.
    #[must_use]
    pub fn op(mut self, op: RuleOp) -> Self {
        self.ops.push(op);
        self
    }

    /// The targeted field alias.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The operations, in application order.
    pub fn ops(&self) -> &[RuleOp] {
        &self.ops
    }
}

/// Rules scoped to a dotted path of field aliases; `""` is the record being converted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleGroup {
    path: String,
    rules: Vec<Rule>,
}

impl RuleGroup {
    /// An empty group for `path`, e.g. `"profile.address"`.
    pub fn new(path: impl Into<String>) -> Self {
        RuleGroup {
            path: path.into(),
            rules: Vec::new(),
        }
    }

    /// Adds a rule.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// The scope of this group.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The rules, in insertion order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Whether this group's path is `prefix` or lies under it.
    fn is_under(&self, prefix: &str) -> bool {
        self.path == prefix || self.relative_to(prefix).is_some()
    }

    fn relative_to(&self, prefix: &str) -> Option<&str> {
        if self.path == prefix {
            return Some("");
        }
        self.path.strip_prefix(prefix)?.strip_prefix('.')
    }
}

static EMPTY: Options = Options::new();

/// Configuration of a conversion: the deep-copy flag and scoped rules.
#[derive(Debug, Clone, Default)]
pub struct Options {
    deep_copy: bool,
    groups: Vec<RuleGroup>,
    fingerprint: OnceLock<u64>,
}

impl Options {
    /// Shallow copy, no rules.
    pub const fn new() -> Self {
        Options {
            deep_copy: false,
            groups: Vec::new(),
            fingerprint: OnceLock::new(),
        }
    }

    /// The shared empty configuration.
    pub fn empty() -> &'static Options {
        &EMPTY
    }

    /// Sets whether pointers and collections are copied into independent storage.
    #[must_use]
    pub fn deep_copy(mut self, deep_copy: bool) -> Self {
        self.deep_copy = deep_copy;
        self.fingerprint = OnceLock::new();
        self
    }

    /// Adds a rule group.
    #[must_use]
    pub fn rule_group(mut self, group: RuleGroup) -> Self {
        self.groups.push(group);
        self.fingerprint = OnceLock::new();
        self
    }

    /// Whether deep copy is on.
    pub fn is_deep_copy(&self) -> bool {
        self.deep_copy
    }

    /// All rule groups.
    pub fn rule_groups(&self) -> &[RuleGroup] {
        &self.groups
    }

    /// Whether this is equivalent to [`Options::empty`].
    pub fn is_empty(&self) -> bool {
        !self.deep_copy && self.groups.is_empty()
    }

    /// Hash of everything that affects conversion; 0 for the empty configuration.
    ///
    /// Part of every cache key. Computed once.
    pub fn fingerprint(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        *self.fingerprint.get_or_init(|| {
            let mut hasher = DefaultHasher::new();
            self.deep_copy.hash(&mut hasher);
            self.groups.hash(&mut hasher);
            // 0 is reserved for the empty configuration
            match hasher.finish() {
                0 => 1,
                h => h,
            }
        })
    }

    /// The rule groups that apply at the current level.
    pub fn effect(&self) -> Options {
        Options {
            deep_copy: self.deep_copy,
            groups: self
                .groups
                .iter()
                .filter(|g| g.path.is_empty())
                .cloned()
                .collect(),
            fingerprint: OnceLock::new(),
        }
    }

    /// A copy keeping only the rule groups at or under `prefix`.
    pub fn split(&self, prefix: &str) -> Options {
        Options {
            deep_copy: self.deep_copy,
            groups: self
                .groups
                .iter()
                .filter(|g| g.is_under(prefix))
                .cloned()
                .collect(),
            fingerprint: OnceLock::new(),
        }
    }

    /// Rewrites every rule group path relative to `prefix`.
    ///
    /// Fails on a group that is not under `prefix`.
    pub fn redirect(mut self, prefix: &str) -> Result<Options, ConvertError> {
        for group in &mut self.groups {
            let Some(rest) = group.relative_to(prefix) else {
                return Err(ConvertError::InvalidRulePath {
                    path: group.path.clone(),
                    prefix: prefix.to_owned(),
                });
            };
            group.path = rest.to_owned();
        }
        self.fingerprint = OnceLock::new();
        Ok(self)
    }

    /// The options seen by the value of the field aliased `alias`.
    pub fn scoped(&self, alias: &str) -> Result<Options, ConvertError> {
        self.split(alias).redirect(alias)
    }
}

impl PartialEq for Options {
    fn eq(&self, other: &Self) -> bool {
        self.deep_copy == other.deep_copy && self.groups == other.groups
    }
}

impl Eq for Options {}
