// Rule specification parsing

use crate::RuleError;
use fieldcheck_log::debug;
use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

/// One token of a rule specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `required`: the value must not be empty.
    Required,
    /// `min:N`: length at least `N`.
    Min(i64),
    /// `max:N`: length at most `N`.
    Max(i64),
    /// `len:N`: length exactly `N`. A negative `N` fails every value.
    Len(i64),
    /// `password`: delegated to the password checker.
    Password,
    /// `email`: delegated to the email checker.
    Email,
}

impl Rule {
    /// Constraint name recorded on violations.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Min(_) => "min",
            Rule::Max(_) => "max",
            Rule::Len(_) => "len",
            Rule::Password => "password",
            Rule::Email => "email",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Min(n) | Rule::Max(n) | Rule::Len(n) => write!(f, "{}:{}", self.name(), n),
            _ => f.write_str(self.name()),
        }
    }
}

/// The suffix of a `min:`/`max:`/`len:` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    /// A base-10 integer, optionally signed.
    Exact(i64),
    /// An integer outside the `i64` range, saturated to the nearest end.
    Clamped(i64),
    /// Empty, or not an integer at all.
    Malformed,
}

fn parse_bound(raw: &str) -> Bound {
    match raw.parse::<i64>() {
        Ok(n) => Bound::Exact(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Bound::Clamped(i64::MAX),
            IntErrorKind::NegOverflow => Bound::Clamped(i64::MIN),
            _ => Bound::Malformed,
        },
    }
}

/// What a single token turned out to be.
enum Token<'a> {
    Rule(Rule),
    Bounded {
        make: fn(i64) -> Rule,
        bound: Bound,
        raw: &'a str,
    },
    Unknown,
    Empty,
}

fn classify(token: &str) -> Token<'_> {
    let bounded: [(&str, fn(i64) -> Rule); 3] =
        [("min:", Rule::Min), ("max:", Rule::Max), ("len:", Rule::Len)];

    for (prefix, make) in bounded {
        if let Some(raw) = token.strip_prefix(prefix) {
            return Token::Bounded {
                make,
                bound: parse_bound(raw),
                raw,
            };
        }
    }

    match token {
        "required" => Token::Rule(Rule::Required),
        "password" => Token::Rule(Rule::Password),
        "email" => Token::Rule(Rule::Email),
        "" => Token::Empty,
        _ => Token::Unknown,
    }
}

/// An ordered list of rules parsed from a comma-separated specification
/// such as `"required,min:8,max:64,password"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Parse leniently.
    ///
    /// Unrecognized tokens are skipped. A `min:`/`max:`/`len:` bound is
    /// read as a signed integer: a missing or non-numeric one becomes `0`
    /// and one outside the `i64` range saturates, so `min:99999999999999999999`
    /// fails every value. Tokens are compared exactly as written, so
    /// `" required"` is not `required`.
    pub fn parse(spec: &str) -> Self {
        let mut rules = Vec::new();

        for token in spec.split(',') {
            match classify(token) {
                Token::Rule(rule) => rules.push(rule),
                Token::Bounded { make, bound, raw } => match bound {
                    Bound::Exact(n) => rules.push(make(n)),
                    Bound::Clamped(n) => {
                        debug!(
                            target: "fieldcheck::rules",
                            "bound '{}' in rule '{}' is out of range, using {}", raw, token, n
                        );
                        rules.push(make(n));
                    }
                    Bound::Malformed => {
                        debug!(
                            target: "fieldcheck::rules",
                            "bound '{}' in rule '{}' is not a number, using 0", raw, token
                        );
                        rules.push(make(0));
                    }
                },
                Token::Unknown => {
                    debug!(target: "fieldcheck::rules", "ignoring unknown rule '{}' in '{}'", token, spec);
                }
                Token::Empty => {}
            }
        }

        Self { rules }
    }

    /// Parse strictly, rejecting unknown tokens and any bound that is not a
    /// non-negative integer within range.
    ///
    /// Empty tokens (`"required,"`) are still skipped.
    pub fn parse_strict(spec: &str) -> Result<Self, RuleError> {
        let mut rules = Vec::new();

        for token in spec.split(',') {
            match classify(token) {
                Token::Rule(rule) => rules.push(rule),
                Token::Bounded {
                    make,
                    bound: Bound::Exact(n),
                    ..
                } if n >= 0 => rules.push(make(n)),
                Token::Bounded { .. } => {
                    return Err(RuleError::InvalidBound {
                        token: token.to_string(),
                        spec: spec.to_string(),
                    });
                }
                Token::Unknown => {
                    return Err(RuleError::UnknownRule {
                        token: token.to_string(),
                        spec: spec.to_string(),
                    });
                }
                Token::Empty => {}
            }
        }

        Ok(Self { rules })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn contains(&self, rule: &Rule) -> bool {
        self.rules.contains(rule)
    }
}

impl FromStr for RuleSet {
    type Err = RuleError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        Self::parse_strict(spec)
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", rule)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
