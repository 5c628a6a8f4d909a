//! Capability oracle.
//!
//! Answers "does concrete type `T` satisfy capability `C`?" from an ordered rule table.
//! The answer is advisory: an unmatched pair yields `known_pattern = false` together with
//! guidance on how the check would be performed by hand.

use regex::Regex;
use serde::Serialize;

/// Result of probing a type descriptor against a capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome {
    pub known_pattern: bool,
    pub satisfies: bool,
    pub explanation: Vec<String>,
}

impl ProbeOutcome {
    pub fn known(satisfies: bool, explanation: Vec<String>) -> Self {
        Self {
            known_pattern: true,
            satisfies,
            explanation,
        }
    }

    /// Fallback for pairs no rule covers.
    pub fn guidance(type_descriptor: &str, capability: &str) -> Self {
        Self {
            known_pattern: false,
            satisfies: false,
            explanation: vec![
                format!("no rule covers `{type_descriptor}` against `{capability}`"),
                format!(
                    "check that `{type_descriptor}` defines every method in the method set of `{capability}`"
                ),
                "methods with pointer receivers only belong to the pointer type's method set"
                    .to_string(),
                format!(
                    "a compile-time assertion `var _ {capability} = ({type_descriptor})(nil)` settles it"
                ),
            ],
        }
    }

    /// A known verdict that rules the provider out.
    pub fn rejects(&self) -> bool {
        self.known_pattern && !self.satisfies
    }
}

/// Pluggable predicate consulted by the resolver.
pub trait CapabilityOracle {
    fn probe(&self, type_descriptor: &str, capability: &str) -> ProbeOutcome;
}

/// A single pattern → verdict entry.
///
/// `$type` and `$capability` in explanation lines are substituted with the probed values.
#[derive(Debug, Clone)]
pub struct CapabilityRule {
    pub type_pattern: Regex,
    pub capability_pattern: Regex,
    pub satisfies: bool,
    pub explanation: Vec<String>,
}

impl CapabilityRule {
    pub fn new(
        type_pattern: &str,
        capability_pattern: &str,
        satisfies: bool,
        explanation: &[&str],
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            type_pattern: Regex::new(type_pattern)?,
            capability_pattern: Regex::new(capability_pattern)?,
            satisfies,
            explanation: explanation.iter().map(|line| line.to_string()).collect(),
        })
    }

    pub fn matches(&self, type_descriptor: &str, capability: &str) -> bool {
        self.type_pattern.is_match(type_descriptor) && self.capability_pattern.is_match(capability)
    }

    fn outcome(&self, type_descriptor: &str, capability: &str) -> ProbeOutcome {
        let explanation = self
            .explanation
            .iter()
            .map(|line| {
                line.replace("$type", type_descriptor)
                    .replace("$capability", capability)
            })
            .collect();
        ProbeOutcome::known(self.satisfies, explanation)
    }
}

/// Ordered rule table; the first matching rule decides.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<CapabilityRule>,
}

type RuleSpec<'a> = (&'a str, &'a str, bool, &'a [&'a str]);

// (type pattern, capability pattern, verdict, explanation)
const BUILTIN_RULES: &[RuleSpec<'static>] = &[
    (
        r".+",
        r"^(any|interface\{\})$",
        true,
        &["every type satisfies the empty interface"],
    ),
    (
        r"^(string|bool|byte|rune|u?int(8|16|32|64)?|float(32|64)|\[\]byte)$",
        r".+",
        false,
        &["builtin type `$type` has no methods, so it cannot satisfy `$capability`"],
    ),
    (
        r"^\*os\.File$",
        r"^io\.(Reader|Writer|Closer|Seeker|ReadWriter|ReadCloser|WriteCloser|ReadWriteCloser|ReaderAt|WriterAt)$",
        true,
        &[
            "*os.File implements Read, Write, Seek, ReadAt, WriteAt and Close",
            "`$capability` is a subset of that method set",
        ],
    ),
    (
        r"^\*bytes\.Buffer$",
        r"^(io\.(Reader|Writer|ReadWriter|ByteReader|ByteWriter|StringWriter)|fmt\.Stringer)$",
        true,
        &["*bytes.Buffer implements `$capability` with pointer receivers"],
    ),
    (
        r"^\*bytes\.Buffer$",
        r"^io\.(Closer|ReadCloser|WriteCloser|ReadWriteCloser)$",
        false,
        &["*bytes.Buffer has no Close method"],
    ),
    (
        r"^bytes\.Buffer$",
        r"^io\.",
        false,
        &[
            "bytes.Buffer methods use pointer receivers",
            "only *bytes.Buffer satisfies `$capability`",
        ],
    ),
    (
        r"^\*strings\.Builder$",
        r"^(io\.(Writer|ByteWriter|StringWriter)|fmt\.Stringer)$",
        true,
        &["*strings.Builder implements `$capability`"],
    ),
    (
        r"^\*sql\.DB$",
        r"^io\.Closer$",
        true,
        &["*sql.DB implements Close() error"],
    ),
    (
        r"^\*sql\.DB$",
        r"^driver\.",
        false,
        &[
            "*sql.DB is a connection pool, not a driver type",
            "`$capability` is implemented by driver packages",
        ],
    ),
    (
        r"^\*http\.Client$",
        r"^http\.RoundTripper$",
        false,
        &[
            "*http.Client holds a RoundTripper in its Transport field",
            "it does not implement RoundTrip itself",
        ],
    ),
    (
        r"^\*http\.Client$",
        r"^io\.Closer$",
        false,
        &["*http.Client has CloseIdleConnections() but no Close() error"],
    ),
    (
        r"^\*http\.Transport$",
        r"^http\.RoundTripper$",
        true,
        &["*http.Transport implements RoundTrip(*http.Request) (*http.Response, error)"],
    ),
    (
        r"^\*http\.ServeMux$",
        r"^http\.Handler$",
        true,
        &["*http.ServeMux implements ServeHTTP(http.ResponseWriter, *http.Request)"],
    ),
    (
        r"^http\.HandlerFunc$",
        r"^http\.Handler$",
        true,
        &["http.HandlerFunc adapts a function to http.Handler via ServeHTTP"],
    ),
];

impl RuleTable {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_rules(rules: Vec<CapabilityRule>) -> Self {
        Self { rules }
    }

    /// Appends a rule after every existing one.
    pub fn push(&mut self, rule: CapabilityRule) {
        self.rules.push(rule);
    }

    /// Inserts rules ahead of the current table so they take precedence.
    pub fn prepend(&mut self, rules: Vec<CapabilityRule>) {
        let existing = std::mem::take(&mut self.rules);
        self.rules = rules;
        self.rules.extend(existing);
    }

    pub fn rules(&self) -> &[CapabilityRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Compiles a static rule table. A pattern that does not compile is a programming error
/// in the table, so it panics instead of silently shrinking the rule set.
fn compile_static_rules(table: &[RuleSpec<'_>]) -> Vec<CapabilityRule> {
    table
        .iter()
        .map(|(ty, cap, satisfies, explanation)| {
            CapabilityRule::new(ty, cap, *satisfies, explanation).unwrap_or_else(|err| {
                panic!("built-in capability rule ({ty:?}, {cap:?}) does not compile: {err}")
            })
        })
        .collect()
}

impl Default for RuleTable {
    fn default() -> Self {
        Self {
            rules: compile_static_rules(BUILTIN_RULES),
        }
    }
}

impl CapabilityOracle for RuleTable {
    fn probe(&self, type_descriptor: &str, capability: &str) -> ProbeOutcome {
        let type_descriptor = type_descriptor.trim();
        let capability = capability.trim();

        self.rules
            .iter()
            .find(|rule| rule.matches(type_descriptor, capability))
            .map(|rule| rule.outcome(type_descriptor, capability))
            .unwrap_or_else(|| ProbeOutcome::guidance(type_descriptor, capability))
    }
}
