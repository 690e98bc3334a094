//! Route matching logic.
//!
//! # Responsibilities
//! - Match exact paths (full string equality, case-sensitive)
//! - Match prefix-style regular expressions
//! - Combine a role's rules with OR semantics
//!
//! # Design Decisions
//! - Patterns are compiled once when the rule set is built
//! - Empty rule set never matches
//! - Any string is a valid input; no match is not an error

use regex::Regex;

use crate::config::RouteRules;

/// Trait for matching a request path against a condition.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches one path exactly.
#[derive(Debug, Clone)]
pub struct ExactMatcher {
    path: String,
}

impl ExactMatcher {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Matcher for ExactMatcher {
    fn matches(&self, path: &str) -> bool {
        path == self.path
    }
}

/// Matches a compiled regular expression, typically anchored `^/prefix`.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: Regex,
}

impl PatternMatcher {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl Matcher for PatternMatcher {
    fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }
}

/// All rules owned by one role; matches if any rule matches.
#[derive(Debug)]
pub struct RuleSet {
    matchers: Vec<Box<dyn Matcher>>,
}

impl RuleSet {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }

    /// Compile a config table: exact paths first, then patterns.
    pub fn compile(rules: &RouteRules) -> Result<Self, regex::Error> {
        let mut matchers: Vec<Box<dyn Matcher>> = Vec::with_capacity(
            rules.exact.len() + rules.patterns.len(),
        );
        for path in &rules.exact {
            matchers.push(Box::new(ExactMatcher::new(path.as_str())));
        }
        for pattern in &rules.patterns {
            matchers.push(Box::new(PatternMatcher::new(pattern)?));
        }
        Ok(Self::new(matchers))
    }

    /// Rule set made of exact paths only.
    pub fn exact<S: AsRef<str>>(paths: &[S]) -> Self {
        Self::new(
            paths
                .iter()
                .map(|p| Box::new(ExactMatcher::new(p.as_ref())) as Box<dyn Matcher>)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl Matcher for RuleSet {
    fn matches(&self, path: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(path))
    }
}
