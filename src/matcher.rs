//! Glob matching used by the file finder.
//!
//! Traversal only talks to [`PatternMatcher`], so the wildcard dialect can be
//! swapped without touching the walk. The shipped dialect is [`GlobPattern`]:
//!
//! - `*` matches any run of characters inside one path segment
//! - `**` as a whole segment matches zero or more segments
//! - `**` glued to other characters (`**.xml`) matches within the segment
//!   or across any number of segments, so `mvn/**.xml` also matches
//!   `mvn/a/b/pom.xml`
//! - a pattern without `/` is matched against the entry name only
//!   (`node_modules`, `*.txt`, `pom.xml`), anything else against the
//!   repo-relative path and then the absolute path

use crate::error::FindError;
use glob::{MatchOptions, Pattern};

/// Separators are literal, leading dots are not special
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A path presented to a matcher, always in `/`-separated form
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Path relative to the traversal root, without a leading `/`
    pub relative: &'a str,
    /// Absolute path of the entry
    pub absolute: &'a str,
}

impl<'a> Candidate<'a> {
    /// Create a candidate from its relative and absolute forms
    #[must_use]
    pub const fn new(relative: &'a str, absolute: &'a str) -> Self {
        Self { relative, absolute }
    }

    /// Final segment of the path
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.relative.rsplit('/').next().unwrap_or(self.relative)
    }
}

/// A single compiled pattern that can decide whether a path matches it
pub trait PatternMatcher: Send + Sync + std::fmt::Debug {
    /// Returns true if `candidate` matches this pattern
    fn matches(&self, candidate: &Candidate<'_>) -> bool;
}

/// Shell-style glob backed by the `glob` crate
#[derive(Debug, Clone)]
pub struct GlobPattern {
    /// Pattern text as supplied
    source: String,
    /// Compiled alternatives; the pattern matches if any of them does
    alternatives: Vec<Pattern>,
    /// Whether the pattern names a path rather than a bare entry name
    anchored: bool,
}

impl GlobPattern {
    /// Compile a glob pattern
    ///
    /// # Errors
    ///
    /// Returns `FindError::InvalidArgument` if the pattern is malformed
    /// (for example an unclosed `[` class)
    pub fn new(source: &str) -> Result<Self, FindError> {
        let alternatives = expand_recursive_wildcards(source)
            .iter()
            .map(|alternative| Pattern::new(alternative))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| FindError::InvalidArgument {
                argument: source.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            source: source.to_string(),
            alternatives,
            anchored: source.contains('/'),
        })
    }

    /// Pattern text as supplied by the caller
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl PatternMatcher for GlobPattern {
    fn matches(&self, candidate: &Candidate<'_>) -> bool {
        self.alternatives.iter().any(|pattern| {
            if self.anchored {
                pattern.matches_with(candidate.relative, MATCH_OPTIONS)
                    || pattern.matches_with(candidate.absolute, MATCH_OPTIONS)
            } else {
                pattern.matches_with(candidate.name(), MATCH_OPTIONS)
            }
        })
    }
}

/// An ordered collection of matchers; matches when any member does
#[derive(Debug, Default)]
pub struct PatternSet {
    /// Members, checked in insertion order
    matchers: Vec<Box<dyn PatternMatcher>>,
}

impl PatternSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile every pattern as a [`GlobPattern`]
    ///
    /// # Errors
    ///
    /// Returns the error of the first pattern that fails to compile
    pub fn glob<S: AsRef<str>>(patterns: &[S]) -> Result<Self, FindError> {
        let mut set = Self::new();
        for pattern in patterns {
            set.push(Box::new(GlobPattern::new(pattern.as_ref())?));
        }
        Ok(set)
    }

    /// Add a matcher of any dialect
    pub fn push(&mut self, matcher: Box<dyn PatternMatcher>) {
        self.matchers.push(matcher);
    }

    /// Returns true if the set has no matchers
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Number of matchers in the set
    #[must_use]
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Returns true if at least one matcher accepts `candidate`
    #[must_use]
    pub fn is_match(&self, candidate: &Candidate<'_>) -> bool {
        self.matchers.iter().any(|m| m.matches(candidate))
    }
}

/// Expand `**` runs glued to other characters into `glob`-compatible alternatives
///
/// `glob` only accepts `**` as a complete path component, while manifest
/// filters in the wild use forms like `**/mvn/**.xml`. Each glued run becomes
/// either `*` (stay in the segment) or a `**` component spliced in between the
/// surrounding text (cross segments): `a/**X` yields `a/*X` and `a/**/*X`.
fn expand_recursive_wildcards(pattern: &str) -> Vec<String> {
    let mut alternatives = vec![String::new()];

    for (index, segment) in pattern.split('/').enumerate() {
        let variants = segment_variants(segment);
        alternatives = alternatives
            .iter()
            .flat_map(|prefix| {
                variants.iter().map(move |variant| {
                    if index == 0 {
                        variant.clone()
                    } else {
                        format!("{prefix}/{variant}")
                    }
                })
            })
            .collect();
    }

    let mut seen = std::collections::HashSet::new();
    alternatives.retain(|a| seen.insert(a.clone()));
    alternatives
}

/// Spellings of one segment, one per combination of glued `**` choices
fn segment_variants(segment: &str) -> Vec<String> {
    if !segment.contains("**") {
        return vec![segment.to_string()];
    }
    if segment.chars().all(|c| c == '*') {
        return vec!["**".to_string()];
    }

    let chars: Vec<char> = segment.chars().collect();
    let mut variants = vec![String::new()];
    let mut i = 0;
    while i < chars.len() {
        let run = chars[i..].iter().take_while(|c| **c == '*').count();
        if run < 2 {
            let ch = chars[i];
            variants.iter_mut().for_each(|v| v.push(ch));
            i += 1;
            continue;
        }

        let at_start = i == 0;
        let at_end = i + run == chars.len();
        let crossing = match (at_start, at_end) {
            (true, _) => "**/*",
            (false, true) => "*/**",
            (false, false) => "*/**/*",
        };
        variants = variants
            .iter()
            .flat_map(|v| [format!("{v}*"), format!("{v}{crossing}")])
            .collect();
        i += run;
    }
    variants
}
