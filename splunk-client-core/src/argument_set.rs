//! De-duplicated request arguments with an optional name prefix
//!
//! An [`ArgumentSet`] stores plain [`Argument`]s and applies its prefix only
//! when it is enumerated or displayed. Membership, equality and every set
//! operation look at the stored arguments, so the prefix never takes part in
//! an argument's identity.
//!
//! # Examples
//!
//! ```rust
//! use splunk_client_core::{Argument, ArgumentSet};
//!
//! let mut arguments = ArgumentSet::with_prefix("namespace.");
//! assert!(arguments.insert(Argument::new("app", "search")));
//! assert!(!arguments.insert(Argument::new("app", "search")));
//!
//! let rendered: Vec<Argument> = arguments.to_arguments();
//! assert_eq!(rendered, vec![Argument::new("namespace.app", "search")]);
//! assert!(arguments.contains(&Argument::new("app", "search")));
//! ```

use std::borrow::Cow;
use std::collections::{hash_set, HashSet};
use std::fmt;
use std::slice;

use crate::Argument;

const DISPLAY_SEPARATOR: &str = "; ";

/// A set of request arguments rendered with an optional name prefix
#[derive(Debug, Clone, Default)]
pub struct ArgumentSet {
    prefix: Option<String>,
    elements: HashSet<Argument>,
}

impl ArgumentSet {
    /// Create an empty set without a prefix
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set whose arguments render as `prefix + name`.
    /// An empty prefix is the same as no prefix.
    pub fn with_prefix<S: AsRef<str>>(prefix: S) -> Self {
        Self {
            prefix: normalize_prefix(Some(prefix.as_ref())),
            elements: HashSet::new(),
        }
    }

    /// Create a set seeded from `arguments`; duplicates collapse silently
    pub fn from_arguments<I>(arguments: I, prefix: Option<&str>) -> Self
    where
        I: IntoIterator<Item = Argument>,
    {
        Self {
            prefix: normalize_prefix(prefix),
            elements: arguments.into_iter().collect(),
        }
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Argument sets are always mutable
    pub fn is_read_only(&self) -> bool {
        false
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Add an argument. Returns `false` when an equal argument was already present.
    pub fn insert(&mut self, argument: Argument) -> bool {
        self.elements.insert(argument)
    }

    pub fn remove(&mut self, argument: &Argument) -> bool {
        self.elements.remove(argument)
    }

    pub fn contains(&self, argument: &Argument) -> bool {
        self.elements.contains(argument)
    }

    /// Add every argument of `other`
    pub fn union_with<'a>(&mut self, other: impl StoredArguments<'a>) {
        self.elements.extend(other.stored_arguments().cloned());
    }

    /// Keep only the arguments also found in `other`
    pub fn intersect_with<'a>(&mut self, other: impl StoredArguments<'a>) {
        let other = distinct(other);
        self.elements.retain(|argument| other.contains(argument));
    }

    /// Drop every argument found in `other`
    pub fn except_with<'a>(&mut self, other: impl StoredArguments<'a>) {
        for argument in other.stored_arguments() {
            self.elements.remove(argument);
        }
    }

    /// Keep the arguments found in exactly one of `self` and `other`
    pub fn symmetric_except_with<'a>(&mut self, other: impl StoredArguments<'a>) {
        for argument in distinct(other) {
            if !self.elements.remove(argument) {
                self.elements.insert(argument.clone());
            }
        }
    }

    pub fn is_subset_of<'a>(&self, other: impl StoredArguments<'a>) -> bool {
        let other = distinct(other);
        self.elements.iter().all(|argument| other.contains(argument))
    }

    pub fn is_superset_of<'a>(&self, other: impl StoredArguments<'a>) -> bool {
        other
            .stored_arguments()
            .all(|argument| self.elements.contains(argument))
    }

    pub fn is_proper_subset_of<'a>(&self, other: impl StoredArguments<'a>) -> bool {
        let other = distinct(other);
        self.elements.len() < other.len()
            && self.elements.iter().all(|argument| other.contains(argument))
    }

    pub fn is_proper_superset_of<'a>(&self, other: impl StoredArguments<'a>) -> bool {
        let other = distinct(other);
        self.elements.len() > other.len()
            && other.iter().all(|argument| self.elements.contains(*argument))
    }

    pub fn overlaps<'a>(&self, other: impl StoredArguments<'a>) -> bool {
        other
            .stored_arguments()
            .any(|argument| self.elements.contains(argument))
    }

    /// True when both hold the same arguments, whatever the prefixes;
    /// duplicates in `other` count once
    pub fn set_equals<'a>(&self, other: impl StoredArguments<'a>) -> bool {
        let other = distinct(other);
        self.elements.len() == other.len()
            && self.elements.iter().all(|argument| other.contains(argument))
    }

    /// Stored arguments, without the prefix applied
    pub fn elements(&self) -> hash_set::Iter<'_, Argument> {
        self.elements.iter()
    }

    /// Owned copy of the stored arguments, without the prefix applied
    pub fn to_vec(&self) -> Vec<Argument> {
        self.elements.iter().cloned().collect()
    }

    /// Enumerate the arguments with the prefix applied.
    ///
    /// Without a prefix the stored arguments are borrowed as they are. With a
    /// prefix each item is a new argument; the stored ones are never touched.
    pub fn iter(&self) -> Iter<'_> {
        self.view().iter()
    }

    /// Rendered arguments as owned values, ready to hand to a transport
    pub fn to_arguments(&self) -> Vec<Argument> {
        self.iter().map(Cow::into_owned).collect()
    }

    /// Read-only view rendered with this set's prefix
    pub fn view(&self) -> ArgumentView<'_> {
        ArgumentView {
            elements: &self.elements,
            prefix: self.prefix.as_deref(),
        }
    }

    /// Read-only view of the same arguments rendered with another prefix
    pub fn view_with_prefix<'a>(&'a self, prefix: &'a str) -> ArgumentView<'a> {
        ArgumentView {
            elements: &self.elements,
            prefix: Some(prefix).filter(|prefix| !prefix.is_empty()),
        }
    }
}

fn normalize_prefix(prefix: Option<&str>) -> Option<String> {
    prefix.filter(|prefix| !prefix.is_empty()).map(str::to_string)
}

fn distinct<'a>(arguments: impl StoredArguments<'a>) -> HashSet<&'a Argument> {
    arguments.stored_arguments().collect()
}

/// Argument sequences the set operations of [`ArgumentSet`] accept.
///
/// Another set contributes its stored arguments, so its prefix is ignored.
pub trait StoredArguments<'a> {
    type Iter: Iterator<Item = &'a Argument>;

    fn stored_arguments(self) -> Self::Iter;
}

impl<'a> StoredArguments<'a> for &'a ArgumentSet {
    type Iter = hash_set::Iter<'a, Argument>;

    fn stored_arguments(self) -> Self::Iter {
        self.elements.iter()
    }
}

impl<'a> StoredArguments<'a> for &'a [Argument] {
    type Iter = slice::Iter<'a, Argument>;

    fn stored_arguments(self) -> Self::Iter {
        self.iter()
    }
}

impl<'a> StoredArguments<'a> for &'a Vec<Argument> {
    type Iter = slice::Iter<'a, Argument>;

    fn stored_arguments(self) -> Self::Iter {
        self.iter()
    }
}

impl<'a, const N: usize> StoredArguments<'a> for &'a [Argument; N] {
    type Iter = slice::Iter<'a, Argument>;

    fn stored_arguments(self) -> Self::Iter {
        self.iter()
    }
}

impl PartialEq for ArgumentSet {
    fn eq(&self, other: &Self) -> bool {
        self.set_equals(other)
    }
}

impl Eq for ArgumentSet {}

impl fmt::Display for ArgumentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.view().fmt(f)
    }
}

impl FromIterator<Argument> for ArgumentSet {
    fn from_iter<I: IntoIterator<Item = Argument>>(iter: I) -> Self {
        Self::from_arguments(iter, None)
    }
}

impl Extend<Argument> for ArgumentSet {
    fn extend<I: IntoIterator<Item = Argument>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ArgumentSet {
    type Item = Cow<'a, Argument>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowed arguments paired with the prefix used to render them
#[derive(Debug, Clone, Copy)]
pub struct ArgumentView<'a> {
    elements: &'a HashSet<Argument>,
    prefix: Option<&'a str>,
}

impl<'a> ArgumentView<'a> {
    pub fn prefix(&self) -> Option<&'a str> {
        self.prefix
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> Iter<'a> {
        Iter {
            inner: self.elements.iter(),
            prefix: self.prefix,
        }
    }
}

impl fmt::Display for ArgumentView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, argument) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(DISPLAY_SEPARATOR)?;
            }
            write!(f, "{}", argument)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for ArgumentView<'a> {
    type Item = Cow<'a, Argument>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over rendered arguments
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: hash_set::Iter<'a, Argument>,
    prefix: Option<&'a str>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Cow<'a, Argument>;

    fn next(&mut self) -> Option<Self::Item> {
        let argument = self.inner.next()?;
        Some(match self.prefix {
            Some(prefix) => Cow::Owned(argument.prefixed(prefix)),
            None => Cow::Borrowed(argument),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}
