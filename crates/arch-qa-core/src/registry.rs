//! Ordered collection of registered requirements.

use crate::predicate::Predicate;
use crate::requirement::{Check, Requirement};

/// Holds requirements in insertion order.
///
/// Names are not required to be unique. Insertion order is the order in
/// which requirements are evaluated and reported.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    requirements: Vec<Requirement>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a requirement.
    pub fn register(
        &mut self,
        category: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        check: Check,
    ) -> &mut Self {
        self.requirements
            .push(Requirement::new(category, name, description, check));
        self
    }

    /// Appends an existence check for `path`.
    pub fn register_file(
        &mut self,
        category: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        path: impl Into<String>,
    ) -> &mut Self {
        self.register(category, name, description, Check::Existence { path: path.into() })
    }

    /// Appends a predicate-only requirement.
    pub fn register_predicate(
        &mut self,
        category: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        predicate: Predicate,
    ) -> &mut Self {
        self.register(category, name, description, Check::Predicate(predicate))
    }

    /// Appends a requirement with both a path and an authoritative predicate.
    pub fn register_combined(
        &mut self,
        category: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        path: impl Into<String>,
        predicate: Predicate,
    ) -> &mut Self {
        self.register(
            category,
            name,
            description,
            Check::Combined {
                path: path.into(),
                predicate,
            },
        )
    }

    /// Appends existence checks from `(category, name, description, path)` tuples.
    pub fn register_files<I, C, N, D, P>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (C, N, D, P)>,
        C: Into<String>,
        N: Into<String>,
        D: Into<String>,
        P: Into<String>,
    {
        for (category, name, description, path) in entries {
            self.register_file(category, name, description, path);
        }
        self
    }

    /// Iterates over requirements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Requirement> {
        self.requirements.iter()
    }

    /// Returns the requirements as a slice.
    #[must_use]
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Returns the number of registered requirements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}
