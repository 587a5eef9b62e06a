//! TOML deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization.
//! They are converted to a [`Registry`](crate::Registry) via the loader.

use serde::Deserialize;

/// Raw TOML representation of a requirement catalog.
///
/// Shares `arch-qa.toml` with [`Config`](crate::Config), adding the
/// `[[files]]` and `[[checks]]` sections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogDto {
    /// Plain existence checks.
    #[serde(default)]
    pub files: Vec<FileRequirementDto>,

    /// Predicate checks.
    #[serde(default)]
    pub checks: Vec<CheckRequirementDto>,
}

/// TOML representation of an existence check.
#[derive(Debug, Clone, Deserialize)]
pub struct FileRequirementDto {
    /// Grouping category (e.g. "Configuration").
    pub category: String,
    /// Short identifier.
    pub name: String,
    /// Human-readable intent.
    #[serde(default)]
    pub description: String,
    /// Path relative to the project root.
    pub path: String,
}

/// TOML representation of a predicate check.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckRequirementDto {
    /// Grouping category.
    pub category: String,
    /// Short identifier.
    pub name: String,
    /// Human-readable intent.
    #[serde(default)]
    pub description: String,
    /// Optional existence-check path; makes this a combined check.
    #[serde(default)]
    pub target: Option<String>,
    /// The predicate, selected by `kind`.
    #[serde(flatten)]
    pub predicate: PredicateDto,
}

/// TOML representation of a predicate, tagged by `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PredicateDto {
    /// `kind = "content-match"`
    ContentMatch {
        /// File to search.
        path: String,
        /// Regular expression.
        pattern: String,
        /// Explanation on match.
        #[serde(default)]
        found: Option<String>,
        /// Explanation on no match.
        #[serde(default)]
        missing: Option<String>,
    },
    /// `kind = "contains-all"`
    ContainsAll {
        /// File to search.
        path: String,
        /// Terms that must all appear.
        terms: Vec<String>,
    },
    /// `kind = "contains-any-file"`
    ContainsAnyFile {
        /// Candidate files.
        paths: Vec<String>,
        /// Literal to find.
        needle: String,
    },
    /// `kind = "directory-exists"`
    DirectoryExists {
        /// Directory path.
        path: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_empty() {
        let dto: CatalogDto = toml::from_str("").unwrap();
        assert!(dto.files.is_empty());
        assert!(dto.checks.is_empty());
    }

    #[test]
    fn deserialize_full_catalog() {
        let toml_str = r#"
[qa]
project = "PartPulse"

[[files]]
category = "Configuration"
name = "package.json"
description = "Package configuration file"
path = "package.json"

[[checks]]
category = "Database Schema"
name = "User Model"
kind = "content-match"
path = "prisma/schema.prisma"
pattern = 'model\s+User\s*\{'
found = "User model found"

[[checks]]
category = "Component Content"
name = "Sidebar Navigation"
kind = "contains-all"
target = "components/ui/sidebar.tsx"
path = "components/ui/sidebar.tsx"
terms = ["Internal Transfer", "Warranty"]

[[checks]]
category = "Component Content"
name = "Primary Color"
kind = "contains-any-file"
paths = ["tailwind.config.ts", "app/globals.css"]
needle = "FF2B00"

[[checks]]
category = "Layout"
name = "app dir"
kind = "directory-exists"
path = "app"
"#;
        let dto: CatalogDto = toml::from_str(toml_str).unwrap();
        assert_eq!(dto.files.len(), 1);
        assert_eq!(dto.files[0].description, "Package configuration file");
        assert_eq!(dto.checks.len(), 4);
        assert!(matches!(
            &dto.checks[0].predicate,
            PredicateDto::ContentMatch { found: Some(_), missing: None, .. }
        ));
        assert_eq!(
            dto.checks[1].target.as_deref(),
            Some("components/ui/sidebar.tsx")
        );
        assert!(matches!(
            &dto.checks[2].predicate,
            PredicateDto::ContainsAnyFile { paths, .. } if paths.len() == 2
        ));
        assert!(matches!(
            &dto.checks[3].predicate,
            PredicateDto::DirectoryExists { .. }
        ));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let toml_str = r#"
[[checks]]
category = "X"
name = "x"
kind = "ast-match"
path = "src/lib.rs"
"#;
        assert!(toml::from_str::<CatalogDto>(toml_str).is_err());
    }
}
