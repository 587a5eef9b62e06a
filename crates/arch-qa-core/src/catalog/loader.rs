//! DTO → Registry conversion with validation.

use miette::Diagnostic;

use super::config_dto::{CatalogDto, CheckRequirementDto, FileRequirementDto, PredicateDto};
use crate::predicate::{ContentPattern, Predicate};
use crate::registry::Registry;
use crate::requirement::Check;

/// Errors during DTO → Registry conversion.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum LoadError {
    /// A required string field is empty.
    #[error("{context}: `{field}` must not be empty")]
    #[diagnostic(
        code(arch_qa::catalog::empty_field),
        help("every requirement needs a category, a name and something to check")
    )]
    EmptyField {
        /// Where the error occurred (e.g. "files[2]").
        context: String,
        /// The empty field.
        field: &'static str,
    },

    /// A content pattern is not a valid regular expression.
    #[error("{context}: invalid pattern `{pattern}`: {reason}")]
    #[diagnostic(
        code(arch_qa::catalog::invalid_pattern),
        help("patterns are regular expressions; escape literal braces as \\{{ and \\}}")
    )]
    InvalidPattern {
        /// Where the error occurred.
        context: String,
        /// The offending pattern.
        pattern: String,
        /// Compiler message.
        reason: String,
    },
}

/// Converts a `CatalogDto` into a [`Registry`].
///
/// `[[files]]` entries are registered first, then `[[checks]]`, each in
/// file order.
///
/// # Errors
///
/// Returns the first error encountered during conversion.
pub fn load(dto: CatalogDto) -> Result<Registry, LoadError> {
    let mut registry = Registry::new();

    for (i, file) in dto.files.into_iter().enumerate() {
        let ctx = format!("files[{i}]");
        let FileRequirementDto {
            category,
            name,
            description,
            path,
        } = file;
        require(&ctx, "category", &category)?;
        require(&ctx, "name", &name)?;
        require(&ctx, "path", &path)?;
        registry.register_file(category, name, description, path);
    }

    for (i, check) in dto.checks.into_iter().enumerate() {
        let ctx = format!("checks[{i}]");
        let CheckRequirementDto {
            category,
            name,
            description,
            target,
            predicate,
        } = check;
        require(&ctx, "category", &category)?;
        require(&ctx, "name", &name)?;

        let predicate = convert_predicate(predicate, &format!("{ctx} '{name}'"))?;
        let check = match target {
            Some(path) => {
                require(&ctx, "target", &path)?;
                Check::Combined { path, predicate }
            }
            None => Check::Predicate(predicate),
        };
        registry.register(category, name, description, check);
    }

    Ok(registry)
}

fn convert_predicate(dto: PredicateDto, ctx: &str) -> Result<Predicate, LoadError> {
    match dto {
        PredicateDto::ContentMatch {
            path,
            pattern,
            found,
            missing,
        } => {
            require(ctx, "path", &path)?;
            require(ctx, "pattern", &pattern)?;
            let compiled =
                ContentPattern::new(&pattern).map_err(|e| LoadError::InvalidPattern {
                    context: ctx.to_string(),
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })?;
            Ok(Predicate::ContentMatch {
                path,
                pattern: compiled,
                found,
                missing,
            })
        }
        PredicateDto::ContainsAll { path, terms } => {
            require(ctx, "path", &path)?;
            if terms.is_empty() {
                return Err(empty(ctx, "terms"));
            }
            Ok(Predicate::contains_all(path, terms))
        }
        PredicateDto::ContainsAnyFile { paths, needle } => {
            if paths.is_empty() {
                return Err(empty(ctx, "paths"));
            }
            require(ctx, "needle", &needle)?;
            Ok(Predicate::contains_any_file(paths, needle))
        }
        PredicateDto::DirectoryExists { path } => {
            require(ctx, "path", &path)?;
            Ok(Predicate::directory_exists(path))
        }
    }
}

fn require(ctx: &str, field: &'static str, value: &str) -> Result<(), LoadError> {
    if value.trim().is_empty() {
        Err(empty(ctx, field))
    } else {
        Ok(())
    }
}

fn empty(ctx: &str, field: &'static str) -> LoadError {
    LoadError::EmptyField {
        context: ctx.to_string(),
        field,
    }
}
