//! Locating the requirement catalog and layering run settings.
//!
//! The catalog is always per project: `--config`, else `arch-qa.toml`, else
//! `.arch-qa.toml` in the checked directory. Without one the catalog is
//! empty and every run reports zero requirements.
//!
//! Run settings are layered. A user-wide `settings.toml` in
//! `$ARCH_QA_CONFIG_DIR` or `~/.arch-qa/` supplies `[qa]` defaults, and the
//! project's own `[qa]` keys override them key by key. Catalog sections in
//! the user file are ignored.

use anyhow::{anyhow, Context, Result};
use arch_qa_core::{load_catalog_from_toml, Config, QaConfig, Registry};
use std::path::{Path, PathBuf};
use toml::{Table, Value};

/// Project catalog file names, checked in order.
const CATALOG_NAMES: &[&str] = &["arch-qa.toml", ".arch-qa.toml"];

/// User settings file name within the settings directory.
const SETTINGS_NAME: &str = "settings.toml";

/// Settings and catalog for one run.
#[derive(Debug)]
pub struct Loaded {
    /// Effective run settings.
    pub config: Config,
    /// Requirements to evaluate.
    pub registry: Registry,
}

/// Loads run settings and the requirement catalog for `project_dir`.
pub fn load(project_dir: &Path, explicit: Option<&Path>) -> Result<Loaded> {
    load_with(project_dir, explicit, settings_dir().as_deref())
}

pub(crate) fn load_with(
    project_dir: &Path,
    explicit: Option<&Path>,
    settings_dir: Option<&Path>,
) -> Result<Loaded> {
    let mut qa = match settings_dir.map(|dir| dir.join(SETTINGS_NAME)) {
        Some(path) if path.is_file() => {
            tracing::info!("Using user settings: {}", path.display());
            user_settings(&path)?
        }
        _ => Table::new(),
    };

    let registry = match locate_catalog(project_dir, explicit) {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
            let document: Table = content
                .parse()
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            if let Some(Value::Table(project_qa)) = document.get("qa") {
                qa.extend(project_qa.clone());
            }
            load_catalog_from_toml(&content)
                .map_err(|e| anyhow!("{:?}", miette::Report::new(e)))
                .with_context(|| format!("Invalid requirement catalog in {}", path.display()))?
        }
        None => {
            tracing::warn!(
                "No arch-qa.toml in {}; the requirement catalog is empty",
                project_dir.display()
            );
            Registry::new()
        }
    };

    let qa: QaConfig = Value::Table(qa)
        .try_into()
        .context("Invalid [qa] settings")?;
    Ok(Loaded {
        config: Config { qa },
        registry,
    })
}

/// Returns the catalog path: the explicit one, else the first project file found.
fn locate_catalog(project_dir: &Path, explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    CATALOG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Reads the `[qa]` table of the user settings file.
fn user_settings(path: &Path) -> Result<Table> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;
    let mut document: Table = content
        .parse()
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    if document.contains_key("files") || document.contains_key("checks") {
        tracing::warn!(
            "Ignoring requirements in {}; catalogs belong to the project",
            path.display()
        );
    }
    match document.remove("qa") {
        Some(Value::Table(qa)) => Ok(qa),
        Some(_) => Err(anyhow!("`qa` in {} must be a table", path.display())),
        None => Ok(Table::new()),
    }
}

/// Returns the user settings directory: `$ARCH_QA_CONFIG_DIR` > `~/.arch-qa/`.
fn settings_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("ARCH_QA_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".arch-qa"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CATALOG: &str = r#"
[qa]
project = "PartPulse"
output_dir = "reports"

[[files]]
category = "Configuration"
name = "package.json"
path = "package.json"
"#;

    #[test]
    fn missing_catalog_gives_defaults_and_empty_registry() {
        let project = TempDir::new().unwrap();
        let loaded = load_with(project.path(), None, None).unwrap();
        assert!(loaded.registry.is_empty());
        assert_eq!(loaded.config.qa.project, "Project");
        assert_eq!(loaded.config.qa.output_dir, PathBuf::from("qa"));
    }

    #[test]
    fn project_catalog_supplies_settings_and_requirements() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("arch-qa.toml"), CATALOG).unwrap();

        let loaded = load_with(project.path(), None, None).unwrap();
        assert_eq!(loaded.config.qa.project, "PartPulse");
        assert_eq!(loaded.config.qa.output_dir, PathBuf::from("reports"));
        assert_eq!(loaded.registry.len(), 1);
    }

    #[test]
    fn dotfile_catalog_is_found() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join(".arch-qa.toml"), CATALOG).unwrap();

        let loaded = load_with(project.path(), None, None).unwrap();
        assert_eq!(loaded.registry.len(), 1);
    }

    #[test]
    fn explicit_catalog_replaces_project_catalog() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("arch-qa.toml"), CATALOG).unwrap();
        let explicit = project.path().join("ci.toml");
        fs::write(&explicit, "[qa]\nproject = \"CI\"\n").unwrap();

        let loaded = load_with(project.path(), Some(&explicit), None).unwrap();
        assert_eq!(loaded.config.qa.project, "CI");
        assert!(loaded.registry.is_empty());
    }

    #[test]
    fn missing_explicit_catalog_is_an_error() {
        let project = TempDir::new().unwrap();
        let explicit = project.path().join("nope.toml");
        assert!(load_with(project.path(), Some(&explicit), None).is_err());
    }

    #[test]
    fn project_settings_override_user_settings_per_key() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("arch-qa.toml"), CATALOG).unwrap();
        let user = TempDir::new().unwrap();
        fs::write(
            user.path().join(SETTINGS_NAME),
            "[qa]\noutput_dir = \"audit\"\nfail_on_red = true\n",
        )
        .unwrap();

        let loaded = load_with(project.path(), None, Some(user.path())).unwrap();
        assert_eq!(loaded.config.qa.output_dir, PathBuf::from("reports"));
        assert!(loaded.config.qa.fail_on_red);
        assert_eq!(loaded.config.qa.project, "PartPulse");
    }

    #[test]
    fn user_settings_never_contribute_requirements() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        fs::write(user.path().join(SETTINGS_NAME), CATALOG).unwrap();

        let loaded = load_with(project.path(), None, Some(user.path())).unwrap();
        assert!(loaded.registry.is_empty());
        assert_eq!(loaded.config.qa.project, "PartPulse");
    }

    #[test]
    fn settings_dir_without_file_is_ignored() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();

        let loaded = load_with(project.path(), None, Some(user.path())).unwrap();
        assert_eq!(loaded.config.qa.project, "Project");
    }

    #[test]
    fn invalid_catalog_is_an_error() {
        let project = TempDir::new().unwrap();
        fs::write(
            project.path().join("arch-qa.toml"),
            "[[checks]]\ncategory = \"Schema\"\nname = \"User\"\nkind = \"content-match\"\n\
             path = \"prisma/schema.prisma\"\npattern = 'model\\s+(User'\n",
        )
        .unwrap();

        let err = load_with(project.path(), None, None).unwrap_err();
        assert!(err.to_string().contains("Invalid requirement catalog"));
    }

    #[test]
    fn mistyped_setting_is_an_error() {
        let project = TempDir::new().unwrap();
        fs::write(
            project.path().join("arch-qa.toml"),
            "[qa]\nfail_on_red = \"yes\"\n",
        )
        .unwrap();

        let err = load_with(project.path(), None, None).unwrap_err();
        assert!(err.to_string().contains("Invalid [qa] settings"));
    }
}
