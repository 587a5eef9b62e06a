//! Internal runner for `check!()` macro integration.
//!
//! This module is `#[doc(hidden)]` and not part of the public API.
//! It is called by the generated test function from `arch_qa::check!()`.

use arch_qa_core::{evaluate, load_catalog_from_toml, Config, Probe, Registry, ResultSet};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Config file names to search for, in priority order.
const CONFIG_CANDIDATES: &[&str] = &["arch-qa.toml", ".arch-qa.toml"];

/// Evaluates the requirement catalog as part of `cargo test`.
///
/// # Panics
///
/// Panics with the outstanding-items list if any requirement fails, or if
/// the config cannot be read or the catalog is invalid.
pub fn run_check(config_path: Option<&str>) {
    let workspace = find_project_root();
    let content = read_config_content(&workspace, config_path);
    let config = parse_config(&content);
    let registry = load_registry(&content);

    let root = workspace.join(&config.qa.root);
    let result = evaluate(&registry, &Probe::new(root));

    if result.has_failures() {
        panic!("{}", format_test_report(&result, &config.qa.project));
    }
}

/// Formats failed requirements as a checklist for the panic message.
fn format_test_report(result: &ResultSet, project: &str) -> String {
    let global = &result.summary.global;
    let mut out = format!(
        "arch-qa: {project}: {} of {} requirement(s) not met ({:.1}% pass rate)\n\n",
        global.failed, global.total, global.pass_rate
    );
    for outcome in result.failures() {
        let _ = writeln!(
            out,
            "- [ ] [{}] {}: {}",
            outcome.category, outcome.name, outcome.explanation
        );
    }
    out
}

/// Reads the raw TOML content from the config file.
///
/// Returns an empty string if no config file is found.
fn read_config_content(root: &Path, explicit_path: Option<&str>) -> String {
    if let Some(path) = explicit_path {
        let full_path = if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            root.join(path)
        };
        return std::fs::read_to_string(&full_path).unwrap_or_else(|e| {
            panic!(
                "arch-qa: failed to read config from {}: {e}",
                full_path.display()
            );
        });
    }

    for candidate in CONFIG_CANDIDATES {
        let path = root.join(candidate);
        if path.exists() {
            return std::fs::read_to_string(&path).unwrap_or_else(|e| {
                panic!(
                    "arch-qa: failed to read config from {}: {e}",
                    path.display()
                );
            });
        }
    }

    String::new()
}

/// Parses a `Config` from TOML content.
fn parse_config(content: &str) -> Config {
    if content.is_empty() {
        return Config::default();
    }
    Config::parse(content).unwrap_or_else(|e| {
        panic!("arch-qa: failed to parse config: {e}");
    })
}

/// Loads the requirement catalog from TOML content.
fn load_registry(content: &str) -> Registry {
    load_catalog_from_toml(content)
        .unwrap_or_else(|e| panic!("arch-qa: requirement catalog error: {e}"))
}

/// Checks whether a `Cargo.toml` file defines a `[workspace]` section
/// by parsing as TOML, avoiding false positives from comments or strings.
fn has_workspace_section(cargo_toml: &Path) -> bool {
    let Ok(content) = std::fs::read_to_string(cargo_toml) else {
        return false;
    };
    let Ok(table) = content.parse::<toml::Table>() else {
        return false;
    };
    table.contains_key("workspace")
}

/// Finds the project root by looking for `Cargo.toml` from `CARGO_MANIFEST_DIR`.
fn find_project_root() -> PathBuf {
    // CARGO_MANIFEST_DIR points to the crate containing the test,
    // which may be a workspace member. Walk up to find workspace root.
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let manifest_path = PathBuf::from(&manifest_dir);
        return workspace_root_from(&manifest_path).unwrap_or(manifest_path);
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn workspace_root_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| has_workspace_section(&dir.join("Cargo.toml")))
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arch_qa_core::{Outcome, Status};
    use std::fs;
    use tempfile::TempDir;

    fn outcome(name: &str, status: Status, explanation: &str) -> Outcome {
        Outcome {
            category: "Config".to_string(),
            name: name.to_string(),
            description: String::new(),
            target_path: None,
            status,
            explanation: explanation.to_string(),
        }
    }

    #[test]
    fn test_report_lists_only_failures() {
        let result = ResultSet::from_outcomes(vec![
            outcome("pkg", Status::Pass, "File exists: package.json"),
            outcome("tsconfig", Status::Fail, "File missing: tsconfig.json"),
        ]);
        let report = format_test_report(&result, "Demo");
        assert_eq!(
            report,
            "arch-qa: Demo: 1 of 2 requirement(s) not met (50.0% pass rate)\n\n\
             - [ ] [Config] tsconfig: File missing: tsconfig.json\n"
        );
    }

    #[test]
    fn parse_config_empty_content_is_default() {
        let config = parse_config("");
        assert_eq!(config.qa.project, "Project");
    }

    #[test]
    fn parse_config_ignores_catalog_sections() {
        let toml = r#"
[qa]
project = "Demo"

[[files]]
category = "Configuration"
name = "Cargo.toml"
path = "Cargo.toml"
"#;
        assert_eq!(parse_config(toml).qa.project, "Demo");
        assert_eq!(load_registry(toml).len(), 1);
    }

    #[test]
    #[should_panic(expected = "requirement catalog error")]
    fn invalid_catalog_panics() {
        load_registry("[[files]]\ncategory = \"\"\nname = \"x\"\npath = \"x\"\n");
    }

    #[test]
    fn explicit_config_is_relative_to_root() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("qa")).unwrap();
        fs::write(tmp.path().join("qa/catalog.toml"), "[qa]\n").unwrap();

        let content = read_config_content(tmp.path(), Some("qa/catalog.toml"));
        assert_eq!(content, "[qa]\n");
    }

    #[test]
    fn missing_config_reads_as_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(read_config_content(tmp.path(), None).is_empty());
    }

    #[test]
    fn workspace_root_found_from_member() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("Cargo.toml"),
            "[workspace]\nmembers = [\"crates/app\"]\n",
        )
        .unwrap();
        let member = tmp.path().join("crates/app");
        fs::create_dir_all(&member).unwrap();
        fs::write(
            member.join("Cargo.toml"),
            "[package]\nname = \"app\"\n# [workspace]\n",
        )
        .unwrap();

        assert_eq!(workspace_root_from(&member), Some(tmp.path().to_path_buf()));
    }
}
