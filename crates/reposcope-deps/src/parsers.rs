//! One parser per ecosystem, from raw manifest text to a report.

use std::sync::OnceLock;

use regex::Regex;

use crate::{Dependency, DependencyReport};

/// Parse `package.json` (npm).
///
/// # Examples
///
/// ```
/// use reposcope_deps::parsers::parse_package_json;
///
/// let report = parse_package_json(r#"{"dependencies":{"react":"^19.0.0"}}"#);
/// assert_eq!(report.ecosystem, "npm");
/// assert_eq!(report.dependencies[0].name, "react");
/// ```
pub fn parse_package_json(content: &str) -> DependencyReport {
    let mut report = DependencyReport::new("npm", "package.json");
    let Ok(value) = serde_json::from_str::<serde_json::Value>(content) else {
        return report;
    };
    collect_json_versions(value.get("dependencies"), &mut report.dependencies);
    collect_json_versions(value.get("devDependencies"), &mut report.dev_dependencies);
    report
}

fn collect_json_versions(section: Option<&serde_json::Value>, out: &mut Vec<Dependency>) {
    let Some(object) = section.and_then(|v| v.as_object()) else {
        return;
    };
    for (name, version) in object {
        out.push(Dependency {
            name: name.clone(),
            version: version.as_str().map(String::from),
        });
    }
}

/// Parse `requirements.txt` (pip).
///
/// Handles `pkg`, `pkg==1.0`, `pkg>=1.0`, and `pkg[extra]==1.0` forms;
/// comment and option lines are skipped.
pub fn parse_requirements(content: &str) -> DependencyReport {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^([a-zA-Z0-9_-]+)(?:\[.*?\])?(?:([=<>!~]+)(.+))?").expect("valid regex")
    });

    let mut report = DependencyReport::new("pip", "requirements.txt");
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('-') {
            continue;
        }
        if let Some(caps) = re.captures(trimmed) {
            let version = match (caps.get(2), caps.get(3)) {
                (Some(op), Some(val)) => Some(format!("{}{}", op.as_str(), val.as_str())),
                _ => None,
            };
            report.dependencies.push(Dependency {
                name: caps[1].to_string(),
                version,
            });
        }
    }
    report
}

/// Parse `Cargo.toml` (cargo).
///
/// Reads `[dependencies]`, `[dev-dependencies]`, `[build-dependencies]`,
/// and `[workspace.dependencies]`; dev and build dependencies are both
/// reported as dev.
pub fn parse_cargo_toml(content: &str) -> DependencyReport {
    let mut report = DependencyReport::new("cargo", "Cargo.toml");
    let Ok(value) = content.parse::<toml::Value>() else {
        return report;
    };
    let Some(table) = value.as_table() else {
        return report;
    };

    if let Some(deps) = table.get("dependencies").and_then(|v| v.as_table()) {
        collect_toml_versions(deps, &mut report.dependencies);
    }
    if let Some(ws_deps) = table
        .get("workspace")
        .and_then(|v| v.as_table())
        .and_then(|t| t.get("dependencies"))
        .and_then(|v| v.as_table())
    {
        collect_toml_versions(ws_deps, &mut report.dependencies);
    }
    for section in ["dev-dependencies", "build-dependencies"] {
        if let Some(deps) = table.get(section).and_then(|v| v.as_table()) {
            collect_toml_versions(deps, &mut report.dev_dependencies);
        }
    }
    report
}

fn collect_toml_versions(table: &toml::value::Table, out: &mut Vec<Dependency>) {
    for (name, spec) in table {
        let version = match spec {
            toml::Value::String(v) => Some(v.clone()),
            // Inline or full tables: { version = "1", features = [...] };
            // path/git/workspace specs have no version to report.
            toml::Value::Table(t) => t.get("version").and_then(|v| v.as_str()).map(String::from),
            _ => None,
        };
        out.push(Dependency {
            name: name.clone(),
            version,
        });
    }
}

/// Parse `go.mod` (go).
///
/// Handles both single-line `require` directives and `require ( ... )`
/// blocks; `//` comment lines inside blocks are skipped.
pub fn parse_go_mod(content: &str) -> DependencyReport {
    let mut report = DependencyReport::new("go", "go.mod");
    let mut in_require = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("require (") {
            in_require = true;
            continue;
        }
        if trimmed == ")" && in_require {
            in_require = false;
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if let ["require", name, version, ..] = tokens.as_slice() {
            report.dependencies.push(Dependency::new(*name, *version));
            continue;
        }
        if in_require && !trimmed.starts_with("//") {
            if let [name, version, ..] = tokens.as_slice() {
                report.dependencies.push(Dependency::new(*name, *version));
            }
        }
    }
    report
}

/// Parse `Gemfile` (rubygems).
///
/// Gems inside `group :development` / `group :test` blocks are reported as
/// dev dependencies.
pub fn parse_gemfile(content: &str) -> DependencyReport {
    static GEM_RE: OnceLock<Regex> = OnceLock::new();
    static GROUP_RE: OnceLock<Regex> = OnceLock::new();
    let gem_re = GEM_RE.get_or_init(|| {
        Regex::new(r#"^gem\s+['"]([^'"]+)['"](?:\s*,\s*['"]([^'"]+)['"])?"#).expect("valid regex")
    });
    let group_re = GROUP_RE
        .get_or_init(|| Regex::new(r"^group\s+:(development|test)").expect("valid regex"));

    let mut report = DependencyReport::new("rubygems", "Gemfile");
    let mut in_dev_group = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if group_re.is_match(trimmed) {
            in_dev_group = true;
            continue;
        }
        if trimmed == "end" && in_dev_group {
            in_dev_group = false;
            continue;
        }
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(caps) = gem_re.captures(trimmed) {
            let dep = Dependency {
                name: caps[1].to_string(),
                version: caps.get(2).map(|m| m.as_str().to_string()),
            };
            if in_dev_group {
                report.dev_dependencies.push(dep);
            } else {
                report.dependencies.push(dep);
            }
        }
    }
    report
}

/// Parse `pom.xml` (maven), regex-based.
///
/// Dependencies with `test` or `provided` scope are reported as dev.
pub fn parse_pom_xml(content: &str) -> DependencyReport {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(
            r"<dependency>\s*<groupId>([^<]+)</groupId>\s*<artifactId>([^<]+)</artifactId>(?:\s*<version>([^<]+)</version>)?(?:\s*<scope>([^<]+)</scope>)?",
        )
        .expect("valid regex")
    });

    let mut report = DependencyReport::new("maven", "pom.xml");
    for caps in re.captures_iter(content) {
        let dep = Dependency {
            name: format!("{}:{}", &caps[1], &caps[2]),
            version: caps.get(3).map(|m| m.as_str().to_string()),
        };
        let scope = caps.get(4).map(|m| m.as_str());
        if matches!(scope, Some("test") | Some("provided")) {
            report.dev_dependencies.push(dep);
        } else {
            report.dependencies.push(dep);
        }
    }
    report
}

/// Parse `build.gradle` (gradle), regex-based.
///
/// Configurations containing `test` are reported as dev dependencies.
pub fn parse_build_gradle(content: &str) -> DependencyReport {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(
            r#"(implementation|api|compile|runtime|testImplementation|testCompile)\s*[('"]([^'"()]+)['")\s]"#,
        )
        .expect("valid regex")
    });

    let mut report = DependencyReport::new("gradle", "build.gradle");
    for caps in re.captures_iter(content) {
        let configuration = &caps[1];
        let spec = &caps[2];

        // group:artifact:version coordinates.
        let parts: Vec<&str> = spec.split(':').collect();
        let dep = Dependency {
            name: if parts.len() >= 2 {
                format!("{}:{}", parts[0], parts[1])
            } else {
                spec.to_string()
            },
            version: parts.get(2).map(|v| v.to_string()),
        };

        if configuration.to_lowercase().contains("test") {
            report.dev_dependencies.push(dep);
        } else {
            report.dependencies.push(dep);
        }
    }
    report
}

/// Parse `pubspec.yaml` (pub), line-scan based.
pub fn parse_pubspec_yaml(content: &str) -> DependencyReport {
    static DEP_RE: OnceLock<Regex> = OnceLock::new();
    static SECTION_RE: OnceLock<Regex> = OnceLock::new();
    let dep_re = DEP_RE
        .get_or_init(|| Regex::new(r"^\s{2}([a-z_0-9]+):\s*(?:\^?([0-9.]+)|.*)").expect("valid regex"));
    let section_re =
        SECTION_RE.get_or_init(|| Regex::new(r"^[a-z_]+:\s*$").expect("valid regex"));

    let mut report = DependencyReport::new("pub", "pubspec.yaml");
    let mut section = "";

    for line in content.lines() {
        if line.trim_end() == "dependencies:" {
            section = "dependencies";
            continue;
        }
        if line.trim_end() == "dev_dependencies:" {
            section = "dev_dependencies";
            continue;
        }
        if section_re.is_match(line) {
            section = "";
            continue;
        }
        if section.is_empty() {
            continue;
        }

        if let Some(caps) = dep_re.captures(line) {
            let dep = Dependency {
                name: caps[1].to_string(),
                version: caps.get(2).map(|m| m.as_str().to_string()),
            };
            if section == "dev_dependencies" {
                report.dev_dependencies.push(dep);
            } else {
                report.dependencies.push(dep);
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_json_splits_dep_kinds() {
        let report = parse_package_json(
            r#"{
                "name": "demo",
                "dependencies": {"react": "^19.0.0", "swr": "^2.2.0"},
                "devDependencies": {"vite": "^6.0.0"}
            }"#,
        );
        assert_eq!(report.dependencies.len(), 2);
        assert_eq!(report.dev_dependencies.len(), 1);
        assert_eq!(report.dev_dependencies[0].name, "vite");
        assert_eq!(report.dev_dependencies[0].version.as_deref(), Some("^6.0.0"));
    }

    #[test]
    fn package_json_malformed_is_empty() {
        assert!(parse_package_json("{not json").is_empty());
        assert!(parse_package_json("").is_empty());
    }

    #[test]
    fn requirements_handles_constraint_forms() {
        let report = parse_requirements(
            "# comment\n\
             requests==2.31.0\n\
             flask>=2.0\n\
             uvicorn[standard]==0.23.1\n\
             plain-pkg\n\
             -r other.txt\n",
        );
        let names: Vec<&str> = report.dependencies.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["requests", "flask", "uvicorn", "plain-pkg"]);
        assert_eq!(report.dependencies[0].version.as_deref(), Some("==2.31.0"));
        assert_eq!(report.dependencies[2].version.as_deref(), Some("==0.23.1"));
        assert_eq!(report.dependencies[3].version, None);
    }

    #[test]
    fn cargo_toml_reads_all_dependency_tables() {
        let report = parse_cargo_toml(
            r#"
            [package]
            name = "demo"

            [dependencies]
            serde = { version = "1", features = ["derive"] }
            toml = "0.8"
            local-helper = { path = "../helper" }

            [dev-dependencies]
            tempfile = "3"

            [build-dependencies]
            cc = "1"
            "#,
        );
        assert_eq!(report.dependencies.len(), 3);
        let serde_dep = report.dependencies.iter().find(|d| d.name == "serde").unwrap();
        assert_eq!(serde_dep.version.as_deref(), Some("1"));
        let local = report.dependencies.iter().find(|d| d.name == "local-helper").unwrap();
        assert_eq!(local.version, None);
        assert_eq!(report.dev_dependencies.len(), 2);
    }

    #[test]
    fn cargo_toml_reads_workspace_dependencies() {
        let report = parse_cargo_toml(
            r#"
            [workspace.dependencies]
            serde = "1"
            "#,
        );
        assert_eq!(report.dependencies.len(), 1);
    }

    #[test]
    fn go_mod_single_and_block_requires() {
        let report = parse_go_mod(
            "module example.com/demo\n\
             \n\
             go 1.22\n\
             \n\
             require golang.org/x/sync v0.7.0\n\
             \n\
             require (\n\
             \tgithub.com/spf13/cobra v1.8.0\n\
             \t// indirect comment\n\
             \tgithub.com/pkg/errors v0.9.1 // indirect\n\
             )\n",
        );
        let names: Vec<&str> = report.dependencies.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "golang.org/x/sync",
                "github.com/spf13/cobra",
                "github.com/pkg/errors"
            ]
        );
        assert_eq!(report.dependencies[0].version.as_deref(), Some("v0.7.0"));
    }

    #[test]
    fn gemfile_tracks_dev_groups() {
        let report = parse_gemfile(
            "source 'https://rubygems.org'\n\
             \n\
             gem 'rails', '~> 7.1'\n\
             gem 'pg'\n\
             \n\
             group :development, :test do\n\
               gem 'rspec-rails', '~> 6.0'\n\
             end\n\
             \n\
             gem 'puma'\n",
        );
        assert_eq!(report.dependencies.len(), 3);
        assert_eq!(report.dependencies[0].version.as_deref(), Some("~> 7.1"));
        assert_eq!(report.dev_dependencies.len(), 1);
        assert_eq!(report.dev_dependencies[0].name, "rspec-rails");
    }

    #[test]
    fn pom_xml_scopes_and_coordinates() {
        let report = parse_pom_xml(
            "<project>\n\
             <dependencies>\n\
               <dependency>\n\
                 <groupId>org.springframework</groupId>\n\
                 <artifactId>spring-core</artifactId>\n\
                 <version>6.1.0</version>\n\
               </dependency>\n\
               <dependency>\n\
                 <groupId>junit</groupId>\n\
                 <artifactId>junit</artifactId>\n\
                 <version>4.13.2</version>\n\
                 <scope>test</scope>\n\
               </dependency>\n\
             </dependencies>\n\
             </project>\n",
        );
        assert_eq!(report.dependencies.len(), 1);
        assert_eq!(report.dependencies[0].name, "org.springframework:spring-core");
        assert_eq!(report.dev_dependencies.len(), 1);
        assert_eq!(report.dev_dependencies[0].name, "junit:junit");
    }

    #[test]
    fn build_gradle_configurations() {
        let report = parse_build_gradle(
            "dependencies {\n\
               implementation 'com.google.guava:guava:33.0.0-jre'\n\
               api(\"org.slf4j:slf4j-api:2.0.9\")\n\
               testImplementation 'junit:junit:4.13.2'\n\
             }\n",
        );
        assert_eq!(report.dependencies.len(), 2);
        assert_eq!(report.dependencies[0].name, "com.google.guava:guava");
        assert_eq!(
            report.dependencies[0].version.as_deref(),
            Some("33.0.0-jre")
        );
        assert_eq!(report.dev_dependencies.len(), 1);
    }

    #[test]
    fn pubspec_sections_and_versions() {
        let report = parse_pubspec_yaml(
            "name: demo\n\
             \n\
             dependencies:\n\
             \x20\x20http: ^1.2.0\n\
             \x20\x20flutter:\n\
             \n\
             dev_dependencies:\n\
             \x20\x20test: ^1.25.0\n\
             \n\
             flutter:\n\
             \x20\x20uses-material-design: true\n",
        );
        let names: Vec<&str> = report.dependencies.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["http", "flutter"]);
        assert_eq!(report.dependencies[0].version.as_deref(), Some("1.2.0"));
        assert_eq!(report.dev_dependencies.len(), 1);
        assert_eq!(report.dev_dependencies[0].name, "test");
    }
}
