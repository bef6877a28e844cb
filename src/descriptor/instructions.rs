//! Build-instruction scanning.
//!
//! Descriptor install recipes are Dockerfile fragments (`ARG`, `FROM ... AS`,
//! `COPY --from=`). There is no grammar to rely on, so this module is a
//! line-oriented pattern matcher: anything that does not match is simply
//! absent from the result.

use crate::catalog::LinterKey;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static ARG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^ARG\s+(\w+)=(.+)").unwrap());

static FROM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^FROM\s+([^:\s]+):(\S+)\s+AS\s+(\w+)").unwrap());

static COPY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)COPY\s+.*--from=(\w+)\s+(\S+)\s+(\S+)").unwrap());

static VARIABLE_REF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$\{?(\w+)\}?").unwrap());

/// Installation facts recovered for one linter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallationDescriptor {
    pub version: Option<String>,
    pub source_image: Option<String>,
    pub binary_path: Option<String>,
    pub target_path: Option<String>,
    pub stage_name: Option<String>,
}

impl InstallationDescriptor {
    /// Both an image and a binary to copy out of it were found.
    pub fn is_docker_binary(&self) -> bool {
        self.source_image.is_some() && self.binary_path.is_some()
    }
}

#[derive(Debug, Clone)]
struct Stage {
    image: String,
    version_ref: String,
}

/// Insertion-ordered table where redefinition replaces the value in place.
#[derive(Debug)]
struct OrderedTable<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedTable<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedTable<V> {
    fn insert(&mut self, name: String, value: V) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    fn get(&self, name: &str) -> Option<&V> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// Split raw instruction entries (which may hold multi-line blocks) into
/// trimmed logical lines, dropping blanks and comments.
pub fn logical_lines<S: AsRef<str>>(instruction_lines: &[S]) -> Vec<&str> {
    instruction_lines
        .iter()
        .flat_map(|block| block.as_ref().split('\n'))
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

fn stage_matches(stage_name: &str, token: &str) -> bool {
    stage_name == token || stage_name.contains(token)
}

/// Resolve the installation descriptor of `linter_key` from its build instructions.
pub fn parse_instructions<S: AsRef<str>>(
    instruction_lines: &[S],
    linter_key: &LinterKey,
) -> InstallationDescriptor {
    let mut result = InstallationDescriptor::default();
    let mut variables: OrderedTable<String> = OrderedTable::default();
    let mut stages: OrderedTable<Stage> = OrderedTable::default();

    let token = linter_key.token();

    for line in logical_lines(instruction_lines) {
        if let Some(caps) = ARG_REGEX.captures(line) {
            variables.insert(caps[1].to_string(), caps[2].trim().to_string());
        }

        if let Some(caps) = FROM_REGEX.captures(line) {
            stages.insert(
                caps[3].to_lowercase(),
                Stage {
                    image: caps[1].to_string(),
                    version_ref: caps[2].to_string(),
                },
            );
        }

        if let Some(caps) = COPY_REGEX.captures(line) {
            let stage_name = caps[1].to_lowercase();
            if result.binary_path.is_none() && stage_matches(&stage_name, &token) {
                result.binary_path = Some(caps[2].to_string());
                result.target_path = Some(caps[3].to_string());
                result.stage_name = Some(stage_name);
            }
        }
    }

    let matched_stage = stages
        .iter()
        .find(|(name, _)| stage_matches(name, &token));

    if let Some((stage_name, stage)) = matched_stage {
        result.stage_name = Some(stage_name.to_string());
        result.source_image = Some(stage.image.clone());
        result.version = match VARIABLE_REF_REGEX.captures(&stage.version_ref) {
            Some(caps) => variables.get(&caps[1]).cloned(),
            None => Some(stage.version_ref.clone()),
        };
    }

    if result.version.is_none() {
        let underscored = linter_key.underscored();
        result.version = variables
            .iter()
            .find(|(name, _)| name.contains(&underscored) && name.ends_with("_VERSION"))
            .map(|(_, value)| value.clone());
    }

    result
}

/// Value of the first `ARG {prefix}_*_VERSION=...` declaration, e.g. the npm
/// or pip package version pinned next to a package-manager install.
pub fn find_prefixed_version<S: AsRef<str>>(instruction_lines: &[S], prefix: &str) -> Option<String> {
    let pattern = format!(r"ARG\s+{}_[\w_]+_VERSION=(\S+)", regex::escape(prefix));
    let regex = Regex::new(&pattern).ok()?;
    logical_lines(instruction_lines)
        .into_iter()
        .find_map(|line| regex.captures(line).map(|caps| caps[1].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> LinterKey {
        LinterKey::new(k)
    }

    #[test]
    fn test_resolves_stage_version_variable_and_copy() {
        let lines = vec![
            "ARG FOO_VERSION=1.2.3",
            "FROM org/img:${FOO_VERSION} AS foo",
            "COPY --from=foo /bin/foo /usr/bin/foo",
        ];
        let result = parse_instructions(&lines, &key("X_FOO"));
        assert_eq!(result.version.as_deref(), Some("1.2.3"));
        assert_eq!(result.source_image.as_deref(), Some("org/img"));
        assert_eq!(result.binary_path.as_deref(), Some("/bin/foo"));
        assert_eq!(result.target_path.as_deref(), Some("/usr/bin/foo"));
        assert_eq!(result.stage_name.as_deref(), Some("foo"));
        assert!(result.is_docker_binary());
    }

    #[test]
    fn test_multiline_block_with_comments() {
        let block = "# renovate: datasource=docker depName=rhysd/actionlint\n\
                     ARG ACTION_ACTIONLINT_VERSION=1.7.10\n\
                     \n\
                     FROM rhysd/actionlint:${ACTION_ACTIONLINT_VERSION} as actionlint\n";
        let lines = vec![
            block.to_string(),
            "COPY --link --from=actionlint /usr/local/bin/actionlint /usr/bin/actionlint".to_string(),
        ];
        let result = parse_instructions(&lines, &key("ACTION_ACTIONLINT"));
        assert_eq!(result.version.as_deref(), Some("1.7.10"));
        assert_eq!(result.source_image.as_deref(), Some("rhysd/actionlint"));
        assert_eq!(result.binary_path.as_deref(), Some("/usr/local/bin/actionlint"));
    }

    #[test]
    fn test_literal_version_is_used_verbatim() {
        let lines = vec![
            "FROM hadolint/hadolint:v2.12.0-alpine AS hadolint",
            "COPY --from=hadolint /bin/hadolint /usr/bin/hadolint",
        ];
        let result = parse_instructions(&lines, &key("DOCKERFILE_HADOLINT"));
        assert_eq!(result.version.as_deref(), Some("v2.12.0-alpine"));
    }

    #[test]
    fn test_first_copy_match_wins() {
        let lines = vec![
            "FROM org/tool:1 AS tool",
            "COPY --from=tool /bin/tool /usr/bin/tool",
            "COPY --from=tool /lib/extra /usr/lib/extra",
        ];
        let result = parse_instructions(&lines, &key("X_TOOL"));
        assert_eq!(result.binary_path.as_deref(), Some("/bin/tool"));
        assert_eq!(result.target_path.as_deref(), Some("/usr/bin/tool"));
    }

    #[test]
    fn test_stage_matches_by_substring() {
        let lines = vec![
            "FROM zricethezav/gitleaks:v8.18.0 AS gitleaks_builder",
            "COPY --from=gitleaks_builder /usr/bin/gitleaks /usr/bin/",
        ];
        let result = parse_instructions(&lines, &key("REPOSITORY_GITLEAKS"));
        assert_eq!(result.stage_name.as_deref(), Some("gitleaks_builder"));
        assert_eq!(result.source_image.as_deref(), Some("zricethezav/gitleaks"));
        assert_eq!(result.version.as_deref(), Some("v8.18.0"));
    }

    #[test]
    fn test_unrelated_stages_are_ignored() {
        let lines = vec![
            "FROM org/other:1 AS other",
            "COPY --from=other /bin/other /usr/bin/other",
        ];
        let result = parse_instructions(&lines, &key("X_FOO"));
        assert_eq!(result, InstallationDescriptor::default());
    }

    #[test]
    fn test_undeclared_variable_falls_back_to_version_arg() {
        let lines = vec![
            "ARG BASH_SHELLCHECK_VERSION=0.10.0",
            "FROM koalaman/shellcheck:${UNDECLARED} AS shellcheck",
        ];
        let result = parse_instructions(&lines, &key("BASH_SHELLCHECK"));
        assert_eq!(result.version.as_deref(), Some("0.10.0"));
        assert_eq!(result.source_image.as_deref(), Some("koalaman/shellcheck"));
        assert!(!result.is_docker_binary());
    }

    #[test]
    fn test_version_arg_fallback_without_stage() {
        let lines = vec![
            "ARG UNRELATED=1",
            "ARG PYTHON_BLACK_VERSION=24.1.0",
            "RUN pip install black==${PYTHON_BLACK_VERSION}",
        ];
        let result = parse_instructions(&lines, &key("PYTHON_BLACK"));
        assert_eq!(result.version.as_deref(), Some("24.1.0"));
        assert!(result.source_image.is_none());
    }

    #[test]
    fn test_arg_redefinition_replaces_value() {
        let lines = vec![
            "ARG FOO_VERSION=1.0.0",
            "ARG FOO_VERSION=2.0.0",
            "FROM org/foo:$FOO_VERSION AS foo",
        ];
        let result = parse_instructions(&lines, &key("X_FOO"));
        assert_eq!(result.version.as_deref(), Some("2.0.0"));
    }

    #[test]
    fn test_empty_input() {
        let lines: Vec<String> = Vec::new();
        let result = parse_instructions(&lines, &key("X_FOO"));
        assert_eq!(result, InstallationDescriptor::default());
    }

    #[test]
    fn test_find_prefixed_version() {
        let lines = vec![
            "# ARG NPM_IGNORED_VERSION=0.0.1",
            "ARG NPM_SPECTRAL_VERSION=6.11.0",
            "ARG PIP_BANDIT_VERSION=1.7.5",
        ];
        assert_eq!(find_prefixed_version(&lines, "NPM").as_deref(), Some("6.11.0"));
        assert_eq!(find_prefixed_version(&lines, "PIP").as_deref(), Some("1.7.5"));
        assert_eq!(find_prefixed_version(&lines, "GEM"), None);
    }

    #[test]
    fn test_stage_redefinition_replaces_image() {
        let lines = vec![
            "ARG FOO_VERSION=1.0.0",
            "FROM org/old-foo:${FOO_VERSION} AS foo",
            "FROM org/bar:2 AS bar",
            "FROM org/foo:${FOO_VERSION} AS foo",
            "COPY --from=foo /bin/foo /usr/bin/foo",
        ];
        let result = parse_instructions(&lines, &key("X_FOO"));
        assert_eq!(result.source_image.as_deref(), Some("org/foo"));
        assert_eq!(result.version.as_deref(), Some("1.0.0"));
        assert_eq!(result.stage_name.as_deref(), Some("foo"));
    }
}
