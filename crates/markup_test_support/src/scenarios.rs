//! Scenario manifests: hand-written algebra cases kept as data, in TOML with
//! a JSON mirror.

use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const SCENARIO_FORMAT_V1: &str = "docgroup-scenarios-v1";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StringAlgebra {
    Tag,
    Value,
    Text,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct StringCase {
    pub name: String,
    pub algebra: StringAlgebra,
    pub a: String,
    pub b: String,
    #[serde(default)]
    pub sum: Option<String>,
    /// Error label expected instead of a sum.
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TreeCase {
    pub name: String,
    pub a: String,
    pub b: String,
    #[serde(default)]
    pub sum: Option<String>,
    #[serde(default)]
    pub metric: Option<usize>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ScenarioManifest {
    pub format: String,
    #[serde(default)]
    pub strings: Vec<StringCase>,
    #[serde(default)]
    pub trees: Vec<TreeCase>,
}

impl ScenarioManifest {
    fn validate(self, origin: &str) -> Result<Self, String> {
        if self.format != SCENARIO_FORMAT_V1 {
            return Err(format!("unsupported format {:?} in {origin}", self.format));
        }
        for case in &self.strings {
            if case.sum.is_some() == case.error.is_some() {
                return Err(format!(
                    "string case '{}' in {origin} needs exactly one of sum or error",
                    case.name
                ));
            }
        }
        for case in &self.trees {
            if case.sum.is_some() && case.error.is_some() {
                return Err(format!(
                    "tree case '{}' in {origin} has both sum and error",
                    case.name
                ));
            }
        }
        Ok(self)
    }
}

pub fn parse_toml(content: &str, origin: &str) -> Result<ScenarioManifest, String> {
    toml::from_str::<ScenarioManifest>(content)
        .map_err(|err| format!("invalid scenario TOML in {origin}: {err}"))?
        .validate(origin)
}

pub fn parse_json(content: &str, origin: &str) -> Result<ScenarioManifest, String> {
    serde_json::from_str::<ScenarioManifest>(content)
        .map_err(|err| format!("invalid scenario JSON in {origin}: {err}"))?
        .validate(origin)
}

pub fn load_scenarios(path: &Path) -> ScenarioManifest {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read scenario file {path:?}: {err}"));
    let origin = path.display().to_string();
    let parsed = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => parse_toml(&content, &origin),
        Some("json") => parse_json(&content, &origin),
        other => Err(format!("unknown scenario extension {other:?} for {origin}")),
    };
    parsed.unwrap_or_else(|err| panic!("{err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOML: &str = r#"
format = "docgroup-scenarios-v1"

[[strings]]
name = "tags"
algebra = "tag"
a = "abcde"
b = "abcde"
sum = "bdfhj"

[[trees]]
name = "ids"
a = "<a/>"
b = "<a/>"
sum = "<b/>"
metric = 1
"#;

    const JSON: &str = r#"{
  "format": "docgroup-scenarios-v1",
  "strings": [
    { "name": "tags", "algebra": "tag", "a": "abcde", "b": "abcde", "sum": "bdfhj" }
  ],
  "trees": [
    { "name": "ids", "a": "<a/>", "b": "<a/>", "sum": "<b/>", "metric": 1 }
  ]
}"#;

    #[test]
    fn toml_and_json_agree() {
        let from_toml = parse_toml(TOML, "inline").unwrap();
        let from_json = parse_json(JSON, "inline").unwrap();
        assert_eq!(from_toml, from_json);
        assert_eq!(from_toml.strings[0].algebra, StringAlgebra::Tag);
        assert_eq!(from_toml.trees[0].metric, Some(1));
    }

    #[test]
    fn rejects_unknown_format() {
        let err = parse_toml("format = \"v0\"", "inline").unwrap_err();
        assert!(err.contains("unsupported format"), "{err}");
    }

    #[test]
    fn string_cases_need_an_outcome() {
        let content = r#"
format = "docgroup-scenarios-v1"
[[strings]]
name = "open"
algebra = "text"
a = "x"
b = "y"
"#;
        let err = parse_toml(content, "inline").unwrap_err();
        assert!(err.contains("needs exactly one of sum or error"), "{err}");
    }
}
