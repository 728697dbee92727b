use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::error::CoreError;

/// A single `(code, label)` entry of a choice vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Choice {
    pub code: String,
    pub label: String,
}

impl Choice {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}

/// Ordered choice vocabulary of an interim field.
///
/// Persisted as `code:label|code:label`. An empty vocabulary means the field
/// holds free text. Codes are unique; declaration order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Choices(Vec<Choice>);

impl Choices {
    pub fn new(choices: Vec<Choice>) -> Result<Self, CoreError> {
        for (i, choice) in choices.iter().enumerate() {
            if choices[..i].iter().any(|c| c.code == choice.code) {
                return Err(CoreError::DuplicateChoiceCode(choice.code.clone()));
            }
        }
        Ok(Self(choices))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Choice> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Choice] {
        &self.0
    }

    /// Label for `code`, if declared.
    pub fn label(&self, code: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|c| c.code == code)
            .map(|c| c.label.as_str())
    }

    /// Code of the first choice labelled `label`, if any.
    pub fn code_for(&self, label: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.code.as_str())
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.0.iter().any(|c| c.code == code)
    }

    /// Insert `choice` at the front unless its code is already declared.
    /// Returns whether the vocabulary changed.
    pub fn insert_front(&mut self, choice: Choice) -> bool {
        if self.contains_code(&choice.code) {
            return false;
        }
        self.0.insert(0, choice);
        true
    }
}

impl<'a> IntoIterator for &'a Choices {
    type Item = &'a Choice;
    type IntoIter = std::slice::Iter<'a, Choice>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromStr for Choices {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }

        let choices = s
            .split('|')
            .map(|raw| {
                let (code, label) = raw
                    .split_once(':')
                    .ok_or_else(|| CoreError::MalformedChoice(raw.to_string()))?;
                Ok(Choice::new(code.trim(), label.trim()))
            })
            .collect::<Result<Vec<_>, CoreError>>()?;

        Self::new(choices)
    }
}

impl fmt::Display for Choices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, choice) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{}:{}", choice.code, choice.label)?;
        }
        Ok(())
    }
}

impl Serialize for Choices {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Choices {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
