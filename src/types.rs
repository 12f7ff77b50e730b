//! Core types shared by configuration loading and rule parsing.

use serde::{Deserialize, Serialize};

/// Position of an agent within a requesting agent's reference chain (0 = the requester).
pub type AgentDepth = usize;

/// A field that may be written either as a single string or as a list of strings.
///
/// Resolved once, at load time, into a canonical `Vec<String>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            StringOrList::One(value) => vec![value],
            StringOrList::Many(values) => values,
        }
    }
}

impl Default for StringOrList {
    fn default() -> Self {
        StringOrList::Many(Vec::new())
    }
}

impl From<StringOrList> for Vec<String> {
    fn from(value: StringOrList) -> Self {
        value.into_vec()
    }
}

/// Deserialize a string-or-list field straight into its canonical form.
pub fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    StringOrList::deserialize(deserializer).map(StringOrList::into_vec)
}
