//! Configuration validation: raw merged values -> `ProjectConfig`.
//!
//! The merged configuration is deserialized loosely so that shape errors can be
//! reported per agent and per field, and so that an absent `commandGroup` key can
//! be told apart from an explicit `null`.

use crate::config::{
    default_agents, AgentConfig, ProjectConfig, CONFIG_FILE_PATH, DEFAULT_EXCLUDE,
    RESERVED_COMMAND_GROUP,
};
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Configuration as merged from all sources, before validation.
#[derive(Debug, Default, Deserialize)]
pub struct RawProjectConfig {
    #[serde(default)]
    pub exclude: Option<Value>,

    #[serde(default)]
    pub agents: Option<Value>,

    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

/// Validate merged values into a `ProjectConfig`.
pub fn validate(raw: RawProjectConfig) -> Result<ProjectConfig, ApiError> {
    let exclude = match &raw.exclude {
        Some(value) => string_list(
            value,
            &format!(
                "`{}` 'exclude' property must be an array of strings.",
                CONFIG_FILE_PATH
            ),
        )?,
        None => vec![DEFAULT_EXCLUDE.to_string()],
    };

    let mut agents = match &raw.agents {
        Some(Value::Object(map)) => parse_agents(map)?,
        Some(Value::Null) | None => BTreeMap::new(),
        Some(_) => {
            return Err(ApiError::ConfigError(format!(
                "`{}` 'agents' property must be an object.",
                CONFIG_FILE_PATH
            )))
        }
    };
    if agents.is_empty() {
        agents = default_agents();
    }
    validate_command_groups(&agents)?;

    Ok(ProjectConfig {
        exclude,
        agents,
        logging: raw.logging,
    })
}

fn parse_agents(map: &Map<String, Value>) -> Result<BTreeMap<String, AgentConfig>, ApiError> {
    let mut agents = BTreeMap::new();
    for (name, value) in map {
        let Value::Object(fields) = value else {
            return Err(ApiError::ConfigError(format!(
                "Agent '{}' configuration must be an object.",
                name
            )));
        };
        agents.insert(name.clone(), parse_agent(name, fields)?);
    }
    Ok(agents)
}

fn parse_agent(name: &str, fields: &Map<String, Value>) -> Result<AgentConfig, ApiError> {
    let rule_file_pattern = match field(fields, "ruleFilePattern") {
        Some(Value::String(pattern)) => pattern.clone(),
        _ => {
            return Err(ApiError::ConfigError(format!(
                "Agent '{}' must have 'ruleFilePattern' string field.",
                name
            )))
        }
    };

    let command_group = match field(fields, "commandGroup") {
        None => {
            return Err(ApiError::ConfigError(format!(
                "Agent '{}' must have 'commandGroup' field (string or null).",
                name
            )))
        }
        Some(Value::Null) => None,
        Some(Value::String(group)) => Some(group.clone()),
        Some(_) => {
            return Err(ApiError::ConfigError(format!(
                "Agent '{}' 'commandGroup' must be string or null.",
                name
            )))
        }
    };

    let references = match field(fields, "references") {
        Some(value) => string_list(
            value,
            &format!("Agent '{}' 'references' must be an array of strings.", name),
        )?,
        None => Vec::new(),
    };

    Ok(AgentConfig {
        rule_file_pattern,
        command_group,
        references,
    })
}

/// Reserved and duplicate command groups. A null group counts as a group.
pub fn validate_command_groups(agents: &BTreeMap<String, AgentConfig>) -> Result<(), ApiError> {
    for (name, agent) in agents {
        if agent.command_group.as_deref() == Some(RESERVED_COMMAND_GROUP) {
            return Err(ApiError::ConfigError(format!(
                "Agent '{}' cannot use reserved commandGroup '{}'. Please choose a different commandGroup.",
                name, RESERVED_COMMAND_GROUP
            )));
        }
    }

    let mut owners: HashMap<Option<&str>, &str> = HashMap::new();
    for (name, agent) in agents {
        let group = agent.command_group.as_deref();
        if owners.insert(group, name).is_some() {
            let group = group
                .map(|g| format!("'{}'", g))
                .unwrap_or_else(|| "null".to_string());
            return Err(ApiError::ConfigError(format!(
                "Multiple agents have the same commandGroup: {}. Each agent must have a unique commandGroup.",
                group
            )));
        }
    }
    Ok(())
}

fn field<'v>(fields: &'v Map<String, Value>, name: &str) -> Option<&'v Value> {
    fields.get(name)
}

fn string_list(value: &Value, message: &str) -> Result<Vec<String>, ApiError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(item) => Ok(vec![item.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(item) => Ok(item.clone()),
                _ => Err(ApiError::ConfigError(message.to_string())),
            })
            .collect(),
        _ => Err(ApiError::ConfigError(message.to_string())),
    }
}
