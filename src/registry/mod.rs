// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Catalog of invokable tools
//!
//! The same [`Tool`] values feed both the JSON and the HTML views, so the
//! parameter map is the single source for required flags and types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::RwLock;
use thiserror::Error;
use tracing::info;

/// Declared parameter of a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameter {
    #[serde(rename = "type")]
    pub param_type: String,
    pub required: bool,
    pub description: String,
}

impl ToolParameter {
    pub fn required(param_type: &str, description: &str) -> Self {
        Self {
            param_type: param_type.to_string(),
            required: true,
            description: description.to_string(),
        }
    }

    pub fn optional(param_type: &str, description: &str) -> Self {
        Self {
            param_type: param_type.to_string(),
            required: false,
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub category: String,
    /// Parameter name to declaration, iterated in name order
    #[serde(default)]
    pub parameters: BTreeMap<String, ToolParameter>,
}

impl Tool {
    pub fn new(name: &str, category: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            parameters: BTreeMap::new(),
        }
    }

    pub fn with_parameter(mut self, name: &str, parameter: ToolParameter) -> Self {
        self.parameters.insert(name.to_string(), parameter);
        self
    }
}

/// Catalog contents taken under a single read
#[derive(Debug, Clone, PartialEq)]
pub struct ToolListing {
    pub tools: Vec<Tool>,
    /// Categories in first-seen order
    pub categories: Vec<String>,
}

impl ToolListing {
    pub fn count(&self) -> usize {
        self.tools.len()
    }

    /// Tools grouped by category, skipping empty groups
    pub fn grouped(&self) -> Vec<(&str, Vec<&Tool>)> {
        self.categories
            .iter()
            .map(|category| {
                let tools = self
                    .tools
                    .iter()
                    .filter(|t| &t.category == category)
                    .collect::<Vec<_>>();
                (category.as_str(), tools)
            })
            .filter(|(_, tools)| !tools.is_empty())
            .collect()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("Tool already registered: {0}")]
    Duplicate(String),

    #[error("Tool name cannot be empty")]
    EmptyName,
}

/// Insertion-ordered, in-memory tool catalog
#[derive(Default)]
pub struct ToolRegistry {
    tools: RwLock<Vec<Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with [`builtin_tools`]
    pub fn with_builtin_tools() -> Self {
        let registry = Self::new();
        for tool in builtin_tools() {
            // Builtin names are unique
            let _ = registry.register(tool);
        }
        registry
    }

    pub fn register(&self, tool: Tool) -> Result<(), RegistryError> {
        if tool.name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }

        let mut tools = self
            .tools
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if tools.iter().any(|t| t.name == tool.name) {
            return Err(RegistryError::Duplicate(tool.name));
        }

        info!("Registered tool '{}' in category '{}'", tool.name, tool.category);
        tools.push(tool);
        Ok(())
    }

    /// All tools in registration order
    pub fn list(&self) -> Vec<Tool> {
        self.read().clone()
    }

    pub fn get(&self, name: &str) -> Option<Tool> {
        self.read().iter().find(|t| t.name == name).cloned()
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<String> {
        self.snapshot().categories
    }

    pub fn by_category(&self, category: &str) -> Vec<Tool> {
        self.read()
            .iter()
            .filter(|t| t.category == category)
            .cloned()
            .collect()
    }

    /// Consistent view of the whole catalog for one response
    pub fn snapshot(&self) -> ToolListing {
        let tools = self.list();
        let mut categories: Vec<String> = Vec::new();
        for tool in &tools {
            if !categories.contains(&tool.category) {
                categories.push(tool.category.clone());
            }
        }
        ToolListing { tools, categories }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Tool>> {
        self.tools
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Tools describing this service's own search capabilities
pub fn builtin_tools() -> Vec<Tool> {
    vec![
        Tool::new(
            "site_search",
            "search",
            "Search the site's local content index. Free.",
        )
        .with_parameter(
            "q",
            ToolParameter::required("string", "Search query, at most 256 characters"),
        ),
        Tool::new(
            "web_search",
            "search",
            "Search the web through the external provider. Requires a session and is charged per successful call.",
        )
        .with_parameter(
            "q",
            ToolParameter::required("string", "Search query, at most 256 characters"),
        ),
        Tool::new("list_tools", "meta", "List every registered tool."),
        Tool::new("get_tool", "meta", "Describe a single tool.").with_parameter(
            "name",
            ToolParameter::required("string", "Tool name"),
        ),
        Tool::new("health", "meta", "Service health and version.").with_parameter(
            "verbose",
            ToolParameter::optional("boolean", "Include build details"),
        ),
    ]
}
