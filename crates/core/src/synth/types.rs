use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::{Result, SynthError, Synthesize};

/// Builds the placeholder token for an attribute of a declared resource.
///
/// Tokens look like `${LogicalId.AttrName}` and are substituted with real
/// values by the deployment orchestrator; within this crate they are
/// opaque non-empty strings.
pub fn attr(logical_id: &str, attr_name: &str) -> String {
    format!("${{{logical_id}.{attr_name}}}")
}

/// A single rendered resource declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    pub logical_id: String,
    pub kind: &'static str,
    pub properties: Value,
}

/// A named value exported from a stack for operators and clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Output {
    pub name: String,
    pub value: String,
}

/// An ordered collection of resource declarations plus exported outputs.
///
/// Stacks are assembled once during deployment-definition evaluation and
/// rendered to a [`Template`] afterwards. Adding a resource whose logical
/// id is already taken fails the whole evaluation.
#[derive(Debug, Clone)]
pub struct Stack {
    name: String,
    resources: Vec<Resource>,
    outputs: Vec<Output>,
}

impl Stack {
    /// Creates an empty stack with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resources: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renders a declaration and appends it to the stack.
    pub fn add<R: Synthesize>(&mut self, declaration: &R) -> Result<()> {
        let rendered = declaration.render();
        if self
            .resources
            .iter()
            .any(|r| r.logical_id == rendered.logical_id)
        {
            return Err(SynthError::DuplicateLogicalId {
                stack: self.name.clone(),
                logical_id: rendered.logical_id,
            });
        }
        self.resources.push(rendered);
        Ok(())
    }

    /// Records a named output exported from this stack.
    pub fn output(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let name = name.into();
        if self.outputs.iter().any(|o| o.name == name) {
            return Err(SynthError::DuplicateOutput {
                stack: self.name.clone(),
                name,
            });
        }
        self.outputs.push(Output {
            name,
            value: value.into(),
        });
        Ok(())
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    /// Looks up an output value by name.
    pub fn output_value(&self, name: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.value.as_str())
    }

    /// Produces the serializable template view of this stack.
    pub fn template(&self) -> Template {
        Template {
            resources: self
                .resources
                .iter()
                .map(|r| {
                    (
                        r.logical_id.clone(),
                        TemplateResource {
                            kind: r.kind,
                            properties: r.properties.clone(),
                        },
                    )
                })
                .collect(),
            outputs: self
                .outputs
                .iter()
                .map(|o| (o.name.clone(), o.value.clone()))
                .collect(),
        }
    }
}

/// Serializable deployment template for one stack.
#[derive(Debug, Clone, Serialize)]
pub struct Template {
    #[serde(rename = "Resources")]
    pub resources: BTreeMap<String, TemplateResource>,
    #[serde(rename = "Outputs", skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, String>,
}

/// One resource entry in a rendered template.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateResource {
    #[serde(rename = "Type")]
    pub kind: &'static str,
    #[serde(rename = "Properties")]
    pub properties: Value,
}

impl Template {
    /// Renders the template as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
