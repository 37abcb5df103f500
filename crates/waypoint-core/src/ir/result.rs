//! Result templates
//!
//! Terminal results selected by the diagram. Each is rendered against the
//! parameters and the populated context once traversal ends.

use crate::ast::Expression;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Template of a successful endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointTemplate {
    /// URL expression (usually a template)
    pub url: Expression,

    /// Header name to value expressions; list-valued expressions expand
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, Vec<Expression>>,

    /// Named endpoint properties (e.g. `authSchemes`)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Expression>,
}

impl EndpointTemplate {
    pub fn new(url: Expression) -> Self {
        Self {
            url,
            headers: IndexMap::new(),
            properties: IndexMap::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, values: Vec<Expression>) -> Self {
        self.headers.insert(name.into(), values);
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: Expression) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    fn expressions(&self) -> impl Iterator<Item = &Expression> {
        std::iter::once(&self.url)
            .chain(self.headers.values().flatten())
            .chain(self.properties.values())
    }
}

/// A terminal result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResultTemplate {
    /// A successful endpoint
    Endpoint(EndpointTemplate),

    /// An intentional rejection with a rendered message
    Error {
        #[serde(rename = "error")]
        message: Expression,
    },

    /// No rule applied
    NoMatch,
}

impl ResultTemplate {
    /// All expressions rendered when this result is selected
    pub fn expressions(&self) -> Vec<&Expression> {
        match self {
            ResultTemplate::Endpoint(endpoint) => endpoint.expressions().collect(),
            ResultTemplate::Error { message } => vec![message],
            ResultTemplate::NoMatch => Vec::new(),
        }
    }
}
