//! Parameter sets
//!
//! A `ParameterSet` holds one value slot per declared parameter, in
//! declaration order. It is validated once at construction: unknown names,
//! type mismatches and missing required values are rejected here so that
//! resolution never has to.

use crate::error::{ResolveError, Result};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use waypoint_core::{ParamType, Program, Value};

/// Validated parameter values for one resolution
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    values: IndexMap<String, Option<Value>>,
}

impl ParameterSet {
    /// Start building a parameter set for `program`
    pub fn builder(program: &Program) -> ParameterSetBuilder<'_> {
        ParameterSetBuilder::new(program)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).and_then(Option::as_ref)
    }

    /// Value by declaration index
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.values
            .get_index(index)
            .and_then(|(_, value)| value.as_ref())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match value {
                Some(Value::String(s)) => write!(f, "{}: {:?}", name, s)?,
                Some(Value::Bool(b)) => write!(f, "{}: {}", name, b)?,
                Some(Value::StringList(list)) => write!(f, "{}: {:?}", name, list)?,
                Some(other) => write!(f, "{}: {:?}", name, other)?,
                None => write!(f, "{}: <unset>", name)?,
            }
        }
        f.write_str("}")
    }
}

/// Builder for [`ParameterSet`]
pub struct ParameterSetBuilder<'a> {
    program: &'a Program,
    values: HashMap<String, Value>,
    builtins: HashMap<String, Value>,
}

impl<'a> ParameterSetBuilder<'a> {
    pub fn new(program: &'a Program) -> Self {
        Self {
            program,
            values: HashMap::new(),
            builtins: HashMap::new(),
        }
    }

    /// Set a parameter value
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Set a parameter value if present
    pub fn set_opt<V: Into<Value>>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(name, value),
            None => self,
        }
    }

    /// Provide a builtIn value (e.g. `AWS::Region`)
    pub fn builtin(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.builtins.insert(name.into(), value.into());
        self
    }

    /// Provide several builtIn values
    pub fn with_builtins(mut self, builtins: &HashMap<String, Value>) -> Self {
        self.builtins
            .extend(builtins.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Validate and build the parameter set
    ///
    /// Precedence for each parameter: explicit value, then builtIn, then the
    /// declared default.
    pub fn build(mut self) -> Result<ParameterSet> {
        let parameters = self.program.parameters();

        if let Some(unknown) = self.values.keys().find(|name| !parameters.contains_key(*name)) {
            return Err(ResolveError::InvalidParameter(format!(
                "unknown parameter `{}`",
                unknown
            )));
        }

        let mut values = IndexMap::with_capacity(parameters.len());
        for (name, def) in parameters {
            let explicit = self.values.remove(name);
            if explicit.is_some() {
                if let Some(deprecation) = &def.deprecated {
                    tracing::warn!(
                        parameter = %name,
                        since = ?deprecation.since,
                        "deprecated parameter set: {}",
                        deprecation.message.as_deref().unwrap_or("no replacement given")
                    );
                }
            }

            let value = explicit
                .or_else(|| {
                    def.built_in
                        .as_ref()
                        .and_then(|built_in| self.builtins.get(built_in).cloned())
                })
                .or_else(|| def.default_value());

            let value = match value {
                Some(value) => Some(coerce(name, def.param_type, value)?),
                None if def.required => {
                    return Err(ResolveError::InvalidParameter(format!(
                        "missing required parameter `{}`",
                        name
                    )));
                }
                None => None,
            };

            values.insert(name.clone(), value);
        }

        Ok(ParameterSet { values })
    }
}

fn coerce(name: &str, param_type: ParamType, value: Value) -> Result<Value> {
    if !param_type.accepts(&value) {
        return Err(ResolveError::InvalidParameter(format!(
            "parameter `{}` expects {}, got {}",
            name,
            param_type.as_str(),
            value.type_name()
        )));
    }

    Ok(match (param_type, value) {
        (ParamType::StringArray, value @ Value::Document(_)) => {
            Value::StringList(value.to_string_list().unwrap_or_default())
        }
        (_, value) => value,
    })
}
