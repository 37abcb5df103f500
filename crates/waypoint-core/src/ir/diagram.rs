//! Decision diagram document
//!
//! The stable contract between the upstream compiler and the resolver:
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "parameters": { "Region": { "type": "string", "builtIn": "AWS::Region" } },
//!   "conditions": [ { "fn": "isSet", "argv": [ { "ref": "Region" } ] } ],
//!   "nodes": [ [0, 100000001, 100000000] ],
//!   "root": 2,
//!   "results": [ { "type": "no_match" }, { "type": "endpoint", "url": "https://{Region}.example.com" } ]
//! }
//! ```

use crate::ast::{AttrPath, Expression, FunctionCall, FunctionKind};
use crate::error::{CoreError, Result};
use crate::ir::{Condition, DecisionNode, NodeRef, ResultTemplate, Symbols};
use crate::types::ParameterDef;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

fn default_version() -> String {
    "1.0".to_string()
}

/// A compiled decision diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionDiagram {
    /// Format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Parameter declarations, in declaration order
    #[serde(default)]
    pub parameters: IndexMap<String, ParameterDef>,

    /// Condition table
    #[serde(default)]
    pub conditions: Vec<Condition>,

    /// Decision nodes
    #[serde(default)]
    pub nodes: Vec<DecisionNode>,

    /// Entry point
    pub root: NodeRef,

    /// Result table
    #[serde(default)]
    pub results: Vec<ResultTemplate>,
}

impl DecisionDiagram {
    /// Create an empty diagram with the given root
    pub fn new(root: NodeRef) -> Self {
        Self {
            version: default_version(),
            parameters: IndexMap::new(),
            conditions: Vec::new(),
            nodes: Vec::new(),
            root,
            results: Vec::new(),
        }
    }

    /// Parse a diagram from JSON
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Declare a parameter
    pub fn with_parameter(mut self, name: impl Into<String>, def: ParameterDef) -> Self {
        self.parameters.insert(name.into(), def);
        self
    }

    /// Append a condition, returning its index
    pub fn add_condition(&mut self, condition: Condition) -> usize {
        self.conditions.push(condition);
        self.conditions.len() - 1
    }

    /// Append a decision node, returning a reference to it
    pub fn add_node(&mut self, node: DecisionNode) -> NodeRef {
        self.nodes.push(node);
        NodeRef::node(self.nodes.len() - 1)
    }

    /// Append a result, returning a terminal reference to it
    pub fn add_result(&mut self, result: ResultTemplate) -> NodeRef {
        self.results.push(result);
        NodeRef::Result(self.results.len() - 1)
    }

    /// Check every structural invariant and build the symbol table
    pub fn validate(&self) -> Result<Symbols> {
        self.validate_parameters()?;
        let symbols = Symbols::build(self)?;

        for condition in &self.conditions {
            check_call(&condition.as_call())?;
            for arg in &condition.args {
                check_expression(arg, &symbols)?;
            }
        }

        for result in &self.results {
            for expr in result.expressions() {
                check_expression(expr, &symbols)?;
            }
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if node.condition_index >= self.conditions.len() {
                return Err(CoreError::ConditionOutOfRange {
                    node: index,
                    condition: node.condition_index,
                    count: self.conditions.len(),
                });
            }
            self.check_ref(node.high)?;
            self.check_ref(node.low)?;
        }
        self.check_ref(self.root)?;
        self.check_acyclic()?;

        Ok(symbols)
    }

    fn validate_parameters(&self) -> Result<()> {
        for (name, def) in &self.parameters {
            if let Some(default) = def.default_value() {
                if !def.param_type.accepts(&default) {
                    return Err(CoreError::InvalidParameter {
                        name: name.clone(),
                        reason: format!(
                            "default of type {} does not match declared type {}",
                            default.type_name(),
                            def.param_type.as_str()
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_ref(&self, node_ref: NodeRef) -> Result<()> {
        let (index, kind, len) = match node_ref {
            NodeRef::True | NodeRef::False => return Ok(()),
            NodeRef::Node { index, .. } => (index, "node", self.nodes.len()),
            NodeRef::Result(index) => (index, "result", self.results.len()),
        };
        if index >= len {
            return Err(CoreError::RefOutOfRange {
                reference: node_ref.encode(),
                kind,
                len,
            });
        }
        Ok(())
    }

    fn check_acyclic(&self) -> Result<()> {
        const UNVISITED: u8 = 0;
        const ON_STACK: u8 = 1;
        const DONE: u8 = 2;

        let mut state = vec![UNVISITED; self.nodes.len()];
        for start in 0..self.nodes.len() {
            if state[start] != UNVISITED {
                continue;
            }
            state[start] = ON_STACK;
            let mut stack = vec![(start, 0u8)];

            while let Some(top) = stack.last_mut() {
                let node = top.0;
                if top.1 == 2 {
                    state[node] = DONE;
                    stack.pop();
                    continue;
                }
                let next = if top.1 == 0 {
                    self.nodes[node].high
                } else {
                    self.nodes[node].low
                };
                top.1 += 1;

                if let NodeRef::Node { index, .. } = next {
                    match state[index] {
                        ON_STACK => return Err(CoreError::CyclicDiagram(index)),
                        UNVISITED => {
                            state[index] = ON_STACK;
                            stack.push((index, 0));
                        }
                        _ => {}
                    }
                }
            }
        }
        Ok(())
    }
}

fn check_expression(expr: &Expression, symbols: &Symbols) -> Result<()> {
    let mut unknown = None;
    expr.visit_references(&mut |name| {
        if unknown.is_none() && symbols.lookup(name).is_none() {
            unknown = Some(name.to_string());
        }
    });
    if let Some(name) = unknown {
        return Err(CoreError::UnknownReference(name));
    }
    expr.visit_calls(&mut |call| check_call(call))
}

fn check_call(call: &FunctionCall) -> Result<()> {
    let arity = call.function.arity();
    if !arity.accepts(call.args.len()) {
        return Err(CoreError::ArityMismatch {
            function: call.function.as_str(),
            expected: arity.to_string(),
            actual: call.args.len(),
        });
    }

    if call.function == FunctionKind::GetAttr {
        let path = match &call.args[1] {
            Expression::Template(template) => template.as_literal(),
            _ => None,
        };
        match path {
            Some(path) => {
                AttrPath::parse(&path)?;
            }
            None => {
                return Err(CoreError::InvalidAttrPath(call.args[1].describe()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scenario_json() -> serde_json::Value {
        json!({
            "parameters": {
                "Region": {"type": "string", "builtIn": "AWS::Region"}
            },
            "conditions": [
                {"fn": "isSet", "argv": [{"ref": "Region"}]}
            ],
            "nodes": [[0, 100000001, 100000000]],
            "root": 2,
            "results": [
                {"type": "no_match"},
                {"type": "endpoint", "url": "https://service.{Region}.amazonaws.com"}
            ]
        })
    }

    #[test]
    fn test_parse_and_validate() {
        let diagram: DecisionDiagram = serde_json::from_value(scenario_json()).unwrap();
        assert_eq!(diagram.version, "1.0");
        assert_eq!(diagram.root, NodeRef::node(0));
        assert_eq!(diagram.nodes[0].high, NodeRef::Result(1));
        assert!(diagram.validate().is_ok());
    }

    #[test]
    fn test_condition_index_out_of_range() {
        let mut value = scenario_json();
        value["nodes"] = json!([[4, 100000001, 100000000]]);
        let diagram: DecisionDiagram = serde_json::from_value(value).unwrap();
        assert_eq!(
            diagram.validate(),
            Err(CoreError::ConditionOutOfRange {
                node: 0,
                condition: 4,
                count: 1
            })
        );
    }

    #[test]
    fn test_result_ref_out_of_range() {
        let mut value = scenario_json();
        value["nodes"] = json!([[0, 100000009, -1]]);
        let diagram: DecisionDiagram = serde_json::from_value(value).unwrap();
        assert!(matches!(
            diagram.validate(),
            Err(CoreError::RefOutOfRange { kind: "result", .. })
        ));
    }

    #[test]
    fn test_cycle_detection() {
        let mut value = scenario_json();
        value["nodes"] = json!([[0, 3, -1], [0, 2, -1]]);
        let diagram: DecisionDiagram = serde_json::from_value(value).unwrap();
        assert!(matches!(
            diagram.validate(),
            Err(CoreError::CyclicDiagram(_))
        ));
    }

    #[test]
    fn test_unknown_reference() {
        let mut value = scenario_json();
        value["results"][1]["url"] = json!("https://{Bucket}.example.com");
        let diagram: DecisionDiagram = serde_json::from_value(value).unwrap();
        assert_eq!(
            diagram.validate(),
            Err(CoreError::UnknownReference("Bucket".to_string()))
        );
    }

    #[test]
    fn test_arity_mismatch() {
        let mut value = scenario_json();
        value["conditions"][0] = json!({"fn": "stringEquals", "argv": [{"ref": "Region"}]});
        let diagram: DecisionDiagram = serde_json::from_value(value).unwrap();
        assert!(matches!(
            diagram.validate(),
            Err(CoreError::ArityMismatch { function: "stringEquals", .. })
        ));
    }

    #[test]
    fn test_get_attr_path_must_be_literal() {
        let mut value = scenario_json();
        value["conditions"][0] = json!({
            "fn": "isSet",
            "argv": [{"fn": "getAttr", "argv": [{"ref": "Region"}, "{Region}"]}]
        });
        let diagram: DecisionDiagram = serde_json::from_value(value).unwrap();
        assert!(matches!(
            diagram.validate(),
            Err(CoreError::InvalidAttrPath(_))
        ));
    }

    #[test]
    fn test_default_type_mismatch() {
        let mut value = scenario_json();
        value["parameters"]["UseFIPS"] = json!({"type": "boolean", "default": "yes"});
        let diagram: DecisionDiagram = serde_json::from_value(value).unwrap();
        assert!(matches!(
            diagram.validate(),
            Err(CoreError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_builder_methods() {
        let mut diagram = DecisionDiagram::new(NodeRef::False)
            .with_parameter("Region", ParameterDef::new(crate::types::ParamType::String));
        let condition = diagram.add_condition(Condition::is_set("Region"));
        let endpoint = diagram.add_result(ResultTemplate::Endpoint(
            crate::ir::EndpointTemplate::new(Expression::template("https://{Region}").unwrap()),
        ));
        diagram.root = diagram.add_node(DecisionNode::new(condition, endpoint, NodeRef::False));

        assert_eq!(diagram.root, NodeRef::node(0));
        assert!(diagram.validate().is_ok());
    }
}
