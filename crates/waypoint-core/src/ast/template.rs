//! String templates
//!
//! Every string literal in a diagram is a template. `{Region}` splices the
//! value of a parameter or bound name, `{url#authority}` splices a member of
//! a record, and `{{` / `}}` produce literal braces.

use crate::ast::AttrPath;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One piece of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    /// Literal text, with escapes already resolved
    Literal(String),
    /// Value splice
    Placeholder {
        name: String,
        path: Option<AttrPath>,
    },
}

/// Parsed string template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Template {
    source: String,
    parts: Vec<TemplatePart>,
}

impl Template {
    /// Parse a template
    pub fn parse(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let invalid = |reason: &str| CoreError::InvalidTemplate {
            template: source.clone(),
            reason: reason.to_string(),
        };

        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut inner = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        inner.push(c);
                    }
                    if !closed {
                        return Err(invalid("unterminated placeholder"));
                    }

                    let (name, path) = match inner.split_once('#') {
                        Some((name, path)) => (name, Some(AttrPath::parse(path)?)),
                        None => (inner.as_str(), None),
                    };
                    if name.is_empty() {
                        return Err(invalid("empty placeholder"));
                    }

                    if !literal.is_empty() {
                        parts.push(TemplatePart::Literal(std::mem::take(&mut literal)));
                    }
                    parts.push(TemplatePart::Placeholder {
                        name: name.to_string(),
                        path,
                    });
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(invalid("unmatched `}`")),
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            parts.push(TemplatePart::Literal(literal));
        }

        Ok(Self { source, parts })
    }

    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    /// The template text as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The resolved text, if the template has no placeholders
    pub fn as_literal(&self) -> Option<String> {
        match self.parts.as_slice() {
            [] => Some(String::new()),
            [TemplatePart::Literal(text)] => Some(text.clone()),
            _ => None,
        }
    }

    /// Names referenced by placeholders
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|part| match part {
            TemplatePart::Placeholder { name, .. } => Some(name.as_str()),
            TemplatePart::Literal(_) => None,
        })
    }
}

impl TryFrom<String> for Template {
    type Error = CoreError;

    fn try_from(source: String) -> Result<Self> {
        Template::parse(source)
    }
}

impl From<Template> for String {
    fn from(template: Template) -> Self {
        template.source
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_literal() {
        let template = Template::parse("https://example.com").unwrap();
        assert_eq!(template.as_literal(), Some("https://example.com".to_string()));
        assert_eq!(template.references().count(), 0);
    }

    #[test]
    fn test_parse_placeholders() {
        let template = Template::parse("https://{bucket}.{url#authority}/x").unwrap();
        assert_eq!(
            template.parts(),
            &[
                TemplatePart::Literal("https://".to_string()),
                TemplatePart::Placeholder {
                    name: "bucket".to_string(),
                    path: None
                },
                TemplatePart::Literal(".".to_string()),
                TemplatePart::Placeholder {
                    name: "url".to_string(),
                    path: Some(AttrPath::parse("authority").unwrap())
                },
                TemplatePart::Literal("/x".to_string()),
            ]
        );
        assert_eq!(template.references().collect::<Vec<_>>(), vec!["bucket", "url"]);
        assert_eq!(template.as_literal(), None);
    }

    #[test]
    fn test_escaped_braces() {
        let template = Template::parse("{{\"key\": \"{{value}}\"}}").unwrap();
        assert_eq!(
            template.as_literal(),
            Some("{\"key\": \"{value}\"}".to_string())
        );
    }

    #[test]
    fn test_invalid_templates() {
        assert!(Template::parse("https://{Region").is_err());
        assert!(Template::parse("https://{}").is_err());
        assert!(Template::parse("a}b").is_err());
        assert!(Template::parse("{url#}").is_err());
    }

    #[test]
    fn test_serde_roundtrip_keeps_source() {
        let template: Template = serde_json::from_str(r#""{a}-{{b}}""#).unwrap();
        assert_eq!(serde_json::to_string(&template).unwrap(), r#""{a}-{{b}}""#);
    }
}
