//! Attribute paths
//!
//! A path is a `.`-separated list of member names, each optionally followed
//! by one or more `[n]` indexes: `authority`, `resourceId[0]`, `a.b[1][2]`.

use crate::error::{CoreError, Result};
use std::fmt;

/// One step of an attribute path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

/// Parsed attribute path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrPath {
    segments: Vec<PathSegment>,
}

impl AttrPath {
    /// Parse a path
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || CoreError::InvalidAttrPath(input.to_string());

        if input.is_empty() {
            return Err(invalid());
        }

        let mut segments = Vec::new();
        for part in input.split('.') {
            let (name, mut rest) = match part.find('[') {
                Some(pos) => (&part[..pos], &part[pos..]),
                None => (part, ""),
            };

            if name.is_empty() && rest.is_empty() {
                return Err(invalid());
            }
            if !name.is_empty() {
                if !name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
                {
                    return Err(invalid());
                }
                segments.push(PathSegment::Field(name.to_string()));
            }

            while !rest.is_empty() {
                let (index, tail) = rest
                    .strip_prefix('[')
                    .and_then(|r| r.split_once(']'))
                    .ok_or_else(invalid)?;
                let index = index.parse::<usize>().map_err(|_| invalid())?;
                segments.push(PathSegment::Index(index));
                rest = tail;
            }
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl fmt::Display for AttrPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}
