//! Function catalog
//!
//! The set of functions a diagram may call is fixed. Each kind carries its
//! wire name, its arity, and the shape of its return value, which decides
//! how a condition built on it turns into a boolean outcome.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a function's result becomes a condition outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    /// `isSet`: outcome is the presence of the inner value, nothing is bound
    Presence,
    /// `coalesce`: first present argument, outcome is its presence
    Coalesce,
    /// May produce no value; outcome is presence
    Optional,
    /// Produces a boolean; outcome is that boolean
    Boolean,
    /// Always produces a value; outcome is always true
    Infallible,
}

/// Accepted argument counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == *n,
            Arity::AtLeast(n) => count >= *n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// A function in the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum FunctionKind {
    IsSet,
    Not,
    BooleanEquals,
    StringEquals,
    GetAttr,
    Substring,
    IsValidHostLabel,
    ParseUrl,
    UriEncode,
    Split,
    Coalesce,
    Ite,
    StringArrayContains,
    AwsPartition,
    AwsParseArn,
    AwsIsVirtualHostableS3Bucket,
}

impl FunctionKind {
    pub const ALL: [FunctionKind; 16] = [
        FunctionKind::IsSet,
        FunctionKind::Not,
        FunctionKind::BooleanEquals,
        FunctionKind::StringEquals,
        FunctionKind::GetAttr,
        FunctionKind::Substring,
        FunctionKind::IsValidHostLabel,
        FunctionKind::ParseUrl,
        FunctionKind::UriEncode,
        FunctionKind::Split,
        FunctionKind::Coalesce,
        FunctionKind::Ite,
        FunctionKind::StringArrayContains,
        FunctionKind::AwsPartition,
        FunctionKind::AwsParseArn,
        FunctionKind::AwsIsVirtualHostableS3Bucket,
    ];

    /// Wire name of the function
    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionKind::IsSet => "isSet",
            FunctionKind::Not => "not",
            FunctionKind::BooleanEquals => "booleanEquals",
            FunctionKind::StringEquals => "stringEquals",
            FunctionKind::GetAttr => "getAttr",
            FunctionKind::Substring => "substring",
            FunctionKind::IsValidHostLabel => "isValidHostLabel",
            FunctionKind::ParseUrl => "parseURL",
            FunctionKind::UriEncode => "uriEncode",
            FunctionKind::Split => "split",
            FunctionKind::Coalesce => "coalesce",
            FunctionKind::Ite => "ite",
            FunctionKind::StringArrayContains => "stringArrayContains",
            FunctionKind::AwsPartition => "aws.partition",
            FunctionKind::AwsParseArn => "aws.parseArn",
            FunctionKind::AwsIsVirtualHostableS3Bucket => "aws.isVirtualHostableS3Bucket",
        }
    }

    pub fn return_kind(&self) -> ReturnKind {
        match self {
            FunctionKind::IsSet => ReturnKind::Presence,
            FunctionKind::Coalesce => ReturnKind::Coalesce,
            FunctionKind::GetAttr
            | FunctionKind::Substring
            | FunctionKind::ParseUrl
            | FunctionKind::AwsPartition
            | FunctionKind::AwsParseArn => ReturnKind::Optional,
            FunctionKind::Not
            | FunctionKind::BooleanEquals
            | FunctionKind::StringEquals
            | FunctionKind::IsValidHostLabel
            | FunctionKind::StringArrayContains
            | FunctionKind::AwsIsVirtualHostableS3Bucket => ReturnKind::Boolean,
            FunctionKind::UriEncode | FunctionKind::Split | FunctionKind::Ite => {
                ReturnKind::Infallible
            }
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            FunctionKind::IsSet
            | FunctionKind::Not
            | FunctionKind::ParseUrl
            | FunctionKind::UriEncode
            | FunctionKind::AwsPartition
            | FunctionKind::AwsParseArn => Arity::Exact(1),
            FunctionKind::BooleanEquals
            | FunctionKind::StringEquals
            | FunctionKind::GetAttr
            | FunctionKind::IsValidHostLabel
            | FunctionKind::StringArrayContains
            | FunctionKind::AwsIsVirtualHostableS3Bucket => Arity::Exact(2),
            FunctionKind::Split | FunctionKind::Ite => Arity::Exact(3),
            FunctionKind::Substring => Arity::Exact(4),
            FunctionKind::Coalesce => Arity::AtLeast(1),
        }
    }
}

impl FromStr for FunctionKind {
    type Err = CoreError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        FunctionKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| CoreError::UnknownFunction(name.to_string()))
    }
}

impl TryFrom<String> for FunctionKind {
    type Error = CoreError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<FunctionKind> for &'static str {
    fn from(kind: FunctionKind) -> Self {
        kind.as_str()
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
