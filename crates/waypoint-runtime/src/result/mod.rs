//! Resolution output types

mod endpoint;
mod trace;

pub use endpoint::{Endpoint, EndpointBuilder, AUTH_SCHEMES_PROPERTY};
pub use trace::{NodeVisit, ResolutionTrace};

use crate::error::Result;

/// A resolution outcome together with the path that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub result: Result<Endpoint>,
    pub trace: ResolutionTrace,
}

impl Resolution {
    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.result.as_ref().ok()
    }

    pub fn is_match(&self) -> bool {
        self.result.is_ok()
    }
}
