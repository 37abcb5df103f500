//! Partition resolution for `aws.partition`
//!
//! The partition table is a `partitions.json` document. A built-in copy is
//! embedded in the crate, parsed once per process on first use and shared
//! behind an `Arc`. Hosts with a newer table pass their own resolver to the
//! engine instead.

use crate::error::{ResolveError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use waypoint_core::Partition;

const BUILT_IN_PARTITIONS: &str = include_str!("partitions.json");

static DEFAULT_RESOLVER: Lazy<Arc<PartitionResolver>> = Lazy::new(|| {
    Arc::new(
        PartitionResolver::from_json(BUILT_IN_PARTITIONS)
            .expect("built-in partition table is valid"),
    )
});

/// Fallback partition for regions no entry or pattern claims
const FALLBACK_PARTITION: &str = "aws";

#[derive(Debug, Deserialize)]
struct PartitionTable {
    partitions: Vec<PartitionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartitionEntry {
    id: String,
    region_regex: String,
    #[serde(default)]
    regions: HashMap<String, PartitionOverrides>,
    outputs: Partition,
}

/// Per-region overrides of a partition's outputs
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartitionOverrides {
    name: Option<String>,
    dns_suffix: Option<String>,
    dual_stack_dns_suffix: Option<String>,
    #[serde(rename = "supportsFIPS")]
    supports_fips: Option<bool>,
    supports_dual_stack: Option<bool>,
    implicit_global_region: Option<String>,
}

impl PartitionOverrides {
    fn apply(&self, base: &Partition) -> Partition {
        let mut partition = base.clone();
        if let Some(name) = &self.name {
            partition.name = name.clone();
        }
        if let Some(dns_suffix) = &self.dns_suffix {
            partition.dns_suffix = dns_suffix.clone();
        }
        if let Some(suffix) = &self.dual_stack_dns_suffix {
            partition.dual_stack_dns_suffix = suffix.clone();
        }
        if let Some(fips) = self.supports_fips {
            partition.supports_fips = fips;
        }
        if let Some(dual_stack) = self.supports_dual_stack {
            partition.supports_dual_stack = dual_stack;
        }
        if let Some(region) = &self.implicit_global_region {
            partition.implicit_global_region = region.clone();
        }
        partition
    }
}

#[derive(Debug)]
struct CompiledPartition {
    id: String,
    region_regex: Regex,
    regions: HashMap<String, PartitionOverrides>,
    outputs: Partition,
}

/// Maps a region name to its partition
#[derive(Debug)]
pub struct PartitionResolver {
    partitions: Vec<CompiledPartition>,
}

impl PartitionResolver {
    /// Parse a `partitions.json` document
    pub fn from_json(content: &str) -> Result<Self> {
        let table: PartitionTable = serde_json::from_str(content)
            .map_err(|e| ResolveError::InvalidPartitionTable(e.to_string()))?;

        let partitions = table
            .partitions
            .into_iter()
            .map(|entry| {
                let region_regex = Regex::new(&entry.region_regex).map_err(|e| {
                    ResolveError::InvalidPartitionTable(format!(
                        "partition `{}` has an invalid regionRegex: {}",
                        entry.id, e
                    ))
                })?;
                Ok(CompiledPartition {
                    id: entry.id,
                    region_regex,
                    regions: entry.regions,
                    outputs: entry.outputs,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if partitions.is_empty() {
            return Err(ResolveError::InvalidPartitionTable(
                "table defines no partitions".to_string(),
            ));
        }

        Ok(Self { partitions })
    }

    /// The built-in table, shared by every engine that does not bring its own
    pub fn default_shared() -> Arc<Self> {
        Arc::clone(&DEFAULT_RESOLVER)
    }

    /// Resolve the partition for `region`
    ///
    /// An explicit region entry wins over a pattern match; regions nothing
    /// claims fall back to the `aws` partition.
    pub fn resolve(&self, region: &str) -> Option<Partition> {
        if let Some((partition, overrides)) = self
            .partitions
            .iter()
            .find_map(|p| p.regions.get(region).map(|o| (p, o)))
        {
            return Some(overrides.apply(&partition.outputs));
        }

        if let Some(partition) = self
            .partitions
            .iter()
            .find(|p| p.region_regex.is_match(region))
        {
            return Some(partition.outputs.clone());
        }

        self.partitions
            .iter()
            .find(|p| p.id == FALLBACK_PARTITION)
            .map(|p| p.outputs.clone())
    }

    pub fn partition_ids(&self) -> impl Iterator<Item = &str> {
        self.partitions.iter().map(|p| p.id.as_str())
    }
}
