//! `aws.parseArn`

use waypoint_core::Arn;

/// Parse `arn:partition:service:region:account-id:resource`
///
/// Region and account may be empty; partition, service and resource may
/// not. The resource is split on `:` and `/`.
pub fn parse_arn(input: &str) -> Option<Arn> {
    let mut parts = input.splitn(6, ':');
    if parts.next()? != "arn" {
        return None;
    }
    let partition = parts.next()?;
    let service = parts.next()?;
    let region = parts.next()?;
    let account_id = parts.next()?;
    let resource = parts.next()?;

    if partition.is_empty() || service.is_empty() || resource.is_empty() {
        return None;
    }

    Some(Arn {
        partition: partition.to_string(),
        service: service.to_string(),
        region: region.to_string(),
        account_id: account_id.to_string(),
        resource_id: resource
            .split(|c| c == ':' || c == '/')
            .map(str::to_string)
            .collect(),
    })
}
