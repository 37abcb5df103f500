//! `aws.isVirtualHostableS3Bucket`

use once_cell::sync::Lazy;
use regex::Regex;

use super::string::is_valid_host_label;

static VIRTUAL_HOSTABLE_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z\d][a-z\d\-.]{1,61}[a-z\d]$").expect("valid regex"));

static IPV4: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+\.){3}\d+$").expect("valid regex"));

static DOTS_AND_DASHES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.*((\.-)|(-\.)).*$").expect("valid regex"));

/// Whether a bucket name can be used as a virtual-hosted-style host label
pub fn is_virtual_hostable_s3_bucket(bucket: &str, allow_sub_domains: bool) -> bool {
    if !is_valid_host_label(bucket, allow_sub_domains) {
        return false;
    }
    if allow_sub_domains {
        bucket.split('.').all(is_virtual_hostable_segment)
    } else {
        is_virtual_hostable_segment(bucket)
    }
}

fn is_virtual_hostable_segment(segment: &str) -> bool {
    VIRTUAL_HOSTABLE_SEGMENT.is_match(segment)
        && !IPV4.is_match(segment)
        && !DOTS_AND_DASHES.is_match(segment)
}
