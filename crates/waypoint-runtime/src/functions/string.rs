//! String functions: `substring`, `isValidHostLabel`, `uriEncode`, `split`

/// `substring(input, start, stop, reverse)`
///
/// Operates on ASCII input only. With `reverse`, offsets count from the end
/// of the string. Returns `None` for non-ASCII input or an empty or
/// out-of-bounds range.
pub fn substring(input: &str, start: usize, stop: usize, reverse: bool) -> Option<String> {
    if start >= stop || !input.is_ascii() {
        return None;
    }
    let len = input.len();
    if stop > len {
        return None;
    }

    let (start, stop) = if reverse {
        (len - stop, len - start)
    } else {
        (start, stop)
    };
    Some(input[start..stop].to_string())
}

/// `isValidHostLabel(value, allowSubDomains)`
///
/// A label is 1 to 63 characters of ASCII letters, digits and `-`, and must
/// not start with `-`. With `allow_sub_domains`, every `.`-separated label
/// must be valid.
pub fn is_valid_host_label(value: &str, allow_sub_domains: bool) -> bool {
    if allow_sub_domains {
        value.split('.').all(is_valid_label)
    } else {
        is_valid_label(value)
    }
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() < 64
        && !label.starts_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// `uriEncode(value)`: RFC 3986 percent-encoding of everything outside the
/// unreserved set
pub fn uri_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// `split(value, delimiter, limit)`
///
/// `limit` 0 splits on every delimiter, 1 returns the input unsplit, and
/// any other value caps the number of parts. An empty delimiter never
/// splits.
pub fn split(value: &str, delimiter: &str, limit: usize) -> Vec<String> {
    if delimiter.is_empty() {
        return vec![value.to_string()];
    }
    match limit {
        0 => value.split(delimiter).map(str::to_string).collect(),
        n => value.splitn(n, delimiter).map(str::to_string).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_forward_and_reverse() {
        assert_eq!(substring("abcdefg", 0, 4, false).as_deref(), Some("abcd"));
        assert_eq!(substring("abcdefg", 0, 4, true).as_deref(), Some("defg"));
        assert_eq!(substring("abcdefg", 1, 3, true).as_deref(), Some("ef"));
    }

    #[test]
    fn test_substring_rejects_bad_ranges() {
        assert_eq!(substring("abc", 2, 2, false), None);
        assert_eq!(substring("abc", 0, 4, false), None);
        assert_eq!(substring("abc", 3, 1, false), None);
        assert_eq!(substring("\u{1F600}bcdef", 0, 2, false), None);
    }

    #[test]
    fn test_host_labels() {
        assert!(is_valid_host_label("us-east-1", false));
        assert!(is_valid_host_label("a", false));
        assert!(!is_valid_host_label("", false));
        assert!(!is_valid_host_label("-abc", false));
        assert!(!is_valid_host_label("a.b", false));
        assert!(!is_valid_host_label(&"a".repeat(64), false));
        assert!(is_valid_host_label(&"a".repeat(63), false));
    }

    #[test]
    fn test_host_labels_with_sub_domains() {
        assert!(is_valid_host_label("a.b.c", true));
        assert!(!is_valid_host_label("a..c", true));
        assert!(!is_valid_host_label("a.-b", true));
        assert!(!is_valid_host_label("a.b_c", true));
    }

    #[test]
    fn test_uri_encode() {
        assert_eq!(uri_encode("a b/c?d=e"), "a%20b%2Fc%3Fd%3De");
        assert_eq!(uri_encode("abc-._~"), "abc-._~");
    }

    #[test]
    fn test_split_limits() {
        assert_eq!(split("a--b--c", "--", 0), vec!["a", "b", "c"]);
        assert_eq!(split("a--b--c", "--", 1), vec!["a--b--c"]);
        assert_eq!(split("a--b--c", "--", 2), vec!["a", "b--c"]);
        assert_eq!(split("abc", "", 0), vec!["abc"]);
        assert_eq!(split("", "-", 0), vec![""]);
    }
}
