//! JSON Pointer style paths (RFC 6901) used in errors and diagnostics.
//!
//! The root is the empty string; `/cast/0/name` is the `name` field of the
//! first element of `cast`.

/// Append a segment to a path, escaping `~` and `/`.
#[must_use]
pub fn join(parent: &str, segment: &str) -> String {
    let escaped = segment.replace('~', "~0").replace('/', "~1");
    format!("{}/{}", parent, escaped)
}

/// Append an array index to a path.
#[must_use]
pub fn join_index(parent: &str, index: usize) -> String {
    format!("{}/{}", parent, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join() {
        assert_eq!(join("", "cast"), "/cast");
        assert_eq!(join_index("/cast", 0), "/cast/0");
        assert_eq!(join("/cast/0", "name"), "/cast/0/name");
    }

    #[test]
    fn test_join_escapes() {
        assert_eq!(join("", "a/b"), "/a~1b");
        assert_eq!(join("", "m~n"), "/m~0n");
    }
}
