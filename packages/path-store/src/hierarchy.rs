//! Parent/child and mirror relationships derived from path strings alone.
//!
//! These are pure functions over `&str`; nothing here looks at the store.

/// Separator between path segments.
pub const SEPARATOR: char = '/';

/// The root directory's path.
pub const ROOT: &str = "/";

/// If `candidate` is a direct child of `parent`, return the child's name.
///
/// The test is purely textual: `parent` must be a literal prefix of
/// `candidate`, one `/` following that prefix is skipped, and what remains
/// must be non-empty and contain no further `/`. Because the prefix check is
/// character based, `/ab` is reported as child `b` of `/a`; listings have
/// always behaved this way.
///
/// ```rust
/// use pksfs_path_store::hierarchy::is_direct_child;
///
/// assert_eq!(is_direct_child("/", "/a"), Some("a"));
/// assert_eq!(is_direct_child("/a", "/a/b"), Some("b"));
/// assert_eq!(is_direct_child("/a", "/a/b/c"), None);
/// assert_eq!(is_direct_child("/a", "/x/b"), None);
/// ```
pub fn is_direct_child<'a>(parent: &str, candidate: &'a str) -> Option<&'a str> {
    let rest = candidate.strip_prefix(parent)?;
    let name = rest.strip_prefix(SEPARATOR).unwrap_or(rest);
    if name.is_empty() || name.contains(SEPARATOR) {
        return None;
    }
    Some(name)
}

/// Swap the first two segments of a three-segment path.
///
/// `/seg1/seg2/seg3` maps to `/seg2/seg1/seg3`. Any other segment count, or a
/// path that does not start at the root, has no mirror. Segments are not
/// otherwise inspected, so empty segments are carried over as they are.
///
/// ```rust
/// use pksfs_path_store::hierarchy::mirror_path;
///
/// assert_eq!(mirror_path("/x/y/f").as_deref(), Some("/y/x/f"));
/// assert_eq!(mirror_path("/a/b/c/d"), None);
/// assert_eq!(mirror_path("/a/b"), None);
/// ```
pub fn mirror_path(path: &str) -> Option<String> {
    let rest = path.strip_prefix(SEPARATOR)?;
    let mut segments = rest.split(SEPARATOR);
    let (first, second, third) = (segments.next()?, segments.next()?, segments.next()?);
    if segments.next().is_some() {
        return None;
    }
    Some(format!("/{second}/{first}/{third}"))
}
