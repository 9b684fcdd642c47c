use std::path::Path;

const PATH_UNSAFE: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];
const REPLACEMENT: char = '_';

/// Replace characters that cannot appear in a path segment.
pub fn sanitize_username(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if PATH_UNSAFE.contains(&c) || c.is_control() {
                REPLACEMENT
            } else {
                c
            }
        })
        .collect()
}

/// Derive a username from the leaf folder of a profile path.
///
/// Handles both separator styles so registry paths read on any host resolve
/// the same way.
pub fn username_from_profile_path(path: &Path) -> Option<String> {
    let raw = path.to_string_lossy();
    raw.trim_end_matches(['\\', '/'])
        .rsplit(['\\', '/'])
        .next()
        .filter(|leaf| !leaf.is_empty() && !leaf.ends_with(':'))
        .map(str::to_string)
}
