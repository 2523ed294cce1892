//! Worker argument normalization
//!
//! Arguments reach the worker from dialogs, the command line and the bridge,
//! which do not agree on separators. Anything that looks like a path is
//! rewritten into the host's canonical form before it is passed on.

use super::Platform;

/// A string looks like a path when it contains either separator.
pub fn looks_like_path(arg: &str) -> bool {
    arg.contains('/') || arg.contains('\\')
}

/// Normalize every path-looking argument for the given platform.
pub fn normalize_args<S: AsRef<str>>(args: &[S], platform: Platform) -> Vec<String> {
    args.iter()
        .map(|arg| normalize_arg(arg.as_ref(), platform))
        .collect()
}

/// Normalize a single argument.
///
/// Separators are unified, empty and `.` segments dropped and `..` folded
/// into its parent where one exists. A leading root, a Windows drive or UNC
/// prefix and a trailing separator are preserved. Non-path strings are returned
/// unchanged, and the result is stable under a second pass.
pub fn normalize_arg(arg: &str, platform: Platform) -> String {
    if !looks_like_path(arg) {
        return arg.to_string();
    }

    let sep = platform.separator();
    let unified: String = arg
        .chars()
        .map(|c| if c == '/' || c == '\\' { sep } else { c })
        .collect();

    let (prefix, rest) = split_prefix(&unified, platform);
    // A UNC share is always rooted
    let absolute = rest.starts_with(sep) || prefix.starts_with(sep);
    let trailing = rest.len() > 1 && rest.ends_with(sep);

    let mut parts: Vec<&str> = Vec::new();
    for segment in rest.split(sep) {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !absolute {
                    // `..` cannot climb above the root
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let mut out = String::from(prefix);
    if absolute {
        out.push(sep);
    }
    out.push_str(&parts.join(&sep.to_string()));

    if parts.is_empty() && !absolute {
        out.push('.');
    } else if trailing && !parts.is_empty() {
        out.push(sep);
    }

    out
}

/// Split a `C:` drive or `\\host\share` prefix off a Windows path.
fn split_prefix(path: &str, platform: Platform) -> (&str, &str) {
    if platform != Platform::Windows {
        return ("", path);
    }
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        return path.split_at(2);
    }
    match unc_prefix_len(path) {
        Some(len) => path.split_at(len),
        None => ("", path),
    }
}

/// Length of a `\\host\share` prefix; host and share must be non-empty.
fn unc_prefix_len(path: &str) -> Option<usize> {
    let body = path.strip_prefix("\\\\")?;
    let host = body.find('\\').filter(|&end| end > 0)?;
    let after_host = &body[host + 1..];
    let share = after_host.find('\\').unwrap_or(after_host.len());
    (share > 0).then_some(2 + host + 1 + share)
}
