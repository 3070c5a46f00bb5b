//! Local file naming for downloaded addons.

use std::path::{Component, Path};

/// Extension used when the catalog reports no usable file name.
const FALLBACK_EXTENSION: &str = "addon";

/// Derives the local file name for an addon.
///
/// Uses the final segment of the catalog-reported path (either separator
/// style), sanitized for the local filesystem. Falls back to `<id>.addon`
/// when that segment is empty or is a `.`/`..` path component.
#[must_use]
pub fn local_file_name(id: u64, remote_path: &str) -> String {
    let last = remote_path
        .rsplit(['/', '\\'])
        .next()
        .map_or("", str::trim);

    if last.is_empty() || !is_safe_filename_segment(last) {
        return format!("{id}.{FALLBACK_EXTENSION}");
    }

    sanitize_filename(last)
}

/// Sanitizes a file name for filesystem safety.
///
/// Replaces characters that are invalid on common filesystems:
/// / \ : * ? " < > |
pub(crate) fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

fn is_safe_filename_segment(name: &str) -> bool {
    !Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

/// Formats a byte count for log output, e.g. `1.50MB`.
///
/// Units step at 1024 and a unit is only used once the size is strictly
/// larger than it.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    let (value, unit) = if size > GB {
        (size as f64 / GB as f64, "GB")
    } else if size > MB {
        (size as f64 / MB as f64, "MB")
    } else if size > KB {
        (size as f64 / KB as f64, "kB")
    } else {
        (size as f64, "B")
    };

    format!("{value:.2}{unit}")
}
