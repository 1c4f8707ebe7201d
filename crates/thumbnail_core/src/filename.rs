pub const IMAGE_EXTENSION: &str = "jpg";
pub const ALL_ITEMS_ARCHIVE_STEM: &str = "AllGames";

const MAX_STEM_CHARS: usize = 120;

/// Archive entry name for an item: `{sanitized_name}.jpg`
pub fn image_filename(item_name: &str) -> String {
    format!("{}.{IMAGE_EXTENSION}", sanitize_name(item_name))
}

/// Suggested archive filename: `{category}.zip`, or `AllGames.zip` without a category.
pub fn archive_filename(category: Option<&str>) -> String {
    let stem = category.map_or_else(|| ALL_ITEMS_ARCHIVE_STEM.to_string(), sanitize_name);
    format!("{stem}.zip")
}

/// Single path segment safe on every common filesystem.
///
/// Whitespace and path separators become `_`, colons are dropped, runs of `_` collapse.
pub fn sanitize_name(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .filter(|&c| c != ':')
        .map(|c| {
            if c.is_whitespace() || is_forbidden(c) {
                '_'
            } else {
                c
            }
        })
        .collect();

    // Collapse multiple underscores
    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_underscore = false;
    for c in cleaned.chars() {
        if c == '_' {
            if !prev_underscore {
                compacted.push(c);
            }
            prev_underscore = true;
        } else {
            compacted.push(c);
            prev_underscore = false;
        }
    }

    // Cut before the trailing trim so a separator at the cut never ends the stem.
    let truncated: String = compacted
        .trim_start_matches(&['_', '.'][..])
        .chars()
        .take(MAX_STEM_CHARS)
        .collect();
    let trimmed = truncated.trim_end_matches(&['_', '.'][..]);
    let mut final_name = if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    };
    if is_reserved_windows_name(&final_name) {
        final_name.push('_');
    }
    final_name
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}
