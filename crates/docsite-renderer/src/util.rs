//! Shared utility functions for markdown rendering.

use pulldown_cmark::HeadingLevel;

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Byte offsets at which each line of `text` starts.
///
/// The first entry is always `0`, so the 0-based line of an offset is
/// `starts.partition_point(|&s| s <= offset) - 1`.
#[must_use]
pub(crate) fn line_starts(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_to_num() {
        assert_eq!(heading_level_to_num(HeadingLevel::H1), 1);
        assert_eq!(heading_level_to_num(HeadingLevel::H6), 6);
    }

    #[test]
    fn test_line_starts() {
        assert_eq!(line_starts(""), vec![0]);
        assert_eq!(line_starts("a\nbc\n\nd"), vec![0, 2, 5, 6]);
    }

    #[test]
    fn test_line_lookup() {
        let starts = line_starts("a\nbc\n\nd");
        let line_of = |offset: usize| starts.partition_point(|&s| s <= offset) - 1;
        assert_eq!(line_of(0), 0);
        assert_eq!(line_of(3), 1);
        assert_eq!(line_of(6), 3);
    }
}
