//! Input normalizer
//!
//! Turns pasted free-form text into an ordered barcode sequence.

/// Parse raw multi-line text into an ordered list of barcodes.
///
/// Lines are trimmed and blank lines dropped. Duplicates are kept: the
/// caller asked for every line, so every line gets a lookup. An empty
/// result means there is nothing to dispatch, which is not an error.
pub fn parse_bar_codes(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
