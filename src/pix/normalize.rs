use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalizes free text (merchant name, city) into the restricted alphabet
/// accepted by payment apps: uppercase ASCII letters, digits and single spaces,
/// cut to at most `max_len` characters. A space left at the end by the cut is
/// dropped, so the result can be one character shorter than `max_len`.
pub fn normalize(input: &str, max_len: usize) -> String {
    let filtered: String = input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();

    let collapsed = filtered.split_whitespace().collect::<Vec<_>>().join(" ");

    // Only ASCII is left, so byte and char offsets agree.
    let mut out = collapsed.to_ascii_uppercase();
    out.truncate(max_len);
    // A cut can land right after a space.
    out.truncate(out.trim_end().len());
    out
}
