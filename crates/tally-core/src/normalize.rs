//! Line cleanup ahead of range classification.

/// Dash characters people paste in place of an ASCII hyphen.
const DASH_VARIANTS: [char; 2] = ['\u{2013}', '\u{2014}'];

/// A trimmed input line with its negation marker split off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLine {
    /// The line started with a `-` and subtracts its duration from the total.
    pub negative: bool,
    /// Remaining text with en/em dashes replaced by `-`.
    pub text: String,
}

/// Cleans one raw line.
///
/// Returns `None` for blank lines, which contribute nothing.
pub fn normalize(raw: &str) -> Option<NormalizedLine> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let unified = trimmed.replace(DASH_VARIANTS, "-");
    let line = match unified.strip_prefix('-') {
        Some(rest) => NormalizedLine {
            negative: true,
            text: rest.trim_start().to_string(),
        },
        None => NormalizedLine {
            negative: false,
            text: unified,
        },
    };
    Some(line)
}
