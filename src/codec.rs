//! Order-code formatting and parsing
//!
//! An order code is a flat sequence of 2-character color codes written as
//! groups of four joined by `_`, with groups separated by `/`:
//!
//! ```text
//! RD_RD_RD_RD/RD_RD_RD_RD/GY_GY_GY_GY/GY_GY_GY_GY
//! ```
//!
//! Delimiters are cosmetic. [`parse`] strips them and re-chunks the remaining
//! characters every two characters, so `RDRD/RDRD` and `RD_RD_RD_RD` decode to
//! the same tokens. [`format`] re-normalizes delimiter placement.

/// Width of a single color code in characters.
pub const CODE_WIDTH: usize = 2;

/// Number of codes in one `_`-joined group.
pub const GROUP_SIZE: usize = 4;

/// Separator between codes inside a group.
pub const CODE_SEPARATOR: char = '_';

/// Separator between groups.
pub const GROUP_SEPARATOR: char = '/';

/// A warning generated while decoding an order code
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub message: String,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Decoded tokens plus anything worth telling the user about the input.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    pub codes: Vec<String>,
    pub warnings: Vec<Warning>,
}

/// Concatenate codes into the raw string consumed by [`format`].
pub fn join<S: AsRef<str>>(codes: &[S]) -> String {
    codes.iter().map(AsRef::as_ref).collect()
}

/// Format a concatenated code string into its canonical delimited form.
///
/// The input is consumed two characters at a time. Codes inside a group of
/// four are joined with `_`, complete groups are separated by `/`, and no
/// trailing delimiter is ever left. Malformed lengths never fail: an odd final
/// character becomes its own (short) token and a partial final group simply
/// has no closing `/`.
///
/// # Examples
///
/// ```
/// use colorgrid::codec::format;
///
/// assert_eq!(format("RDRDRDRDOROROROR"), "RD_RD_RD_RD/OR_OR_OR_OR");
/// assert_eq!(format("RDRDRDRDOR"), "RD_RD_RD_RD/OR");
/// assert_eq!(format(""), "");
/// ```
pub fn format(concatenated: &str) -> String {
    let chars: Vec<char> = concatenated.chars().collect();
    let group_width = CODE_WIDTH * GROUP_SIZE;
    let mut out = String::with_capacity(chars.len() + chars.len() / CODE_WIDTH);

    for (i, chunk) in chars.chunks(CODE_WIDTH).enumerate() {
        if i > 0 {
            let consumed = i * CODE_WIDTH;
            if consumed % group_width == 0 {
                out.push(GROUP_SEPARATOR);
            } else {
                out.push(CODE_SEPARATOR);
            }
        }
        out.extend(chunk);
    }

    out
}

/// Format a sequence of codes; shorthand for `format(&join(codes))`.
pub fn format_codes<S: AsRef<str>>(codes: &[S]) -> String {
    format(&join(codes))
}

/// Decode delimited text into 2-character color codes.
///
/// All `_` and `/` characters are removed, then the remainder is cut into
/// 2-character tokens. A dangling final character is dropped. Never fails;
/// empty or delimiter-only input yields an empty sequence.
///
/// # Examples
///
/// ```
/// use colorgrid::codec::parse;
///
/// assert_eq!(parse("RD_RD/OR_OR"), vec!["RD", "RD", "OR", "OR"]);
/// assert_eq!(parse("RDRDO"), vec!["RD", "RD"]);
/// assert!(parse("__//").is_empty());
/// ```
pub fn parse(text: &str) -> Vec<String> {
    parse_lenient(text).codes
}

/// Decode like [`parse`], also reporting dropped characters and non-canonical
/// delimiter placement.
pub fn parse_lenient(text: &str) -> ParseResult {
    let stripped: Vec<char> = text
        .chars()
        .filter(|&c| c != CODE_SEPARATOR && c != GROUP_SEPARATOR)
        .collect();

    let mut codes = Vec::with_capacity(stripped.len() / CODE_WIDTH);
    let mut warnings = Vec::new();

    for chunk in stripped.chunks(CODE_WIDTH) {
        if chunk.len() == CODE_WIDTH {
            codes.push(chunk.iter().collect());
        } else {
            let dangling: String = chunk.iter().collect();
            warnings.push(Warning::new(format!(
                "Dangling character '{}' at end of code was ignored",
                dangling
            )));
        }
    }

    if !codes.is_empty() && format_codes(&codes) != text {
        warnings.push(Warning::new(format!(
            "Code is not in canonical form (expected '{}')",
            format_codes(&codes)
        )));
    }

    ParseResult { codes, warnings }
}

/// Whether `text` is already exactly what [`format`] would produce for it.
pub fn is_canonical(text: &str) -> bool {
    format_codes(&parse(text)) == text
}
