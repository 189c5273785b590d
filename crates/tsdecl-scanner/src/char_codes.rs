//! Character classification for identifiers, whitespace and line breaks.

#[inline]
#[must_use]
pub fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[inline]
#[must_use]
pub fn is_white_space_single_line(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t' | '\u{000B}' | '\u{000C}' | '\u{00A0}' | '\u{FEFF}' | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}' | '\u{205F}' | '\u{3000}'
    )
}

#[inline]
#[must_use]
pub fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '$' || ch == '_' || (!ch.is_ascii() && ch.is_alphabetic())
}

#[inline]
#[must_use]
pub fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch)
        || ch.is_ascii_digit()
        || (!ch.is_ascii() && ch.is_alphanumeric())
        || ch == '\u{200C}'
        || ch == '\u{200D}'
}

#[inline]
#[must_use]
pub const fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

#[inline]
#[must_use]
pub const fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}
