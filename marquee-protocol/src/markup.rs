//! Inline markup for frame text.
//!
//! Frame text may contain short tags in braces, e.g. `"{r}ALERT {f}NOW{/f}"`.
//! Each recognized tag expands to a two-byte control sequence; anything else
//! (including unknown tags) is copied to the output untouched.
//!
//! | Tag | Meaning |
//! |-----|---------|
//! | `0`..`4` | font select |
//! | `b` `r` `g` `a` `y` `m1`..`m4` | color |
//! | `f` `/f` | flash on / off |
//! | `y2` `y4` `mo` `ma` `dd` `dw` | date fields |
//! | `h` `mi` `s` `24` `12` | time fields |
//!
//! Only the first two characters of a trimmed, lower-cased tag take part in
//! the lookup, so `{Y}` and `{y2k}` resolve to `y` and `y2` respectively.

use crate::tables::{markup_tag, FONT_DIGITS, FONT_SELECT};
use bytes::{BufMut, BytesMut};

/// Byte substituted for characters the sign cannot display.
pub const UNMAPPABLE: u8 = b'?';

/// Number of leading tag characters used as the lookup key.
const TAG_KEY_LEN: usize = 2;

/// Encodes markup text into sign bytes.
pub struct MarkupCodec;

impl MarkupCodec {
    /// Rewrites every recognized `{tag}` in `text` into its control bytes.
    pub fn encode(text: &str) -> BytesMut {
        let mut out = BytesMut::with_capacity(text.len());
        let mut rest = text;

        while let Some(open) = rest.find('{') {
            put_literal(&mut out, &rest[..open]);
            let after = &rest[open + 1..];

            match after.find(|c: char| c == '{' || c == '}') {
                Some(close) if after.as_bytes()[close] == b'}' => {
                    let tag = &after[..close];
                    match Self::resolve(tag) {
                        Some(control) => out.put_slice(&control),
                        None => {
                            out.put_u8(b'{');
                            put_literal(&mut out, tag);
                            out.put_u8(b'}');
                        }
                    }
                    rest = &after[close + 1..];
                }
                Some(next_open) => {
                    // Another '{' before any '}': this one is literal text
                    out.put_u8(b'{');
                    put_literal(&mut out, &after[..next_open]);
                    rest = &after[next_open..];
                }
                None => {
                    out.put_u8(b'{');
                    rest = after;
                    break;
                }
            }
        }

        put_literal(&mut out, rest);
        out
    }

    /// Resolves the contents of one `{...}` span, if it names a known tag.
    pub fn resolve(tag: &str) -> Option<[u8; 2]> {
        let key: String = tag
            .trim()
            .chars()
            .take(TAG_KEY_LEN)
            .flat_map(char::to_lowercase)
            .collect();

        if let [digit] = key.as_bytes() {
            if FONT_DIGITS.contains(digit) {
                return Some([FONT_SELECT, *digit]);
            }
        }
        markup_tag(&key)
    }
}

/// Appends literal text as single bytes (Latin-1).
fn put_literal(out: &mut BytesMut, text: &str) {
    for ch in text.chars() {
        out.put_u8(u8::try_from(u32::from(ch)).unwrap_or(UNMAPPABLE));
    }
}
