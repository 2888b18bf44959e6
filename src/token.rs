//! Request token generation
//!
//! Every request to the translation endpoint must carry a `tk` query
//! parameter: a two-part signature of the form `"<a>.<b>"` derived from the
//! query text and a fixed secret pair. The endpoint rejects requests whose
//! token does not match, so this module reproduces the web client's hash
//! bit-for-bit, quirks included.
//!
//! The hash works on the UTF-8 bytes of the text (with the web client's own
//! surrogate-pair handling, see [`expand_utf16_units`]) and folds them
//! through a small shift/add/xor micro-program ([`shift_mix`]) in wrapping
//! 32-bit arithmetic.
//!
//! # Example
//!
//! ```
//! use gtranslate::token::generate_token;
//!
//! let token = generate_token("hello");
//! assert_eq!(token, "576358.924801");
//! ```

/// Secret pair used by the public web client, in `"<index>.<key>"` form.
///
/// This value rotates very rarely upstream; it is the pair the signing
/// algorithm was captured against.
pub const SIGNING_SECRET: &str = "448487.932609646";

/// Mixing program applied after each byte is folded in.
const PER_BYTE_PROGRAM: &str = "+-a^+6";

/// Mixing program applied once after the byte loop.
const FINISHER_PROGRAM: &str = "+-3^+b+-f";

/// Expand a text into the byte sequence the hash consumes.
///
/// The sequence is the UTF-8 encoding of the text, one byte per element,
/// widened to `i32` because the hash mixes bytes into a 32-bit accumulator.
pub(crate) fn expand_text(text: &str) -> Vec<i32> {
    let units: Vec<u16> = text.encode_utf16().collect();
    expand_utf16_units(&units)
}

/// UTF-8-encode a sequence of UTF-16 code units, byte by byte.
///
/// This mirrors the web client, which iterates UTF-16 code units and
/// recombines valid surrogate pairs into a single four-byte code point. A
/// high surrogate that is not followed by a low surrogate falls through to
/// the three-byte branch. That is not valid UTF-8, but the upstream hash
/// does the same and the token must match what the endpoint computes, so
/// the behavior is kept. Valid `&str` input never produces lone surrogates;
/// the case only matters for callers handing in raw code units.
pub fn expand_utf16_units(units: &[u16]) -> Vec<i32> {
    let mut bytes = Vec::with_capacity(units.len());
    let mut i = 0;
    while i < units.len() {
        let mut code = i32::from(units[i]);
        if code < 0x80 {
            bytes.push(code);
        } else if code < 0x800 {
            bytes.push((code >> 6) | 0xC0);
            bytes.push((code & 0x3F) | 0x80);
        } else {
            if (code & 0xFC00) == 0xD800
                && i + 1 < units.len()
                && (i32::from(units[i + 1]) & 0xFC00) == 0xDC00
            {
                // Valid surrogate pair: recombine and emit four bytes,
                // consuming both code units.
                code = 0x10000 + ((code & 0x3FF) << 10) + (i32::from(units[i + 1]) & 0x3FF);
                i += 1;
                bytes.push((code >> 18) | 0xF0);
                bytes.push(((code >> 12) & 0x3F) | 0x80);
            } else {
                bytes.push((code >> 12) | 0xE0);
            }
            bytes.push(((code >> 6) & 0x3F) | 0x80);
            bytes.push((code & 0x3F) | 0x80);
        }
        i += 1;
    }
    bytes
}

/// Run the shift/add/xor micro-program over a 32-bit accumulator.
///
/// The program is consumed three bytes at a time: `[op, direction, digit]`.
/// `digit` is a hexadecimal shift amount (`'0'`-`'9'`, `'a'`-`'f'`). A `'+'`
/// direction means a logical (unsigned) right shift, anything else a left
/// shift. A `'+'` op adds the shifted value to the accumulator, anything
/// else XORs it in. All arithmetic wraps as 32-bit.
pub fn shift_mix(num: i32, program: &str) -> i32 {
    let ops = program.as_bytes();
    let mut num = num;
    let mut i = 0;
    while i + 2 < ops.len() {
        let digit = ops[i + 2];
        let shift = if digit >= b'a' {
            u32::from(digit - 87)
        } else {
            u32::from(digit - b'0')
        };
        let shifted = if ops[i + 1] == b'+' {
            ((num as u32) >> shift) as i32
        } else {
            num.wrapping_shl(shift)
        };
        num = if ops[i] == b'+' {
            num.wrapping_add(shifted)
        } else {
            num ^ shifted
        };
        i += 3;
    }
    num
}

/// Parse a `"<index>.<key>"` secret into its integer parts.
///
/// A part that is missing or not an integer resolves to 0 rather than
/// failing; the resulting token will simply be rejected by the endpoint and
/// the failure surfaces at the transport boundary.
fn parse_secret(secret: &str) -> (i32, i32) {
    let mut parts = secret.split('.');
    let index = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let key = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    (index, key)
}

/// Compute the request token for `text` under an explicit secret pair.
///
/// The hash folds each UTF-8 byte of the text into a 32-bit accumulator
/// seeded with the secret's index, applies a finishing mix, XORs the
/// secret's key, remaps non-positive values into the unsigned range, and
/// reduces modulo 1,000,000. The returned token is
/// `"<normalized>.<normalized XOR index>"`.
///
/// Deterministic and pure: identical text and secret always yield the
/// identical token.
pub fn calculate_token(text: &str, secret: &str) -> String {
    let (index, key) = parse_secret(secret);

    let mut acc: i32 = index;
    for byte in expand_text(text) {
        acc = shift_mix(acc.wrapping_add(byte), PER_BYTE_PROGRAM);
    }
    acc = shift_mix(acc, FINISHER_PROGRAM);

    // The remap below can exceed i32::MAX, so widen before XORing the key.
    let mut value = i64::from(acc) ^ i64::from(key);
    if value <= 0 {
        value = (value & 0x7FFF_FFFF) + 0x8000_0000;
    }

    let normalized = value % 1_000_000;
    format!("{}.{}", normalized, normalized ^ i64::from(index))
}

/// Compute the request token for `text` under the process-wide secret.
pub fn generate_token(text: &str) -> String {
    calculate_token(text, SIGNING_SECRET)
}
