//! Short code generation and shape checks.
//!
//! Codes are drawn from the operating system CSPRNG, one character at a time,
//! uniformly over a 62-character alphanumeric alphabet. They are never derived
//! from the URL, so shortening the same URL twice yields two independent codes.

/// Characters a generated code is drawn from.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Code length used when none is configured.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Longest code the resolver will look up.
pub const MAX_CODE_LENGTH: usize = 32;

/// Fixed route segments a generated code must never shadow.
///
/// Matching is exact: routing is case-sensitive, so `Health` stays usable.
pub const RESERVED_CODES: &[&str] = &["health", "metrics", "shorten", "static"];

/// Random bytes at or above this value are discarded so `byte % 62` stays uniform.
const ACCEPT_BELOW: u8 = (u8::MAX / ALPHABET.len() as u8) * ALPHABET.len() as u8;

/// Generates a random alphanumeric code of exactly `length` characters.
///
/// # Errors
///
/// Returns the entropy source error if the system RNG cannot be read. Callers
/// treat this as fatal for the request.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6)?;
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> Result<String, getrandom::Error> {
    let mut code = String::with_capacity(length);
    let mut buffer = [0u8; 64];

    while code.len() < length {
        getrandom::fill(&mut buffer)?;

        for &byte in buffer.iter().filter(|&&b| b < ACCEPT_BELOW) {
            code.push(ALPHABET[usize::from(byte) % ALPHABET.len()] as char);
            if code.len() == length {
                break;
            }
        }
    }

    Ok(code)
}

/// Returns true if `code` could have been issued by [`generate_code`].
///
/// Used to reject empty or malformed codes before touching storage.
pub fn is_well_formed_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LENGTH
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Returns true if `code` equals a fixed route segment.
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}
