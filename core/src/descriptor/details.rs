use crate::errors::ParseError;

/// Width of the constant text the walker prints before the hexadecimal dex
/// pc value (`" at dex PC 0x"`). Versioned format constant: it holds for
/// the walker's current textual convention and is guarded below rather
/// than assumed.
pub const DEX_PC_PREFIX_LEN: usize = 13;

/// Extract the dex pc from the details blob.
///
/// The value is the run of hex digits directly after the fixed prefix; the
/// blob usually continues with more text (native pc, frame size) which is
/// ignored. `base` is the byte offset of `details` inside `descriptor`.
pub(crate) fn parse_dex_pc(
    details: &str,
    descriptor: &str,
    base: usize,
) -> Result<u32, ParseError> {
    let Some(value) = details.get(DEX_PC_PREFIX_LEN..) else {
        return Err(ParseError::new(
            "details blob too short to carry a dex pc",
            descriptor,
            base,
            details.len(),
        ));
    };

    let digits = value.bytes().take_while(u8::is_ascii_hexdigit).count();
    if digits == 0 {
        return Err(ParseError::new(
            "no hexadecimal dex pc after the details prefix",
            descriptor,
            base + DEX_PC_PREFIX_LEN,
            value.len(),
        ));
    }

    u32::from_str_radix(&value[..digits], 16).map_err(|_| {
        ParseError::new(
            "dex pc does not fit in 32 bits",
            descriptor,
            base + DEX_PC_PREFIX_LEN,
            digits,
        )
    })
}
