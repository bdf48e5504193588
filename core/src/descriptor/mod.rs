//! Parsing of per-frame location descriptors.
//!
//! The stack walker describes each managed frame with a loosely structured
//! line such as:
//!
//! ```text
//! Visiting method 'void com.example.Foo.bar(int)' at dex PC 0x001a
//! ```
//!
//! The method signature sits between the first pair of single quotes; the
//! text after the second quote (the details blob) carries the dex pc. A
//! descriptor either decomposes into a [`MethodLocation`], or names a frame
//! the trace intentionally leaves out ([`ParsedLocation::Skip`]).

mod details;
mod signature;

pub use details::DEX_PC_PREFIX_LEN;

use crate::errors::ParseError;

/// Descriptor the walker emits for a transition out of managed code.
const UPCALL: &str = "upcall";

/// Why a frame was left out of the trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Transition frame into the host runtime; nothing above it is managed.
    Upcall,
    /// Compiler-generated method such as a class initializer.
    SyntheticMethod,
}

/// Outcome of parsing one location descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLocation {
    Skip(SkipReason),
    Frame(MethodLocation),
}

/// Structured fields of one managed frame's descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodLocation {
    pub return_type: String,
    pub class_name: String,
    pub method_name: String,
    pub arg_types: String,
    pub raw_dex_pc: u32,
}

impl MethodLocation {
    /// `"<returnType> <className>.<methodName>(<argTypes>)"`.
    pub fn full_signature(&self) -> String {
        format!(
            "{} {}.{}({})",
            self.return_type, self.class_name, self.method_name, self.arg_types
        )
    }
}

/// Parse one walker-produced location descriptor.
///
/// Skip outcomes are not errors; `Err` means the descriptor does not match
/// the walker's known shape and the frame cannot be described.
pub fn parse_location(descriptor: &str) -> Result<ParsedLocation, ParseError> {
    if descriptor == UPCALL {
        return Ok(ParsedLocation::Skip(SkipReason::Upcall));
    }

    let Some(open_quote) = descriptor.find('\'') else {
        return Err(ParseError::new(
            "expected a quoted method signature",
            descriptor,
            0,
            descriptor.len(),
        ));
    };
    let sig_start = open_quote + 1;
    let Some(sig_len) = descriptor[sig_start..].find('\'') else {
        return Err(ParseError::new(
            "unterminated method signature quote",
            descriptor,
            open_quote,
            descriptor.len() - open_quote,
        ));
    };
    let raw_signature = &descriptor[sig_start..sig_start + sig_len];

    if raw_signature.starts_with('<') {
        return Ok(ParsedLocation::Skip(SkipReason::SyntheticMethod));
    }

    // The details blob runs from the closing quote to the next quote, if
    // any, matching the walker's three-segment convention.
    let details_start = sig_start + sig_len + 1;
    let details_end = descriptor[details_start..]
        .find('\'')
        .map_or(descriptor.len(), |i| details_start + i);
    let details = &descriptor[details_start..details_end];

    let parts = signature::split_signature(raw_signature, descriptor, sig_start)?;
    let raw_dex_pc = details::parse_dex_pc(details, descriptor, details_start)?;

    Ok(ParsedLocation::Frame(MethodLocation {
        return_type: parts.return_type,
        class_name: parts.class_name,
        method_name: parts.method_name,
        arg_types: parts.arg_types,
        raw_dex_pc,
    }))
}
