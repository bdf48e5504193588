use crate::errors::ParseError;

/// Decomposed raw method signature, before the dex pc is attached.
pub(crate) struct SignatureParts {
    pub return_type: String,
    pub class_name: String,
    pub method_name: String,
    pub arg_types: String,
}

/// Split `"<returnType> <class>.<method>(<argTypes>)"` into its parts.
///
/// `base` is the byte offset of `raw` inside `descriptor`, so error labels
/// point into the original descriptor.
pub(crate) fn split_signature(
    raw: &str,
    descriptor: &str,
    base: usize,
) -> Result<SignatureParts, ParseError> {
    // Return-type tokens never contain spaces in the runtime's textual
    // convention, so the first space is the separator.
    let Some(space) = raw.find(' ') else {
        return Err(ParseError::new(
            "method signature has no return type separator",
            descriptor,
            base,
            raw.len(),
        ));
    };
    let return_type = &raw[..space];
    let rest = &raw[space + 1..];
    let rest_base = base + space + 1;

    let Some(args_open) = rest.find('(') else {
        return Err(ParseError::new(
            "method signature has no argument list",
            descriptor,
            rest_base,
            rest.len(),
        ));
    };
    let args_base = rest_base + args_open + 1;
    let Some(args_len) = rest[args_open + 1..].find(')') else {
        return Err(ParseError::new(
            "unterminated argument list",
            descriptor,
            args_base,
            rest.len() - args_open - 1,
        ));
    };
    let arg_types = &rest[args_open + 1..args_open + 1 + args_len];

    // Last-dot split keeps nested class names (Outer$Inner) on the class
    // side.
    let class_and_method = &rest[..args_open];
    let Some(dot) = class_and_method.rfind('.') else {
        return Err(ParseError::new(
            "method reference has no declaring class",
            descriptor,
            rest_base,
            class_and_method.len(),
        ));
    };

    Ok(SignatureParts {
        return_type: return_type.to_string(),
        class_name: class_and_method[..dot].to_string(),
        method_name: class_and_method[dot + 1..].to_string(),
        arg_types: arg_types.to_string(),
    })
}
