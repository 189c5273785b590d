//! Diagnostic message table.

use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const IDENTIFIER_EXPECTED: u32 = 1003;
    pub const EXPECTED: u32 = 1005;
    pub const ASTERISK_SLASH_EXPECTED: u32 = 1010;
    pub const ACCESSIBILITY_MODIFIER_ALREADY_SEEN: u32 = 1028;
    pub const MODIFIER_ALREADY_SEEN: u32 = 1030;
    pub const MODIFIER_CANNOT_BE_USED_WITH_MODIFIER: u32 = 1243;
    pub const DECORATORS_ARE_NOT_VALID_HERE: u32 = 1206;
    pub const TYPE_EXPECTED: u32 = 1110;
    pub const EXPRESSION_EXPECTED: u32 = 1109;
    pub const INVALID_CHARACTER: u32 = 1127;
    pub const DECLARATION_OR_STATEMENT_EXPECTED: u32 = 1128;
    pub const PROPERTY_ASSIGNMENT_EXPECTED: u32 = 1136;
    pub const UNTERMINATED_TEMPLATE_LITERAL: u32 = 1160;
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: u32 = 1161;
    pub const NESTING_TOO_DEEP: u32 = 2321;
    pub const DUPLICATE_IDENTIFIER: u32 = 2300;
    pub const DUPLICATE_INDEX_SIGNATURE: u32 = 2374;
    pub const CONSTRUCTOR_IMPLEMENTATION_IS_MISSING: u32 = 2390;
    pub const FUNCTION_IMPLEMENTATION_IS_MISSING: u32 = 2391;
    pub const MULTIPLE_CONSTRUCTOR_IMPLEMENTATIONS: u32 = 2392;
    pub const DUPLICATE_FUNCTION_IMPLEMENTATION: u32 = 2393;
    pub const OVERLOAD_SIGNATURE_NOT_COMPATIBLE: u32 = 2394;
    pub const PARAMETER_PROPERTY_ONLY_IN_CONSTRUCTOR_IMPLEMENTATION: u32 = 2369;
}

pub mod diagnostic_messages {
    pub const UNTERMINATED_STRING_LITERAL: &str = "Unterminated string literal.";
    pub const IDENTIFIER_EXPECTED: &str = "Identifier expected.";
    pub const EXPECTED: &str = "'{0}' expected.";
    pub const ASTERISK_SLASH_EXPECTED: &str = "'*/' expected.";
    pub const ACCESSIBILITY_MODIFIER_ALREADY_SEEN: &str = "Accessibility modifier already seen.";
    pub const MODIFIER_ALREADY_SEEN: &str = "'{0}' modifier already seen.";
    pub const MODIFIER_CANNOT_BE_USED_WITH_MODIFIER: &str =
        "'{0}' modifier cannot be used with '{1}' modifier.";
    pub const DECORATORS_ARE_NOT_VALID_HERE: &str = "Decorators are not valid here.";
    pub const TYPE_EXPECTED: &str = "Type expected.";
    pub const EXPRESSION_EXPECTED: &str = "Expression expected.";
    pub const INVALID_CHARACTER: &str = "Invalid character.";
    pub const DECLARATION_OR_STATEMENT_EXPECTED: &str = "Declaration or statement expected.";
    pub const PROPERTY_ASSIGNMENT_EXPECTED: &str = "Property assignment expected.";
    pub const UNTERMINATED_TEMPLATE_LITERAL: &str = "Unterminated template literal.";
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: &str =
        "Unterminated regular expression literal.";
    pub const NESTING_TOO_DEEP: &str = "Nesting is too deep to extract.";
    pub const DUPLICATE_IDENTIFIER: &str = "Duplicate identifier '{0}'.";
    pub const DUPLICATE_INDEX_SIGNATURE: &str = "Duplicate index signature for type '{0}'.";
    pub const CONSTRUCTOR_IMPLEMENTATION_IS_MISSING: &str = "Constructor implementation is missing.";
    pub const FUNCTION_IMPLEMENTATION_IS_MISSING: &str =
        "Function implementation is missing or not immediately following the declaration.";
    pub const MULTIPLE_CONSTRUCTOR_IMPLEMENTATIONS: &str =
        "Multiple constructor implementations are not allowed.";
    pub const DUPLICATE_FUNCTION_IMPLEMENTATION: &str = "Duplicate function implementation.";
    pub const OVERLOAD_SIGNATURE_NOT_COMPATIBLE: &str =
        "This overload signature is not compatible with its implementation signature.";
    pub const PARAMETER_PROPERTY_ONLY_IN_CONSTRUCTOR_IMPLEMENTATION: &str =
        "A parameter property is only allowed in a constructor implementation.";
}

macro_rules! message {
    ($name:ident) => {
        DiagnosticMessage {
            code: diagnostic_codes::$name,
            category: DiagnosticCategory::Error,
            message: diagnostic_messages::$name,
        }
    };
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    message!(UNTERMINATED_STRING_LITERAL),
    message!(IDENTIFIER_EXPECTED),
    message!(EXPECTED),
    message!(ASTERISK_SLASH_EXPECTED),
    message!(ACCESSIBILITY_MODIFIER_ALREADY_SEEN),
    message!(MODIFIER_ALREADY_SEEN),
    message!(MODIFIER_CANNOT_BE_USED_WITH_MODIFIER),
    message!(DECORATORS_ARE_NOT_VALID_HERE),
    message!(TYPE_EXPECTED),
    message!(EXPRESSION_EXPECTED),
    message!(INVALID_CHARACTER),
    message!(DECLARATION_OR_STATEMENT_EXPECTED),
    message!(PROPERTY_ASSIGNMENT_EXPECTED),
    message!(UNTERMINATED_TEMPLATE_LITERAL),
    message!(UNTERMINATED_REGULAR_EXPRESSION_LITERAL),
    message!(NESTING_TOO_DEEP),
    message!(DUPLICATE_IDENTIFIER),
    message!(DUPLICATE_INDEX_SIGNATURE),
    message!(CONSTRUCTOR_IMPLEMENTATION_IS_MISSING),
    message!(FUNCTION_IMPLEMENTATION_IS_MISSING),
    message!(MULTIPLE_CONSTRUCTOR_IMPLEMENTATIONS),
    message!(DUPLICATE_FUNCTION_IMPLEMENTATION),
    message!(OVERLOAD_SIGNATURE_NOT_COMPATIBLE),
    message!(PARAMETER_PROPERTY_ONLY_IN_CONSTRUCTOR_IMPLEMENTATION),
];
