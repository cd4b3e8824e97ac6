//! Property name policies.

use std::io;
use std::sync::Arc;

use crate::encode::escape;
use crate::options::FieldNames;

/// Writes a property name, without the following `:`.
pub trait FieldNamePolicy: Send + Sync {
    fn write_name(&self, out: &mut dyn io::Write, name: &str) -> io::Result<()>;
}

/// Every name quoted and escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuotedNames;

impl FieldNamePolicy for QuotedNames {
    fn write_name(&self, out: &mut dyn io::Write, name: &str) -> io::Result<()> {
        escape::write_quoted(out, name)
    }
}

/// JavaScript-style bare names. The output is not strict JSON.
///
/// A name is still quoted when it is empty, a reserved word, or not an
/// identifier (`[A-Za-z_$][A-Za-z0-9_$]*`).
#[derive(Debug, Clone, Copy, Default)]
pub struct BareNames;

const RESERVED: &[&str] = &[
    "abstract", "arguments", "await", "boolean", "break", "byte", "case", "catch", "char",
    "class", "const", "continue", "debugger", "default", "delete", "do", "double", "else",
    "enum", "eval", "export", "extends", "false", "final", "finally", "float", "for",
    "function", "goto", "if", "implements", "import", "in", "instanceof", "int", "interface",
    "let", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "typeof", "undefined", "var", "void", "volatile", "while",
    "with", "yield",
];

pub(crate) fn name_needs_quotes(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return true,
    }
    if chars.any(|c| !c.is_ascii_alphanumeric() && c != '_' && c != '$') {
        return true;
    }
    RESERVED.contains(&name)
}

impl FieldNamePolicy for BareNames {
    fn write_name(&self, out: &mut dyn io::Write, name: &str) -> io::Result<()> {
        if name_needs_quotes(name) {
            escape::write_quoted(out, name)
        } else {
            out.write_all(name.as_bytes())
        }
    }
}

impl FieldNames {
    pub(crate) fn policy(self) -> Arc<dyn FieldNamePolicy> {
        match self {
            FieldNames::Quoted => Arc::new(QuotedNames),
            FieldNames::Bare => Arc::new(BareNames),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(name: &str) -> String {
        let mut out = Vec::new();
        BareNames.write_name(&mut out, name).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn identifiers_stay_bare() {
        assert_eq!(bare("name"), "name");
        assert_eq!(bare("_private"), "_private");
        assert_eq!(bare("$ref"), "$ref");
        assert_eq!(bare("a1"), "a1");
    }

    #[test]
    fn everything_else_is_quoted() {
        assert_eq!(bare(""), r#""""#);
        assert_eq!(bare("class"), r#""class""#);
        assert_eq!(bare("null"), r#""null""#);
        assert_eq!(bare("1st"), r#""1st""#);
        assert_eq!(bare("has space"), r#""has space""#);
        assert_eq!(bare("a-b"), r#""a-b""#);
        assert_eq!(bare("é"), r#""é""#);
    }

    #[test]
    fn quoted_escapes() {
        let mut out = Vec::new();
        QuotedNames.write_name(&mut out, "say \"hi\"").unwrap();
        assert_eq!(out, br#""say \"hi\"""#);
    }
}
