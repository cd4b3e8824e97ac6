/// Output strategy used by writers created from a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriterVariant {
    /// Validated, no insignificant whitespace.
    #[default]
    Compact,
    /// Validated, one element per line with cached indentation.
    Pretty,
    /// Unchecked: tracks only depth and whether a sibling was written.
    Fast,
}

/// How property names are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldNames {
    /// Always quote and escape names (valid JSON)
    #[default]
    Quoted,
    /// Quote only reserved words, empty names and non-identifiers
    Bare,
}

/// Encoding used by the catalog date encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// Quoted ISO-8601 text; the time part is dropped at exact midnight.
    #[default]
    Iso,
    /// Bare milliseconds since the Unix epoch.
    EpochMillis,
}

#[derive(Debug, Clone)]
pub struct Options {
    pub variant: WriterVariant,
    /// Indentation size for the pretty variant (default: 2 spaces)
    pub indent: usize,
    pub field_names: FieldNames,
    pub date_format: DateFormat,
}

impl Options {
    pub fn compact() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self {
            variant: WriterVariant::Pretty,
            ..Self::default()
        }
    }

    pub fn fast() -> Self {
        Self {
            variant: WriterVariant::Fast,
            ..Self::default()
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            variant: WriterVariant::default(),
            indent: 2,
            field_names: FieldNames::default(),
            date_format: DateFormat::default(),
        }
    }
}
