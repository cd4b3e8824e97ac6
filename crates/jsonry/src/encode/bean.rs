use crate::encode::Encoder;
use crate::error::Result;
use crate::reflect::{Accessor, Reflect, Returns, TypeInfo};
use crate::writer::JsonWriter;

/// Fallback encoder built from a type's accessor table.
///
/// Built once per type when the registry first resolves it. Property names
/// come from the accessor method names:
///
/// - `get_name` / `getName` become `name`
/// - `is_active` / `isActive` become `active`, only when the accessor returns `bool`
/// - accessors returning `()` are skipped
/// - any other accessor keeps its method name
///
/// The first letter is lowercased unless the first two letters are both
/// uppercase (`getURL` stays `URL`). Properties keep declaration order; when
/// two accessors map to the same name the first one wins.
#[derive(Debug, Clone)]
pub struct BeanSerializer {
    type_name: &'static str,
    properties: Vec<(String, Accessor)>,
}

impl BeanSerializer {
    pub fn introspect(info: &TypeInfo) -> Self {
        let mut properties: Vec<(String, Accessor)> = Vec::new();
        for accessor in info.accessors() {
            let Some(name) = property_name(accessor.method(), accessor.returns()) else {
                continue;
            };
            if properties.iter().any(|(existing, _)| *existing == name) {
                log::debug!(
                    "{}: accessor `{}` shadowed by an earlier `{}` property",
                    info.name(),
                    accessor.method(),
                    name
                );
                continue;
            }
            properties.push((name, accessor));
        }
        log::debug!("bean serializer for {} with {} properties", info.name(), properties.len());
        Self {
            type_name: info.name(),
            properties,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Property names in output order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(name, _)| name.as_str())
    }
}

impl Encoder for BeanSerializer {
    fn encode(&self, value: &dyn Reflect, w: &mut dyn JsonWriter) -> Result<()> {
        w.begin_object()?;
        for (name, accessor) in &self.properties {
            let field = accessor.get(value)?;
            w.write_property(name, &*field)?;
        }
        w.end_object()
    }
}

fn strip_accessor_prefix<'a>(method: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = method.strip_prefix(prefix)?;
    if let Some(snake) = rest.strip_prefix('_') {
        return (!snake.is_empty()).then_some(snake);
    }
    rest.starts_with(|c: char| c.is_uppercase()).then_some(rest)
}

pub(crate) fn property_name(method: &str, returns: Returns) -> Option<String> {
    let base = match returns {
        Returns::Unit => return None,
        Returns::Bool => strip_accessor_prefix(method, "is")
            .or_else(|| strip_accessor_prefix(method, "get"))
            .unwrap_or(method),
        Returns::Value => strip_accessor_prefix(method, "get").unwrap_or(method),
    };
    Some(decapitalize(base))
}

fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) if a.is_uppercase() && b.is_uppercase() => name.to_owned(),
        (Some(a), _) => a.to_lowercase().chain(name[a.len_utf8()..].chars()).collect(),
        (None, _) => String::new(),
    }
}
