//! Type to encoder resolution.

use core::any::TypeId;
use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use crate::encode::{ArrayEncoder, BeanSerializer, Encoder, install_catalog};
use crate::error::{Error, Result};
use crate::field_name::FieldNamePolicy;
use crate::options::{DateFormat, Options, WriterVariant};
use crate::reflect::{EncoderRef, OverrideMarker, Reflect, TypeInfo, Typed};
use crate::writer::{CheckedWriter, CompactFormatter, FastWriter, JsonWriter, PrettyFormatter, Writer};

#[derive(Clone)]
struct Cached {
    info: TypeInfo,
    encoder: Arc<dyn Encoder>,
}

#[derive(Clone)]
struct ClassRule {
    info: TypeInfo,
    encoder: Arc<dyn Encoder>,
    recursive: bool,
}

#[derive(Clone)]
struct InterfaceRule {
    info: TypeInfo,
    encoder: Arc<dyn Encoder>,
}

/// Decides which encoder serializes each runtime type.
///
/// Resolution runs once per distinct type; the result is cached for the
/// registry's lifetime. The cache is safe for concurrent readers, while rule
/// changes need `&mut self` and belong in start-up configuration, before the
/// registry is [frozen](Registry::freeze) and shared.
///
/// Registering a rule does not evict types that were already resolved; use
/// [`Registry::remove_encoder`] for that.
pub struct Registry {
    cache: DashMap<TypeId, Cached>,
    class_rules: HashMap<TypeId, ClassRule>,
    interface_rules: Vec<InterfaceRule>,
    named: HashMap<&'static str, Arc<dyn Encoder>>,
    field_names: Arc<dyn FieldNamePolicy>,
    options: Options,
    resolutions: AtomicUsize,
}

impl Registry {
    /// A registry with the built-in catalog and default options.
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        let mut registry = Self::bare(options);
        install_catalog(&mut registry);
        registry
    }

    /// A registry without any rules; every value goes through the bean
    /// serializer unless it is an array.
    pub fn empty() -> Self {
        Self::bare(Options::default())
    }

    fn bare(options: Options) -> Self {
        Self {
            cache: DashMap::new(),
            class_rules: HashMap::new(),
            interface_rules: Vec::new(),
            named: HashMap::new(),
            field_names: options.field_names.policy(),
            options,
            resolutions: AtomicUsize::new(0),
        }
    }

    /// Copies rules, named encoders, policy and options from `parent`, but
    /// not its cache.
    pub fn inherit(parent: &Registry) -> Self {
        Self {
            cache: DashMap::new(),
            class_rules: parent.class_rules.clone(),
            interface_rules: parent.interface_rules.clone(),
            named: parent.named.clone(),
            field_names: Arc::clone(&parent.field_names),
            options: parent.options.clone(),
            resolutions: AtomicUsize::new(0),
        }
    }

    /// The registry behind the crate-level convenience functions.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            log::debug!("initializing default registry");
            Registry::new()
        })
    }

    /// Ends configuration. The returned registry can be shared across threads.
    pub fn freeze(self) -> Arc<Registry> {
        log::debug!(
            "registry frozen: {} class rule(s), {} interface rule(s)",
            self.class_rules.len(),
            self.interface_rules.len()
        );
        Arc::new(self)
    }

    /// Adds a class rule, or an interface rule when `ty` is an interface.
    ///
    /// A recursive class rule also applies to every type that has `ty` as an
    /// ancestor. Interface rules always apply to implementors; re-registering
    /// an interface keeps its original position in the tie-break order.
    pub fn register_encoder(&mut self, ty: TypeInfo, encoder: Arc<dyn Encoder>, recursive: bool) {
        log::debug!("register {} -> {} (recursive: {recursive})", ty.name(), encoder.name());
        if ty.is_interface() {
            match self.interface_rules.iter_mut().find(|rule| rule.info == ty) {
                Some(rule) => rule.encoder = encoder,
                None => self.interface_rules.push(InterfaceRule { info: ty, encoder }),
            }
        } else {
            self.class_rules.insert(
                ty.id(),
                ClassRule {
                    info: ty,
                    encoder,
                    recursive,
                },
            );
        }
    }

    pub fn register<T: Typed>(&mut self, encoder: Arc<dyn Encoder>, recursive: bool) {
        self.register_encoder(T::type_info(), encoder, recursive);
    }

    /// Makes `encoder` available to [`OverrideMarker::named`] markers.
    pub fn register_named(&mut self, name: &'static str, encoder: Arc<dyn Encoder>) {
        self.named.insert(name, encoder);
    }

    /// Removes rules and cached resolutions for `ty`.
    ///
    /// With `recursive`, everything registered or cached for a descendant or
    /// implementor of `ty` goes too. Returns the number of entries removed.
    pub fn remove_encoder(&mut self, ty: &TypeInfo, recursive: bool) -> usize {
        let mut removed = 0;
        if self.class_rules.remove(&ty.id()).is_some() {
            removed += 1;
        }
        let before = self.interface_rules.len();
        self.interface_rules.retain(|rule| rule.info != *ty);
        removed += before - self.interface_rules.len();
        if self.cache.remove(&ty.id()).is_some() {
            removed += 1;
        }

        if recursive {
            self.class_rules.retain(|_, rule| {
                let hit = rule.info.is_subtype_of(ty);
                removed += usize::from(hit);
                !hit
            });
            let before = self.interface_rules.len();
            self.interface_rules.retain(|rule| !rule.info.is_subtype_of(ty));
            removed += before - self.interface_rules.len();
            self.cache.retain(|_, cached| {
                let hit = cached.info.is_subtype_of(ty);
                removed += usize::from(hit);
                !hit
            });
        }
        log::debug!("removed {removed} entr(ies) for {} (recursive: {recursive})", ty.name());
        removed
    }

    pub fn set_field_name_policy<P: FieldNamePolicy + 'static>(&mut self, policy: P) {
        self.field_names = Arc::new(policy);
    }

    pub fn set_writer_variant(&mut self, variant: WriterVariant) {
        self.options.variant = variant;
    }

    pub fn set_indent(&mut self, indent: usize) {
        self.options.indent = indent;
    }

    /// Default format of the catalog date encoder.
    pub fn set_date_format(&mut self, format: DateFormat) {
        self.options.date_format = format;
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn field_names(&self) -> &dyn FieldNamePolicy {
        self.field_names.as_ref()
    }

    /// Number of types resolved and cached so far.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Number of times the resolution algorithm has run.
    pub fn resolutions(&self) -> usize {
        self.resolutions.load(Ordering::Relaxed)
    }

    /// The encoder for values of type `ty`.
    ///
    /// 1. Arrays use the array encoder.
    /// 2. Walking up from `ty`, the first ancestor with an applicable class
    ///    rule or override marker decides. A rule or marker on an ancestor
    ///    applies only when it is recursive.
    /// 3. Otherwise the first registered interface rule that `ty` satisfies.
    /// 4. Otherwise a bean serializer built from `ty`'s accessors.
    ///
    /// Errors (a named marker without a matching encoder) are not cached.
    pub fn resolve(&self, ty: &TypeInfo) -> Result<Arc<dyn Encoder>> {
        if let Some(hit) = self.cache.get(&ty.id()) {
            log::trace!("cache hit for {}", ty.name());
            return Ok(Arc::clone(&hit.encoder));
        }
        let encoder = self.resolve_uncached(ty)?;
        self.cache.insert(
            ty.id(),
            Cached {
                info: *ty,
                encoder: Arc::clone(&encoder),
            },
        );
        Ok(encoder)
    }

    fn resolve_uncached(&self, ty: &TypeInfo) -> Result<Arc<dyn Encoder>> {
        self.resolutions.fetch_add(1, Ordering::Relaxed);

        if ty.is_array() {
            log::debug!("{} resolved to the array encoder", ty.name());
            return Ok(Arc::new(ArrayEncoder));
        }

        for (level, ancestor) in ty.ancestors().enumerate() {
            let exact = level == 0;
            if let Some(rule) = self.class_rules.get(&ancestor.id()) {
                if exact || rule.recursive {
                    log::debug!("{} resolved by class rule on {}", ty.name(), ancestor.name());
                    return Ok(Arc::clone(&rule.encoder));
                }
            }
            if let Some(marker) = ancestor.marker() {
                if exact || marker.recursive {
                    log::debug!("{} resolved by override marker on {}", ty.name(), ancestor.name());
                    return self.marker_encoder(ty, marker);
                }
            }
        }

        if let Some(rule) = self
            .interface_rules
            .iter()
            .find(|rule| ty.is_subtype_of(&rule.info))
        {
            log::debug!("{} resolved by interface rule {}", ty.name(), rule.info.name());
            return Ok(Arc::clone(&rule.encoder));
        }

        log::debug!("{} falls back to the bean serializer", ty.name());
        Ok(Arc::new(BeanSerializer::introspect(ty)))
    }

    fn marker_encoder(&self, ty: &TypeInfo, marker: OverrideMarker) -> Result<Arc<dyn Encoder>> {
        match marker.encoder {
            EncoderRef::Constructed(make) => Ok(make()),
            EncoderRef::Named(name) => self.named.get(name).cloned().ok_or_else(|| Error::Resolution {
                type_name: ty.name(),
                message: format!("no encoder registered under the name `{name}`"),
            }),
        }
    }

    /// A writer over `sink` in the configured variant.
    pub fn create_writer<W: io::Write>(&self, sink: W) -> Writer<'_, W> {
        match self.options.variant {
            WriterVariant::Compact => Writer::Compact(CheckedWriter::new(sink, self, CompactFormatter)),
            WriterVariant::Pretty => Writer::Pretty(CheckedWriter::new(
                sink,
                self,
                PrettyFormatter::new(self.options.indent),
            )),
            WriterVariant::Fast => Writer::Fast(FastWriter::new(sink, self)),
        }
    }

    pub fn to_writer<W: io::Write>(&self, sink: W, value: &dyn Reflect) -> Result<()> {
        let mut writer = self.create_writer(sink);
        writer.write_value(value)?;
        writer.finish()?;
        Ok(())
    }

    pub fn to_vec(&self, value: &dyn Reflect) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(128);
        self.to_writer(&mut out, value)?;
        Ok(out)
    }

    pub fn to_string(&self, value: &dyn Reflect) -> Result<String> {
        let bytes = self.to_vec(value)?;
        String::from_utf8(bytes).map_err(|e| Error::Message(e.to_string()))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Registry {
    fn clone(&self) -> Self {
        Self::inherit(self)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("class_rules", &self.class_rules.len())
            .field("interface_rules", &self.interface_rules.len())
            .field("named", &self.named.len())
            .field("cached", &self.cache.len())
            .field("options", &self.options)
            .finish()
    }
}
