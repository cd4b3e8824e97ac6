use core::any::{Any, TypeId, type_name};
use core::fmt;
use core::hash::{Hash, Hasher};

use std::sync::Arc;

use crate::encode::Encoder;
use crate::reflect::{Accessor, Typed};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// A concrete type, optionally with a declared parent.
    Class,
    /// A capability other types declare they implement.
    Interface,
    /// A fixed-size array; never looked up by exact identity.
    Array,
}

/// Where an override marker gets its encoder from.
#[derive(Clone, Copy)]
pub enum EncoderRef {
    /// A default-constructible encoder or a singleton accessor.
    Constructed(fn() -> Arc<dyn Encoder>),
    /// An encoder registered on the registry under this name.
    Named(&'static str),
}

impl fmt::Debug for EncoderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncoderRef::Constructed(_) => f.write_str("Constructed(..)"),
            EncoderRef::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

/// Declarative instruction selecting a non-default encoder for a type.
///
/// Consulted once when the registry first resolves the type. A `recursive`
/// marker also applies to every type that declares this one as an ancestor.
#[derive(Debug, Clone, Copy)]
pub struct OverrideMarker {
    pub encoder: EncoderRef,
    pub recursive: bool,
}

impl OverrideMarker {
    pub fn new<E: Encoder + Default>(recursive: bool) -> Self {
        Self {
            encoder: EncoderRef::Constructed(|| Arc::new(E::default())),
            recursive,
        }
    }

    pub fn singleton(get: fn() -> Arc<dyn Encoder>, recursive: bool) -> Self {
        Self {
            encoder: EncoderRef::Constructed(get),
            recursive,
        }
    }

    pub fn named(name: &'static str, recursive: bool) -> Self {
        Self {
            encoder: EncoderRef::Named(name),
            recursive,
        }
    }
}

/// Runtime descriptor of a type: identity, hierarchy and declared accessors.
///
/// Descriptors are cheap to build and copy; the registry keys everything on
/// [`TypeInfo::id`].
#[derive(Clone, Copy)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
    kind: TypeKind,
    parent: Option<fn() -> TypeInfo>,
    interfaces: &'static [fn() -> TypeInfo],
    marker: Option<OverrideMarker>,
    accessors: Option<fn() -> Vec<Accessor>>,
}

impl TypeInfo {
    fn new<T: Any + ?Sized>(kind: TypeKind) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            kind,
            parent: None,
            interfaces: &[],
            marker: None,
            accessors: None,
        }
    }

    pub fn class<T: Any + ?Sized>() -> Self {
        Self::new::<T>(TypeKind::Class)
    }

    pub fn interface<T: Any + ?Sized>() -> Self {
        Self::new::<T>(TypeKind::Interface)
    }

    pub fn array<T: Any + ?Sized>() -> Self {
        Self::new::<T>(TypeKind::Array)
    }

    /// Declares `P` as the direct parent of this type.
    pub fn extends<P: Typed>(mut self) -> Self {
        self.parent = Some(P::type_info);
        self
    }

    /// Declares the interfaces this type implements (or, for interfaces,
    /// extends), replacing any earlier list.
    ///
    /// ```
    /// use jsonry::reflect::{Iterable, Keyed, TypeInfo, Typed};
    ///
    /// struct Table;
    /// let info = TypeInfo::class::<Table>().implements(&[Keyed::type_info, Iterable::type_info]);
    /// assert!(info.is_subtype_of(&Iterable::type_info()));
    /// ```
    pub fn implements(mut self, interfaces: &'static [fn() -> TypeInfo]) -> Self {
        self.interfaces = interfaces;
        self
    }

    pub fn with_marker(mut self, marker: OverrideMarker) -> Self {
        self.marker = Some(marker);
        self
    }

    /// Declares the zero-argument accessors the bean serializer may use.
    pub fn with_accessors(mut self, accessors: fn() -> Vec<Accessor>) -> Self {
        self.accessors = Some(accessors);
        self
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    pub fn is_array(&self) -> bool {
        self.kind == TypeKind::Array
    }

    pub fn parent(&self) -> Option<TypeInfo> {
        self.parent.map(|p| p())
    }

    pub fn interfaces(&self) -> impl Iterator<Item = TypeInfo> + '_ {
        self.interfaces.iter().map(|i| i())
    }

    pub fn marker(&self) -> Option<OverrideMarker> {
        self.marker
    }

    pub fn accessors(&self) -> Vec<Accessor> {
        self.accessors.map(|a| a()).unwrap_or_default()
    }

    /// This type followed by its parent chain, nearest first.
    pub fn ancestors(&self) -> Ancestors {
        Ancestors { next: Some(*self) }
    }

    /// True when `self` is `other`, descends from it, or implements it
    /// (directly, through a parent, or through a super-interface).
    pub fn is_subtype_of(&self, other: &TypeInfo) -> bool {
        if self.id == other.id {
            return true;
        }
        if let Some(parent) = self.parent() {
            if parent.is_subtype_of(other) {
                return true;
            }
        }
        self.interfaces().any(|i| i.is_subtype_of(other))
    }

    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("parent", &self.parent().map(|p| p.name))
            .field("marker", &self.marker)
            .finish()
    }
}

pub struct Ancestors {
    next: Option<TypeInfo>,
}

impl Iterator for Ancestors {
    type Item = TypeInfo;

    fn next(&mut self) -> Option<TypeInfo> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}
