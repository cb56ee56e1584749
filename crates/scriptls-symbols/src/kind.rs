//! Symbol classification: a single kind enum plus a modifier bitset,
//! matching the design note that no subclass hierarchy is needed here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Namespace,
    Class,
    Interface,
    Trait,
    Function,
    Method,
    /// A method declared with the constructor's identifier. Its storage
    /// kind is still `Method` in every table and index; this surface kind
    /// only shows up in symbol-info responses.
    Constructor,
    Property,
    ClassConstant,
    Constant,
    Parameter,
    Variable,
    File,
}

impl SymbolKind {
    /// Case sensitivity for exact lookup, per §4.6: variables, properties,
    /// constants, and class-constants are case-sensitive; the rest fold.
    #[inline]
    pub const fn is_case_sensitive(self) -> bool {
        matches!(
            self,
            SymbolKind::Variable | SymbolKind::Property | SymbolKind::Constant | SymbolKind::ClassConstant
        )
    }

    #[inline]
    pub const fn is_type_declaration(self) -> bool {
        matches!(self, SymbolKind::Class | SymbolKind::Interface | SymbolKind::Trait)
    }

    #[inline]
    pub const fn is_callable(self) -> bool {
        matches!(self, SymbolKind::Function | SymbolKind::Method | SymbolKind::Constructor)
    }
}

/// Visibility plus orthogonal declaration modifiers, packed into one
/// `u16`. Bit layout is private; callers go through the named accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers(u16);

impl Modifiers {
    pub const PUBLIC: Modifiers = Modifiers(1 << 0);
    pub const PROTECTED: Modifiers = Modifiers(1 << 1);
    pub const PRIVATE: Modifiers = Modifiers(1 << 2);
    pub const STATIC: Modifiers = Modifiers(1 << 3);
    pub const ABSTRACT: Modifiers = Modifiers(1 << 4);
    pub const FINAL: Modifiers = Modifiers(1 << 5);
    pub const ANONYMOUS: Modifiers = Modifiers(1 << 6);
    pub const MAGIC: Modifiers = Modifiers(1 << 7);
    pub const READONLY: Modifiers = Modifiers(1 << 8);
    pub const WRITEONLY: Modifiers = Modifiers(1 << 9);
    pub const USE: Modifiers = Modifiers(1 << 10);
    pub const REFERENCE: Modifiers = Modifiers(1 << 11);
    pub const VARIADIC: Modifiers = Modifiers(1 << 12);

    pub const NONE: Modifiers = Modifiers(0);

    #[inline]
    pub const fn contains(self, flag: Modifiers) -> bool {
        self.0 & flag.0 == flag.0
    }

    #[inline]
    pub fn insert(&mut self, flag: Modifiers) {
        self.0 |= flag.0;
    }

    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    #[inline]
    pub const fn is_private(self) -> bool {
        self.contains(Modifiers::PRIVATE)
    }

    #[inline]
    pub const fn is_static(self) -> bool {
        self.contains(Modifiers::STATIC)
    }

    #[inline]
    pub const fn is_abstract(self) -> bool {
        self.contains(Modifiers::ABSTRACT)
    }

    /// Visibility of an unmarked class-constant declaration defaults to
    /// public; an unmarked property declaration carries no visibility bit
    /// at all (§4.4) — callers distinguish the two at the call site rather
    /// than here, since the default depends on the declaration's kind.
    #[inline]
    pub const fn visibility_bits(self) -> Modifiers {
        Modifiers(self.0 & (Self::PUBLIC.0 | Self::PROTECTED.0 | Self::PRIVATE.0))
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Modifiers) -> Modifiers {
        self.union(rhs)
    }
}
