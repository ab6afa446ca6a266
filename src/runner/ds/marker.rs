use std::fmt;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Which namespace issued a marker.
///
/// A resolver only reacts to markers of its own kind, so a color marker can
/// never be mistaken for the class namespace and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    ClassNamespace,
    ColorNamespace,
}

/// Sentinel returned for the root segment of a virtual namespace.
///
/// It carries no payload. Two markers are equal when they have the same kind;
/// `issued` only tells separate root resolutions apart in diagnostics.
#[derive(Debug, Clone)]
pub struct MarkerValue {
    kind: MarkerKind,
    issued: Uuid,
}

impl MarkerValue {
    pub fn new(kind: MarkerKind) -> Self {
        MarkerValue {
            kind,
            issued: Uuid::new_v4(),
        }
    }

    pub fn kind(&self) -> MarkerKind {
        self.kind
    }

    pub fn issued(&self) -> &Uuid {
        &self.issued
    }
}

impl PartialEq for MarkerValue {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Display for MarkerValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.kind {
            MarkerKind::ClassNamespace => write!(f, "<class namespace>"),
            MarkerKind::ColorNamespace => write!(f, "<color namespace>"),
        }
    }
}
