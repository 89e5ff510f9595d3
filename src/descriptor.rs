use serde::{Deserialize, Serialize};

/// Coarse classification of a host argument type.
///
/// The host engine hands one descriptor per argument at resolve/init time;
/// this is all the type metadata the operator ever sees — there is no runtime
/// type discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeCategory {
    /// A scalar column value (string, number, bool).
    Primitive,
    /// A list column. The only list this operator accepts is the partial
    /// result shape produced by `terminate_partial`.
    List,
}

/// Concrete primitive kind of a host column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveKind {
    /// Boolean
    Bool,
    /// 32-bit integer
    Int,
    /// 64-bit integer
    BigInt,
    /// 32-bit float
    Float,
    /// 64-bit float
    Double,
    /// String
    String,
}

impl PrimitiveKind {
    /// Whether this kind is accepted as an order key (32- or 64-bit integer).
    pub fn is_integer_like(&self) -> bool {
        matches!(self, PrimitiveKind::Int | PrimitiveKind::BigInt)
    }
}

/// Static type metadata for one argument, as declared by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub category: TypeCategory,
    /// Present only for `Primitive` descriptors.
    pub kind: Option<PrimitiveKind>,
}

impl TypeDescriptor {
    pub fn primitive(kind: PrimitiveKind) -> TypeDescriptor {
        TypeDescriptor { category: TypeCategory::Primitive, kind: Some(kind) }
    }

    /// The partial-result shape: a list of two-field (value, order) records.
    /// This is the descriptor a `Partial2`/`Final` init receives as its single
    /// argument.
    pub fn partial_list() -> TypeDescriptor {
        TypeDescriptor { category: TypeCategory::List, kind: None }
    }

    pub fn is_primitive(&self) -> bool {
        self.category == TypeCategory::Primitive
    }

    pub fn is_partial_list(&self) -> bool {
        self.category == TypeCategory::List
    }
}

/// The output shape an evaluator resolves to at init time.
///
/// Partial modes emit the transportable list-of-records shape; final modes
/// emit a single string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputShape {
    PartialList,
    FinalString,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_like_kinds() {
        assert!(PrimitiveKind::Int.is_integer_like());
        assert!(PrimitiveKind::BigInt.is_integer_like());
        assert!(!PrimitiveKind::String.is_integer_like());
        assert!(!PrimitiveKind::Double.is_integer_like());
    }

    #[test]
    fn descriptor_constructors() {
        let d = TypeDescriptor::primitive(PrimitiveKind::String);
        assert!(d.is_primitive());
        assert!(!d.is_partial_list());
        assert_eq!(d.kind, Some(PrimitiveKind::String));

        let l = TypeDescriptor::partial_list();
        assert!(l.is_partial_list());
        assert_eq!(l.kind, None);
    }
}
