use serde_json::Value;

use crate::{ListAggError, TypeDescriptor};

/// Name of a runtime value's shape, for error messages.
fn shape_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Renders the value argument of a row to its string form.
///
/// Accepts any primitive value regardless of the declared kind, the way the
/// host's own cast machinery would. Null renders as the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueConverter {
    declared: TypeDescriptor,
}

impl ValueConverter {
    pub fn new(declared: TypeDescriptor) -> ValueConverter {
        ValueConverter { declared }
    }

    pub fn convert(&self, v: &Value) -> Result<String, ListAggError> {
        match v {
            Value::Null => Ok(String::new()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Number(n) => Ok(n.to_string()),
            Value::String(s) => Ok(s.clone()),
            other => ListAggError::ArgumentType {
                index: 0,
                expected: "a primitive value",
                got: format!("{} (declared {:?})", shape_of(other), self.declared.kind),
            }
            .err(),
        }
    }
}

/// Reads the order-key argument of a row as an integer.
///
/// Null is treated the same as an omitted order argument: order 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderConverter {
    declared: TypeDescriptor,
}

impl OrderConverter {
    pub fn new(declared: TypeDescriptor) -> OrderConverter {
        OrderConverter { declared }
    }

    pub fn convert(&self, v: &Value) -> Result<i64, ListAggError> {
        match v {
            Value::Null => Ok(0),
            Value::Number(n) if n.is_i64() => Ok(n.as_i64().unwrap_or_default()),
            Value::Number(n) if n.is_u64() => n
                .as_u64()
                .and_then(|u| i64::try_from(u).ok())
                .ok_or_else(|| ListAggError::ArgumentType {
                    index: 1,
                    expected: "an integer order key",
                    got: "integer out of range".into(),
                }),
            other => ListAggError::ArgumentType {
                index: 1,
                expected: "an integer order key",
                got: format!("{} (declared {:?})", shape_of(other), self.declared.kind),
            }
            .err(),
        }
    }
}

/// The converters built once at init and held read-only for the life of the
/// evaluator. `order` is present only when the function was resolved with a
/// second argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Converters {
    pub value: ValueConverter,
    pub order: Option<OrderConverter>,
}

impl Converters {
    /// Construction-time argument validation: one or two arguments, the first
    /// a primitive of any kind, the second (if present) an integer-like
    /// primitive.
    pub fn validate(args: &[TypeDescriptor]) -> Result<(), ListAggError> {
        if args.is_empty() || args.len() > 2 {
            return ListAggError::ArgumentCount { got: args.len() }.err();
        }
        if !args[0].is_primitive() {
            return ListAggError::ArgumentType {
                index: 0,
                expected: "a primitive value argument",
                got: format!("{:?}", args[0].category),
            }
            .err();
        }
        if let Some(order) = args.get(1) {
            let integer_like = order.is_primitive()
                && order.kind.is_some_and(|k| k.is_integer_like());
            if !integer_like {
                return ListAggError::ArgumentType {
                    index: 1,
                    expected: "an integer-like primitive (int, bigint)",
                    got: match order.kind {
                        Some(kind) => format!("{kind:?}"),
                        None => format!("{:?}", order.category),
                    },
                }
                .err();
            }
        }
        Ok(())
    }

    pub fn build(args: &[TypeDescriptor]) -> Result<Converters, ListAggError> {
        Converters::validate(args)?;
        Ok(Converters {
            value: ValueConverter::new(args[0]),
            order: args.get(1).copied().map(OrderConverter::new),
        })
    }
}
