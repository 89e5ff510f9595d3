pub mod descriptor;
pub use descriptor::{OutputShape, PrimitiveKind, TypeCategory, TypeDescriptor};

pub mod error;
pub use error::ListAggError;

pub mod coerce;
pub use coerce::{Converters, OrderConverter, ValueConverter};

pub mod buffer;
pub use buffer::{ListAggBuffer, ListAggElement};

pub mod codec;

pub mod evaluator;
pub use evaluator::{AggregateEvaluator, ListAgg, ListAggEvaluator, Mode};

pub mod reduce;
