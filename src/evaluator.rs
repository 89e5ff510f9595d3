use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    ListAggBuffer, ListAggElement, ListAggError, OutputShape, TypeDescriptor,
    codec, coerce::Converters, reduce,
};

/// Execution mode the host schedules this evaluator under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Map-side: raw rows in, partial shape out.
    Partial1,
    /// Map-side re-aggregation: partial shape in, partial shape out.
    Partial2,
    /// Single-phase: raw rows in, final string out.
    Complete,
    /// Reduce-side: partial shape in, final string out.
    Final,
}

impl Mode {
    pub fn consumes_raw_rows(&self) -> bool {
        matches!(self, Mode::Partial1 | Mode::Complete)
    }

    pub fn emits_partial(&self) -> bool {
        matches!(self, Mode::Partial1 | Mode::Partial2)
    }

    pub fn output_shape(&self) -> OutputShape {
        if self.emits_partial() {
            OutputShape::PartialList
        } else {
            OutputShape::FinalString
        }
    }
}

/// What the evaluator reads per buffer-feeding call, fixed at init.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputLayer {
    /// Raw rows through the coercion converters (`Partial1`/`Complete`).
    RawRows(Converters),
    /// Decoded partial-result records (`Partial2`/`Final`).
    Partials,
}

/// Immutable per-evaluator configuration, built once by `init` and only read
/// afterwards. One config serves every buffer the evaluator drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorConfig {
    mode: Mode,
    input: InputLayer,
    output: OutputShape,
}

impl EvaluatorConfig {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn output_shape(&self) -> OutputShape {
        self.output
    }
}

/// The plugin seam between the host engine and an aggregate function: the
/// five lifecycle operations plus buffer management.
///
/// The host constructs one evaluator per mode, calls `init` once, then drives
/// any number of buffers through it. All operations after `init` take `&self`;
/// per-group state lives exclusively in the buffers, so one evaluator may
/// serve buffers on several workers as long as no single buffer is shared.
pub trait AggregateEvaluator {
    type Buffer;

    /// Configures the evaluator for `mode` and returns the resolved output
    /// shape. Must be called before any other operation.
    fn init(&mut self, mode: Mode, args: &[TypeDescriptor]) -> Result<OutputShape, ListAggError>;

    /// A fresh, empty per-group buffer.
    fn create_buffer(&self) -> Self::Buffer;

    /// Clears a pooled buffer for reuse with a new group.
    fn reset(&self, buffer: &mut Self::Buffer);

    /// Feeds one raw row into the buffer. Raw-row modes only.
    fn iterate(&self, buffer: &mut Self::Buffer, args: &[Value]) -> Result<(), ListAggError>;

    /// Snapshots the buffer into the transportable partial shape.
    /// Partial modes only.
    fn terminate_partial(&self, buffer: &Self::Buffer) -> Result<Value, ListAggError>;

    /// Folds a partial result from another stage into the buffer.
    /// Partial-consuming modes only.
    fn merge(&self, buffer: &mut Self::Buffer, partial: &Value) -> Result<(), ListAggError>;

    /// Produces the final string. Final modes only; the buffer is logically
    /// consumed afterwards.
    fn terminate(&self, buffer: &Self::Buffer) -> Result<Value, ListAggError>;
}

/// Host construction surface for the `listagg` function.
pub struct ListAgg;

impl ListAgg {
    /// Canonical lowercase function name.
    pub const NAME: &'static str = "listagg";

    /// Validates the declared argument types and hands back an evaluator
    /// awaiting `init`. One or two arguments: the value (any primitive) and
    /// an optional integer order key.
    pub fn resolve(args: &[TypeDescriptor]) -> Result<ListAggEvaluator, ListAggError> {
        Converters::validate(args)?;
        debug!(arg_count = args.len(), "resolved {} evaluator", ListAgg::NAME);
        Ok(ListAggEvaluator::new())
    }
}

/// Evaluator for ordered string concatenation.
///
/// State machine: `Uninitialized -> Configured(mode)`. Every lifecycle
/// operation checks that the configured mode supports it and fails with a
/// `Protocol` error otherwise.
#[derive(Debug, Default)]
pub struct ListAggEvaluator {
    config: Option<EvaluatorConfig>,
}

impl ListAggEvaluator {
    pub fn new() -> ListAggEvaluator {
        ListAggEvaluator { config: None }
    }

    pub fn config(&self) -> Option<&EvaluatorConfig> {
        self.config.as_ref()
    }

    fn configured(&self, operation: &'static str) -> Result<&EvaluatorConfig, ListAggError> {
        self.config
            .as_ref()
            .ok_or_else(|| ListAggError::Protocol(format!("{operation} called before init")))
    }

    fn illegal_in(operation: &str, mode: Mode) -> ListAggError {
        ListAggError::Protocol(format!("{operation} is not legal in {mode:?} mode"))
    }
}

impl AggregateEvaluator for ListAggEvaluator {
    type Buffer = ListAggBuffer;

    fn init(&mut self, mode: Mode, args: &[TypeDescriptor]) -> Result<OutputShape, ListAggError> {
        let input = if mode.consumes_raw_rows() {
            InputLayer::RawRows(Converters::build(args)?)
        } else {
            // Partial-consuming modes read decoded records directly; the one
            // argument must be the codec's list shape.
            match args {
                [single] if single.is_partial_list() => InputLayer::Partials,
                _ => {
                    return ListAggError::Configuration(format!(
                        "{mode:?} init expects a single partial-list descriptor, got {args:?}"
                    ))
                    .err();
                }
            }
        };
        let output = mode.output_shape();
        self.config = Some(EvaluatorConfig { mode, input, output });
        debug!(?mode, ?output, "initialized {} evaluator", ListAgg::NAME);
        Ok(output)
    }

    fn create_buffer(&self) -> ListAggBuffer {
        ListAggBuffer::new()
    }

    fn reset(&self, buffer: &mut ListAggBuffer) {
        buffer.reset();
    }

    fn iterate(&self, buffer: &mut ListAggBuffer, args: &[Value]) -> Result<(), ListAggError> {
        let config = self.configured("iterate")?;
        let InputLayer::RawRows(converters) = &config.input else {
            return Self::illegal_in("iterate", config.mode).err();
        };
        let element = match args {
            [value] => ListAggElement::new(converters.value.convert(value)?, 0),
            [value, order] => {
                let Some(order_converter) = &converters.order else {
                    return ListAggError::Protocol(
                        "iterate received an order argument but the evaluator was resolved without one"
                            .to_string(),
                    )
                    .err();
                };
                ListAggElement::new(
                    converters.value.convert(value)?,
                    order_converter.convert(order)?,
                )
            }
            _ => {
                return ListAggError::Protocol(format!(
                    "iterate expects 1 or 2 row values, got {}",
                    args.len()
                ))
                .err();
            }
        };
        buffer.append(element);
        Ok(())
    }

    fn terminate_partial(&self, buffer: &ListAggBuffer) -> Result<Value, ListAggError> {
        let config = self.configured("terminate_partial")?;
        if config.output != OutputShape::PartialList {
            return Self::illegal_in("terminate_partial", config.mode).err();
        }
        Ok(codec::encode_partial(&buffer.snapshot()))
    }

    fn merge(&self, buffer: &mut ListAggBuffer, partial: &Value) -> Result<(), ListAggError> {
        let config = self.configured("merge")?;
        if config.input != InputLayer::Partials {
            return Self::illegal_in("merge", config.mode).err();
        }
        let decoded = codec::decode_partial(partial).inspect_err(|e| {
            warn!(error = %e, "discarding group: merge received a malformed partial");
        })?;
        buffer.append_all(decoded);
        Ok(())
    }

    fn terminate(&self, buffer: &ListAggBuffer) -> Result<Value, ListAggError> {
        let config = self.configured("terminate")?;
        if config.output != OutputShape::FinalString {
            return Self::illegal_in("terminate", config.mode).err();
        }
        Ok(Value::String(reduce::concat_ordered(buffer.elements())))
    }
}
