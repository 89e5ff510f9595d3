use serde::{Deserialize, Serialize};

/// One collected row: the rendered value plus its order key.
///
/// This struct is also the partial-result wire record, so its two field names
/// are part of the transport schema and must stay stable across stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListAggElement {
    pub value: String,
    pub order: i64,
}

impl ListAggElement {
    pub fn new(value: String, order: i64) -> ListAggElement {
        ListAggElement { value, order }
    }
}

/// The per-group accumulator: an append-only sequence of elements.
///
/// One buffer belongs to exactly one group and is driven by one worker at a
/// time; there is no internal synchronization. Append order is preserved and
/// is the tie-break basis for equal order keys at terminate time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAggBuffer {
    elements: Vec<ListAggElement>,
}

impl ListAggBuffer {
    pub fn new() -> ListAggBuffer {
        ListAggBuffer { elements: Vec::new() }
    }

    /// Clears all elements, starting a new lifecycle for a pooled buffer.
    pub fn reset(&mut self) {
        self.elements.clear();
    }

    pub fn append(&mut self, element: ListAggElement) {
        self.elements.push(element);
    }

    /// Appends a whole decoded partial, preserving its relative order.
    pub fn append_all(&mut self, elements: Vec<ListAggElement>) {
        self.elements.extend(elements);
    }

    /// An independent copy of the current elements. A partial built from the
    /// snapshot cannot be mutated through later appends to this buffer.
    pub fn snapshot(&self) -> Vec<ListAggElement> {
        self.elements.clone()
    }

    pub fn elements(&self) -> &[ListAggElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
