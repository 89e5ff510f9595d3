use crate::ListAggElement;

/// Literal separator between joined values. Values containing the separator
/// are not escaped; re-parsing the output is ambiguous in that case.
pub const SEPARATOR: &str = ",";

/// The final reduction: sort ascending by order key and join the values.
///
/// The sort is stable, so elements with equal order keys keep their append
/// order. An empty input yields the empty string.
pub fn concat_ordered(elements: &[ListAggElement]) -> String {
    let mut sorted: Vec<&ListAggElement> = elements.iter().collect();
    sorted.sort_by_key(|e| e.order);
    sorted
        .iter()
        .map(|e| e.value.as_str())
        .collect::<Vec<&str>>()
        .join(SEPARATOR)
}
