//! # Structural Handlers
//!
//! Mappings and sequences. Both build a fresh compliant copy of the data
//! and frame every nested failure with the key or position it came from,
//! so an error chain spells out the path to the failing leaf.
//!
//! ## Variadic Sequences
//!
//! A repetition marker repeats the previous slot's figure zero or more
//! times. Matching walks a cursor over the array:
//!
//! - a fixed slot consumes exactly one element;
//! - the marker consumes elements greedily, but never one of the elements
//!   reserved for the fixed slots after it;
//! - a repeated element that fails is an `index` error until the cursor has
//!   reached `limit` (the number of fixed slots), or when no fixed slot
//!   follows the marker;
//! - once the cursor has reached `limit`, a failing element ends the
//!   repetition and is left for the next fixed slot.
//!
//! Before `limit` is reached, a reserved element is still tried against
//! the repeated figure: a failure is fatal, a pass ends the repetition and
//! leaves the element to its fixed slot.

use serde_json::{Map, Value};

use contour_core::{Code, Error, Failure, Figure, FigureError, Key, Kind, Sequence, Slot};

use crate::matcher::{nest, type_mismatch, CheckResult, Checker};

/// Check an object entry by entry, in figure order.
pub(crate) fn check_mapping(
    checker: &Checker,
    entries: &[(Key, Figure)],
    data: &Value,
) -> CheckResult {
    let Value::Object(object) = data else {
        return Err(type_mismatch(Kind::Object, Kind::of(data)).into());
    };

    let mut compliant = Map::new();
    for (key, figure) in entries {
        let Some(value) = object.get(key.name()) else {
            if key.is_optional() {
                continue;
            }
            return Err(Error::new(Code::Key, [key.name().into()]).into());
        };
        let checked = checker
            .check(figure, value)
            .map_err(|failure| nest(failure, Code::Value, key.name().into()))?;
        compliant.insert(
            key.name().to_string(),
            checked.unwrap_or_else(|| value.clone()),
        );
    }
    Ok(Some(Value::Object(compliant)))
}

/// Check an array slot by slot.
pub(crate) fn check_sequence(checker: &Checker, sequence: &Sequence, data: &Value) -> CheckResult {
    let Value::Array(elements) = data else {
        return Err(type_mismatch(Kind::Array, Kind::of(data)).into());
    };

    let limit = sequence.limit();
    let after = sequence.fixed_after_repeat();
    let mut compliant = Vec::with_capacity(elements.len());
    let mut cursor = 0usize;
    let mut previous: Option<&Figure> = None;

    for slot in sequence.slots() {
        match slot {
            Slot::Figure(figure) => {
                let Some(element) = elements.get(cursor) else {
                    return Err(Error::new(Code::Small, [cursor.into(), limit.into()]).into());
                };
                let checked = checker
                    .check(figure, element)
                    .map_err(|failure| nest(failure, Code::Index, cursor.into()))?;
                compliant.push(checked.unwrap_or_else(|| element.clone()));
                cursor += 1;
                previous = Some(figure);
            }
            Slot::Repeat => {
                let Some(figure) = previous else {
                    return Err(FigureError::RepeatWithoutFigure.into());
                };
                while let Some(element) = elements.get(cursor) {
                    // Elements the fixed slots after the marker still need.
                    let reserved = elements.len() - cursor <= after;
                    if reserved && cursor >= limit {
                        break;
                    }
                    match checker.check(figure, element) {
                        Ok(checked) if !reserved => {
                            compliant.push(checked.unwrap_or_else(|| element.clone()));
                            cursor += 1;
                        }
                        Ok(_) => break,
                        Err(Failure::Invalid(cause)) if cursor < limit || after == 0 => {
                            return Err(Error::new(Code::Index, [cursor.into()])
                                .with_cause(cause)
                                .into());
                        }
                        // Left for the next fixed slot.
                        Err(Failure::Invalid(_)) => break,
                        Err(other) => return Err(other),
                    }
                }
            }
        }
    }

    if cursor < elements.len() {
        return Err(Error::new(Code::Large, [cursor.into(), elements.len().into()]).into());
    }
    Ok(Some(Value::Array(compliant)))
}
