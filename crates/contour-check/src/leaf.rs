//! Handlers for figures that do not recurse: kinds, literals, predicates.

use serde_json::Value;

use contour_core::{Code, Error, Figure, Info, Kind, Predicate, Verdict};

use crate::matcher::{type_mismatch, CheckResult};

/// Pass if the data's kind is a subkind of `expected`.
pub(crate) fn check_type(expected: Kind, data: &Value) -> CheckResult {
    let actual = Kind::of(data);
    if actual.is_subkind_of(expected) {
        Ok(None)
    } else {
        Err(type_mismatch(expected, actual).into())
    }
}

/// Pass if the data equals `expected`.
pub(crate) fn check_literal(expected: &Value, data: &Value) -> CheckResult {
    if expected == data {
        Ok(None)
    } else {
        Err(Error::new(Code::Object, [Info::from(expected), Info::from(data)]).into())
    }
}

/// Invoke the predicate. Its own errors propagate untouched.
pub(crate) fn check_predicate(predicate: &Predicate, data: &Value) -> CheckResult {
    match predicate.call(data)? {
        Verdict::Pass => Ok(None),
        Verdict::Fail => Err(Error::new(
            Code::Call,
            [
                Info::Figure(Figure::Predicate(predicate.clone())),
                Info::from(data),
            ],
        )
        .into()),
        Verdict::Replace(value) => Ok(Some(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contour_core::{Failure, Fault};
    use serde_json::json;

    #[test]
    fn test_type_mismatch_info() {
        let err = check_type(Kind::Integer, &json!("5"))
            .unwrap_err()
            .into_invalid()
            .unwrap();
        assert_eq!(err.code(), &Code::Type);
        assert_eq!(err.info()[0].as_kind(), Some(Kind::Integer));
        assert_eq!(err.info()[1].as_kind(), Some(Kind::String));
    }

    #[test]
    fn test_type_accepts_subkinds() {
        assert_eq!(check_type(Kind::Number, &json!(5)).unwrap(), None);
        assert_eq!(check_type(Kind::Number, &json!(0.5)).unwrap(), None);
        assert_eq!(check_type(Kind::Any, &json!(null)).unwrap(), None);
        assert!(check_type(Kind::Float, &json!(5)).is_err());
    }

    #[test]
    fn test_literal_info_is_expected_then_actual() {
        let err = check_literal(&json!(5), &json!(6))
            .unwrap_err()
            .into_invalid()
            .unwrap();
        assert_eq!(err.code(), &Code::Object);
        assert_eq!(err.info()[0].as_value(), Some(&json!(5)));
        assert_eq!(err.info()[1].as_value(), Some(&json!(6)));
    }

    #[test]
    fn test_literal_compares_structures() {
        assert!(check_literal(&json!({"a": [1, 2]}), &json!({"a": [1, 2]})).is_ok());
        assert!(check_literal(&json!({"a": [1, 2]}), &json!({"a": [2, 1]})).is_err());
    }

    #[test]
    fn test_predicate_conventions() {
        let even = Predicate::test("even", |v| v.as_i64().is_some_and(|n| n % 2 == 0));
        assert_eq!(check_predicate(&even, &json!(4)).unwrap(), None);

        let err = check_predicate(&even, &json!(3))
            .unwrap_err()
            .into_invalid()
            .unwrap();
        assert_eq!(err.code(), &Code::Call);
        assert_eq!(err.info()[1].as_value(), Some(&json!(3)));
        assert!(matches!(err.info()[0].as_figure(), Some(Figure::Predicate(p)) if p.name() == "even"));

        let trim = Predicate::new("trim", |v| {
            Ok(Verdict::Replace(json!(v.as_str().unwrap_or_default().trim())))
        });
        assert_eq!(check_predicate(&trim, &json!("  x ")).unwrap(), Some(json!("x")));
    }

    #[test]
    fn test_predicate_errors_propagate() {
        let crash = Predicate::new("crash", |_| Err(Fault::new("runtime", "boom").into()));
        let failure = check_predicate(&crash, &json!(1)).unwrap_err();
        assert!(matches!(failure, Failure::Fault(ref f) if f.kind == "runtime"));

        let strict = Predicate::new("strict", |_| {
            Err(Error::new(Code::custom("strict"), []).into())
        });
        let failure = check_predicate(&strict, &json!(1)).unwrap_err();
        assert_eq!(failure.into_invalid().unwrap().code(), &Code::custom("strict"));
    }
}
