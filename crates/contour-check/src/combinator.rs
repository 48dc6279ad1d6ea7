//! # Combinator Handlers
//!
//! Logical and control figures. None of these look at the data's shape
//! themselves; they run sub-figures through the checker and decide what
//! the outcome means.
//!
//! Error handling follows one rule: validation errors (`Failure::Invalid`)
//! may be inspected, swallowed or replaced by a combinator, while faults and
//! figure errors always propagate. The only exception is `Except`, whose
//! purpose is to turn selected faults into validation errors.

use serde_json::Value;

use contour_core::{Code, Error, Failure, Figure, FigureError, Info};
use contour_core::{Convert, Except, Route, Wrap};

use crate::matcher::{CheckResult, Checker};

/// Every figure must pass. The last transformed value wins.
pub(crate) fn check_and(checker: &Checker, figures: &[Figure], data: &Value) -> CheckResult {
    let mut result = None;
    for figure in figures {
        if let Some(value) = checker.check(figure, data)? {
            result = Some(value);
        }
    }
    Ok(result)
}

/// The first passing alternative wins. When all fail, the last
/// alternative's error is returned.
pub(crate) fn check_or(checker: &Checker, figures: &[Figure], data: &Value) -> CheckResult {
    let mut last = None;
    for figure in figures {
        match checker.check(figure, data) {
            Ok(result) => return Ok(result),
            Err(Failure::Invalid(error)) => last = Some(error),
            Err(other) => return Err(other),
        }
    }
    match last {
        Some(error) => {
            tracing::debug!(alternatives = figures.len(), code = %error.code(), "no alternative matched");
            Err(error.into())
        }
        None => Err(FigureError::EmptyAlternatives.into()),
    }
}

/// The figure must fail. On success the data itself is returned.
pub(crate) fn check_not(checker: &Checker, figure: &Figure, data: &Value) -> CheckResult {
    match checker.check(figure, data) {
        Ok(_) => Err(Error::new(
            Code::Not,
            [Info::Figure(figure.clone()), Info::from(data)],
        )
        .into()),
        Err(Failure::Invalid(_)) => Ok(Some(data.clone())),
        Err(other) => Err(other),
    }
}

/// Run the figure, converting listed faults into `except` errors.
pub(crate) fn check_except(checker: &Checker, except: &Except, data: &Value) -> CheckResult {
    match checker.check(&except.figure, data) {
        Err(Failure::Fault(fault)) if except.kinds.iter().any(|kind| *kind == fault.kind) => {
            tracing::debug!(kind = %fault.kind, "fault converted to validation error");
            let kinds = Value::from(except.kinds.clone());
            Err(Error::new(
                Code::Except,
                [
                    Info::Figure(except.figure.clone()),
                    Info::Value(kinds),
                    Info::from(data),
                ],
            )
            .into())
        }
        other => other,
    }
}

/// Check the transformed data. The transformed value is not surfaced.
pub(crate) fn check_convert(checker: &Checker, convert: &Convert, data: &Value) -> CheckResult {
    let converted = convert.transform.apply(data)?;
    checker.check(&convert.figure, &converted)?;
    Ok(None)
}

/// Pick a branch by probing the condition.
pub(crate) fn check_route(checker: &Checker, route: &Route, data: &Value) -> CheckResult {
    let branch = match checker.check(&route.condition, data) {
        Ok(_) => &route.success,
        Err(Failure::Invalid(_)) => &route.failure,
        Err(other) => return Err(other),
    };
    checker.check(branch, data)
}

/// Replace any validation failure with the stored error.
pub(crate) fn check_wrap(checker: &Checker, wrap: &Wrap, data: &Value) -> CheckResult {
    match checker.check(&wrap.figure, data) {
        Err(Failure::Invalid(_)) => {
            Err(Error::new(wrap.code.clone(), wrap.info.clone()).into())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contour_core::{Fault, Kind, Transform, Verdict};
    use serde_json::json;

    fn int() -> Figure {
        Figure::Type(Kind::Integer)
    }

    fn run(figure: &Figure, data: Value) -> CheckResult {
        Checker::new().check(figure, &data)
    }

    fn error(result: CheckResult) -> Error {
        result.unwrap_err().into_invalid().expect("validation error")
    }

    fn faulty(kind: &'static str) -> Figure {
        Figure::predicate("faulty", move |_| Err(Fault::new(kind, "boom").into()))
    }

    fn replace_with(value: Value) -> Figure {
        Figure::predicate("replace", move |_| Ok(Verdict::Replace(value.clone())))
    }

    // -- and --

    #[test]
    fn test_and_requires_every_figure() {
        let positive = Figure::predicate("positive", |v| {
            Ok(v.as_i64().is_some_and(|n| n > 0).into())
        });
        let figure = Figure::and([int(), positive]);
        assert_eq!(run(&figure, json!(3)).unwrap(), None);
        assert_eq!(error(run(&figure, json!(-3))).code(), &Code::Call);
        assert_eq!(error(run(&figure, json!("3"))).code(), &Code::Type);
    }

    #[test]
    fn test_and_keeps_last_transformed_value() {
        let figure = Figure::and([replace_with(json!(1)), int(), replace_with(json!(2)), int()]);
        assert_eq!(run(&figure, json!(0)).unwrap(), Some(json!(2)));
    }

    #[test]
    fn test_and_runs_every_figure_on_the_original_data() {
        let figure = Figure::and([replace_with(json!("text")), int()]);
        assert_eq!(run(&figure, json!(0)).unwrap(), Some(json!("text")));
    }

    #[test]
    fn test_empty_and_passes() {
        assert_eq!(run(&Figure::and([]), json!(null)).unwrap(), None);
    }

    // -- or --

    #[test]
    fn test_or_first_success_wins() {
        let figure = Figure::or([Figure::literal(1), Figure::literal(2)]).unwrap();
        assert_eq!(run(&figure, json!(2)).unwrap(), None);

        let figure = Figure::or([replace_with(json!("a")), replace_with(json!("b"))]).unwrap();
        assert_eq!(run(&figure, json!(0)).unwrap(), Some(json!("a")));
    }

    #[test]
    fn test_or_reports_last_error() {
        let figure = Figure::or([Figure::literal(1), Figure::literal(2)]).unwrap();
        let err = error(run(&figure, json!(3)));
        assert_eq!(err.code(), &Code::Object);
        assert_eq!(err.info()[0].as_value(), Some(&json!(2)));
        assert!(err.cause().is_none());
    }

    #[test]
    fn test_or_does_not_catch_faults() {
        let figure = Figure::or([faulty("runtime"), Figure::Nil]).unwrap();
        assert!(run(&figure, json!(1)).unwrap_err().as_fault().is_some());
    }

    #[test]
    fn test_or_with_no_alternatives_is_a_figure_error() {
        let checker = Checker::new();
        let failure = check_or(&checker, &[], &json!(1)).unwrap_err();
        assert!(matches!(failure, Failure::Figure(FigureError::EmptyAlternatives)));
    }

    #[test]
    fn test_any_of_characters() {
        let figure = Figure::any_of("abc").unwrap();
        assert!(run(&figure, json!("b")).is_ok());
        let err = error(run(&figure, json!("d")));
        assert_eq!(err.info()[0].as_value(), Some(&json!("c")));
    }

    // -- not --

    #[test]
    fn test_not_returns_original_data() {
        let figure = Figure::not(int());
        assert_eq!(run(&figure, json!("x")).unwrap(), Some(json!("x")));
    }

    #[test]
    fn test_not_rejects_passing_data() {
        let err = error(run(&Figure::not(int()), json!(5)));
        assert_eq!(err.code(), &Code::Not);
        assert!(matches!(err.info()[0].as_figure(), Some(Figure::Type(Kind::Integer))));
        assert_eq!(err.info()[1].as_value(), Some(&json!(5)));
    }

    #[test]
    fn test_double_negation() {
        let figure = Figure::not(Figure::not(int()));
        assert_eq!(run(&figure, json!(5)).unwrap(), Some(json!(5)));
        assert_eq!(error(run(&figure, json!("x"))).code(), &Code::Not);
    }

    #[test]
    fn test_not_propagates_faults() {
        let figure = Figure::not(faulty("runtime"));
        assert!(run(&figure, json!(1)).unwrap_err().as_fault().is_some());
    }

    // -- except --

    #[test]
    fn test_except_converts_listed_faults() {
        let figure = Figure::except(faulty("type_error"), ["type_error", "value_error"]);
        let err = error(run(&figure, json!(7)));
        assert_eq!(err.code(), &Code::Except);
        assert_eq!(
            err.info()[1].as_value(),
            Some(&json!(["type_error", "value_error"]))
        );
        assert_eq!(err.info()[2].as_value(), Some(&json!(7)));
    }

    #[test]
    fn test_except_passes_other_faults_through() {
        let figure = Figure::except(faulty("runtime"), ["type_error"]);
        let failure = run(&figure, json!(7)).unwrap_err();
        assert_eq!(failure.as_fault().map(|f| f.kind.as_str()), Some("runtime"));
    }

    #[test]
    fn test_except_leaves_results_and_errors_alone() {
        let figure = Figure::except(replace_with(json!(9)), ["type_error"]);
        assert_eq!(run(&figure, json!(0)).unwrap(), Some(json!(9)));

        let figure = Figure::except(int(), ["type_error"]);
        assert_eq!(error(run(&figure, json!("x"))).code(), &Code::Type);
    }

    // -- convert --

    #[test]
    fn test_convert_checks_transformed_value() {
        let negate = Transform::new("negate", |v| Ok(json!(-v.as_i64().unwrap_or(0))));
        let positive = Figure::predicate("positive", |v| {
            Ok(v.as_i64().is_some_and(|n| n > 0).into())
        });
        let figure = Figure::convert(negate, positive);
        assert_eq!(run(&figure, json!(-4)).unwrap(), None);
        assert_eq!(error(run(&figure, json!(4))).code(), &Code::Call);
    }

    #[test]
    fn test_convert_hides_inner_result() {
        let identity = Transform::new("identity", |v| Ok(v.clone()));
        let figure = Figure::convert(identity, replace_with(json!("hidden")));
        assert_eq!(run(&figure, json!(1)).unwrap(), None);
    }

    #[test]
    fn test_convert_propagates_transform_failures() {
        let broken = Transform::new("broken", |_| Err(Fault::new("type_error", "no").into()));
        let figure = Figure::convert(broken, Figure::Nil);
        assert!(run(&figure, json!(1)).unwrap_err().as_fault().is_some());
    }

    // -- route --

    #[test]
    fn test_route_selects_branch() {
        let figure = Figure::route_else(
            Figure::Type(Kind::String),
            Figure::literal("yes"),
            int(),
        );
        assert_eq!(run(&figure, json!("yes")).unwrap(), None);
        assert_eq!(error(run(&figure, json!("no"))).code(), &Code::Object);
        assert_eq!(run(&figure, json!(5)).unwrap(), None);
        assert_eq!(error(run(&figure, json!(null))).code(), &Code::Type);
    }

    #[test]
    fn test_route_defaults_failure_branch_to_nil() {
        let figure = Figure::route(Figure::Type(Kind::String), Figure::literal("yes"));
        assert_eq!(run(&figure, json!(5)).unwrap(), None);
    }

    #[test]
    fn test_route_returns_branch_result() {
        let figure = Figure::route(int(), replace_with(json!("int")));
        assert_eq!(run(&figure, json!(1)).unwrap(), Some(json!("int")));
    }

    #[test]
    fn test_route_condition_faults_propagate() {
        let figure = Figure::route(faulty("runtime"), Figure::Nil);
        assert!(run(&figure, json!(1)).unwrap_err().as_fault().is_some());
    }

    // -- wrap --

    #[test]
    fn test_wrap_collapses_chain() {
        let inner = Figure::mapping([("a", int())]);
        let figure = Figure::wrap(inner, "config", [Info::from("bad config")]);
        let err = error(run(&figure, json!({"a": "x"})));
        assert_eq!(err.code(), &Code::custom("config"));
        assert_eq!(err.info()[0].as_value(), Some(&json!("bad config")));
        assert!(err.cause().is_none());
    }

    #[test]
    fn test_wrap_passes_results_and_faults() {
        let figure = Figure::wrap(Figure::mapping([("a", int())]), "config", []);
        assert_eq!(run(&figure, json!({"a": 1})).unwrap(), Some(json!({"a": 1})));

        let figure = Figure::wrap(faulty("runtime"), "config", []);
        assert!(run(&figure, json!(1)).unwrap_err().as_fault().is_some());
    }
}
