//! # Data Presence Detector
//!
//! Turns loosely-typed configuration payloads into boolean presence signals.
//!
//! The host data layer hands over the same logical field in several shapes:
//! a plain array, a JSON-encoded string, or an already-parsed wrapper object.
//! Each payload is classified into a [`SelectionShape`] and resolved with an
//! exhaustive match.
//!
//! ## Error Policy
//!
//! Malformed JSON is the only recoverable condition. The parse step returns
//! `Err(ReadinessError::MalformedJson)`, which is recorded in a
//! [`Diagnostics`] sink and collapsed to an empty/absent default. The
//! `has_*` functions never fail.

use crate::ReadinessError;
use crate::primitives::{
    COUNTRIES_KEY, CURRENCIES_KEY, FINANCIAL_YEAR_FIELDS, FINANCIAL_YEAR_KEY, MODULES_KEY,
    SELECTED_COUNTRIES_KEY, SELECTED_CURRENCIES_KEY, WEEK_SETUP_FIELDS, WEEK_SETUP_KEY,
};
use serde_json::{Map, Value};
use std::num::FpCategory;

// =============================================================================
// DIAGNOSTICS
// =============================================================================

/// Collects recoverable problems found while inspecting payloads.
///
/// The CORE does not log. Callers that care (the CLI) drain this sink into
/// their own logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    issues: Vec<ReadinessError>,
}

impl Diagnostics {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem.
    pub fn record(&mut self, issue: ReadinessError) {
        self.issues.push(issue);
    }

    /// Recorded problems, in the order they were found.
    #[must_use]
    pub fn issues(&self) -> &[ReadinessError] {
        &self.issues
    }

    /// Check if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Take ownership of the recorded problems.
    #[must_use]
    pub fn into_issues(self) -> Vec<ReadinessError> {
        self.issues
    }

    /// Collapse a parse result to its value, or record the error and fall back.
    fn collapse<T>(&mut self, result: Result<T, ReadinessError>, fallback: T) -> T {
        match result {
            Ok(v) => v,
            Err(e) => {
                self.record(e);
                fallback
            }
        }
    }
}

// =============================================================================
// SELECTION SHAPES
// =============================================================================

/// Which selection a payload carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    Countries,
    Currencies,
}

impl SelectionKind {
    /// Key read from encoded payloads and probed first on wrapper objects.
    #[must_use]
    pub fn selected_key(&self) -> &'static str {
        match self {
            SelectionKind::Countries => SELECTED_COUNTRIES_KEY,
            SelectionKind::Currencies => SELECTED_CURRENCIES_KEY,
        }
    }

    /// Key probed on wrapper objects when the selected key is missing or null.
    #[must_use]
    pub fn fallback_key(&self) -> &'static str {
        match self {
            SelectionKind::Countries => COUNTRIES_KEY,
            SelectionKind::Currencies => CURRENCIES_KEY,
        }
    }
}

/// The shape a selection payload arrived in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionShape<'a> {
    /// Already a sequence of identifiers.
    List(&'a [Value]),
    /// JSON text that should decode to a wrapper object.
    Encoded(&'a str),
    /// An already-parsed wrapper object.
    Wrapped(&'a Map<String, Value>),
    /// Null, booleans, numbers.
    Absent,
}

impl<'a> SelectionShape<'a> {
    /// Classify a raw payload.
    #[must_use]
    pub fn classify(raw: &'a Value) -> Self {
        match raw {
            Value::Array(items) => SelectionShape::List(items),
            Value::String(text) => SelectionShape::Encoded(text),
            Value::Object(map) => SelectionShape::Wrapped(map),
            Value::Null | Value::Bool(_) | Value::Number(_) => SelectionShape::Absent,
        }
    }
}

/// Decode a JSON-encoded selection and read its `selected*` key.
///
/// A decoded value without that key, or whose key is not an array, yields an
/// empty sequence. Only undecodable text is an error.
pub fn parse_encoded_selection(
    kind: SelectionKind,
    text: &str,
) -> Result<Vec<Value>, ReadinessError> {
    let decoded: Value =
        serde_json::from_str(text).map_err(|e| ReadinessError::MalformedJson {
            field: kind.selected_key(),
            reason: e.to_string(),
        })?;

    Ok(decoded
        .get(kind.selected_key())
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default())
}

/// Read a wrapper object: the selected key wins unless it is missing or null.
fn read_wrapped(kind: SelectionKind, map: &Map<String, Value>) -> Vec<Value> {
    let probed = match map.get(kind.selected_key()) {
        Some(Value::Null) | None => map.get(kind.fallback_key()),
        found => found,
    };

    probed
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Resolve a selection payload to its identifiers, recording parse failures.
pub fn resolve_selection_with(
    kind: SelectionKind,
    raw: &Value,
    diagnostics: &mut Diagnostics,
) -> Vec<Value> {
    match SelectionShape::classify(raw) {
        SelectionShape::List(items) => items.to_vec(),
        SelectionShape::Encoded(text) => {
            diagnostics.collapse(parse_encoded_selection(kind, text), Vec::new())
        }
        SelectionShape::Wrapped(map) => read_wrapped(kind, map),
        SelectionShape::Absent => Vec::new(),
    }
}

/// Resolve a selection payload to its identifiers.
#[must_use]
pub fn resolve_selection(kind: SelectionKind, raw: &Value) -> Vec<Value> {
    resolve_selection_with(kind, raw, &mut Diagnostics::new())
}

// =============================================================================
// TRUTHINESS
// =============================================================================

/// Host-side truthiness of a JSON value.
///
/// `null`, `false`, `0` and `""` are falsy. Everything else, including empty
/// arrays and objects, is truthy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n
            .as_f64()
            .is_some_and(|f| !matches!(f.classify(), FpCategory::Zero | FpCategory::Nan)),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn all_fields_truthy(record: Option<&Value>, fields: &[&str]) -> bool {
    record.is_some_and(|r| {
        fields
            .iter()
            .all(|field| r.get(*field).is_some_and(is_truthy))
    })
}

// =============================================================================
// PRESENCE CHECKS
// =============================================================================

/// Both selections resolve to non-empty sequences, recording parse failures.
pub fn check_countries_and_currencies(
    countries: &Value,
    currencies: &Value,
    diagnostics: &mut Diagnostics,
) -> bool {
    // Both inputs are resolved even when the first is empty.
    let countries = resolve_selection_with(SelectionKind::Countries, countries, diagnostics);
    let currencies = resolve_selection_with(SelectionKind::Currencies, currencies, diagnostics);

    !countries.is_empty() && !currencies.is_empty()
}

/// Both selections resolve to non-empty sequences.
#[must_use]
pub fn has_countries_and_currencies(countries: &Value, currencies: &Value) -> bool {
    check_countries_and_currencies(countries, currencies, &mut Diagnostics::new())
}

/// All six period-setup leaf fields are truthy.
#[must_use]
pub fn has_period_setup(record: &Value) -> bool {
    if record.is_null() {
        return false;
    }

    let has_financial_year = all_fields_truthy(record.get(FINANCIAL_YEAR_KEY), &FINANCIAL_YEAR_FIELDS);
    let has_week_setup = all_fields_truthy(record.get(WEEK_SETUP_KEY), &WEEK_SETUP_FIELDS);

    has_financial_year && has_week_setup
}

/// Decode a JSON-encoded modules list.
pub fn parse_modules(text: &str) -> Result<Value, ReadinessError> {
    serde_json::from_str(text).map_err(|e| ReadinessError::MalformedJson {
        field: MODULES_KEY,
        reason: e.to_string(),
    })
}

/// Modules resolve to a non-empty array, recording parse failures.
pub fn check_modules(modules: &Value, diagnostics: &mut Diagnostics) -> bool {
    if !is_truthy(modules) {
        return false;
    }

    match modules {
        Value::String(text) => match parse_modules(text) {
            Ok(decoded) => is_non_empty_array(&decoded),
            Err(e) => {
                diagnostics.record(e);
                false
            }
        },
        other => is_non_empty_array(other),
    }
}

fn is_non_empty_array(value: &Value) -> bool {
    value.as_array().is_some_and(|items| !items.is_empty())
}

/// Modules resolve to a non-empty array.
#[must_use]
pub fn has_modules(modules: &Value) -> bool {
    check_modules(modules, &mut Diagnostics::new())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_period_setup() -> Value {
        json!({
            "financialYear": { "name": "FY25", "startMonth": "April", "endMonth": "March" },
            "weekSetup": { "name": "Standard", "monthForWeekOne": "April", "startingDayOfWeek": "Monday" }
        })
    }

    #[test]
    fn classify_covers_every_shape() {
        assert!(matches!(SelectionShape::classify(&json!([1])), SelectionShape::List(_)));
        assert!(matches!(SelectionShape::classify(&json!("[]")), SelectionShape::Encoded(_)));
        assert!(matches!(SelectionShape::classify(&json!({})), SelectionShape::Wrapped(_)));
        assert_eq!(SelectionShape::classify(&json!(null)), SelectionShape::Absent);
        assert_eq!(SelectionShape::classify(&json!(7)), SelectionShape::Absent);
    }

    #[test]
    fn arrays_are_used_as_is() {
        assert!(has_countries_and_currencies(&json!(["IN"]), &json!(["INR"])));
        assert!(!has_countries_and_currencies(&json!([]), &json!([])));
        assert!(!has_countries_and_currencies(&json!(["IN"]), &json!([])));
    }

    #[test]
    fn encoded_strings_are_decoded() {
        assert!(has_countries_and_currencies(
            &json!(r#"{"selectedCountries":[1]}"#),
            &json!(r#"{"selectedCurrencies":[1]}"#)
        ));
    }

    #[test]
    fn encoded_string_ignores_fallback_key() {
        let resolved = resolve_selection(SelectionKind::Countries, &json!(r#"{"countries":[1]}"#));
        assert!(resolved.is_empty());
    }

    #[test]
    fn malformed_json_is_absent_and_recorded() {
        let mut diagnostics = Diagnostics::new();
        let present =
            check_countries_and_currencies(&json!("not json"), &json!("not json"), &mut diagnostics);

        assert!(!present);
        assert_eq!(diagnostics.issues().len(), 2);
        assert!(matches!(
            diagnostics.issues()[0],
            ReadinessError::MalformedJson { field: "selectedCountries", .. }
        ));
    }

    #[test]
    fn one_malformed_input_does_not_affect_the_other() {
        let countries = resolve_selection(SelectionKind::Countries, &json!("{broken"));
        let currencies = resolve_selection(SelectionKind::Currencies, &json!(["USD"]));
        assert!(countries.is_empty());
        assert_eq!(currencies, vec![json!("USD")]);
    }

    #[test]
    fn wrapped_object_prefers_selected_key() {
        let raw = json!({ "selectedCountries": [], "countries": ["IN"] });
        assert!(resolve_selection(SelectionKind::Countries, &raw).is_empty());
    }

    #[test]
    fn wrapped_object_falls_back_on_null_or_missing() {
        let with_null = json!({ "selectedCurrencies": null, "currencies": ["EUR"] });
        let missing = json!({ "currencies": ["EUR"] });
        assert_eq!(resolve_selection(SelectionKind::Currencies, &with_null).len(), 1);
        assert_eq!(resolve_selection(SelectionKind::Currencies, &missing).len(), 1);
    }

    #[test]
    fn non_array_field_resolves_empty() {
        let raw = json!({ "selectedCountries": "IN" });
        assert!(resolve_selection(SelectionKind::Countries, &raw).is_empty());
    }

    #[test]
    fn truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(1), json!(-2.5), json!("x"), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn period_setup_complete_record() {
        assert!(has_period_setup(&full_period_setup()));
    }

    #[test]
    fn period_setup_null_is_absent() {
        assert!(!has_period_setup(&Value::Null));
    }

    #[test]
    fn period_setup_missing_any_leaf_is_absent() {
        for (section, fields) in [
            (FINANCIAL_YEAR_KEY, FINANCIAL_YEAR_FIELDS),
            (WEEK_SETUP_KEY, WEEK_SETUP_FIELDS),
        ] {
            for field in fields {
                let mut record = full_period_setup();
                if let Some(sub) = record.get_mut(section).and_then(Value::as_object_mut) {
                    sub.remove(field);
                }
                assert!(!has_period_setup(&record), "missing {section}.{field}");
            }
        }
    }

    #[test]
    fn period_setup_missing_section_is_absent() {
        let record = json!({ "financialYear": { "name": "FY", "startMonth": 4, "endMonth": 3 } });
        assert!(!has_period_setup(&record));
    }

    #[test]
    fn period_setup_empty_string_leaf_is_absent() {
        let mut record = full_period_setup();
        record["weekSetup"]["name"] = json!("");
        assert!(!has_period_setup(&record));
    }

    #[test]
    fn modules_encoded_and_plain() {
        assert!(!has_modules(&json!("[]")));
        assert!(has_modules(&json!(r#"[{"id":1}]"#)));
        assert!(has_modules(&json!([{ "id": 1 }])));
        assert!(!has_modules(&json!([])));
    }

    #[test]
    fn modules_falsy_and_non_array() {
        assert!(!has_modules(&Value::Null));
        assert!(!has_modules(&json!("")));
        assert!(!has_modules(&json!({ "id": 1 })));
        assert!(!has_modules(&json!(r#"{"id":1}"#)));
    }

    #[test]
    fn modules_bad_json_is_recorded() {
        let mut diagnostics = Diagnostics::new();
        assert!(!check_modules(&json!("bad json"), &mut diagnostics));
        assert!(matches!(
            diagnostics.into_issues().as_slice(),
            [ReadinessError::MalformedJson { field: "modules", .. }]
        ));
    }
}
