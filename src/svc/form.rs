//! Declarative form-to-struct mapping.
//!
//! # Data Flow
//! ```text
//! body ParamGroup
//!     → skip fields already consumed (port builder)
//!     → for each row of the target's FieldTable, pick the canonical name
//!       if present, else the first alias present
//!     → run the typed setter
//!     → FormReport (applied / skipped / shadowed / ignored)
//! ```
//!
//! # Design Decisions
//! - One static table per target type; adding a field means adding a row
//! - Names match exactly (case-sensitive) against the canonical name or an alias
//! - The canonical name beats its aliases; losers are reported as shadowed
//! - Unknown names are ignored so callers may send extra fields
//! - Coercion failures abort only for `Strict` destinations

use crate::svc::error::ApiError;
use crate::svc::params::ParamGroup;

/// Typed setter: coerce `raw` and store it on the target, or explain why not.
pub type Setter<T> = fn(&mut T, &str) -> Result<(), String>;

/// What happens when a present value does not coerce.
///
/// Neither variant makes the field mandatory; absent fields are never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Malformed values are reported as `InvalidFormat`.
    Strict,
    /// Malformed values are skipped.
    Lenient,
}

/// One row of a field table.
pub struct FieldSpec<T: 'static> {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub coercion: Coercion,
    pub set: Setter<T>,
}

impl<T: 'static> FieldSpec<T> {
    fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|alias| *alias == name)
    }

    /// Canonical name first, then aliases in declaration order.
    fn candidates(&self) -> impl Iterator<Item = &'static str> {
        let aliases: &'static [&'static str] = self.aliases;
        std::iter::once(self.name).chain(aliases.iter().copied())
    }
}

/// The full set of form-mappable fields for a target type.
pub struct FieldTable<T: 'static> {
    fields: &'static [FieldSpec<T>],
}

impl<T: 'static> FieldTable<T> {
    pub const fn new(fields: &'static [FieldSpec<T>]) -> Self {
        Self { fields }
    }

    /// Rows in table order.
    pub fn iter(&self) -> impl Iterator<Item = &'static FieldSpec<T>> {
        let fields: &'static [FieldSpec<T>] = self.fields;
        fields.iter()
    }

    /// Find the row answering to `name`.
    pub fn lookup(&self, name: &str) -> Option<&'static FieldSpec<T>> {
        self.iter().find(|spec| spec.answers_to(name))
    }

    /// Canonical names in table order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.iter().map(|spec| spec.name)
    }
}

/// Types that can be populated from a form body.
pub trait FormTarget: Sized + 'static {
    fn field_table() -> &'static FieldTable<Self>;
}

/// Outcome of one mapping pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormReport {
    /// Canonical names that were assigned, in table order.
    pub applied: Vec<&'static str>,
    /// Lenient fields whose value did not coerce.
    pub skipped: Vec<String>,
    /// Names not used because another name for the same field won.
    pub shadowed: Vec<String>,
    /// Names with no destination in the table.
    pub ignored: Vec<String>,
}

/// Assign every body field not in `consumed` onto `target`.
pub fn map_form<T: FormTarget>(
    body: &ParamGroup,
    target: &mut T,
    consumed: &[&str],
) -> Result<FormReport, ApiError> {
    let table = T::field_table();
    let mut report = FormReport::default();
    let available = |name: &str| !consumed.iter().any(|c| *c == name) && body.first(name).is_some();

    for spec in table.iter() {
        let mut present = spec.candidates().filter(|&name| available(name));
        let Some(chosen) = present.next() else {
            continue;
        };
        report.shadowed.extend(present.map(str::to_string));

        let raw = body.first(chosen).unwrap_or_default();
        match (spec.set)(target, raw) {
            Ok(()) => report.applied.push(spec.name),
            Err(reason) => match spec.coercion {
                Coercion::Lenient => report.skipped.push(chosen.to_string()),
                Coercion::Strict => {
                    return Err(ApiError::InvalidFormat {
                        field: chosen.to_string(),
                        value: raw.to_string(),
                        reason,
                    })
                }
            },
        }
    }

    report.ignored = body
        .iter()
        .map(|(name, _)| name)
        .filter(|name| !consumed.iter().any(|c| c == name) && table.lookup(name).is_none())
        .map(str::to_string)
        .collect();

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Probe {
        label: String,
        weight: i64,
        limit: Option<u8>,
    }

    fn set_label(p: &mut Probe, raw: &str) -> Result<(), String> {
        p.label = raw.to_string();
        Ok(())
    }

    fn set_weight(p: &mut Probe, raw: &str) -> Result<(), String> {
        p.weight = raw.parse().map_err(|e: std::num::ParseIntError| e.to_string())?;
        Ok(())
    }

    fn set_limit(p: &mut Probe, raw: &str) -> Result<(), String> {
        p.limit = Some(raw.parse().map_err(|e: std::num::ParseIntError| e.to_string())?);
        Ok(())
    }

    static PROBE_SPECS: &[FieldSpec<Probe>] = &[
        FieldSpec { name: "label", aliases: &["title"], coercion: Coercion::Lenient, set: set_label },
        FieldSpec { name: "weight", aliases: &[], coercion: Coercion::Strict, set: set_weight },
        FieldSpec { name: "limit", aliases: &[], coercion: Coercion::Lenient, set: set_limit },
    ];

    static PROBE_FIELDS: FieldTable<Probe> = FieldTable::new(PROBE_SPECS);

    impl FormTarget for Probe {
        fn field_table() -> &'static FieldTable<Self> {
            &PROBE_FIELDS
        }
    }

    fn group(pairs: &[(&str, &str)]) -> ParamGroup {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_maps_known_and_ignores_unknown() {
        let mut probe = Probe::default();
        let report = map_form(&group(&[("title", "x"), ("weight", "3"), ("extra", "1")]), &mut probe, &[]).unwrap();
        assert_eq!(probe.label, "x");
        assert_eq!(probe.weight, 3);
        assert_eq!(report.applied, vec!["label", "weight"]);
        assert_eq!(report.ignored, vec!["extra".to_string()]);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut probe = Probe::default();
        let report = map_form(&group(&[("Label", "x")]), &mut probe, &[]).unwrap();
        assert!(probe.label.is_empty());
        assert_eq!(report.ignored, vec!["Label".to_string()]);
    }

    #[test]
    fn test_optional_coercion_failure_is_skipped() {
        let mut probe = Probe::default();
        let report = map_form(&group(&[("limit", "999")]), &mut probe, &[]).unwrap();
        assert_eq!(probe.limit, None);
        assert_eq!(report.skipped, vec!["limit".to_string()]);
    }

    #[test]
    fn test_required_coercion_failure_aborts() {
        let mut probe = Probe::default();
        let err = map_form(&group(&[("weight", "heavy")]), &mut probe, &[]).unwrap_err();
        assert!(matches!(err, ApiError::InvalidFormat { ref field, ref value, .. } if field == "weight" && value == "heavy"));
    }

    #[test]
    fn test_consumed_fields_are_not_seen() {
        let mut probe = Probe::default();
        let report = map_form(&group(&[("weight", "heavy"), ("label", "y")]), &mut probe, &["weight"]).unwrap();
        assert_eq!(probe.weight, 0);
        assert_eq!(report.applied, vec!["label"]);
        assert!(report.ignored.is_empty());
    }

    #[test]
    fn test_canonical_name_beats_alias() {
        let mut probe = Probe::default();
        let report = map_form(&group(&[("title", "alias"), ("label", "canonical")]), &mut probe, &[]).unwrap();
        assert_eq!(probe.label, "canonical");
        assert_eq!(report.applied, vec!["label"]);
        assert_eq!(report.shadowed, vec!["title".to_string()]);
    }

    #[test]
    fn test_table_lookup() {
        let table = Probe::field_table();
        assert_eq!(table.lookup("title").map(|s| s.name), Some("label"));
        assert!(table.lookup("missing").is_none());
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["label", "weight", "limit"]);
    }
}
