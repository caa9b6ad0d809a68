//! Post-parse range checks over a whole case.

use log::debug;

use crate::case::{Case, SUPPORTED_REVISION};
use crate::check::check_boolean;
use crate::record::Validate;
use crate::warning::Warning;

/// Longest description record the format allows.
pub const DESCRIPTION_LIMIT: usize = 60;

/// Checks every record of a case and returns one warning per problem.
///
/// Nothing is rejected; the case is left unchanged.
pub fn validate_case(case: &Case) -> Vec<Warning> {
    let mut warnings = Vec::new();

    warnings.extend(check_boolean(case.ic, "ic", "case", "header"));
    if case.rev != SUPPORTED_REVISION {
        warnings.push(Warning::UnsupportedRevision {
            given: case.rev.to_string(),
            supported: SUPPORTED_REVISION,
        });
    }
    for (record, text) in [(1, &case.record1), (2, &case.record2)] {
        let length = text.chars().count();
        if length > DESCRIPTION_LIMIT {
            warnings.push(Warning::DescriptionTooLong {
                record,
                length,
                limit: DESCRIPTION_LIMIT,
            });
        }
    }

    validate_all(&case.buses, &mut warnings);
    validate_all(&case.loads, &mut warnings);
    validate_all(&case.fixed_shunts, &mut warnings);
    validate_all(&case.generators, &mut warnings);
    validate_all(&case.branches, &mut warnings);
    validate_all(&case.transformers, &mut warnings);
    validate_all(&case.areas, &mut warnings);
    validate_all(&case.two_terminal_dc_lines, &mut warnings);
    validate_all(&case.vsc_dc_lines, &mut warnings);
    validate_all(&case.impedance_corrections, &mut warnings);
    validate_all(&case.multi_terminal_dc_lines, &mut warnings);
    validate_all(&case.line_groupings, &mut warnings);
    validate_all(&case.zones, &mut warnings);
    validate_all(&case.interarea_transfers, &mut warnings);
    validate_all(&case.owners, &mut warnings);
    validate_all(&case.facts_devices, &mut warnings);
    validate_all(&case.switched_shunts, &mut warnings);
    validate_all(&case.induction_machines, &mut warnings);

    debug!("Validation found {} warnings", warnings.len());
    warnings
}

fn validate_all<V: Validate>(records: &[V], warnings: &mut Vec<Warning>) {
    for (index, record) in records.iter().enumerate() {
        record.validate(index, warnings);
    }
}

impl Case {
    /// Same as [`validate_case`].
    pub fn validate(&self) -> Vec<Warning> {
        validate_case(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::Bus;

    #[test]
    fn clean_case_has_no_warnings() {
        let mut case = Case::default();
        case.buses.push(Bus::new(1, "ONE", 138.0));
        assert!(case.validate().is_empty());
    }

    #[test]
    fn long_description_is_reported() {
        let mut case = Case::default();
        case.record2 = "X".repeat(61);
        assert_eq!(
            case.validate(),
            vec![Warning::DescriptionTooLong {
                record: 2,
                length: 61,
                limit: DESCRIPTION_LIMIT
            }]
        );
    }

    #[test]
    fn bus_area_out_of_range() {
        let mut case = Case::default();
        let mut bus = Bus::new(5, "FIVE", 69.0);
        bus.area = 10_000;
        case.buses.push(bus);
        let warnings = case.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field(), Some("area"));
    }
}
