//! Range predicates used by the validator. None of these fail; they only
//! describe what is out of bounds.

use std::fmt::Display;

use crate::fields::Ownership;
use crate::warning::Warning;

pub const BUS_ID: (f64, f64) = (1.0, 999_997.0);
pub const AREA_ID: (f64, f64) = (1.0, 9_999.0);

pub fn check_range(
    value: impl Into<f64>,
    field: &'static str,
    component: &'static str,
    id: impl Display,
    lower: f64,
    upper: f64,
) -> Option<Warning> {
    let value = value.into();
    if value >= lower && value <= upper {
        return None;
    }
    Some(Warning::Range {
        component,
        id: id.to_string(),
        field,
        value,
        lower,
        upper,
    })
}

pub fn check_boolean(
    value: i32,
    field: &'static str,
    component: &'static str,
    id: impl Display,
) -> Option<Warning> {
    check_range(value, field, component, id, 0.0, 1.0)
}

/// Owner ids must lie in `1..=9999` and fractions in `0.0..=1.0`.
pub fn check_owners(owners: &Ownership, component: &'static str, id: impl Display) -> Vec<Warning> {
    const IDS: [&str; 4] = ["o1", "o2", "o3", "o4"];
    const FRACTIONS: [&str; 4] = ["f1", "f2", "f3", "f4"];

    let id = id.to_string();
    let mut warnings = Vec::new();
    for (n, (owner, fraction)) in owners.pairs().into_iter().enumerate() {
        warnings.extend(check_range(owner, IDS[n], component, &id, AREA_ID.0, AREA_ID.1));
        warnings.extend(check_range(fraction, FRACTIONS[n], component, &id, 0.0, 1.0));
    }
    warnings
}

/// Collects the checks of one component into a warning list.
pub struct Checker<'a> {
    component: &'static str,
    id: String,
    warnings: &'a mut Vec<Warning>,
}

impl<'a> Checker<'a> {
    pub fn new(component: &'static str, id: impl Display, warnings: &'a mut Vec<Warning>) -> Self {
        Self {
            component,
            id: id.to_string(),
            warnings,
        }
    }

    pub fn range(
        &mut self,
        field: &'static str,
        value: impl Into<f64>,
        lower: f64,
        upper: f64,
    ) -> &mut Self {
        self.warnings
            .extend(check_range(value, field, self.component, &self.id, lower, upper));
        self
    }

    pub fn bus(&mut self, field: &'static str, value: i32) -> &mut Self {
        self.range(field, value, BUS_ID.0, BUS_ID.1)
    }

    /// Area, zone and owner ids share the same bounds.
    pub fn area(&mut self, field: &'static str, value: i32) -> &mut Self {
        self.range(field, value, AREA_ID.0, AREA_ID.1)
    }

    pub fn boolean(&mut self, field: &'static str, value: i32) -> &mut Self {
        self.warnings
            .extend(check_boolean(value, field, self.component, &self.id));
        self
    }

    pub fn owners(&mut self, owners: &Ownership) -> &mut Self {
        self.warnings
            .extend(check_owners(owners, self.component, &self.id));
        self
    }

    pub fn push(&mut self, warning: Warning) -> &mut Self {
        self.warnings.push(warning);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}
