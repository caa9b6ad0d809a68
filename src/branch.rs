use serde::{Deserialize, Serialize};
use std::fmt;

use crate::check::Checker;
use crate::error::FieldError;
use crate::fields::{Fields, LineWriter, Ownership};
use crate::record::{RawLine, Validate};
use crate::warning::Warning;

/// Non-transformer branch (line, breaker or switch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    // Identifiers; a negative `j` puts the meter on the from end
    pub i: i32,
    pub j: i32,
    pub ckt: String,

    // Impedance data
    pub r: f64,
    pub x: f64,
    pub b: f64,

    // Limits
    pub ratea: f64,
    pub rateb: f64,
    pub ratec: f64,

    // Line shunts
    pub gi: f64,
    pub bi: f64,
    pub gj: f64,
    pub bj: f64,

    pub st: i32,
    pub met: i32,
    pub len: f64,
    #[serde(flatten)]
    pub owners: Ownership,
}

impl Branch {
    pub fn is_from_metered(&self) -> bool {
        self.met <= 1
    }

    pub fn is_breaker(&self) -> bool {
        self.ckt.contains('@')
    }

    pub fn is_switch(&self) -> bool {
        self.ckt.contains('#')
    }
}

impl RawLine for Branch {
    const MIN_FIELDS: usize = 24;
    const MAX_FIELDS: usize = 24;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            i: f.int("i")?,
            j: f.int("j")?,
            ckt: f.string_or("ckt", "1")?,
            r: f.float_or("r", 0.0)?,
            x: f.float("x")?,
            b: f.float_or("b", 0.0)?,
            ratea: f.float_or("ratea", 0.0)?,
            rateb: f.float_or("rateb", 0.0)?,
            ratec: f.float_or("ratec", 0.0)?,
            gi: f.float_or("gi", 0.0)?,
            bi: f.float_or("bi", 0.0)?,
            gj: f.float_or("gj", 0.0)?,
            bj: f.float_or("bj", 0.0)?,
            st: f.int_or("st", 1)?,
            met: f.int_or("met", 1)?,
            len: f.float_or("len", 0.0)?,
            owners: Ownership::read(f)?,
        })
    }

    fn write(&self, line: &mut LineWriter) {
        line.int(self.i)
            .int(self.j)
            .string(&self.ckt)
            .float(self.r)
            .float(self.x)
            .float(self.b)
            .float(self.ratea)
            .float(self.rateb)
            .float(self.ratec)
            .float(self.gi)
            .float(self.bi)
            .float(self.gj)
            .float(self.bj)
            .int(self.st)
            .int(self.met)
            .float(self.len);
        self.owners.write(line);
    }
}

impl Validate for Branch {
    fn validate(&self, index: usize, warnings: &mut Vec<Warning>) {
        let mut check = Checker::new("branch", index, warnings);
        check
            .boolean("st", self.st)
            .bus("i", self.i)
            .bus("j", self.j.abs())
            .owners(&self.owners);
        if self.ckt.starts_with('&') {
            let id = check.id().to_string();
            check.push(Warning::ReservedIdentifier {
                component: "branch",
                id,
                field: "ckt",
                value: self.ckt.clone(),
                reason: "cannot start with '&'",
            });
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Branch {:>6} -> {:<6} CKT {:<3} R={:>10.6}  X={:>10.6}  RateA={:>7.1}",
            self.i,
            self.j,
            self.ckt.trim(),
            self.r,
            self.x,
            self.ratea
        )
    }
}

/// A chain of branches joined through dummy buses.
///
/// `dummies` holds one to [`MultiSectionLineGrouping::MAX_DUMMIES`] bus ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiSectionLineGrouping {
    pub i: i32,
    pub j: i32,
    pub id: String,
    pub met: i32,
    pub dummies: Vec<i32>,
}

impl MultiSectionLineGrouping {
    pub const MAX_DUMMIES: usize = 9;
}

impl RawLine for MultiSectionLineGrouping {
    const MIN_FIELDS: usize = 5;
    const MAX_FIELDS: usize = 4 + Self::MAX_DUMMIES;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        let mut grouping = Self {
            i: f.int("i")?,
            j: f.int("j")?,
            id: f.string_or("id", "&1")?,
            met: f.int_or("met", 1)?,
            dummies: Vec::new(),
        };
        while f.has_more() && grouping.dummies.len() < Self::MAX_DUMMIES {
            grouping.dummies.push(f.int("dum")?);
        }
        Ok(grouping)
    }

    fn write(&self, line: &mut LineWriter) {
        line.int(self.i)
            .int(self.j)
            .string(&self.id)
            .int(self.met);
        for dummy in &self.dummies {
            line.int(*dummy);
        }
    }
}

impl Validate for MultiSectionLineGrouping {
    fn validate(&self, index: usize, warnings: &mut Vec<Warning>) {
        let mut check = Checker::new("multi-section line", index, warnings);
        check
            .bus("i", self.i)
            .bus("j", self.j.abs())
            .range("met", self.met, 1.0, 2.0);
        for dummy in &self.dummies {
            check.bus("dum", *dummy);
        }
        if !self.id.starts_with('&') {
            let id = check.id().to_string();
            check.push(Warning::ReservedIdentifier {
                component: "multi-section line",
                id,
                field: "id",
                value: self.id.clone(),
                reason: "must start with '&'",
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch_tokens() -> Vec<&'static str> {
        vec![
            "1", "2", "'@1'", "0.01", "0.1", "0.02", "100.0", "120.0", "150.0", "0.0", "0.0",
            "0.0", "0.0", "1", "1", "12.5", "1", "1.0", "0", "1.0", "0", "1.0", "0", "1.0",
        ]
    }

    #[test]
    fn breaker_and_switch_are_read_from_ckt() {
        let branch = Branch::from_tokens(&branch_tokens()).unwrap();
        assert!(branch.is_breaker());
        assert!(!branch.is_switch());
        assert!(branch.is_from_metered());
    }

    #[test]
    fn blank_reactance_is_malformed() {
        let mut tokens = branch_tokens();
        tokens[4] = "";
        assert!(matches!(
            Branch::from_tokens(&tokens),
            Err(FieldError::Malformed { field: "x", .. })
        ));
    }

    #[test]
    fn grouping_keeps_dummy_count() {
        let grouping =
            MultiSectionLineGrouping::from_tokens(&["1", "4", "'&1'", "1", "2", "3"]).unwrap();
        assert_eq!(grouping.dummies, vec![2, 3]);
        assert_eq!(grouping.to_raw(), "1, 4, '&1', 1, 2, 3");
    }

    #[test]
    fn ampersand_circuit_is_reported() {
        let mut tokens = branch_tokens();
        tokens[2] = "'&2'";
        let branch = Branch::from_tokens(&tokens).unwrap();
        let mut warnings = Vec::new();
        branch.validate(3, &mut warnings);
        assert!(warnings
            .iter()
            .any(|w| matches!(w, Warning::ReservedIdentifier { field: "ckt", .. })));
    }
}
