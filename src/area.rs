//! Interchange areas, zones, owners and scheduled transfers between areas.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bus::BLANK_NAME;
use crate::check::Checker;
use crate::error::FieldError;
use crate::fields::{Fields, LineWriter};
use crate::record::{RawLine, Validate};
use crate::warning::Warning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub i: i32,
    /// Area slack bus, zero for none.
    pub isw: i32,
    pub pdes: f64,
    pub ptol: f64,
    pub arnam: String,
}

impl RawLine for Area {
    const MIN_FIELDS: usize = 1;
    const MAX_FIELDS: usize = 5;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            i: f.int("i")?,
            isw: f.int_or("isw", 0)?,
            pdes: f.float_or("pdes", 0.0)?,
            ptol: f.float_or("ptol", 0.0)?,
            arnam: f.string_or("arnam", "")?,
        })
    }

    fn write(&self, line: &mut LineWriter) {
        line.int(self.i)
            .int(self.isw)
            .float(self.pdes)
            .float(self.ptol)
            .string(&self.arnam);
    }
}

impl Validate for Area {
    fn validate(&self, _index: usize, warnings: &mut Vec<Warning>) {
        Checker::new("area", self.i, warnings)
            .area("i", self.i)
            .range("isw", self.isw, 0.0, 999_997.0);
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Area {:>4} {:<12} Pdes={:>9.2}  Ptol={:>7.2}",
            self.i,
            self.arnam.trim(),
            self.pdes,
            self.ptol
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub i: i32,
    pub zoname: String,
}

impl RawLine for Zone {
    const MIN_FIELDS: usize = 2;
    const MAX_FIELDS: usize = 2;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            i: f.int("i")?,
            zoname: f.string_or("zoname", BLANK_NAME)?,
        })
    }

    fn write(&self, line: &mut LineWriter) {
        line.int(self.i).string(&self.zoname);
    }
}

impl Validate for Zone {
    fn validate(&self, _index: usize, warnings: &mut Vec<Warning>) {
        Checker::new("zone", self.i, warnings).area("i", self.i);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub i: i32,
    pub owname: String,
}

impl RawLine for Owner {
    const MIN_FIELDS: usize = 2;
    const MAX_FIELDS: usize = 2;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            i: f.int("i")?,
            owname: f.string_or("owname", BLANK_NAME)?,
        })
    }

    fn write(&self, line: &mut LineWriter) {
        line.int(self.i).string(&self.owname);
    }
}

impl Validate for Owner {
    fn validate(&self, _index: usize, warnings: &mut Vec<Warning>) {
        Checker::new("owner", self.i, warnings).area("i", self.i);
    }
}

/// Scheduled interchange from area `arfrom` to area `arto`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterareaTransfer {
    pub arfrom: i32,
    pub arto: i32,
    pub trid: String,
    pub ptran: f64,
}

impl RawLine for InterareaTransfer {
    const MIN_FIELDS: usize = 4;
    const MAX_FIELDS: usize = 4;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            arfrom: f.int("arfrom")?,
            arto: f.int("arto")?,
            trid: f.string_or("trid", "1")?,
            ptran: f.float_or("ptran", 0.0)?,
        })
    }

    fn write(&self, line: &mut LineWriter) {
        line.int(self.arfrom)
            .int(self.arto)
            .string(&self.trid)
            .float(self.ptran);
    }
}

impl Validate for InterareaTransfer {
    fn validate(&self, index: usize, warnings: &mut Vec<Warning>) {
        Checker::new("inter-area transfer", index, warnings)
            .area("arfrom", self.arfrom)
            .area("arto", self.arto);
    }
}
