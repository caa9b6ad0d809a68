//! Two- and three-winding transformers and impedance correction tables.
//!
//! A transformer record spans four physical lines when its tertiary bus `k`
//! is zero and five lines otherwise:
//!
//! ```text
//! I, J, K, 'CKT', CW, CZ, CM, MAG1, MAG2, NMETR, 'NAME', STAT, O1, F1, ..., 'VECGRP'
//! R1-2, X1-2, SBASE1-2 [, R2-3, X2-3, SBASE2-3, R3-1, X3-1, SBASE3-1, VMSTAR, ANSTAR]
//! WINDV1, NOMV1, ANG1, RATA1, RATB1, RATC1, COD1, CONT1, RMA1, RMI1, VMA1, VMI1, NTP1, TAB1, CR1, CX1, CNXA1
//! WINDV2, NOMV2 [, ... full winding 2 on three-winding units]
//! [winding 3]
//! ```

use serde::{Deserialize, Serialize};

use crate::bus::BLANK_NAME;
use crate::check::Checker;
use crate::error::FieldError;
use crate::fields::{Fields, LineWriter, Ownership};
use crate::record::{RawLine, Validate};
use crate::warning::Warning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Transformer {
    TwoWinding(TwoWindingTransformer),
    ThreeWinding(ThreeWindingTransformer),
}

impl Transformer {
    pub fn is_three_winding(&self) -> bool {
        matches!(self, Transformer::ThreeWinding(_))
    }

    /// The first line, shared by both variants.
    pub fn parameters(&self) -> &TransformerParameters {
        match self {
            Transformer::TwoWinding(t) => &t.p1,
            Transformer::ThreeWinding(t) => &t.p1,
        }
    }

    /// Physical lines this record occupies.
    pub fn line_count(&self) -> usize {
        if self.is_three_winding() { 5 } else { 4 }
    }

    /// One encoded string per physical line, in file order.
    pub fn to_lines(&self) -> Vec<String> {
        match self {
            Transformer::TwoWinding(t) => vec![
                t.p1.to_raw(),
                t.p2.to_raw(),
                t.w1.to_raw(),
                t.w2.to_raw(),
            ],
            Transformer::ThreeWinding(t) => vec![
                t.p1.to_raw(),
                t.p2.to_raw(),
                t.w1.to_raw(),
                t.w2.to_raw(),
                t.w3.to_raw(),
            ],
        }
    }

    pub fn to_raw(&self) -> String {
        self.to_lines().join("\n")
    }
}

impl Validate for Transformer {
    fn validate(&self, index: usize, warnings: &mut Vec<Warning>) {
        match self {
            Transformer::TwoWinding(t) => {
                t.p1.validate(index, warnings);
                t.w1.check(index, 1, warnings);
            }
            Transformer::ThreeWinding(t) => {
                t.p1.validate(index, warnings);
                t.w1.check(index, 1, warnings);
                t.w2.check(index, 2, warnings);
                t.w3.check(index, 3, warnings);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoWindingTransformer {
    pub p1: TransformerParameters,
    pub p2: TwoWindingImpedance,
    pub w1: TransformerWinding,
    pub w2: TransformerWindingShort,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreeWindingTransformer {
    pub p1: TransformerParameters,
    pub p2: ThreeWindingImpedance,
    pub w1: TransformerWinding,
    pub w2: TransformerWinding,
    pub w3: TransformerWinding,
}

/// First line of every transformer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerParameters {
    pub i: i32,
    pub j: i32,
    /// Tertiary bus, zero on two-winding units.
    pub k: i32,
    pub ckt: String,
    pub cw: i32,
    pub cz: i32,
    pub cm: i32,
    pub mag1: f64,
    pub mag2: f64,
    pub nmetr: i32,
    pub name: String,
    pub stat: i32,
    #[serde(flatten)]
    pub owners: Ownership,
    pub vecgrp: String,
}

impl RawLine for TransformerParameters {
    const MIN_FIELDS: usize = 21;
    const MAX_FIELDS: usize = 21;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            i: f.int("i")?,
            j: f.int("j")?,
            k: f.int_or("k", 0)?,
            ckt: f.string_or("ckt", "1")?,
            cw: f.int_or("cw", 1)?,
            cz: f.int_or("cz", 1)?,
            cm: f.int_or("cm", 1)?,
            mag1: f.float_or("mag1", 0.0)?,
            mag2: f.float_or("mag2", 0.0)?,
            nmetr: f.int_or("nmetr", 2)?,
            name: f.string_or("name", BLANK_NAME)?,
            stat: f.int_or("stat", 1)?,
            owners: Ownership::read(f)?,
            vecgrp: f.string_or("vecgrp", BLANK_NAME)?,
        })
    }

    fn write(&self, line: &mut LineWriter) {
        line.int(self.i)
            .int(self.j)
            .int(self.k)
            .string(&self.ckt)
            .int(self.cw)
            .int(self.cz)
            .int(self.cm)
            .float(self.mag1)
            .float(self.mag2)
            .int(self.nmetr)
            .string(&self.name)
            .int(self.stat);
        self.owners.write(line);
        line.string(&self.vecgrp);
    }
}

impl Validate for TransformerParameters {
    fn validate(&self, index: usize, warnings: &mut Vec<Warning>) {
        Checker::new("transformer", index, warnings)
            .range("stat", self.stat, 0.0, 4.0)
            .bus("i", self.i)
            .bus("j", self.j)
            .range("k", self.k, 0.0, 999_997.0)
            .range("cw", self.cw, 1.0, 3.0)
            .range("cz", self.cz, 1.0, 3.0)
            .range("cm", self.cm, 1.0, 2.0)
            .owners(&self.owners);
    }
}

/// Second line of a two-winding transformer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoWindingImpedance {
    pub r12: f64,
    pub x12: f64,
    pub sbase12: f64,
}

impl RawLine for TwoWindingImpedance {
    const MIN_FIELDS: usize = 3;
    const MAX_FIELDS: usize = 3;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            r12: f.float_or("r1-2", 0.0)?,
            x12: f.float("x1-2")?,
            sbase12: f.float_or("sbase1-2", 100.0)?,
        })
    }

    fn write(&self, line: &mut LineWriter) {
        line.float(self.r12).float(self.x12).float(self.sbase12);
    }
}

/// Second line of a three-winding transformer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreeWindingImpedance {
    pub r12: f64,
    pub x12: f64,
    pub sbase12: f64,
    pub r23: f64,
    pub x23: f64,
    pub sbase23: f64,
    pub r31: f64,
    pub x31: f64,
    pub sbase31: f64,
    pub vmstar: f64,
    pub anstar: f64,
}

impl RawLine for ThreeWindingImpedance {
    const MIN_FIELDS: usize = 11;
    const MAX_FIELDS: usize = 11;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            r12: f.float_or("r1-2", 0.0)?,
            x12: f.float("x1-2")?,
            sbase12: f.float_or("sbase1-2", 100.0)?,
            r23: f.float_or("r2-3", 0.0)?,
            x23: f.float("x2-3")?,
            sbase23: f.float_or("sbase2-3", 100.0)?,
            r31: f.float_or("r3-1", 0.0)?,
            x31: f.float("x3-1")?,
            sbase31: f.float_or("sbase3-1", 100.0)?,
            vmstar: f.float_or("vmstar", 1.0)?,
            anstar: f.float_or("anstar", 0.0)?,
        })
    }

    fn write(&self, line: &mut LineWriter) {
        line.float(self.r12)
            .float(self.x12)
            .float(self.sbase12)
            .float(self.r23)
            .float(self.x23)
            .float(self.sbase23)
            .float(self.r31)
            .float(self.x31)
            .float(self.sbase31)
            .float(self.vmstar)
            .float(self.anstar);
    }
}

/// Full winding data line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerWinding {
    pub windv: f64,
    pub nomv: f64,
    pub ang: f64,
    pub rata: f64,
    pub ratb: f64,
    pub ratc: f64,
    pub cod: i32,
    pub cont: i32,
    pub rma: f64,
    pub rmi: f64,
    pub vma: f64,
    pub vmi: f64,
    pub ntp: i32,
    pub tab: i32,
    pub cr: f64,
    pub cx: f64,
    pub cnxa: f64,
}

impl TransformerWinding {
    fn check(&self, index: usize, winding: usize, warnings: &mut Vec<Warning>) {
        Checker::new("transformer", format!("{} winding {}", index, winding), warnings)
            .range("ang", self.ang, -180.0, 180.0)
            .range("cod", self.cod, -5.0, 5.0)
            // negative ids control the bus on the other side of the winding
            .range("cont", self.cont.abs(), 0.0, 999_997.0)
            .range("ntp", self.ntp, 2.0, 9999.0)
            .range("tab", self.tab, 0.0, f64::INFINITY);
    }
}

impl RawLine for TransformerWinding {
    const MIN_FIELDS: usize = 17;
    const MAX_FIELDS: usize = 17;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            windv: f.float_or("windv", 1.0)?,
            nomv: f.float_or("nomv", 0.0)?,
            ang: f.float_or("ang", 0.0)?,
            rata: f.float_or("rata", 0.0)?,
            ratb: f.float_or("ratb", 0.0)?,
            ratc: f.float_or("ratc", 0.0)?,
            cod: f.int_or("cod", 0)?,
            cont: f.int_or("cont", 0)?,
            rma: f.float_or("rma", 1.1)?,
            rmi: f.float_or("rmi", 0.9)?,
            vma: f.float_or("vma", 1.1)?,
            vmi: f.float_or("vmi", 0.9)?,
            ntp: f.int_or("ntp", 33)?,
            tab: f.int_or("tab", 0)?,
            cr: f.float_or("cr", 0.0)?,
            cx: f.float_or("cx", 0.0)?,
            cnxa: f.float_or("cnxa", 0.0)?,
        })
    }

    fn write(&self, line: &mut LineWriter) {
        line.float(self.windv)
            .float(self.nomv)
            .float(self.ang)
            .float(self.rata)
            .float(self.ratb)
            .float(self.ratc)
            .int(self.cod)
            .int(self.cont)
            .float(self.rma)
            .float(self.rmi)
            .float(self.vma)
            .float(self.vmi)
            .int(self.ntp)
            .int(self.tab)
            .float(self.cr)
            .float(self.cx)
            .float(self.cnxa);
    }
}

/// Secondary winding of a two-winding transformer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerWindingShort {
    pub windv: f64,
    pub nomv: f64,
}

impl RawLine for TransformerWindingShort {
    const MIN_FIELDS: usize = 2;
    const MAX_FIELDS: usize = 2;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            windv: f.float_or("windv", 1.0)?,
            nomv: f.float_or("nomv", 0.0)?,
        })
    }

    fn write(&self, line: &mut LineWriter) {
        line.float(self.windv).float(self.nomv);
    }
}

/// One (T, F) point of a correction table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectionPoint {
    pub t: f64,
    pub f: f64,
}

/// Transformer impedance correction table; `points` holds as many pairs
/// as the source line carried, at most [`ImpedanceCorrection::MAX_POINTS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpedanceCorrection {
    pub i: i32,
    pub points: Vec<CorrectionPoint>,
}

impl ImpedanceCorrection {
    pub const MAX_POINTS: usize = 11;
}

impl RawLine for ImpedanceCorrection {
    const MIN_FIELDS: usize = 1;
    const MAX_FIELDS: usize = 1 + 2 * Self::MAX_POINTS;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        let mut table = Self {
            i: f.int("i")?,
            points: Vec::new(),
        };
        while f.has_more() && table.points.len() < Self::MAX_POINTS {
            table.points.push(CorrectionPoint {
                t: f.float_or("t", 0.0)?,
                f: f.float_or("f", 0.0)?,
            });
        }
        Ok(table)
    }

    fn write(&self, line: &mut LineWriter) {
        line.int(self.i);
        for point in &self.points {
            line.float(point.t).float(point.f);
        }
    }
}

impl Validate for ImpedanceCorrection {
    fn validate(&self, index: usize, warnings: &mut Vec<Warning>) {
        Checker::new("transformer correction", index, warnings).range(
            "i",
            self.i,
            1.0,
            f64::INFINITY,
        );
    }
}
