//! Buses and the single-bus equipment attached to them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::check::Checker;
use crate::error::FieldError;
use crate::fields::{Fields, LineWriter, Ownership};
use crate::record::{RawLine, Validate};
use crate::warning::Warning;

pub const BLANK_NAME: &str = "            ";

/// Bus type codes (IDE).
pub const IDE_PQ: i32 = 1;
pub const IDE_PV: i32 = 2;
pub const IDE_REF: i32 = 3;
pub const IDE_ISOLATED: i32 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bus {
    // Identifiers
    pub i: i32,
    pub name: String,
    pub basekv: f64,
    pub ide: i32,
    pub area: i32,
    pub zone: i32,
    pub owner: i32,

    // Voltage
    pub vm: f64,
    pub va: f64,

    // Limits
    pub nvhi: f64,
    pub nvlo: f64,
    pub evhi: f64,
    pub evlo: f64,
}

impl Bus {
    pub fn new(i: i32, name: impl Into<String>, basekv: f64) -> Self {
        Self {
            i,
            name: name.into(),
            basekv,
            ide: IDE_PQ,
            area: 1,
            zone: 1,
            owner: 1,
            vm: 1.0,
            va: 0.0,
            nvhi: 1.1,
            nvlo: 0.9,
            evhi: 1.1,
            evlo: 0.9,
        }
    }

    pub fn in_service(&self) -> bool {
        self.ide != IDE_ISOLATED
    }
}

impl RawLine for Bus {
    const MIN_FIELDS: usize = 13;
    const MAX_FIELDS: usize = 13;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            i: f.int("i")?,
            name: f.string_or("name", BLANK_NAME)?,
            basekv: f.float_or("basekv", 0.0)?,
            ide: f.int_or("ide", IDE_PQ)?,
            area: f.int_or("area", 1)?,
            zone: f.int_or("zone", 1)?,
            owner: f.int_or("owner", 1)?,
            vm: f.float_or("vm", 1.0)?,
            va: f.float_or("va", 0.0)?,
            nvhi: f.float_or("nvhi", 1.1)?,
            nvlo: f.float_or("nvlo", 0.9)?,
            evhi: f.float_or("evhi", 1.1)?,
            evlo: f.float_or("evlo", 0.9)?,
        })
    }

    fn write(&self, line: &mut LineWriter) {
        line.int(self.i)
            .string(&self.name)
            .float(self.basekv)
            .int(self.ide)
            .int(self.area)
            .int(self.zone)
            .int(self.owner)
            .float(self.vm)
            .float(self.va)
            .float(self.nvhi)
            .float(self.nvlo)
            .float(self.evhi)
            .float(self.evlo);
    }
}

impl Validate for Bus {
    fn validate(&self, _index: usize, warnings: &mut Vec<Warning>) {
        Checker::new("bus", self.i, warnings)
            .bus("i", self.i)
            .range("ide", self.ide, IDE_PQ as f64, IDE_ISOLATED as f64)
            .area("area", self.area)
            .area("zone", self.zone)
            .area("owner", self.owner);
    }
}

impl fmt::Display for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bus {:>6} {:<14} {:>8.2} kV  type {}  |V|={:.6}  Angle={:>9.4}",
            self.i,
            self.name.trim(),
            self.basekv,
            self.ide,
            self.vm,
            self.va
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    pub i: i32,
    pub id: String,
    pub status: i32,
    pub area: i32,
    pub zone: i32,

    // Constant power, current and admittance components
    pub pl: f64,
    pub ql: f64,
    pub ip: f64,
    pub iq: f64,
    pub yp: f64,
    pub yq: f64,

    pub owner: i32,
    pub scale: i32,
    pub intrpt: i32,
}

impl RawLine for Load {
    const MIN_FIELDS: usize = 13;
    const MAX_FIELDS: usize = 14;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            i: f.int("i")?,
            id: f.string_or("id", "1")?,
            status: f.int_or("status", 1)?,
            area: f.int_or("area", 1)?,
            zone: f.int_or("zone", 1)?,
            pl: f.float_or("pl", 0.0)?,
            ql: f.float_or("ql", 0.0)?,
            ip: f.float_or("ip", 0.0)?,
            iq: f.float_or("iq", 0.0)?,
            yp: f.float_or("yp", 0.0)?,
            yq: f.float_or("yq", 0.0)?,
            owner: f.int_or("owner", 1)?,
            scale: f.int_or("scale", 1)?,
            intrpt: f.int_or("intrpt", 0)?,
        })
    }

    fn write(&self, line: &mut LineWriter) {
        line.int(self.i)
            .string(&self.id)
            .int(self.status)
            .int(self.area)
            .int(self.zone)
            .float(self.pl)
            .float(self.ql)
            .float(self.ip)
            .float(self.iq)
            .float(self.yp)
            .float(self.yq)
            .int(self.owner)
            .int(self.scale)
            .int(self.intrpt);
    }
}

impl Validate for Load {
    fn validate(&self, index: usize, warnings: &mut Vec<Warning>) {
        Checker::new("load", index, warnings)
            .boolean("status", self.status)
            .bus("i", self.i)
            .area("area", self.area)
            .area("zone", self.zone)
            .area("owner", self.owner)
            .boolean("scale", self.scale)
            .boolean("intrpt", self.intrpt);
    }
}

impl fmt::Display for Load {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Load Bus {:>6} ID {:<3} P={:>9.3} MW  Q={:>9.3} MVAR",
            self.i,
            self.id.trim(),
            self.pl,
            self.ql
        )
    }
}

/// Fixed shunt at a bus. GL and BL are in MW and MVAR at 1.0 pu voltage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedShunt {
    pub i: i32,
    pub id: String,
    pub status: i32,
    pub gl: f64,
    pub bl: f64,
}

impl RawLine for FixedShunt {
    const MIN_FIELDS: usize = 5;
    const MAX_FIELDS: usize = 5;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            i: f.int("i")?,
            id: f.string_or("id", "1")?,
            status: f.int_or("status", 1)?,
            gl: f.float_or("gl", 0.0)?,
            bl: f.float_or("bl", 0.0)?,
        })
    }

    fn write(&self, line: &mut LineWriter) {
        line.int(self.i)
            .string(&self.id)
            .int(self.status)
            .float(self.gl)
            .float(self.bl);
    }
}

impl Validate for FixedShunt {
    fn validate(&self, index: usize, warnings: &mut Vec<Warning>) {
        Checker::new("fixed shunt", index, warnings)
            .boolean("status", self.status)
            .bus("i", self.i);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generator {
    pub i: i32,
    pub id: String,

    // Setpoints and limits
    pub pg: f64,
    pub qg: f64,
    pub qt: f64,
    pub qb: f64,
    pub vs: f64,
    pub ireg: i32,

    // Machine and step-up transformer impedance, pu on mbase
    pub mbase: f64,
    pub zr: f64,
    pub zx: f64,
    pub rt: f64,
    pub xt: f64,
    pub gtap: f64,

    pub stat: i32,
    pub rmpct: f64,
    pub pt: f64,
    pub pb: f64,
    #[serde(flatten)]
    pub owners: Ownership,
    pub wmod: i32,
    pub wpf: f64,
}

impl RawLine for Generator {
    const MIN_FIELDS: usize = 28;
    const MAX_FIELDS: usize = 28;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            i: f.int("i")?,
            id: f.string_or("id", "1")?,
            pg: f.float_or("pg", 0.0)?,
            qg: f.float_or("qg", 0.0)?,
            qt: f.float_or("qt", 9999.0)?,
            qb: f.float_or("qb", -9999.0)?,
            vs: f.float_or("vs", 1.0)?,
            ireg: f.int_or("ireg", 0)?,
            mbase: f.float_or("mbase", 100.0)?,
            zr: f.float_or("zr", 0.0)?,
            zx: f.float_or("zx", 1.0)?,
            rt: f.float_or("rt", 0.0)?,
            xt: f.float_or("xt", 0.0)?,
            gtap: f.float_or("gtap", 1.0)?,
            stat: f.int_or("stat", 1)?,
            rmpct: f.float_or("rmpct", 100.0)?,
            pt: f.float_or("pt", 9999.0)?,
            pb: f.float_or("pb", -9999.0)?,
            owners: Ownership::read(f)?,
            wmod: f.int_or("wmod", 0)?,
            wpf: f.float_or("wpf", 1.0)?,
        })
    }

    fn write(&self, line: &mut LineWriter) {
        line.int(self.i)
            .string(&self.id)
            .float(self.pg)
            .float(self.qg)
            .float(self.qt)
            .float(self.qb)
            .float(self.vs)
            .int(self.ireg)
            .float(self.mbase)
            .float(self.zr)
            .float(self.zx)
            .float(self.rt)
            .float(self.xt)
            .float(self.gtap)
            .int(self.stat)
            .float(self.rmpct)
            .float(self.pt)
            .float(self.pb);
        self.owners.write(line);
        line.int(self.wmod).float(self.wpf);
    }
}

impl Validate for Generator {
    fn validate(&self, index: usize, warnings: &mut Vec<Warning>) {
        Checker::new("generator", index, warnings)
            .boolean("stat", self.stat)
            .bus("i", self.i)
            // zero means the generator regulates its own bus
            .range("ireg", self.ireg, 0.0, 999_997.0)
            .owners(&self.owners)
            .range("wmod", self.wmod, 0.0, 3.0)
            .range("wpf", self.wpf, 0.0, 1.0);
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Gen Bus {:>6} ID {:<3} P={:>9.3} MW  Q={:>9.3} MVAR  Vset={:.5}",
            self.i,
            self.id.trim(),
            self.pg,
            self.qg,
            self.vs
        )
    }
}

/// One (count, increment) block of a switched shunt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShuntBlock {
    pub n: i32,
    pub b: f64,
}

/// Switched shunt (capacitor/reactor banks) at a bus.
///
/// `blocks` holds between one and [`SwitchedShunt::MAX_BLOCKS`] entries,
/// exactly as many as the source line carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchedShunt {
    pub i: i32,
    pub modsw: i32,
    pub adjm: i32,
    pub stat: i32,
    pub vswhi: f64,
    pub vswlo: f64,
    pub swrem: i32,
    pub rmpct: f64,
    pub rmidnt: String,
    pub binit: f64,
    pub blocks: Vec<ShuntBlock>,
}

impl SwitchedShunt {
    pub const MAX_BLOCKS: usize = 8;

    /// Total susceptance with every capacitive block switched in.
    pub fn b_max(&self) -> f64 {
        self.blocks
            .iter()
            .filter(|block| block.b > 0.0)
            .map(|block| block.n as f64 * block.b)
            .sum()
    }

    /// Total susceptance with every inductive block switched in.
    pub fn b_min(&self) -> f64 {
        self.blocks
            .iter()
            .filter(|block| block.b < 0.0)
            .map(|block| block.n as f64 * block.b)
            .sum()
    }
}

impl RawLine for SwitchedShunt {
    const MIN_FIELDS: usize = 12;
    const MAX_FIELDS: usize = 10 + 2 * Self::MAX_BLOCKS;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        let mut shunt = Self {
            i: f.int("i")?,
            modsw: f.int_or("modsw", 1)?,
            adjm: f.int_or("adjm", 0)?,
            stat: f.int_or("stat", 1)?,
            vswhi: f.float_or("vswhi", 1.0)?,
            vswlo: f.float_or("vswlo", 1.0)?,
            swrem: f.int_or("swrem", 0)?,
            rmpct: f.float_or("rmpct", 100.0)?,
            rmidnt: f.string_or("rmidnt", "")?,
            binit: f.float_or("binit", 0.0)?,
            blocks: Vec::new(),
        };
        while f.has_more() && shunt.blocks.len() < Self::MAX_BLOCKS {
            shunt.blocks.push(ShuntBlock {
                n: f.int_or("n", 0)?,
                b: f.float_or("b", 0.0)?,
            });
        }
        Ok(shunt)
    }

    fn write(&self, line: &mut LineWriter) {
        line.int(self.i)
            .int(self.modsw)
            .int(self.adjm)
            .int(self.stat)
            .float(self.vswhi)
            .float(self.vswlo)
            .int(self.swrem)
            .float(self.rmpct)
            .string(&self.rmidnt)
            .float(self.binit);
        for block in &self.blocks {
            line.int(block.n).float(block.b);
        }
    }
}

impl Validate for SwitchedShunt {
    fn validate(&self, index: usize, warnings: &mut Vec<Warning>) {
        let mut check = Checker::new("switched shunt", index, warnings);
        check
            .boolean("stat", self.stat)
            .bus("i", self.i)
            .range("modsw", self.modsw, 0.0, 6.0)
            .boolean("adjm", self.adjm)
            .range("swrem", self.swrem, 0.0, 999_997.0)
            .range("rmpct", self.rmpct, 0.0, 100.0);
        for block in &self.blocks {
            check.range("n", block.n, 0.0, 9.0);
        }
    }
}

impl fmt::Display for SwitchedShunt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwitchedShunt Bus {:>6}  Binit={:>8.4}  Vlo={:.4}  Vhi={:.4}  Blocks={}",
            self.i,
            self.binit,
            self.vswlo,
            self.vswhi,
            self.blocks.len()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InductionMachine {
    pub i: i32,
    pub id: String,
    pub stat: i32,
    pub scode: i32,
    pub dcode: i32,
    pub area: i32,
    pub zone: i32,
    pub owner: i32,
    pub tcode: i32,
    pub bcode: i32,
    pub mbase: f64,
    pub ratekv: f64,
    pub pcode: i32,
    pub pset: f64,

    // Inertia and load torque
    pub h: f64,
    pub a: f64,
    pub b: f64,
    pub d: f64,
    pub e: f64,

    // Equivalent circuit
    pub ra: f64,
    pub xa: f64,
    pub xm: f64,
    pub r1: f64,
    pub x1: f64,
    pub r2: f64,
    pub x2: f64,
    pub x3: f64,

    // Saturation
    pub e1: f64,
    pub se1: f64,
    pub e2: f64,
    pub se2: f64,
    pub ia1: f64,
    pub ia2: f64,
    pub xamult: f64,
}

impl RawLine for InductionMachine {
    const MIN_FIELDS: usize = 34;
    const MAX_FIELDS: usize = 34;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            i: f.int("i")?,
            id: f.string_or("id", "1")?,
            stat: f.int_or("stat", 1)?,
            scode: f.int_or("scode", 1)?,
            dcode: f.int_or("dcode", 2)?,
            area: f.int_or("area", 1)?,
            zone: f.int_or("zone", 1)?,
            owner: f.int_or("owner", 1)?,
            tcode: f.int_or("tcode", 1)?,
            bcode: f.int_or("bcode", 1)?,
            mbase: f.float_or("mbase", 100.0)?,
            ratekv: f.float_or("ratekv", 0.0)?,
            pcode: f.int_or("pcode", 1)?,
            pset: f.float_or("pset", 0.0)?,
            h: f.float_or("h", 1.0)?,
            a: f.float_or("a", 1.0)?,
            b: f.float_or("b", 1.0)?,
            d: f.float_or("d", 1.0)?,
            e: f.float_or("e", 1.0)?,
            ra: f.float_or("ra", 0.0)?,
            xa: f.float_or("xa", 0.0)?,
            xm: f.float_or("xm", 2.5)?,
            r1: f.float_or("r1", 999.0)?,
            x1: f.float_or("x1", 999.0)?,
            r2: f.float_or("r2", 999.0)?,
            x2: f.float_or("x2", 999.0)?,
            x3: f.float_or("x3", 0.0)?,
            e1: f.float_or("e1", 1.0)?,
            se1: f.float_or("se1", 0.0)?,
            e2: f.float_or("e2", 1.2)?,
            se2: f.float_or("se2", 0.0)?,
            ia1: f.float_or("ia1", 0.0)?,
            ia2: f.float_or("ia2", 0.0)?,
            xamult: f.float_or("xamult", 1.0)?,
        })
    }

    fn write(&self, line: &mut LineWriter) {
        line.int(self.i)
            .string(&self.id)
            .int(self.stat)
            .int(self.scode)
            .int(self.dcode)
            .int(self.area)
            .int(self.zone)
            .int(self.owner)
            .int(self.tcode)
            .int(self.bcode)
            .float(self.mbase)
            .float(self.ratekv)
            .int(self.pcode)
            .float(self.pset)
            .float(self.h)
            .float(self.a)
            .float(self.b)
            .float(self.d)
            .float(self.e)
            .float(self.ra)
            .float(self.xa)
            .float(self.xm)
            .float(self.r1)
            .float(self.x1)
            .float(self.r2)
            .float(self.x2)
            .float(self.x3)
            .float(self.e1)
            .float(self.se1)
            .float(self.e2)
            .float(self.se2)
            .float(self.ia1)
            .float(self.ia2)
            .float(self.xamult);
    }
}

impl Validate for InductionMachine {
    fn validate(&self, index: usize, warnings: &mut Vec<Warning>) {
        Checker::new("induction machine", index, warnings)
            .boolean("stat", self.stat)
            .bus("i", self.i)
            .range("scode", self.scode, 1.0, 2.0)
            .range("dcode", self.dcode, 1.0, 3.0)
            .area("area", self.area)
            .area("zone", self.zone)
            .area("owner", self.owner)
            .range("tcode", self.tcode, 1.0, 2.0)
            .range("bcode", self.bcode, 1.0, 2.0)
            .range("pcode", self.pcode, 1.0, 2.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bus_blank_fields_take_defaults() {
        let bus = Bus::from_tokens(&["101", "", "138.0", "", "", "", "", "", "", "", "", "", ""])
            .unwrap();
        assert_eq!(bus.name, BLANK_NAME);
        assert_eq!(bus.ide, IDE_PQ);
        assert_eq!(bus.area, 1);
        assert_eq!(bus.vm, 1.0);
        assert_eq!(bus.nvhi, 1.1);
        assert_eq!(bus.evlo, 0.9);
    }

    #[test]
    fn bus_below_minimum_arity_is_too_few() {
        let err = Bus::from_tokens(&["101", "'A'", "138.0"]).unwrap_err();
        assert_eq!(err, FieldError::TooFew { min: 13, found: 3 });
    }

    #[test]
    fn load_optional_interruptible_flag() {
        let tokens = [
            "3", "'1 '", "1", "1", "1", "10.0", "5.0", "0.0", "0.0", "0.0", "0.0", "1", "1",
        ];
        let load = Load::from_tokens(&tokens).unwrap();
        assert_eq!(load.id, "1 ");
        assert_eq!(load.intrpt, 0);
        assert_eq!(
            load.to_raw(),
            "3, '1 ', 1, 1, 1, 10.0, 5.0, 0.0, 0.0, 0.0, 0.0, 1, 1, 0"
        );
    }

    #[test]
    fn switched_shunt_keeps_only_present_blocks() {
        let tokens = [
            "7", "1", "0", "1", "1.05", "0.95", "0", "100.0", "''", "20.0", "2", "10.0", "1",
            "-5.0",
        ];
        let shunt = SwitchedShunt::from_tokens(&tokens).unwrap();
        assert_eq!(shunt.blocks.len(), 2);
        assert_eq!(shunt.b_max(), 20.0);
        assert_eq!(shunt.b_min(), -5.0);
        assert!(shunt.to_raw().ends_with("20.0, 2, 10.0, 1, -5.0"));
    }

    #[test]
    fn switched_shunt_dangling_count_takes_zero_increment() {
        let tokens = [
            "7", "1", "0", "1", "1.05", "0.95", "0", "100.0", "''", "0.0", "2", "10.0", "3",
        ];
        let shunt = SwitchedShunt::from_tokens(&tokens).unwrap();
        assert_eq!(shunt.blocks[1], ShuntBlock { n: 3, b: 0.0 });
    }

    #[test]
    fn bus_area_out_of_range_warns_once() {
        let mut bus = Bus::new(5, "GEN", 13.8);
        bus.area = 10_000;
        let mut warnings = Vec::new();
        bus.validate(0, &mut warnings);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field(), Some("area"));
    }
}
