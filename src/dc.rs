//! DC links and FACTS devices.

use serde::{Deserialize, Serialize};

use crate::check::Checker;
use crate::error::FieldError;
use crate::fields::{Fields, LineWriter, Ownership};
use crate::record::{RawLine, Validate};
use crate::warning::Warning;

/// Two-terminal DC line: a parameter line, then the rectifier and inverter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoTerminalDcLine {
    pub parameters: TwoTerminalDcParameters,
    pub rectifier: TwoTerminalDcConverter,
    pub inverter: TwoTerminalDcConverter,
}

impl TwoTerminalDcLine {
    pub fn to_lines(&self) -> Vec<String> {
        vec![
            self.parameters.to_raw(),
            self.rectifier.to_raw(),
            self.inverter.to_raw(),
        ]
    }

    pub fn to_raw(&self) -> String {
        self.to_lines().join("\n")
    }
}

impl Validate for TwoTerminalDcLine {
    fn validate(&self, index: usize, warnings: &mut Vec<Warning>) {
        Checker::new("two terminal dc line", index, warnings)
            .range("mdc", self.parameters.mdc, 0.0, 2.0)
            .bus("ipr", self.rectifier.ip)
            .bus("ipi", self.inverter.ip);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoTerminalDcParameters {
    pub name: String,
    pub mdc: i32,
    pub rdc: f64,
    pub setvl: f64,
    pub vschd: f64,
    pub vcmod: f64,
    pub rcomp: f64,
    pub delti: f64,
    pub meter: String,
    pub dcvmin: f64,
    pub cccitmx: i32,
    pub cccacc: f64,
}

impl RawLine for TwoTerminalDcParameters {
    const MIN_FIELDS: usize = 12;
    const MAX_FIELDS: usize = 12;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            name: f.string("name")?,
            mdc: f.int_or("mdc", 0)?,
            rdc: f.float("rdc")?,
            setvl: f.float("setvl")?,
            vschd: f.float("vschd")?,
            vcmod: f.float_or("vcmod", 0.0)?,
            rcomp: f.float_or("rcomp", 0.0)?,
            delti: f.float_or("delti", 0.0)?,
            meter: f.string_or("meter", "I")?,
            dcvmin: f.float_or("dcvmin", 0.0)?,
            cccitmx: f.int_or("cccitmx", 20)?,
            cccacc: f.float_or("cccacc", 1.0)?,
        })
    }

    fn write(&self, line: &mut LineWriter) {
        line.string(&self.name)
            .int(self.mdc)
            .float(self.rdc)
            .float(self.setvl)
            .float(self.vschd)
            .float(self.vcmod)
            .float(self.rcomp)
            .float(self.delti)
            .string(&self.meter)
            .float(self.dcvmin)
            .int(self.cccitmx)
            .float(self.cccacc);
    }
}

/// Rectifier or inverter end of a two-terminal DC line; both share one
/// layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoTerminalDcConverter {
    pub ip: i32,
    pub nb: i32,
    pub anmx: f64,
    pub anmn: f64,
    pub rc: f64,
    pub xc: f64,
    pub ebas: f64,
    pub tr: f64,
    pub tap: f64,
    pub tmx: f64,
    pub tmn: f64,
    pub stp: f64,
    pub ic: i32,
    #[serde(rename = "if")]
    pub if_: i32,
    pub it: i32,
    pub id: String,
    pub xcap: f64,
}

impl RawLine for TwoTerminalDcConverter {
    const MIN_FIELDS: usize = 17;
    const MAX_FIELDS: usize = 17;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            ip: f.int("ip")?,
            nb: f.int("nb")?,
            anmx: f.float("anmx")?,
            anmn: f.float("anmn")?,
            rc: f.float("rc")?,
            xc: f.float("xc")?,
            ebas: f.float("ebas")?,
            tr: f.float_or("tr", 1.0)?,
            tap: f.float_or("tap", 1.0)?,
            tmx: f.float_or("tmx", 1.5)?,
            tmn: f.float_or("tmn", 0.51)?,
            stp: f.float_or("stp", 0.00625)?,
            ic: f.int_or("ic", 0)?,
            if_: f.int_or("if", 0)?,
            it: f.int_or("it", 0)?,
            id: f.string_or("id", "1")?,
            xcap: f.float_or("xcap", 0.0)?,
        })
    }

    fn write(&self, line: &mut LineWriter) {
        line.int(self.ip)
            .int(self.nb)
            .float(self.anmx)
            .float(self.anmn)
            .float(self.rc)
            .float(self.xc)
            .float(self.ebas)
            .float(self.tr)
            .float(self.tap)
            .float(self.tmx)
            .float(self.tmn)
            .float(self.stp)
            .int(self.ic)
            .int(self.if_)
            .int(self.it)
            .string(&self.id)
            .float(self.xcap);
    }
}

/// Voltage source converter DC line: a parameter line and two converters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VscDcLine {
    pub parameters: VscDcParameters,
    pub converter1: VscDcConverter,
    pub converter2: VscDcConverter,
}

impl VscDcLine {
    pub fn to_lines(&self) -> Vec<String> {
        vec![
            self.parameters.to_raw(),
            self.converter1.to_raw(),
            self.converter2.to_raw(),
        ]
    }

    pub fn to_raw(&self) -> String {
        self.to_lines().join("\n")
    }
}

impl Validate for VscDcLine {
    fn validate(&self, index: usize, warnings: &mut Vec<Warning>) {
        let mut check = Checker::new("vsc dc line", index, warnings);
        check
            .range("mdc", self.parameters.mdc, 0.0, 2.0)
            .owners(&self.parameters.owners);
        for converter in [&self.converter1, &self.converter2] {
            check
                .bus("ibus", converter.ibus)
                .range("type", converter.kind, 0.0, 2.0)
                .range("mode", converter.mode, 1.0, 2.0)
                .range("pwf", converter.pwf, 0.0, 1.0);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VscDcParameters {
    pub name: String,
    pub mdc: i32,
    pub rdc: f64,
    #[serde(flatten)]
    pub owners: Ownership,
}

impl RawLine for VscDcParameters {
    const MIN_FIELDS: usize = 3;
    const MAX_FIELDS: usize = 11;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            name: f.string("name")?,
            mdc: f.int_or("mdc", 1)?,
            rdc: f.float("rdc")?,
            owners: Ownership::read(f)?,
        })
    }

    fn write(&self, line: &mut LineWriter) {
        line.string(&self.name).int(self.mdc).float(self.rdc);
        self.owners.write(line);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VscDcConverter {
    pub ibus: i32,
    #[serde(rename = "type")]
    pub kind: i32,
    pub mode: i32,
    pub dcset: f64,
    pub acset: f64,
    pub aloss: f64,
    pub bloss: f64,
    pub minloss: f64,
    pub smax: f64,
    pub imax: f64,
    pub pwf: f64,
    pub maxq: f64,
    pub minq: f64,
    pub remot: i32,
    pub rmpct: f64,
}

impl RawLine for VscDcConverter {
    const MIN_FIELDS: usize = 13;
    const MAX_FIELDS: usize = 15;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            ibus: f.int("ibus")?,
            kind: f.int_or("type", 1)?,
            mode: f.int_or("mode", 1)?,
            dcset: f.float("dcset")?,
            acset: f.float_or("acset", 1.0)?,
            aloss: f.float_or("aloss", 0.0)?,
            bloss: f.float_or("bloss", 0.0)?,
            minloss: f.float_or("minloss", 0.0)?,
            smax: f.float_or("smax", 0.0)?,
            imax: f.float_or("imax", 0.0)?,
            pwf: f.float_or("pwf", 1.0)?,
            maxq: f.float_or("maxq", 9999.0)?,
            minq: f.float_or("minq", -9999.0)?,
            remot: f.int_or("remot", 0)?,
            rmpct: f.float_or("rmpct", 100.0)?,
        })
    }

    fn write(&self, line: &mut LineWriter) {
        line.int(self.ibus)
            .int(self.kind)
            .int(self.mode)
            .float(self.dcset)
            .float(self.acset)
            .float(self.aloss)
            .float(self.bloss)
            .float(self.minloss)
            .float(self.smax)
            .float(self.imax)
            .float(self.pwf)
            .float(self.maxq)
            .float(self.minq)
            .int(self.remot)
            .float(self.rmpct);
    }
}

/// Multi-terminal DC line.
///
/// The parameter line carries `nconv`, `ndcbs` and `ndcln`; those counts
/// are not stored separately but are the lengths of the three lists, which
/// follow the parameter line in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiTerminalDcLine {
    pub parameters: MultiTerminalDcParameters,
    pub converters: Vec<MultiTerminalDcConverter>,
    pub dc_buses: Vec<MultiTerminalDcBus>,
    pub dc_links: Vec<MultiTerminalDcLink>,
}

impl MultiTerminalDcLine {
    pub fn line_count(&self) -> usize {
        1 + self.converters.len() + self.dc_buses.len() + self.dc_links.len()
    }

    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.line_count());
        let mut first = LineWriter::default();
        self.parameters.write_with_counts(
            &mut first,
            self.converters.len(),
            self.dc_buses.len(),
            self.dc_links.len(),
        );
        lines.push(first.finish());
        lines.extend(self.converters.iter().map(RawLine::to_raw));
        lines.extend(self.dc_buses.iter().map(RawLine::to_raw));
        lines.extend(self.dc_links.iter().map(RawLine::to_raw));
        lines
    }

    pub fn to_raw(&self) -> String {
        self.to_lines().join("\n")
    }
}

impl Validate for MultiTerminalDcLine {
    fn validate(&self, index: usize, warnings: &mut Vec<Warning>) {
        let mut check = Checker::new("multi-terminal dc line", index, warnings);
        check.range("mdc", self.parameters.mdc, 0.0, 2.0);
        for converter in &self.converters {
            check.bus("ib", converter.ib);
        }
        for dc_bus in &self.dc_buses {
            check
                .area("area", dc_bus.area)
                .area("zone", dc_bus.zone)
                .area("owner", dc_bus.owner);
        }
    }
}

/// Parameter line of a multi-terminal DC line, minus the three counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiTerminalDcParameters {
    pub name: String,
    pub mdc: i32,
    pub vconv: i32,
    pub vcmod: f64,
    pub vconvn: i32,
}

/// The sub-record counts read from a parameter line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiTerminalDcCounts {
    pub nconv: usize,
    pub ndcbs: usize,
    pub ndcln: usize,
}

impl MultiTerminalDcCounts {
    pub fn total(&self) -> usize {
        self.nconv + self.ndcbs + self.ndcln
    }
}

impl MultiTerminalDcParameters {
    pub const MIN_FIELDS: usize = 8;
    pub const MAX_FIELDS: usize = 8;

    pub fn read(f: &mut Fields<'_>) -> Result<(Self, MultiTerminalDcCounts), FieldError> {
        let name = f.string("name")?;
        let counts = MultiTerminalDcCounts {
            nconv: f.count("nconv")?,
            ndcbs: f.count("ndcbs")?,
            ndcln: f.count_or("ndcln", 0)?,
        };
        let parameters = Self {
            name,
            mdc: f.int_or("mdc", 0)?,
            vconv: f.int("vconv")?,
            vcmod: f.float_or("vcmod", 0.0)?,
            vconvn: f.int_or("vconvn", 0)?,
        };
        Ok((parameters, counts))
    }

    fn write_with_counts(&self, line: &mut LineWriter, nconv: usize, ndcbs: usize, ndcln: usize) {
        line.string(&self.name)
            .int(nconv as i32)
            .int(ndcbs as i32)
            .int(ndcln as i32)
            .int(self.mdc)
            .int(self.vconv)
            .float(self.vcmod)
            .int(self.vconvn);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiTerminalDcConverter {
    pub ib: i32,
    pub n: i32,
    pub angmx: f64,
    pub angmn: f64,
    pub rc: f64,
    pub xc: f64,
    pub ebas: f64,
    pub tr: f64,
    pub tap: f64,
    pub tpmx: f64,
    pub tpmn: f64,
    pub tstp: f64,
    pub setvl: f64,
    pub dcpf: f64,
    pub marg: f64,
    pub cnvcod: i32,
}

impl RawLine for MultiTerminalDcConverter {
    const MIN_FIELDS: usize = 16;
    const MAX_FIELDS: usize = 16;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            ib: f.int("ib")?,
            n: f.int("n")?,
            angmx: f.float("angmx")?,
            angmn: f.float("angmn")?,
            rc: f.float("rc")?,
            xc: f.float("xc")?,
            ebas: f.float("ebas")?,
            tr: f.float_or("tr", 1.0)?,
            tap: f.float_or("tap", 1.0)?,
            tpmx: f.float_or("tpmx", 1.5)?,
            tpmn: f.float_or("tpmn", 0.51)?,
            tstp: f.float_or("tstp", 0.00625)?,
            setvl: f.float("setvl")?,
            dcpf: f.float_or("dcpf", 1.0)?,
            marg: f.float_or("marg", 0.0)?,
            cnvcod: f.int_or("cnvcod", 1)?,
        })
    }

    fn write(&self, line: &mut LineWriter) {
        line.int(self.ib)
            .int(self.n)
            .float(self.angmx)
            .float(self.angmn)
            .float(self.rc)
            .float(self.xc)
            .float(self.ebas)
            .float(self.tr)
            .float(self.tap)
            .float(self.tpmx)
            .float(self.tpmn)
            .float(self.tstp)
            .float(self.setvl)
            .float(self.dcpf)
            .float(self.marg)
            .int(self.cnvcod);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiTerminalDcBus {
    pub idc: i32,
    pub ib: i32,
    pub area: i32,
    pub zone: i32,
    pub dcname: String,
    pub idc2: i32,
    pub rgrnd: f64,
    pub owner: i32,
}

impl RawLine for MultiTerminalDcBus {
    const MIN_FIELDS: usize = 8;
    const MAX_FIELDS: usize = 8;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            idc: f.int("idc")?,
            ib: f.int_or("ib", 0)?,
            area: f.int_or("area", 1)?,
            zone: f.int_or("zone", 1)?,
            dcname: f.string_or("dcname", crate::bus::BLANK_NAME)?,
            idc2: f.int_or("idc2", 0)?,
            rgrnd: f.float_or("rgrnd", 0.0)?,
            owner: f.int_or("owner", 1)?,
        })
    }

    fn write(&self, line: &mut LineWriter) {
        line.int(self.idc)
            .int(self.ib)
            .int(self.area)
            .int(self.zone)
            .string(&self.dcname)
            .int(self.idc2)
            .float(self.rgrnd)
            .int(self.owner);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiTerminalDcLink {
    pub idc: i32,
    pub jdc: i32,
    pub dcckt: String,
    pub met: i32,
    pub rdc: f64,
    pub ldc: f64,
}

impl RawLine for MultiTerminalDcLink {
    const MIN_FIELDS: usize = 6;
    const MAX_FIELDS: usize = 6;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            idc: f.int("idc")?,
            jdc: f.int("jdc")?,
            dcckt: f.string_or("dcckt", "1")?,
            met: f.int_or("met", 1)?,
            rdc: f.float("rdc")?,
            ldc: f.float_or("ldc", 0.0)?,
        })
    }

    fn write(&self, line: &mut LineWriter) {
        line.int(self.idc)
            .int(self.jdc)
            .string(&self.dcckt)
            .int(self.met)
            .float(self.rdc)
            .float(self.ldc);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactsDevice {
    pub name: String,
    pub i: i32,
    pub j: i32,
    pub mode: i32,
    pub pdes: f64,
    pub qdes: f64,
    pub vset: f64,
    pub shmx: f64,
    pub trmx: f64,
    pub vtmn: f64,
    pub vtmx: f64,
    pub vsmx: f64,
    pub imx: f64,
    pub linx: f64,
    pub rmpct: f64,
    pub owner: i32,
    pub set1: f64,
    pub set2: f64,
    pub vsref: i32,
    pub remot: i32,
    pub mname: String,
}

impl RawLine for FactsDevice {
    const MIN_FIELDS: usize = 19;
    const MAX_FIELDS: usize = 21;

    fn read(f: &mut Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            name: f.string("name")?,
            i: f.int("i")?,
            j: f.int_or("j", 0)?,
            mode: f.int_or("mode", 1)?,
            pdes: f.float_or("pdes", 0.0)?,
            qdes: f.float_or("qdes", 0.0)?,
            vset: f.float_or("vset", 1.0)?,
            shmx: f.float_or("shmx", 9999.0)?,
            trmx: f.float_or("trmx", 9999.0)?,
            vtmn: f.float_or("vtmn", 0.9)?,
            vtmx: f.float_or("vtmx", 1.1)?,
            vsmx: f.float_or("vsmx", 1.0)?,
            imx: f.float_or("imx", 0.0)?,
            linx: f.float_or("linx", 0.05)?,
            rmpct: f.float_or("rmpct", 100.0)?,
            owner: f.int_or("owner", 1)?,
            set1: f.float_or("set1", 0.0)?,
            set2: f.float_or("set2", 0.0)?,
            vsref: f.int_or("vsref", 0)?,
            remot: f.int_or("remot", 0)?,
            mname: f.string_or("mname", "")?,
        })
    }

    fn write(&self, line: &mut LineWriter) {
        line.string(&self.name)
            .int(self.i)
            .int(self.j)
            .int(self.mode)
            .float(self.pdes)
            .float(self.qdes)
            .float(self.vset)
            .float(self.shmx)
            .float(self.trmx)
            .float(self.vtmn)
            .float(self.vtmx)
            .float(self.vsmx)
            .float(self.imx)
            .float(self.linx)
            .float(self.rmpct)
            .int(self.owner)
            .float(self.set1)
            .float(self.set2)
            .int(self.vsref)
            .int(self.remot)
            .string(&self.mname);
    }
}

impl Validate for FactsDevice {
    fn validate(&self, index: usize, warnings: &mut Vec<Warning>) {
        Checker::new("facts device", index, warnings)
            .bus("i", self.i)
            .range("j", self.j, 0.0, 999_997.0)
            .range("mode", self.mode, 0.0, 8.0)
            .area("owner", self.owner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn multi_terminal_counts_come_from_parameters() {
        let raw = tokens(&["'MTDC1'", "2", "1", "1", "1", "500", "0.0", "0"]);
        let (parameters, counts) =
            MultiTerminalDcParameters::read(&mut Fields::new(&raw)).unwrap();
        assert_eq!(parameters.vconv, 500);
        assert_eq!(counts.total(), 4);

        let line = MultiTerminalDcLine {
            parameters,
            converters: Vec::new(),
            dc_buses: Vec::new(),
            dc_links: Vec::new(),
        };
        assert_eq!(line.line_count(), 1);
        assert_eq!(line.to_raw(), "'MTDC1', 0, 0, 0, 1, 500, 0.0, 0");
    }

    #[test]
    fn vsc_owners_default_when_absent() {
        let parameters = VscDcParameters::from_tokens(&["'VDCLINE1'", "1", "0.71"]).unwrap();
        assert_eq!(parameters.owners, Ownership::default());
        assert_eq!(
            parameters.to_raw(),
            "'VDCLINE1', 1, 0.71, 1, 1.0, 0, 1.0, 0, 1.0, 0, 1.0"
        );
    }

    #[test]
    fn facts_device_optional_tail() {
        let device = FactsDevice::from_tokens(&[
            "'FACTS 1'", "153", "0", "1", "350.0", "0.0", "1.015", "50.0", "100.0", "0.9",
            "1.1", "1.0", "0.0", "0.05", "100.0", "1", "0.0", "0.0", "0",
        ])
        .unwrap();
        assert_eq!(device.remot, 0);
        assert_eq!(device.mname, "");
    }
}
