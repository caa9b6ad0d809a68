use serde::{Deserialize, Serialize};
use std::fmt;

use crate::area::{Area, InterareaTransfer, Owner, Zone};
use crate::branch::{Branch, MultiSectionLineGrouping};
use crate::bus::{Bus, FixedShunt, Generator, InductionMachine, Load, SwitchedShunt};
use crate::dc::{FactsDevice, MultiTerminalDcLine, TwoTerminalDcLine, VscDcLine};
use crate::transformer::{ImpedanceCorrection, Transformer};

/// The only format revision this crate reads and writes.
pub const SUPPORTED_REVISION: i32 = 33;

/// The data sections of a RAW file, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Bus,
    Load,
    FixedShunt,
    Generator,
    Branch,
    Transformer,
    Area,
    TwoTerminalDc,
    VscDc,
    ImpedanceCorrection,
    MultiTerminalDc,
    MultiSectionLine,
    Zone,
    InterareaTransfer,
    Owner,
    Facts,
    SwitchedShunt,
    Gne,
    InductionMachine,
}

impl Section {
    pub const ALL: [Section; 19] = [
        Section::Bus,
        Section::Load,
        Section::FixedShunt,
        Section::Generator,
        Section::Branch,
        Section::Transformer,
        Section::Area,
        Section::TwoTerminalDc,
        Section::VscDc,
        Section::ImpedanceCorrection,
        Section::MultiTerminalDc,
        Section::MultiSectionLine,
        Section::Zone,
        Section::InterareaTransfer,
        Section::Owner,
        Section::Facts,
        Section::SwitchedShunt,
        Section::Gne,
        Section::InductionMachine,
    ];

    /// Short name used in errors and warnings.
    pub fn name(self) -> &'static str {
        match self {
            Section::Bus => "bus",
            Section::Load => "load",
            Section::FixedShunt => "fixed shunt",
            Section::Generator => "generator",
            Section::Branch => "branch",
            Section::Transformer => "transformer",
            Section::Area => "area",
            Section::TwoTerminalDc => "two-terminal dc line",
            Section::VscDc => "vsc dc line",
            Section::ImpedanceCorrection => "transformer impedance correction",
            Section::MultiTerminalDc => "multi-terminal dc line",
            Section::MultiSectionLine => "multi-section line grouping",
            Section::Zone => "zone",
            Section::InterareaTransfer => "inter-area transfer",
            Section::Owner => "owner",
            Section::Facts => "facts device",
            Section::SwitchedShunt => "switched shunt",
            Section::Gne => "gne device",
            Section::InductionMachine => "induction machine",
        }
    }

    /// Title written in the section boundary comments.
    pub fn title(self) -> &'static str {
        match self {
            Section::Bus => "BUS DATA",
            Section::Load => "LOAD DATA",
            Section::FixedShunt => "FIXED SHUNT DATA",
            Section::Generator => "GENERATOR DATA",
            Section::Branch => "BRANCH DATA",
            Section::Transformer => "TRANSFORMER DATA",
            Section::Area => "AREA DATA",
            Section::TwoTerminalDc => "TWO-TERMINAL DC DATA",
            Section::VscDc => "VOLTAGE SOURCE CONVERTER DATA",
            Section::ImpedanceCorrection => "IMPEDANCE CORRECTION DATA",
            Section::MultiTerminalDc => "MULTI-TERMINAL DC DATA",
            Section::MultiSectionLine => "MULTI-SECTION LINE DATA",
            Section::Zone => "ZONE DATA",
            Section::InterareaTransfer => "INTER-AREA TRANSFER DATA",
            Section::Owner => "OWNER DATA",
            Section::Facts => "FACTS CONTROL DEVICE DATA",
            Section::SwitchedShunt => "SWITCHED SHUNT DATA",
            Section::Gne => "GNE DEVICE DATA",
            Section::InductionMachine => "INDUCTION MACHINE DATA",
        }
    }

    /// The section that follows this one, `None` after the last.
    pub fn next(self) -> Option<Section> {
        let idx = Section::ALL.iter().position(|s| *s == self)?;
        Section::ALL.get(idx + 1).copied()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A complete PSS/E v33 case: header, two description lines and one list
/// per section. List order is file order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    // Header
    pub ic: i32,
    pub sbase: f64,
    pub rev: i32,
    pub xfrrat: f64,
    pub nxfrat: f64,
    pub basfrq: f64,
    pub record1: String,
    pub record2: String,

    pub buses: Vec<Bus>,
    pub loads: Vec<Load>,
    pub fixed_shunts: Vec<FixedShunt>,
    pub generators: Vec<Generator>,
    pub branches: Vec<Branch>,
    pub transformers: Vec<Transformer>,
    pub areas: Vec<Area>,
    pub two_terminal_dc_lines: Vec<TwoTerminalDcLine>,
    pub vsc_dc_lines: Vec<VscDcLine>,
    pub impedance_corrections: Vec<ImpedanceCorrection>,
    pub multi_terminal_dc_lines: Vec<MultiTerminalDcLine>,
    pub line_groupings: Vec<MultiSectionLineGrouping>,
    pub zones: Vec<Zone>,
    pub interarea_transfers: Vec<InterareaTransfer>,
    pub owners: Vec<Owner>,
    pub facts_devices: Vec<FactsDevice>,
    pub switched_shunts: Vec<SwitchedShunt>,
    pub induction_machines: Vec<InductionMachine>,
}

impl Default for Case {
    fn default() -> Self {
        Self::new(100.0, 60.0)
    }
}

impl Case {
    /// Empty base case.
    pub fn new(sbase: f64, basfrq: f64) -> Self {
        Self {
            ic: 0,
            sbase,
            rev: SUPPORTED_REVISION,
            xfrrat: 0.0,
            nxfrat: 0.0,
            basfrq,
            record1: String::new(),
            record2: String::new(),
            buses: Vec::new(),
            loads: Vec::new(),
            fixed_shunts: Vec::new(),
            generators: Vec::new(),
            branches: Vec::new(),
            transformers: Vec::new(),
            areas: Vec::new(),
            two_terminal_dc_lines: Vec::new(),
            vsc_dc_lines: Vec::new(),
            impedance_corrections: Vec::new(),
            multi_terminal_dc_lines: Vec::new(),
            line_groupings: Vec::new(),
            zones: Vec::new(),
            interarea_transfers: Vec::new(),
            owners: Vec::new(),
            facts_devices: Vec::new(),
            switched_shunts: Vec::new(),
            induction_machines: Vec::new(),
        }
    }

    /// Number of records held for a section. GNE devices are never kept.
    pub fn section_len(&self, section: Section) -> usize {
        match section {
            Section::Bus => self.buses.len(),
            Section::Load => self.loads.len(),
            Section::FixedShunt => self.fixed_shunts.len(),
            Section::Generator => self.generators.len(),
            Section::Branch => self.branches.len(),
            Section::Transformer => self.transformers.len(),
            Section::Area => self.areas.len(),
            Section::TwoTerminalDc => self.two_terminal_dc_lines.len(),
            Section::VscDc => self.vsc_dc_lines.len(),
            Section::ImpedanceCorrection => self.impedance_corrections.len(),
            Section::MultiTerminalDc => self.multi_terminal_dc_lines.len(),
            Section::MultiSectionLine => self.line_groupings.len(),
            Section::Zone => self.zones.len(),
            Section::InterareaTransfer => self.interarea_transfers.len(),
            Section::Owner => self.owners.len(),
            Section::Facts => self.facts_devices.len(),
            Section::SwitchedShunt => self.switched_shunts.len(),
            Section::Gne => 0,
            Section::InductionMachine => self.induction_machines.len(),
        }
    }

    /// `(section, record count)` for every section in file order.
    pub fn section_counts(&self) -> Vec<(Section, usize)> {
        Section::ALL
            .iter()
            .map(|s| (*s, self.section_len(*s)))
            .collect()
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Case: {}  Sbase: {} MVA  Frequency: {} Hz  Revision: {}",
            self.record1.trim(),
            self.sbase,
            self.basfrq,
            self.rev
        )?;
        if !self.record2.trim().is_empty() {
            writeln!(f, "      {}", self.record2.trim())?;
        }

        let counts: Vec<String> = self
            .section_counts()
            .into_iter()
            .filter(|(_, n)| *n > 0)
            .map(|(s, n)| format!("{} {}", n, s))
            .collect();
        writeln!(f, "{}\n", counts.join(", "))?;

        writeln!(f, "=== Buses ===")?;
        for bus in &self.buses {
            writeln!(f, "  {}", bus)?;
        }

        if !self.loads.is_empty() {
            writeln!(f, "\n=== Loads ===")?;
            for load in &self.loads {
                writeln!(f, "  {}", load)?;
            }
        }

        if !self.generators.is_empty() {
            writeln!(f, "\n=== Generators ===")?;
            for generator in &self.generators {
                writeln!(f, "  {}", generator)?;
            }
        }

        if !self.branches.is_empty() {
            writeln!(f, "\n=== Branches ===")?;
            for branch in &self.branches {
                writeln!(f, "  {}", branch)?;
            }
        }

        if !self.switched_shunts.is_empty() {
            writeln!(f, "\n=== Switched Shunts ===")?;
            for shunt in &self.switched_shunts {
                writeln!(f, "  {}", shunt)?;
            }
        }

        if !self.areas.is_empty() {
            writeln!(f, "\n=== Areas ===")?;
            for area in &self.areas {
                writeln!(f, "  {}", area)?;
            }
        }

        Ok(())
    }
}
