use std::fs;
use std::path::Path;

use log::info;

use crate::case::{Case, Section};
use crate::error::Result;
use crate::fields::LineWriter;
use crate::record::RawLine;

/// Indent written before every record line.
const INDENT: &str = "  ";

/// Serializes a Case into PSS/E v33 RAW text.
///
/// Every field is written, defaults included, so parsing the output gives
/// back an equal case.
pub fn case_to_raw(case: &Case) -> String {
    let mut lines = Vec::new();

    // Header line: IC, SBASE, REV, XFRRAT, NXFRAT, BASFRQ
    let mut header = LineWriter::default();
    header
        .int(case.ic)
        .float(case.sbase)
        .int(case.rev)
        .float(case.xfrrat)
        .float(case.nxfrat)
        .float(case.basfrq);
    lines.push(header.finish());
    lines.push(case.record1.clone());
    lines.push(case.record2.clone());

    for section in Section::ALL {
        for record in section_lines(case, section) {
            lines.push(format!("{}{}", INDENT, record));
        }
        lines.push(boundary(section));
    }
    lines.push("Q".to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Writes a Case to disk as RAW text.
pub fn write_case(case: &Case, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, case_to_raw(case))?;
    info!("Wrote case to {}", path.display());
    Ok(())
}

/// The encoded lines of every record in a section, in order.
fn section_lines(case: &Case, section: Section) -> Vec<String> {
    fn single<R: RawLine>(records: &[R]) -> Vec<String> {
        records.iter().map(RawLine::to_raw).collect()
    }

    match section {
        Section::Bus => single(&case.buses),
        Section::Load => single(&case.loads),
        Section::FixedShunt => single(&case.fixed_shunts),
        Section::Generator => single(&case.generators),
        Section::Branch => single(&case.branches),
        Section::Transformer => case.transformers.iter().flat_map(|t| t.to_lines()).collect(),
        Section::Area => single(&case.areas),
        Section::TwoTerminalDc => case
            .two_terminal_dc_lines
            .iter()
            .flat_map(|l| l.to_lines())
            .collect(),
        Section::VscDc => case.vsc_dc_lines.iter().flat_map(|l| l.to_lines()).collect(),
        Section::ImpedanceCorrection => single(&case.impedance_corrections),
        Section::MultiTerminalDc => case
            .multi_terminal_dc_lines
            .iter()
            .flat_map(|l| l.to_lines())
            .collect(),
        Section::MultiSectionLine => single(&case.line_groupings),
        Section::Zone => single(&case.zones),
        Section::InterareaTransfer => single(&case.interarea_transfers),
        Section::Owner => single(&case.owners),
        Section::Facts => single(&case.facts_devices),
        Section::SwitchedShunt => single(&case.switched_shunts),
        Section::Gne => Vec::new(),
        Section::InductionMachine => single(&case.induction_machines),
    }
}

fn boundary(section: Section) -> String {
    match section.next() {
        Some(next) => format!("0 / END OF {}, BEGIN {}", section.title(), next.title()),
        None => format!("0 / END OF {}", section.title()),
    }
}
