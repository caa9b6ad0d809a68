//! Section scanner: turns RAW text into a [`Case`].
//!
//! The file is a header line, two free-text description lines, then the
//! data sections in the fixed order of [`Section::ALL`]. Each section ends
//! with a line whose first token is `0`; a `Q` ends the case early.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::area::{Area, InterareaTransfer, Owner, Zone};
use crate::branch::{Branch, MultiSectionLineGrouping};
use crate::bus::{Bus, FixedShunt, Generator, InductionMachine, Load, SwitchedShunt};
use crate::case::{Case, SUPPORTED_REVISION, Section};
use crate::dc::{
    FactsDevice, MultiTerminalDcLine, MultiTerminalDcParameters, TwoTerminalDcLine, VscDcLine,
};
use crate::error::{Error, Result};
use crate::fields::Fields;
use crate::line::tokenize;
use crate::record::RawLine;
use crate::transformer::{
    ImpedanceCorrection, ThreeWindingTransformer, Transformer, TransformerParameters,
    TwoWindingTransformer,
};
use crate::warning::Warning;

/// Name used for the header line in errors.
const HEADER: &str = "case identification";

/// `ic, sbase, rev, xfrrat, nxfrat, basfrq`
const HEADER_FIELDS: usize = 6;

/// A parsed case together with the warnings raised while scanning it.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub case: Case,
    pub warnings: Vec<Warning>,
}

/// Reads and parses a RAW file from disk.
pub fn read_case(path: impl AsRef<Path>) -> Result<Parsed> {
    let path = path.as_ref();
    info!("Reading case {}", path.display());
    let text = fs::read_to_string(path)?;
    parse_raw_str(&text)
}

/// Parses the full text of a RAW file.
pub fn parse_raw_str(text: &str) -> Result<Parsed> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < 3 {
        return Err(Error::TooFewLines { found: lines.len() });
    }

    let mut scanner = Scanner {
        lines,
        pos: 0,
        warnings: Vec::new(),
    };
    let mut case = Case::default();
    scanner.header(&mut case)?;
    scanner.sections(&mut case)?;
    scanner.trailer();

    info!(
        "Parsed {} buses, {} branches, {} transformers with {} warnings",
        case.buses.len(),
        case.branches.len(),
        case.transformers.len(),
        scanner.warnings.len()
    );
    Ok(Parsed {
        case,
        warnings: scanner.warnings,
    })
}

/// How a section ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminus {
    /// `0`: move on to the next section.
    EndOfSection,
    /// `Q`: stop scanning.
    EndOfCase,
}

struct Scanner<'a> {
    lines: Vec<&'a str>,
    pos: usize,
    warnings: Vec<Warning>,
}

impl<'a> Scanner<'a> {
    fn warn(&mut self, warning: Warning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Header line plus the two description records.
    fn header(&mut self, case: &mut Case) -> Result<()> {
        let mut tokens = tokenize(self.lines[0])
            .map_err(|_| Error::MalformedLine {
                section: HEADER,
                line: 0,
            })?
            .fields;

        // Incremental change cases are rejected before anything else is read.
        let ic = tokens.first().map(|t| t.trim()).unwrap_or("");
        if !ic.is_empty() && ic.parse::<f64>() != Ok(0.0) {
            return Err(Error::UnsupportedCaseType {
                value: ic.to_string(),
            });
        }
        self.fit(HEADER, 0, &mut tokens, HEADER_FIELDS, HEADER_FIELDS)?;

        let lift = |err| Error::from_field(err, HEADER, 0, &tokens);
        let mut f = Fields::new(&tokens);
        f.string_or("ic", "0").map_err(lift)?;
        case.sbase = f.float_or("sbase", 100.0).map_err(lift)?;

        // An unreadable revision is assumed to be the supported one.
        let rev = f.string_or("rev", "").map_err(lift)?;
        if !rev.is_empty() {
            let parsed = rev.parse::<f64>().ok().map(|value| value as i32);
            case.rev = parsed.unwrap_or(SUPPORTED_REVISION);
            if parsed != Some(SUPPORTED_REVISION) {
                self.warn(Warning::UnsupportedRevision {
                    given: rev,
                    supported: SUPPORTED_REVISION,
                });
            }
        }

        case.xfrrat = f.float_or("xfrrat", 0.0).map_err(lift)?;
        case.nxfrat = f.float_or("nxfrat", 0.0).map_err(lift)?;
        case.basfrq = f.float_or("basfrq", 60.0).map_err(lift)?;

        case.record1 = self.lines[1].to_string();
        case.record2 = self.lines[2].to_string();
        self.pos = 3;
        Ok(())
    }

    fn sections(&mut self, case: &mut Case) -> Result<()> {
        for section in Section::ALL {
            let terminus = self.section(section, case)?;
            debug!(
                "Parsed {} {} records",
                case.section_len(section),
                section.name()
            );
            if terminus == Terminus::EndOfCase {
                return Ok(());
            }
        }

        // A trailing Q after the last section is optional.
        let quit = self
            .lines
            .get(self.pos)
            .and_then(|line| tokenize(line).ok())
            .is_some_and(|tokens| tokens.first() == "Q");
        if quit {
            self.pos += 1;
        }
        Ok(())
    }

    fn trailer(&mut self) {
        let lines = self.lines[self.pos.min(self.lines.len())..]
            .iter()
            .filter(|line| !line.trim().is_empty())
            .count();
        if lines > 0 {
            self.warn(Warning::TrailingContent { lines });
        }
    }

    /// Reads one section up to and including its terminus line.
    fn section(&mut self, section: Section, case: &mut Case) -> Result<Terminus> {
        let mut skipped = 0;
        loop {
            match self.terminus(section)? {
                Some(terminus) => {
                    self.pos += 1;
                    if skipped > 0 {
                        self.warn(Warning::SkippedSection {
                            section: section.name(),
                            lines: skipped,
                        });
                    }
                    return Ok(terminus);
                }
                None if section == Section::Gne => {
                    self.pos += 1;
                    skipped += 1;
                }
                None => self.record(section, case)?,
            }
        }
    }

    /// Terminus at the current line; running out of input here is an error.
    fn terminus(&self, section: Section) -> Result<Option<Terminus>> {
        let Some(line) = self.lines.get(self.pos) else {
            return Err(Error::UnexpectedEnd {
                section: section.name(),
                line: self.pos,
            });
        };
        let tokens = tokenize(line).map_err(|_| Error::MalformedLine {
            section: section.name(),
            line: self.pos,
        })?;
        Ok(match tokens.first() {
            "0" => Some(Terminus::EndOfSection),
            "Q" => Some(Terminus::EndOfCase),
            _ => None,
        })
    }

    /// Reads one record, which may span several lines, into its section list.
    fn record(&mut self, section: Section, case: &mut Case) -> Result<()> {
        match section {
            Section::Bus => case.buses.push(self.read_line::<Bus>(section)?),
            Section::Load => case.loads.push(self.read_line::<Load>(section)?),
            Section::FixedShunt => case
                .fixed_shunts
                .push(self.read_line::<FixedShunt>(section)?),
            Section::Generator => case.generators.push(self.read_line::<Generator>(section)?),
            Section::Branch => case.branches.push(self.read_line::<Branch>(section)?),
            Section::Transformer => {
                let transformer = self.transformer(section)?;
                case.transformers.push(transformer);
            }
            Section::Area => case.areas.push(self.read_line::<Area>(section)?),
            Section::TwoTerminalDc => {
                let line = TwoTerminalDcLine {
                    parameters: self.read_line(section)?,
                    rectifier: self.read_line(section)?,
                    inverter: self.read_line(section)?,
                };
                case.two_terminal_dc_lines.push(line);
            }
            Section::VscDc => {
                let line = VscDcLine {
                    parameters: self.read_line(section)?,
                    converter1: self.read_line(section)?,
                    converter2: self.read_line(section)?,
                };
                case.vsc_dc_lines.push(line);
            }
            Section::ImpedanceCorrection => case
                .impedance_corrections
                .push(self.read_line::<ImpedanceCorrection>(section)?),
            Section::MultiTerminalDc => {
                let line = self.multi_terminal_dc(section)?;
                case.multi_terminal_dc_lines.push(line);
            }
            Section::MultiSectionLine => case
                .line_groupings
                .push(self.read_line::<MultiSectionLineGrouping>(section)?),
            Section::Zone => case.zones.push(self.read_line::<Zone>(section)?),
            Section::InterareaTransfer => case
                .interarea_transfers
                .push(self.read_line::<InterareaTransfer>(section)?),
            Section::Owner => case.owners.push(self.read_line::<Owner>(section)?),
            Section::Facts => case
                .facts_devices
                .push(self.read_line::<FactsDevice>(section)?),
            Section::SwitchedShunt => case
                .switched_shunts
                .push(self.read_line::<SwitchedShunt>(section)?),
            Section::Gne => self.pos += 1,
            Section::InductionMachine => case
                .induction_machines
                .push(self.read_line::<InductionMachine>(section)?),
        }
        Ok(())
    }

    /// Four lines when the tertiary bus is zero, five otherwise.
    fn transformer(&mut self, section: Section) -> Result<Transformer> {
        let p1: TransformerParameters = self.read_line(section)?;
        Ok(if p1.k == 0 {
            Transformer::TwoWinding(TwoWindingTransformer {
                p1,
                p2: self.read_line(section)?,
                w1: self.read_line(section)?,
                w2: self.read_line(section)?,
            })
        } else {
            Transformer::ThreeWinding(ThreeWindingTransformer {
                p1,
                p2: self.read_line(section)?,
                w1: self.read_line(section)?,
                w2: self.read_line(section)?,
                w3: self.read_line(section)?,
            })
        })
    }

    /// Parameter line, then exactly `nconv + ndcbs + ndcln` lines typed by
    /// position.
    fn multi_terminal_dc(&mut self, section: Section) -> Result<MultiTerminalDcLine> {
        let (line, tokens) = self.next_tokens(
            section,
            MultiTerminalDcParameters::MIN_FIELDS,
            MultiTerminalDcParameters::MAX_FIELDS,
        )?;
        let (parameters, counts) = MultiTerminalDcParameters::read(&mut Fields::new(&tokens))
            .map_err(|err| Error::from_field(err, section.name(), line, &tokens))?;

        // Every counted line must still be in the input.
        if counts.total() > self.lines.len() - self.pos {
            return Err(Error::UnexpectedEnd {
                section: section.name(),
                line: self.lines.len(),
            });
        }
        let mut mtdc = MultiTerminalDcLine {
            parameters,
            converters: Vec::with_capacity(counts.nconv),
            dc_buses: Vec::with_capacity(counts.ndcbs),
            dc_links: Vec::with_capacity(counts.ndcln),
        };
        for _ in 0..counts.nconv {
            mtdc.converters.push(self.read_line(section)?);
        }
        for _ in 0..counts.ndcbs {
            mtdc.dc_buses.push(self.read_line(section)?);
        }
        for _ in 0..counts.ndcln {
            mtdc.dc_links.push(self.read_line(section)?);
        }
        Ok(mtdc)
    }

    /// Reads the current line as a single-line record and advances.
    fn read_line<R: RawLine>(&mut self, section: Section) -> Result<R> {
        let (line, tokens) = self.next_tokens(section, R::MIN_FIELDS, R::MAX_FIELDS)?;
        R::read(&mut Fields::new(&tokens))
            .map_err(|err| Error::from_field(err, section.name(), line, &tokens))
    }

    /// Tokenizes the current line, checks its arity and advances past it.
    /// Values beyond `max` are dropped with a warning.
    fn next_tokens(
        &mut self,
        section: Section,
        min: usize,
        max: usize,
    ) -> Result<(usize, Vec<String>)> {
        let line = self.pos;
        let text = self.lines.get(line).ok_or(Error::UnexpectedEnd {
            section: section.name(),
            line,
        })?;
        let mut tokens = tokenize(text)
            .map_err(|_| Error::MalformedLine {
                section: section.name(),
                line,
            })?
            .fields;

        self.fit(section.name(), line, &mut tokens, min, max)?;
        self.pos += 1;
        Ok((line, tokens))
    }

    /// Arity check shared by the header and record lines.
    fn fit(
        &mut self,
        section: &'static str,
        line: usize,
        tokens: &mut Vec<String>,
        min: usize,
        max: usize,
    ) -> Result<()> {
        if tokens.len() < min {
            return Err(Error::TooFewFields {
                section,
                line,
                min,
                found: tokens.len(),
                tokens: std::mem::take(tokens),
            });
        }
        if tokens.len() > max {
            self.warn(Warning::TooManyFields {
                section,
                line,
                max,
                found: tokens.len(),
            });
            tokens.truncate(max);
        }
        Ok(())
    }
}
