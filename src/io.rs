use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::constants::*;
use crate::error::{Result, VmError};
use crate::memory::BackingStore;
use crate::page_table::PageTableRow;
use crate::stats::Statistics;
use crate::tlb::TlbEntry;
use crate::translation::Translation;
use crate::vm_manager::Translator;

/// One line of the input stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Translate(u16),
    DumpPageTable,
    DumpTlb,
}

pub fn read_commands<P: AsRef<Path>>(path: P) -> Result<Vec<Command>> {
    let content = fs::read_to_string(path.as_ref())?;
    parse_commands(&content)
}

/// Parse an address stream, one token per line. Blank lines are skipped.
pub fn parse_commands(content: &str) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if let Some(command) = parse_line(idx + 1, line)? {
            commands.push(command);
        }
    }
    Ok(commands)
}

fn parse_line(line_no: usize, line: &str) -> Result<Option<Command>> {
    let token = line.trim();
    match token {
        "" => Ok(None),
        PAGE_TABLE_DIRECTIVE => Ok(Some(Command::DumpPageTable)),
        TLB_DIRECTIVE => Ok(Some(Command::DumpTlb)),
        _ => {
            let value: i64 = token.parse().map_err(|_| VmError::InvalidInput {
                line: line_no,
                token: token.to_string(),
            })?;
            if !(0..=MAX_LOGICAL_ADDRESS as i64).contains(&value) {
                return Err(VmError::AddressOutOfRange { line: line_no, value });
            }
            Ok(Some(Command::Translate(value as u16)))
        }
    }
}

pub fn write_translation<W: Write>(out: &mut W, t: &Translation) -> io::Result<()> {
    writeln!(
        out,
        "Logical Address: {} Physical Address: {} Value: {}",
        t.logical,
        t.physical,
        t.signed_value()
    )
}

pub fn write_page_table<W: Write>(out: &mut W, rows: &[PageTableRow]) -> io::Result<()> {
    writeln!(out, "########################")?;
    writeln!(out, "Page - Frame - Valid Bit")?;
    for row in rows {
        let valid = if row.valid { "Valid" } else { "Invalid" };
        writeln!(out, "{:>4} - {:>5} - {:>9}", row.page, row.frame, valid)?;
    }
    writeln!(out, "########################")
}

pub fn write_tlb<W: Write>(out: &mut W, entries: &[TlbEntry]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "************")?;
    writeln!(out, "Page - Frame")?;
    for entry in entries {
        writeln!(out, "{:>4} - {:>5}", entry.page, entry.frame)?;
    }
    writeln!(out, "************")
}

pub fn write_statistics<W: Write>(out: &mut W, stats: &Statistics) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Statistics:")?;
    writeln!(out, "Page-Fault Rate: {}", format_rate(stats.page_fault_rate()))?;
    writeln!(out, "TLB Hit Rate: {}", format_rate(stats.tlb_hit_rate()))
}

/// Percentage with six significant digits and no trailing zeros
fn format_rate(rate: Option<f64>) -> String {
    let Some(rate) = rate else {
        return "n/a".to_string();
    };
    let percent = rate * 100.0;
    if percent == 0.0 {
        return "0%".to_string();
    }

    let int_digits = percent.abs().log10().floor() as i32 + 1;
    let decimals = (6 - int_digits).max(0) as usize;
    let mut text = format!("{:.*}", decimals, percent);
    if text.contains('.') {
        text = text.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    text.push('%');
    text
}

/// Run every command against `translator`, writing the report to `out`
pub fn process<S: BackingStore, W: Write>(
    translator: &mut Translator<S>,
    commands: &[Command],
    out: &mut W,
) -> Result<Statistics> {
    for command in commands {
        match *command {
            Command::Translate(address) => {
                let t = translator.translate(address)?;
                write_translation(out, &t)?;
            }
            Command::DumpPageTable => write_page_table(out, &translator.snapshot_page_table())?,
            Command::DumpTlb => write_tlb(out, &translator.snapshot_tlb())?,
        }
    }

    let stats = translator.stats();
    write_statistics(out, &stats)?;
    out.flush()?;

    log::info!(
        "{} references, {} page faults, {} TLB hits",
        stats.total_references,
        stats.page_faults,
        stats.tlb_hits
    );
    Ok(stats)
}
