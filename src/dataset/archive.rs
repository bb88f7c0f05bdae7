//! On-disk dataset archives and code listings.
//!
//! One split persists as two files in the data directory: `<name>.json`, a
//! single archive of index-aligned parallel arrays, and `<name>.txt`, the
//! code listing with one program per batch.

use super::driver::SplitData;
use super::GenError;
use crate::dsl::{self, GrammarVariant, Program};
use crate::world::World;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// The parallel-array payload persisted for one split.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SplitArchive {
    pub inputs: Vec<World>,
    pub outputs: Vec<World>,
    pub codes: Vec<Vec<u16>>,
    pub code_lengths: Vec<usize>,
    pub num_examples_per_code: usize,
}

impl SplitArchive {
    pub fn from_split(split: SplitData, num_examples: usize) -> Self {
        Self {
            inputs: split.inputs,
            outputs: split.outputs,
            codes: split.codes,
            code_lengths: split.code_lengths,
            num_examples_per_code: num_examples,
        }
    }

    /// Load an archive from disk.
    pub fn load(path: &Path) -> Result<Self, GenError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Re-check the structural invariants: equal array lengths and a total
    /// divisible by the group size.
    pub fn check(&self) -> Result<(), GenError> {
        if self.inputs.len() != self.outputs.len()
            || self.inputs.len() != self.codes.len()
            || self.inputs.len() != self.code_lengths.len()
        {
            return Err(GenError::MismatchedArrays {
                inputs: self.inputs.len(),
                outputs: self.outputs.len(),
                codes: self.codes.len(),
                code_lengths: self.code_lengths.len(),
            });
        }
        if self.num_examples_per_code == 0 || self.len() % self.num_examples_per_code != 0 {
            return Err(GenError::MisalignedSplit {
                split: "archive".to_string(),
                len: self.len(),
                num_examples: self.num_examples_per_code,
            });
        }
        Ok(())
    }
}

/// Write a split's archive and code listing into `dir`.
pub fn write_split(
    dir: &Path,
    name: &str,
    split: SplitData,
    num_examples: usize,
    variant: GrammarVariant,
    beautify: bool,
) -> Result<(), GenError> {
    write_listing(dir, name, &split.programs, variant, beautify)?;

    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.json", name));
    let mut writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer(&mut writer, &SplitArchive::from_split(split, num_examples))?;
    writer.flush()?;
    Ok(())
}

/// Write a code listing: one program per line, or pretty-printed multi-line
/// blocks separated by blank lines when `beautify` is set.
pub fn write_listing(
    dir: &Path,
    name: &str,
    programs: &[Program],
    variant: GrammarVariant,
    beautify: bool,
) -> Result<(), GenError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.txt", name));
    let mut writer = BufWriter::new(File::create(&path)?);
    for program in programs {
        if beautify {
            writeln!(writer, "{}\n", dsl::pretty(program))?;
        } else {
            writeln!(writer, "{}", dsl::to_source(program, variant))?;
        }
    }
    writer.flush()?;
    Ok(())
}
