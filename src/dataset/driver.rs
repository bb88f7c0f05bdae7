//! Split-level generation: batches folded into parallel accumulators.

use super::batch::assemble_batch;
use super::oracle::{CodeSource, WorldOracle};
use super::{Batch, GenError, GenParams};
use crate::dsl::{self, GrammarVariant, Program};
use crate::world::World;

/// Accumulated parallel arrays for one dataset split. Index-aligned: entry
/// `i` of `inputs`, `outputs`, `codes` and `code_lengths` describe the same
/// pair. `programs` holds one entry per batch, in generation order.
#[derive(Debug, Default, PartialEq)]
pub struct SplitData {
    pub inputs: Vec<World>,
    pub outputs: Vec<World>,
    pub codes: Vec<Vec<u16>>,
    pub code_lengths: Vec<usize>,
    pub programs: Vec<Program>,
}

impl SplitData {
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }
}

/// Generate a complete split of `data_num` pairs.
///
/// Invokes the batch assembler in strides of `num_examples` until the split
/// is full, folding each batch into the accumulators and reporting it to
/// `on_batch` (progress and debug hooks). `data_num == 0` returns an empty
/// split without touching the collaborators. A final length not divisible
/// by the group size is a programming error, surfaced as a fatal
/// [`GenError::MisalignedSplit`].
pub fn generate_split(
    name: &str,
    data_num: usize,
    codes: &mut dyn CodeSource,
    oracle: &mut dyn WorldOracle,
    params: &GenParams,
    variant: GrammarVariant,
    mut on_batch: impl FnMut(&Batch),
) -> Result<SplitData, GenError> {
    let mut split = SplitData::default();
    if data_num == 0 {
        return Ok(split);
    }

    while split.len() < data_num {
        let batch = assemble_batch(codes, oracle, params)?;
        on_batch(&batch);

        let token_idx = dsl::lex_to_indices(&batch.program, variant);
        let token_len = token_idx.len();
        for pair in &batch.pairs {
            split.inputs.push(pair.input.clone());
            split.outputs.push(pair.output.clone());
            split.codes.push(token_idx.clone());
            split.code_lengths.push(token_len);
        }
        split.programs.push(batch.program);
    }

    if split.len() % params.num_examples != 0 {
        return Err(GenError::MisalignedSplit {
            split: name.to_string(),
            len: split.len(),
            num_examples: params.num_examples,
        });
    }
    Ok(split)
}
