use super::partition::BucketTable;

/// Moves records into their buckets by following displacement chains.
///
/// A chain starts at the first unsettled slot of symbol `x`. Each step looks
/// at the record in the current slot, reserves the next free slot of that
/// record's symbol and continues from there. The chain closes when it finds a
/// record that belongs to `x`, or stops after `stack_size` steps. Either way
/// it is rotated once, which sends every record but the last to its reserved
/// slot. Each rotation therefore settles at least one slot, so a pass always
/// terminates, whatever the cycle structure.
pub struct CyclePermuter {
    record_size: usize,
    stack_size: usize,
    chain: Vec<usize>,
    temp: Vec<u8>,
}

/// Counters for one permutation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Records found already in their bucket.
    pub in_place: usize,
    /// Chains that closed on the starting symbol.
    pub closed: usize,
    /// Chains that ran out of lookahead and were rotated open.
    pub open: usize,
}

impl CyclePermuter {
    pub fn new(record_size: usize, stack_size: usize) -> Self {
        CyclePermuter {
            record_size,
            stack_size,
            chain: Vec::with_capacity(stack_size + 1),
            temp: vec![0u8; record_size],
        }
    }

    /// Permute `records` so every bucket laid out in `table` holds exactly
    /// the records of its symbol at `digit`. `table` must have been filled by
    /// [`BucketTable::count`] for the same records and digit.
    pub fn permute(
        &mut self,
        records: &mut [u8],
        table: &mut BucketTable,
        digit: usize,
    ) -> PassStats {
        let rs = self.record_size;
        let mut stats = PassStats::default();

        for x in 0..table.counts().len() {
            while table.cursors[x] < table.ends()[x] {
                let cursor = table.cursors[x];
                let mut target = table.symbol_at(records, rs, digit, cursor);
                if target == x {
                    table.cursors[x] += 1;
                    stats.in_place += 1;
                    continue;
                }

                self.chain.clear();
                self.chain.push(cursor);
                while target != x && self.chain.len() <= self.stack_size {
                    let slot = table.cursors[target];
                    table.cursors[target] += 1;
                    self.chain.push(slot);
                    target = table.symbol_at(records, rs, digit, slot);
                }

                if target == x {
                    table.cursors[x] += 1;
                    stats.closed += 1;
                } else {
                    stats.open += 1;
                }
                self.rotate(records);
            }
        }

        debug_assert!(table.is_settled());
        stats
    }

    /// Shift each chained record one link forward; the last one wraps to the
    /// chain start.
    fn rotate(&mut self, records: &mut [u8]) {
        let rs = self.record_size;
        let Some(&last) = self.chain.last() else {
            return;
        };

        self.temp.copy_from_slice(&records[last * rs..(last + 1) * rs]);
        for i in (1..self.chain.len()).rev() {
            let src = self.chain[i - 1] * rs;
            records.copy_within(src..src + rs, self.chain[i] * rs);
        }
        let first = self.chain[0] * rs;
        records[first..first + rs].copy_from_slice(&self.temp);
    }
}
