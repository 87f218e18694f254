use std::ops::Range;

use super::config::Alphabet;

/// Per-symbol bucket boundaries for one digit of one record range.
///
/// Sized once from the alphabet and reused for every partitioning pass, so
/// deep or skewed inputs never allocate per level.
#[derive(Debug, Clone)]
pub struct BucketTable {
    alphabet: Alphabet,
    counts: Vec<usize>,
    starts: Vec<usize>,
    ends: Vec<usize>,
    /// Write cursor per symbol; `starts[x]..cursors[x]` is settled.
    pub(crate) cursors: Vec<usize>,
    clamped_low: bool,
    clamped_high: bool,
}

impl BucketTable {
    pub fn new(alphabet: Alphabet) -> Self {
        let n = alphabet.len();
        BucketTable {
            alphabet,
            counts: vec![0; n],
            starts: vec![0; n],
            ends: vec![0; n],
            cursors: vec![0; n],
            clamped_low: false,
            clamped_high: false,
        }
    }

    #[inline]
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Count `records` by the byte at offset `digit` and lay out the buckets.
    ///
    /// `records` holds whole records of `record_size` bytes; offsets in the
    /// table are record indices relative to its start. Does not move data.
    pub fn count(&mut self, records: &[u8], record_size: usize, digit: usize) {
        debug_assert!(digit < record_size);
        let count = records.len() / record_size;

        self.counts.fill(0);
        self.clamped_low = false;
        self.clamped_high = false;

        for record in records.chunks_exact(record_size) {
            let byte = record[digit];
            if !self.alphabet.contains(byte) {
                if byte < self.alphabet.start {
                    self.clamped_low = true;
                } else {
                    self.clamped_high = true;
                }
            }
            self.counts[self.alphabet.symbol(byte)] += 1;
        }

        let mut offset = 0;
        for x in 0..self.counts.len() {
            self.starts[x] = offset;
            offset += self.counts[x];
        }
        let last = self.counts.len() - 1;
        for x in 0..last {
            self.ends[x] = self.starts[x + 1];
        }
        self.ends[last] = count;
        self.cursors.copy_from_slice(&self.starts);
    }

    /// Symbol the record at `index` belongs to at `digit`.
    #[inline]
    pub fn symbol_at(
        &self,
        records: &[u8],
        record_size: usize,
        digit: usize,
        index: usize,
    ) -> usize {
        self.alphabet.symbol(records[index * record_size + digit])
    }

    #[inline]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    #[inline]
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    #[inline]
    pub fn ends(&self) -> &[usize] {
        &self.ends
    }

    /// Record range of bucket `x`.
    #[inline]
    pub fn bucket(&self, x: usize) -> Range<usize> {
        self.starts[x]..self.ends[x]
    }

    /// Non-empty buckets in ascending symbol order.
    pub fn buckets(&self) -> impl Iterator<Item = (usize, Range<usize>)> + '_ {
        (0..self.counts.len())
            .filter(|&x| self.counts[x] > 0)
            .map(|x| (x, self.bucket(x)))
    }

    /// True when bucket `x` also holds bytes from outside the alphabet, so
    /// its records do not share one byte value at this digit.
    #[inline]
    pub fn is_mixed(&self, x: usize) -> bool {
        (x == 0 && self.clamped_low) || (x == self.counts.len() - 1 && self.clamped_high)
    }

    /// True once every cursor has reached the end of its bucket.
    pub fn is_settled(&self) -> bool {
        self.cursors.iter().zip(&self.ends).all(|(c, e)| c == e)
    }
}
