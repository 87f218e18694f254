use super::error::BsortError;

/// Default size of a whole record, in bytes.
pub const DEFAULT_RECORD_SIZE: usize = 100;

/// Default size of the comparable key at the front of each record.
pub const DEFAULT_KEY_SIZE: usize = 10;

/// Default number of lookahead steps a displacement chain may take
/// before it is rotated without closing.
pub const DEFAULT_STACK_SIZE: usize = 5;

/// Default digit depth after which every bucket goes to the fallback sorter.
pub const DEFAULT_CUTOFF: usize = 4;

/// Buckets at or below this many records are insertion sorted instead of
/// partitioned on the next digit.
pub const SWITCH_TO_SHELL: usize = 20;

/// Inclusive range of byte values partitioned at each digit.
///
/// Bytes outside the range still sort correctly: they are counted into the
/// nearest edge bucket, which is then marked mixed and split again over the
/// full byte range (or insertion sorted when small).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alphabet {
    pub start: u8,
    pub stop: u8,
}

impl Alphabet {
    /// Every byte value.
    pub const BINARY: Alphabet = Alphabet {
        start: 0,
        stop: 255,
    };

    /// Bytes 32..=128, the text range selected by `-a`.
    pub const ASCII: Alphabet = Alphabet {
        start: 32,
        stop: 128,
    };

    /// Number of symbols (buckets) per digit.
    #[inline]
    pub fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        self.stop as usize - self.start as usize + 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start > self.stop
    }

    /// Bucket index for a byte, clamping out-of-range bytes to the edges.
    #[inline]
    pub fn symbol(&self, byte: u8) -> usize {
        (byte.clamp(self.start, self.stop) - self.start) as usize
    }

    #[inline]
    pub fn contains(&self, byte: u8) -> bool {
        (self.start..=self.stop).contains(&byte)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Alphabet::BINARY
    }
}

/// Configuration for one in-place sort.
#[derive(Debug, Clone)]
pub struct SortConfig {
    pub record_size: usize,
    pub key_size: usize,
    /// Lookahead steps per displacement chain (the chain holds the starting
    /// offset plus at most this many reserved slots).
    pub stack_size: usize,
    /// Deepest digit that is still partitioned.
    pub cutoff: usize,
    /// Buckets with at most this many records skip further partitioning.
    pub small_bucket: usize,
    pub alphabet: Alphabet,
    /// 0 is silent, 1 logs a summary per sort, 2 and above log every pass.
    pub verbosity: u8,
}

impl Default for SortConfig {
    fn default() -> Self {
        SortConfig {
            record_size: DEFAULT_RECORD_SIZE,
            key_size: DEFAULT_KEY_SIZE,
            stack_size: DEFAULT_STACK_SIZE,
            cutoff: DEFAULT_CUTOFF,
            small_bucket: SWITCH_TO_SHELL,
            alphabet: Alphabet::BINARY,
            verbosity: 0,
        }
    }
}

impl SortConfig {
    /// Config for `record_size`-byte records compared on their first
    /// `key_size` bytes, everything else at its default.
    pub fn with_layout(record_size: usize, key_size: usize) -> Self {
        SortConfig {
            record_size,
            key_size,
            ..SortConfig::default()
        }
    }

    /// Reject layouts the engine cannot work with.
    pub fn validate(&self) -> Result<(), BsortError> {
        if self.record_size == 0 {
            return Err(BsortError::Usage("record size must be greater than 0".to_string()));
        }
        if self.key_size > self.record_size {
            return Err(BsortError::Usage(format!(
                "key size {} exceeds record size {}",
                self.key_size, self.record_size
            )));
        }
        if self.stack_size == 0 {
            return Err(BsortError::Usage("stack size must be greater than 0".to_string()));
        }
        if self.alphabet.is_empty() {
            return Err(BsortError::Usage(format!(
                "empty alphabet {}..{}",
                self.alphabet.start, self.alphabet.stop
            )));
        }
        Ok(())
    }

    /// Number of whole records in a region of `len` bytes.
    #[inline]
    pub fn record_count(&self, len: usize) -> usize {
        len / self.record_size
    }
}
