/// In-place MSD radix sort of fixed-size binary records.
///
/// Records are partitioned on one key byte ("digit") at a time. Counting
/// lays out the buckets, cycle-following permutation moves the records into
/// them without an auxiliary copy of the buffer, and each large enough bucket
/// is queued for the next digit. Small buckets and buckets past the cutoff
/// depth finish with an insertion sort on the full key. A large bucket that
/// mixes bytes from outside a restricted alphabet is split again on the same
/// digit over the full byte range.
///
/// Pending buckets live on an explicit worklist, so the native stack stays
/// flat no matter how skewed the key distribution is.
use std::path::Path;

use log::{debug, trace, warn};

use super::config::{Alphabet, SortConfig};
use super::error::BsortError;
use super::fallback::{is_sorted, shell_sort};
use super::partition::BucketTable;
use super::permute::{CyclePermuter, PassStats};
use crate::common::io::MappedFile;

/// Summary of one sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortStats {
    pub records: usize,
    pub partition_passes: usize,
    pub fallback_sorts: usize,
    pub deepest_digit: usize,
}

/// A record range still waiting to be partitioned on `digit`. A `wide` job
/// repartitions a mixed bucket on the same digit over every byte value.
#[derive(Debug, Clone, Copy)]
struct Job {
    start: usize,
    end: usize,
    digit: usize,
    wide: bool,
}

/// Reusable per-sort working state: the bucket tables, one permuter and one
/// spare record for the fallback sorter.
struct RadixSorter<'c> {
    config: &'c SortConfig,
    table: BucketTable,
    /// Full byte range table, only needed when the alphabet is restricted.
    wide_table: Option<BucketTable>,
    permuter: CyclePermuter,
    temp: Vec<u8>,
    work: Vec<Job>,
    stats: SortStats,
}

impl<'c> RadixSorter<'c> {
    fn new(config: &'c SortConfig) -> Self {
        RadixSorter {
            config,
            table: BucketTable::new(config.alphabet),
            wide_table: (config.alphabet != Alphabet::BINARY)
                .then(|| BucketTable::new(Alphabet::BINARY)),
            permuter: CyclePermuter::new(config.record_size, config.stack_size),
            temp: vec![0u8; config.record_size],
            work: Vec::new(),
            stats: SortStats::default(),
        }
    }

    fn run(mut self, buffer: &mut [u8], count: usize) -> SortStats {
        self.stats.records = count;
        self.work.push(Job {
            start: 0,
            end: count,
            digit: 0,
            wide: false,
        });
        while let Some(job) = self.work.pop() {
            self.pass(buffer, job);
        }
        self.stats
    }

    /// Partition one range on its digit, then queue or finish each bucket.
    fn pass(&mut self, buffer: &mut [u8], job: Job) {
        let cfg = self.config;
        let rs = cfg.record_size;
        let records = &mut buffer[job.start * rs..job.end * rs];
        let table = match (job.wide, self.wide_table.as_mut()) {
            (true, Some(wide)) => wide,
            _ => &mut self.table,
        };

        table.count(records, rs, job.digit);
        let moved: PassStats = self.permuter.permute(records, table, job.digit);
        self.stats.partition_passes += 1;
        self.stats.deepest_digit = self.stats.deepest_digit.max(job.digit);

        if cfg.verbosity > 1 {
            trace!(
                "pass digit={} wide={} records={}..{} in_place={} closed={} open={}",
                job.digit,
                job.wide,
                job.start,
                job.end,
                moved.in_place,
                moved.closed,
                moved.open
            );
        }

        let next = job.digit + 1;
        let may_recurse = job.digit < cfg.cutoff && next < cfg.key_size;
        // Push in descending order so buckets come off the worklist ascending.
        for x in (0..table.alphabet().len()).rev() {
            let bucket = table.bucket(x);
            let len = bucket.len();
            if len <= 1 {
                continue;
            }
            let start = job.start + bucket.start;
            let end = job.start + bucket.end;
            if len > cfg.small_bucket && table.is_mixed(x) {
                // Out-of-alphabet bytes share this bucket; split it again on
                // the same digit before going deeper.
                self.work.push(Job {
                    start,
                    end,
                    digit: job.digit,
                    wide: true,
                });
            } else if may_recurse && len > cfg.small_bucket {
                self.work.push(Job {
                    start,
                    end,
                    digit: next,
                    wide: false,
                });
            } else {
                shell_sort(
                    &mut records[bucket.start * rs..bucket.end * rs],
                    rs,
                    cfg.key_size,
                    &mut self.temp,
                );
                self.stats.fallback_sorts += 1;
            }
        }
    }
}

/// Sort the whole records in `buffer` in place by their leading
/// `key_size` bytes. Bytes past the last whole record are left untouched.
pub fn sort_records(buffer: &mut [u8], config: &SortConfig) -> Result<SortStats, BsortError> {
    config.validate()?;
    let count = config.record_count(buffer.len());

    if config.verbosity > 0 {
        debug!(
            "radixify(count={}, digit=0, char_start={}, char_stop={}, record_size={}, \
             key_size={}, stack_size={}, cut_off={})",
            count,
            config.alphabet.start,
            config.alphabet.stop,
            config.record_size,
            config.key_size,
            config.stack_size,
            config.cutoff
        );
    }

    if count < 2 || config.key_size == 0 {
        return Ok(SortStats {
            records: count,
            ..SortStats::default()
        });
    }

    let whole = count * config.record_size;
    Ok(RadixSorter::new(config).run(&mut buffer[..whole], count))
}

/// Map `path` read-write and sort it in place.
pub fn sort_file(path: &Path, config: &SortConfig) -> Result<SortStats, BsortError> {
    config.validate()?;
    let mut file = MappedFile::open_rw(path)?;

    let trailing = file.len() % config.record_size;
    if trailing != 0 {
        warn!(
            "{}: {} trailing bytes do not form a whole {}-byte record and are left in place",
            file.path().display(),
            trailing,
            config.record_size
        );
    }

    let stats = sort_records(&mut file, config)?;
    file.flush()?;

    if config.verbosity > 0 {
        debug!(
            "{}: {} records, {} partition passes, {} fallback sorts, deepest digit {}, sorted={}",
            path.display(),
            stats.records,
            stats.partition_passes,
            stats.fallback_sorts,
            stats.deepest_digit,
            is_sorted(&file, config.record_size, config.key_size)
        );
    }
    Ok(stats)
}
