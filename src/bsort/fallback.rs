/// Insertion sort over whole records, ordered by their first `key_size` bytes.
///
/// Runs a stride-3 pass first so nearly ordered buckets need few moves in the
/// exact stride-1 pass. `temp` must be at least `record_size` bytes.
pub fn shell_sort(records: &mut [u8], record_size: usize, key_size: usize, temp: &mut [u8]) {
    let n = records.len() / record_size;
    if n < 2 {
        return;
    }
    insertion_pass(records, n, 3, record_size, key_size, temp);
    insertion_pass(records, n, 1, record_size, key_size, temp);
}

#[inline]
fn insertion_pass(
    records: &mut [u8],
    n: usize,
    stride: usize,
    record_size: usize,
    key_size: usize,
    temp: &mut [u8],
) {
    let temp = &mut temp[..record_size];
    for i in stride..n {
        temp.copy_from_slice(&records[i * record_size..(i + 1) * record_size]);
        let mut j = i;
        while j >= stride {
            let prev = (j - stride) * record_size;
            if records[prev..prev + key_size] <= temp[..key_size] {
                break;
            }
            records.copy_within(prev..prev + record_size, j * record_size);
            j -= stride;
        }
        if j != i {
            records[j * record_size..(j + 1) * record_size].copy_from_slice(temp);
        }
    }
}

/// True when every adjacent pair of records is in key order.
pub fn is_sorted(records: &[u8], record_size: usize, key_size: usize) -> bool {
    if record_size == 0 {
        return true;
    }
    let whole = records.len() - records.len() % record_size;
    records[..whole]
        .chunks_exact(record_size)
        .zip(records[..whole].chunks_exact(record_size).skip(1))
        .all(|(a, b)| a[..key_size] <= b[..key_size])
}
