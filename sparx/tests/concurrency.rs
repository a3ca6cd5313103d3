//! Independent traversals over shared storage

use sparx::{
    line_sums, AccessConfig, ArraySequence, CompressedStorage, LazySequence, Orientation,
    PointerResolver, SparseAccessor,
};
use std::thread;

fn banded(n: usize) -> (Vec<u32>, Vec<i32>, Vec<i32>) {
    let mut data = Vec::new();
    let mut indices = Vec::new();
    let mut indptr = vec![0];
    for row in 0..n {
        for col in row.saturating_sub(2)..(row + 3).min(n) {
            data.push((row * n + col) as u32);
            indices.push(col as i32);
        }
        indptr.push(indices.len() as i32);
    }
    (data, indices, indptr)
}

fn expected(n: usize, row: usize, col: usize) -> u32 {
    if row.abs_diff(col) <= 2 {
        (row * n + col) as u32
    } else {
        0
    }
}

#[test]
fn test_duplicates_on_threads_agree() {
    let n = 300;
    let (data, indices, indptr) = banded(n);
    let storage = CompressedStorage::new(
        ArraySequence::from(data),
        ArraySequence::from(indices),
        ArraySequence::from(indptr),
        PointerResolver::new(Orientation::Csr, [n, n]),
    )
    .unwrap();
    let accessor = SparseAccessor::new(storage);

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let mut acc = accessor.duplicate();
            thread::spawn(move || {
                // each thread walks the matrix in its own order
                for step in 0..n {
                    let row = if t % 2 == 0 { step } else { n - 1 - step };
                    for col in 0..n {
                        let col = if t < 2 { col } else { n - 1 - col };
                        let got = acc.get_at(&[row as i64, col as i64]).unwrap();
                        assert_eq!(got, expected(n, row, col), "thread {t} at ({row}, {col})");
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_lazy_handles_across_threads() {
    let n = 200;
    let (data, indices, indptr) = banded(n);
    let config = AccessConfig::default().with_block_len(32).with_cache_blocks(2);

    let storage = CompressedStorage::new(
        config.chunked(data),
        config.chunked(indices),
        config.chunked(indptr),
        PointerResolver::new(Orientation::Csr, [n, n]),
    )
    .unwrap();
    let accessor: SparseAccessor<LazySequence<u32>, LazySequence<i32>, LazySequence<i32>> =
        SparseAccessor::open(storage, &config).unwrap();

    let rows: Vec<i64> = (0..n as i64).collect();
    let sums = line_sums(&accessor, 0, &rows).unwrap();
    for (row, sum) in sums.into_iter().enumerate() {
        let want: u64 = (0..n).map(|col| expected(n, row, col) as u64).sum();
        assert_eq!(sum, want as f64, "row {row}");
    }
}
