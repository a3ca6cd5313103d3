//! Dense-versus-sparse agreement on randomly generated matrices

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sparx::{
    ArraySequence, CompressedStorage, Orientation, PointerResolver, PositionalAccess,
    SearchStrategy, SparseAccessor, SparxError,
};

struct Fixture {
    dense: Vec<Vec<f64>>,
    rows: usize,
    cols: usize,
}

impl Fixture {
    fn random(rng: &mut StdRng, rows: usize, cols: usize, density: f64) -> Self {
        let dense = (0..rows)
            .map(|_| {
                (0..cols)
                    .map(|_| {
                        if rng.gen_bool(density) {
                            rng.gen_range(1..1000) as f64
                        } else {
                            0.0
                        }
                    })
                    .collect()
            })
            .collect();
        Self { dense, rows, cols }
    }

    /// Compress into (data, indices, indptr) for the given orientation
    fn compress(&self, orientation: Orientation) -> (Vec<f64>, Vec<i64>, Vec<i64>) {
        let (majors, minors) = match orientation {
            Orientation::Csr => (self.rows, self.cols),
            Orientation::Csc => (self.cols, self.rows),
        };
        let mut data = Vec::new();
        let mut indices = Vec::new();
        let mut indptr = vec![0i64];
        for major in 0..majors {
            for minor in 0..minors {
                let value = match orientation {
                    Orientation::Csr => self.dense[major][minor],
                    Orientation::Csc => self.dense[minor][major],
                };
                if value != 0.0 {
                    data.push(value);
                    indices.push(minor as i64);
                }
            }
            indptr.push(indices.len() as i64);
        }
        (data, indices, indptr)
    }

    fn accessor(
        &self,
        orientation: Orientation,
        strategy: SearchStrategy,
    ) -> SparseAccessor<ArraySequence<f64>, ArraySequence<i64>, ArraySequence<i64>> {
        let (data, indices, indptr) = self.compress(orientation);
        let storage = CompressedStorage::new(
            ArraySequence::from(data),
            ArraySequence::from(indices),
            ArraySequence::from(indptr),
            PointerResolver::new(orientation, [self.rows, self.cols]),
        )
        .unwrap();
        SparseAccessor::with_strategy(storage, strategy)
    }
}

const ORIENTATIONS: [Orientation; 2] = [Orientation::Csr, Orientation::Csc];
const STRATEGIES: [SearchStrategy; 2] = [SearchStrategy::Directional, SearchStrategy::Galloping];

#[test]
fn test_raster_scans_match_dense() {
    let mut rng = StdRng::seed_from_u64(7);
    let fixture = Fixture::random(&mut rng, 37, 53, 0.15);

    for orientation in ORIENTATIONS {
        for strategy in STRATEGIES {
            let mut acc = fixture.accessor(orientation, strategy);
            // row-major forward
            for r in 0..fixture.rows {
                for c in 0..fixture.cols {
                    assert_eq!(acc.get_at(&[r as i64, c as i64]), Ok(fixture.dense[r][c]));
                }
            }
            // column-major backward
            for c in (0..fixture.cols).rev() {
                for r in (0..fixture.rows).rev() {
                    assert_eq!(acc.get_at(&[r as i64, c as i64]), Ok(fixture.dense[r][c]));
                }
            }
        }
    }
}

#[test]
fn test_random_points_match_dense() {
    let mut rng = StdRng::seed_from_u64(42);
    let fixture = Fixture::random(&mut rng, 64, 200, 0.05);

    for orientation in ORIENTATIONS {
        for strategy in STRATEGIES {
            let mut acc = fixture.accessor(orientation, strategy);
            for _ in 0..5000 {
                let r = rng.gen_range(0..fixture.rows);
                let c = rng.gen_range(0..fixture.cols);
                assert_eq!(
                    acc.get_at(&[r as i64, c as i64]),
                    Ok(fixture.dense[r][c]),
                    "{orientation} {strategy:?} at ({r}, {c})"
                );
            }
        }
    }
}

#[test]
fn test_relative_moves_match_dense() {
    let mut rng = StdRng::seed_from_u64(3);
    let fixture = Fixture::random(&mut rng, 20, 30, 0.3);
    let mut acc = fixture.accessor(Orientation::Csr, SearchStrategy::Directional);

    let (mut r, mut c) = (10i64, 15i64);
    acc.set_position(&[r, c]);
    for _ in 0..2000 {
        let dr = rng.gen_range(-1..=1);
        let dc = rng.gen_range(-3..=3);
        if (0..20).contains(&(r + dr)) && (0..30).contains(&(c + dc)) {
            r += dr;
            c += dc;
            acc.move_by(&[dr, dc]);
            assert_eq!(acc.get(), Ok(fixture.dense[r as usize][c as usize]));
        }
    }
}

#[test]
fn test_empty_and_degenerate_matrices() {
    let mut rng = StdRng::seed_from_u64(1);
    let empty = Fixture::random(&mut rng, 5, 5, 0.0);
    for orientation in ORIENTATIONS {
        let mut acc = empty.accessor(orientation, SearchStrategy::Directional);
        for r in 0..5 {
            for c in 0..5 {
                assert_eq!(acc.get_at(&[r, c]), Ok(0.0));
            }
        }
    }

    let full = Fixture::random(&mut rng, 4, 6, 1.0);
    for strategy in STRATEGIES {
        let mut acc = full.accessor(Orientation::Csc, strategy);
        assert_eq!(acc.get_at(&[3, 5]), Ok(full.dense[3][5]));
        assert_eq!(acc.get_at(&[0, 0]), Ok(full.dense[0][0]));
    }
}

/// Index handle counting how many entries a traversal reads
struct CountingIndices {
    inner: ArraySequence<i64>,
    reads: std::rc::Rc<std::cell::Cell<usize>>,
}

impl PositionalAccess for CountingIndices {
    type Item = i64;

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn get(&mut self, pos: usize) -> sparx::Result<i64> {
        self.reads.set(self.reads.get() + 1);
        self.inner.get(pos)
    }

    fn duplicate(&self) -> Self {
        Self {
            inner: self.inner.duplicate(),
            reads: self.reads.clone(),
        }
    }
}

#[test]
fn test_sequential_scan_reads_are_bounded() {
    // One dense row of 10_000 entries
    let n = 10_000usize;
    let data: Vec<f64> = (0..n).map(|i| i as f64 + 1.0).collect();
    let indices: Vec<i64> = (0..n as i64).collect();
    let reads = std::rc::Rc::new(std::cell::Cell::new(0));

    for strategy in STRATEGIES {
        reads.set(0);
        let storage = CompressedStorage::new(
            ArraySequence::from(data.clone()),
            CountingIndices {
                inner: ArraySequence::from(indices.clone()),
                reads: reads.clone(),
            },
            ArraySequence::from(vec![0i64, n as i64]),
            PointerResolver::new(Orientation::Csr, [1, n]),
        )
        .unwrap();
        let mut acc = SparseAccessor::with_strategy(storage, strategy);

        acc.set_position(&[0, 0]);
        for col in 0..n {
            assert_eq!(acc.get(), Ok(col as f64 + 1.0));
            acc.fwd(1);
        }
        assert!(
            reads.get() <= 6 * n,
            "{strategy:?}: {} index reads for {n} steps",
            reads.get()
        );
    }
}

#[test]
fn test_corrupt_run_never_reads_as_fill() {
    // Row 1 holds [4, 1]: an inversion
    let storage = CompressedStorage::new(
        ArraySequence::from(vec![1.0f64, 2.0, 3.0, 4.0]),
        ArraySequence::from(vec![0i64, 2, 4, 1]),
        ArraySequence::from(vec![0i64, 2, 4]),
        PointerResolver::new(Orientation::Csr, [2, 5]),
    )
    .unwrap();

    for strategy in STRATEGIES {
        let mut acc = SparseAccessor::with_strategy(storage.duplicate(), strategy);
        // the clean row still reads normally
        assert_eq!(acc.get_at(&[0, 2]), Ok(2.0));
        for col in 0..5 {
            match acc.get_at(&[1, col]) {
                Err(SparxError::StorageCorruption { .. }) => {}
                other => panic!("{strategy:?} col {col}: expected corruption, got {other:?}"),
            }
        }
    }
}
