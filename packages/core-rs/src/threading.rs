//! Divide-and-conquer configuration and fork-join helpers.
//!
//! Every parallel kernel decides once per call whether to split: the
//! relevant extent (usually a column count) is compared against the
//! operation's threshold. Thresholds come from `NUMRS_SPLIT_<OP>`
//! environment variables, falling back to the defaults on [`Op`].

use parking_lot::Mutex;
use std::env;
use std::ops::Range;
use std::sync::OnceLock;
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const THREAD_ENV: &str = "NUMRS_CPU_THREADS";
const DISABLE_ENV: &str = "NUMRS_DISABLE_PARALLEL";
const SPLIT_ENV_PREFIX: &str = "NUMRS_SPLIT_";

static THREAD_OVERRIDE: OnceLock<Option<usize>> = OnceLock::new();
static DISABLE_PARALLEL: OnceLock<bool> = OnceLock::new();
static THRESHOLDS: OnceLock<[usize; Op::COUNT]> = OnceLock::new();

/// Operations that carry their own split threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Multiply,
    Aggregate,
    Modify,
    Householder,
    Rotate,
    Substitute,
    Eliminate,
}

impl Op {
    const COUNT: usize = 7;

    const ALL: [Op; Op::COUNT] = [
        Op::Multiply,
        Op::Aggregate,
        Op::Modify,
        Op::Householder,
        Op::Rotate,
        Op::Substitute,
        Op::Eliminate,
    ];

    /// Column count above which the operation splits.
    pub const fn default_threshold(self) -> usize {
        match self {
            Op::Multiply => 32,
            Op::Aggregate => 128,
            Op::Modify => 256,
            Op::Householder => 128,
            Op::Rotate => 512,
            Op::Substitute => 64,
            Op::Eliminate => 64,
        }
    }

    fn env_name(self) -> String {
        let suffix = match self {
            Op::Multiply => "MULTIPLY",
            Op::Aggregate => "AGGREGATE",
            Op::Modify => "MODIFY",
            Op::Householder => "HOUSEHOLDER",
            Op::Rotate => "ROTATE",
            Op::Substitute => "SUBSTITUTE",
            Op::Eliminate => "ELIMINATE",
        };
        format!("{SPLIT_ENV_PREFIX}{suffix}")
    }

    fn index(self) -> usize {
        self as usize
    }
}

pub fn thread_override() -> Option<usize> {
    *THREAD_OVERRIDE.get_or_init(|| match env::var(THREAD_ENV) {
        Ok(value) => match value.trim() {
            "" => None,
            raw => match raw.parse::<usize>() {
                Ok(0) => None,
                Ok(n) => Some(n.max(1)),
                Err(_) => None,
            },
        },
        Err(_) => None,
    })
}

pub fn parallel_disabled() -> bool {
    *DISABLE_PARALLEL.get_or_init(|| {
        matches!(
            env::var(DISABLE_ENV)
                .ok()
                .map(|raw| raw.trim().to_ascii_lowercase()),
            Some(ref value) if value == "1" || value == "true" || value == "yes"
        )
    })
}

/// The configured threshold for `op`.
pub fn threshold(op: Op) -> usize {
    THRESHOLDS.get_or_init(|| {
        let mut values = [0usize; Op::COUNT];
        for op in Op::ALL {
            values[op.index()] = env::var(op.env_name())
                .ok()
                .and_then(|raw| raw.trim().parse::<usize>().ok())
                .unwrap_or(op.default_threshold());
        }
        values
    })[op.index()]
}

#[cfg(feature = "parallel")]
static INIT_RAYON: std::sync::Once = std::sync::Once::new();

#[cfg(feature = "parallel")]
pub fn ensure_rayon_pool() {
    use rayon::ThreadPoolBuilder;
    INIT_RAYON.call_once(|| {
        let builder = match thread_override() {
            Some(threads) => ThreadPoolBuilder::new().num_threads(threads),
            None => ThreadPoolBuilder::new(),
        };
        // Someone else may already own the global pool; that one is used as is.
        let _ = builder.build_global();
    });
}

#[cfg(not(feature = "parallel"))]
pub fn ensure_rayon_pool() {}

/// Number of workers available to a split.
pub fn parallelism() -> usize {
    #[cfg(feature = "parallel")]
    {
        ensure_rayon_pool();
        rayon::current_num_threads().max(1)
    }
    #[cfg(not(feature = "parallel"))]
    {
        1
    }
}

/// The per-call split decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Split {
    threshold: usize,
    parallelism: usize,
}

impl Split {
    /// The configured policy for `op`; sequential when parallelism is disabled.
    pub fn for_op(op: Op) -> Self {
        if parallel_disabled() {
            return Split::sequential();
        }
        Split {
            threshold: threshold(op),
            parallelism: parallelism(),
        }
    }

    /// Never splits.
    pub const fn sequential() -> Self {
        Split {
            threshold: usize::MAX,
            parallelism: 1,
        }
    }

    /// Splits whenever there are at least two columns to hand out.
    pub fn eager() -> Self {
        Split {
            threshold: 0,
            parallelism: parallelism().max(2),
        }
    }

    pub fn with_threshold(threshold: usize) -> Self {
        Split {
            threshold,
            parallelism: parallelism(),
        }
    }

    pub fn with_parallelism(self, parallelism: usize) -> Self {
        Split {
            parallelism: parallelism.max(1),
            ..self
        }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Length of each contiguous chunk of `[0, extent)`, or `None` when the
    /// work should run inline.
    pub fn chunk_len(&self, extent: usize) -> Option<usize> {
        if extent <= self.threshold || extent < 2 {
            return None;
        }
        let min_chunk = self.threshold.max(1);
        let by_size = (extent + min_chunk - 1) / min_chunk;
        let chunks = by_size.min(self.parallelism);
        if chunks < 2 {
            return None;
        }
        Some((extent + chunks - 1) / chunks)
    }
}

fn run_chunks<F>(extent: usize, len: usize, task: F)
where
    F: Fn(Range<usize>) + Send + Sync,
{
    let chunks = (extent + len - 1) / len;
    let range_of = |index: usize| index * len..((index + 1) * len).min(extent);
    #[cfg(feature = "parallel")]
    (0..chunks).into_par_iter().for_each(|index| task(range_of(index)));
    #[cfg(not(feature = "parallel"))]
    (0..chunks).for_each(|index| task(range_of(index)));
}

/// Runs `task` over `[0, extent)`, either inline or as disjoint contiguous
/// ranges joined before returning.
pub(crate) fn divide_range<F>(split: Split, extent: usize, task: F)
where
    F: Fn(Range<usize>) + Send + Sync,
{
    match split.chunk_len(extent) {
        Some(len) => {
            trace!(?split, extent, chunk = len, "divide");
            run_chunks(extent, len, task);
        }
        None => task(0..extent),
    }
}

/// Runs `task(first_column, chunk)` over a column-major buffer cut into
/// disjoint column blocks.
pub(crate) fn divide_columns_mut<T, F>(
    split: Split,
    data: &mut [T],
    rows: usize,
    columns: usize,
    task: F,
) where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    match split.chunk_len(columns) {
        Some(len) if rows > 0 => {
            trace!(?split, columns, chunk = len, "divide columns");
            let block = rows * len;
            #[cfg(feature = "parallel")]
            data.par_chunks_mut(block)
                .enumerate()
                .for_each(|(index, part)| task(index * len, part));
            #[cfg(not(feature = "parallel"))]
            data.chunks_mut(block)
                .enumerate()
                .for_each(|(index, part)| task(index * len, part));
        }
        _ => task(0, data),
    }
}

/// Runs `task(first_index, left_part, right_part)` over two equally long
/// slices cut at the same offsets.
pub(crate) fn divide_pair_mut<T, F>(split: Split, left: &mut [T], right: &mut [T], task: F)
where
    T: Send,
    F: Fn(usize, &mut [T], &mut [T]) + Send + Sync,
{
    debug_assert_eq!(left.len(), right.len());
    let extent = left.len();
    match split.chunk_len(extent) {
        Some(len) => {
            trace!(?split, extent, chunk = len, "divide pair");
            #[cfg(feature = "parallel")]
            left.par_chunks_mut(len)
                .zip(right.par_chunks_mut(len))
                .enumerate()
                .for_each(|(index, (l, r))| task(index * len, l, r));
            #[cfg(not(feature = "parallel"))]
            left.chunks_mut(len)
                .zip(right.chunks_mut(len))
                .enumerate()
                .for_each(|(index, (l, r))| task(index * len, l, r));
        }
        None => task(0, left, right),
    }
}

/// Each chunk accumulates into a private state, parked in its slot once the
/// chunk completes. Slots are merged in chunk order after the join, so the
/// result only depends on the chunk boundaries, never on scheduling.
pub(crate) fn divide_and_merge<S, I, F, M>(
    split: Split,
    extent: usize,
    init: I,
    task: F,
    merge: M,
) -> S
where
    S: Send,
    I: Fn() -> S + Send + Sync,
    F: Fn(Range<usize>, &mut S) + Send + Sync,
    M: Fn(&mut S, S),
{
    match split.chunk_len(extent) {
        Some(len) => {
            trace!(?split, extent, chunk = len, "divide and merge");
            let chunks = (extent + len - 1) / len;
            let slots: Mutex<Vec<Option<S>>> = Mutex::new((0..chunks).map(|_| None).collect());
            run_chunks(extent, len, |range| {
                let index = range.start / len;
                let mut partial = init();
                task(range, &mut partial);
                slots.lock()[index] = Some(partial);
            });
            let mut merged = init();
            for partial in slots.into_inner().into_iter().flatten() {
                merge(&mut merged, partial);
            }
            merged
        }
        None => {
            let mut state = init();
            task(0..extent, &mut state);
            state
        }
    }
}
