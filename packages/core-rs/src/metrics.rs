use std::cell::Cell;

// Per thread: materialization always happens on the thread that started the
// top-level call, and a process-wide counter would make concurrent tests see
// each other's copies.
thread_local! {
    static MATERIALIZED: Cell<u64> = const { Cell::new(0) };
}

/// Records `elements` scalars copied into a temporary buffer.
pub(crate) fn record_materialized(elements: usize) {
    MATERIALIZED.with(|count| count.set(count.get() + elements as u64));
}

pub fn materialized_total() -> u64 {
    MATERIALIZED.with(Cell::get)
}

pub fn take_materialized() -> u64 {
    MATERIALIZED.with(|count| count.replace(0))
}

pub fn reset_materialized() {
    MATERIALIZED.with(|count| count.set(0));
}
