use num_rs_compose::kernel::{select, Strategy};
use num_rs_compose::view::{Identity, Wrapped};
use num_rs_compose::{Aggregator, DenseStore, MatrixView, Region, SparseStore};

fn scenario() -> SparseStore<f64> {
    SparseStore::from_triplets(4, 4, [(0, 0, 2.0), (3, 2, 5.0)]).expect("triplets")
}

fn dense_rhs(rows: usize, cols: usize) -> DenseStore<f64> {
    DenseStore::from_fn(rows, cols, |r, c| ((r * 3 + c * 5) % 11) as f64 - 4.0)
}

#[test]
fn identity_product_reproduces_pattern() {
    let sparse = scenario();
    let identity = DenseStore::<f64>::identity(4);
    let product = sparse.multiply(&identity).expect("multiply");
    assert_eq!(product, sparse.to_dense());
    assert_eq!(sparse.limit_of_row(0), 1);
    assert_eq!(sparse.limit_of_row(3), 3);
    assert_eq!(sparse.first_in_row(3), 2);
    assert_eq!(sparse.first_in_row(1), 4);
    assert_eq!(sparse.limit_of_row(1), 0);

    let mut into_sparse = SparseStore::new(4, 4);
    into_sparse
        .fill_by_multiplying(&sparse, &Identity::<f64>::square(4))
        .expect("sparse destination");
    assert_eq!(into_sparse, sparse);
}

#[test]
fn occupancy_survives_zero_writes_until_reset() {
    let mut sparse = scenario();
    sparse.set(3, 2, 0.0);
    assert_eq!(sparse.nnz(), 1);
    assert_eq!(sparse.limit_of_row(3), 3);
    sparse.reset();
    assert_eq!(sparse.limit_of_row(0), 0);
    assert_eq!(sparse.first_in_row(0), 4);
}

#[test]
fn sparse_and_dense_multiply_agree() {
    let sparse = SparseStore::from_triplets(
        5,
        6,
        [(0, 1, 1.5), (1, 5, -2.0), (2, 0, 3.0), (2, 3, 0.5), (4, 4, 4.0)],
    )
    .expect("triplets");
    let dense = sparse.to_dense();
    let rhs = dense_rhs(6, 3);

    assert_eq!(select::<f64>(&sparse, &rhs), Strategy::LeftSparse);
    assert_eq!(select::<f64>(&dense, &rhs), Strategy::BothDense);
    let from_sparse = sparse.multiply(&rhs).expect("sparse");
    let from_dense = dense.multiply(&rhs).expect("dense");
    let (hidden_left, hidden_right) = (Wrapped::hiding(&dense), Wrapped::hiding(&rhs));
    assert_eq!(select::<f64>(&hidden_left, &hidden_right), Strategy::Generic);
    let mut from_generic = DenseStore::zeros(5, 3);
    from_generic
        .fill_by_multiplying(&hidden_left, &hidden_right)
        .expect("generic");
    assert_eq!(from_sparse, from_dense);
    assert_eq!(from_generic, from_dense);

    let lhs = dense_rhs(2, 5);
    assert_eq!(select::<f64>(&lhs, &sparse), Strategy::RightSparse);
    assert_eq!(lhs.multiply(&sparse).expect("right sparse"), lhs.multiply(&dense).expect("dense"));
}

#[test]
fn sum_reductions_agree_with_dense() {
    let sparse = SparseStore::from_triplets(3, 4, [(0, 0, 1.0), (0, 3, 2.0), (2, 1, -4.0)])
        .expect("triplets");
    let dense = sparse.to_dense();
    assert_eq!(sparse.reduce_rows(Aggregator::Sum), dense.reduce_rows(Aggregator::Sum));
    assert_eq!(sparse.reduce_columns(Aggregator::Sum), dense.reduce_columns(Aggregator::Sum));
    assert_eq!(sparse.aggregate_all(Aggregator::Sum), dense.aggregate_all(Aggregator::Sum));
    assert_eq!(
        sparse.reduce_rows(Aggregator::Product),
        dense.reduce_rows(Aggregator::Product)
    );
    assert_eq!(
        sparse.aggregate_all(Aggregator::Minimum),
        dense.aggregate_all(Aggregator::Minimum)
    );
}

#[test]
fn supply_resets_then_streams_nonzeros() {
    let sparse = scenario();
    let mut dense = DenseStore::filled(4, 4, 7.0);
    sparse.supply_to(&mut dense);
    assert_eq!(dense, sparse.to_dense());

    let mut other = SparseStore::from_triplets(4, 4, [(1, 1, 1.0)]).expect("triplets");
    sparse.supply_to(&mut other);
    assert_eq!(other, sparse);
}

#[test]
fn csr_input_is_validated() {
    let store = SparseStore::from_csr(
        3,
        3,
        &[0, 2, 3, 5],
        &[0, 2, 1, 0, 2],
        &[1.0, 2.0, 3.0, 4.0, 5.0],
    )
    .expect("csr");
    assert_eq!(
        store.to_dense().to_row_major_vec(),
        vec![1.0, 0.0, 2.0, 0.0, 3.0, 0.0, 4.0, 0.0, 5.0]
    );
    assert!(SparseStore::<f64>::from_csr(3, 3, &[0, 1, 1], &[0], &[1.0]).is_err());
    assert!(SparseStore::from_csr(1, 2, &[0, 1], &[2], &[1.0]).is_err());
}
