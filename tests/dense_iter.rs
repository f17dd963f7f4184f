//! Tests for the splittable dense-order iterator

mod common;

use common::generate_with_skipped_rows_and_cells;
use csrmat::DenseIter;
use rayon::prelude::*;

/// Splits recursively until every piece covers a single row
fn split_to_rows<'a>(iter: DenseIter<'a, i32>, pieces: &mut Vec<DenseIter<'a, i32>>) {
    match iter.split() {
        (lower, Some(upper)) => {
            split_to_rows(lower, pieces);
            split_to_rows(upper, pieces);
        }
        (single, None) => pieces.push(single),
    }
}

#[test]
fn test_nonzero_count() {
    let matrix = generate_with_skipped_rows_and_cells(1001, 566, 2, 3);

    let sequential = matrix.dense_iter().filter(|&v| v != 0).count();
    let parallel = matrix.par_dense_values().filter(|&v| v != 0).count();

    assert_eq!(sequential, 93889);
    assert_eq!(parallel, 93889);
    assert_eq!(matrix.nnz(), 93889);
}

#[test]
fn test_try_split_chain() {
    let matrix = generate_with_skipped_rows_and_cells(1001, 566, 2, 3);

    let mut first = matrix.dense_iter();
    let mut second = first.try_split().unwrap();
    let mut third = second.try_split().unwrap();
    let fourth = third.try_split().unwrap();

    // Every piece covers a disjoint row range, so any consumption order counts each value once.
    let total = [first, second, third, fourth]
        .into_par_iter()
        .map(|piece| piece.filter(|&v| v != 0).count())
        .sum::<usize>();
    assert_eq!(total, 93889);
}

#[test]
fn test_split_to_single_rows_preserves_order() {
    let matrix = generate_with_skipped_rows_and_cells(77, 13, 3, 2);
    let expected: Vec<_> = matrix.dense_iter().collect();

    let mut pieces = Vec::new();
    split_to_rows(matrix.dense_iter(), &mut pieces);

    assert_eq!(pieces.len(), 77);
    assert!(pieces.iter().all(|p| p.len() == 13));

    let joined: Vec<_> = pieces.into_iter().flatten().collect();
    assert_eq!(joined, expected);
}

#[test]
fn test_sizes_add_up_under_splits() {
    let matrix = generate_with_skipped_rows_and_cells(40, 9, 1, 4);
    let mut iter = matrix.dense_iter();
    for _ in 0..5 {
        iter.next();
    }

    let before = iter.len();
    let lower = iter.try_split().unwrap();
    assert_eq!(lower.len() + iter.len(), before);
    assert_eq!(iter.len(), 20 * 9);
}

#[test]
fn test_parallel_export_order() {
    let matrix = generate_with_skipped_rows_and_cells(300, 41, 2, 7);
    let parallel: Vec<_> = matrix.par_dense_values().collect();
    let sequential: Vec<_> = matrix.dense_iter().collect();
    assert_eq!(parallel, sequential);
}
