//! Shared matrix synthesizers for integration tests
//!
//! Entry `i` of a generated matrix (row-major index) is `i % 149` when kept
//! by the filter and zero otherwise.

#![allow(dead_code)]

use csrmat::SparseMatrixCSR;

fn element(index: usize) -> i32 {
    (index % 149) as i32
}

fn generate_with_filter<F>(n_rows: usize, n_cols: usize, keep: F) -> SparseMatrixCSR<i32>
where
    F: Fn(usize) -> bool,
{
    let values = (0..n_rows * n_cols).map(|i| if keep(i) { element(i) } else { 0 });
    SparseMatrixCSR::from_dense_values(n_rows, n_cols, values).unwrap()
}

pub fn generate_dense_matrix(n_rows: usize, n_cols: usize) -> SparseMatrixCSR<i32> {
    generate_with_filter(n_rows, n_cols, |_| true)
}

pub fn generate_with_skipped_cells(n_rows: usize, n_cols: usize, skip_cells: usize) -> SparseMatrixCSR<i32> {
    generate_with_filter(n_rows, n_cols, |i| i % skip_cells == 0)
}

pub fn generate_with_skipped_rows(n_rows: usize, n_cols: usize, skip_rows: usize) -> SparseMatrixCSR<i32> {
    generate_with_filter(n_rows, n_cols, |i| (i / n_cols) % skip_rows == 0)
}

pub fn generate_with_skipped_rows_and_cells(
    n_rows: usize,
    n_cols: usize,
    skip_rows: usize,
    skip_cells: usize,
) -> SparseMatrixCSR<i32> {
    generate_with_filter(n_rows, n_cols, |i| {
        (i / n_cols) % skip_rows == 0 && i % skip_cells == 0
    })
}

/// Row `row` of a generated matrix; a skip of 0 keeps everything
pub fn generated_row(row: usize, n_cols: usize, skip_rows: usize, skip_cells: usize) -> Vec<i32> {
    (0..n_cols)
        .map(|c| {
            let index = row * n_cols + c;
            let row_kept = skip_rows == 0 || row % skip_rows == 0;
            let cell_kept = skip_cells == 0 || index % skip_cells == 0;
            if row_kept && cell_kept {
                element(index)
            } else {
                0
            }
        })
        .collect()
}

/// Column `column` of a generated matrix; a skip of 0 keeps everything
pub fn generated_column(
    column: usize,
    n_cols: usize,
    n_rows: usize,
    skip_rows: usize,
    skip_cells: usize,
) -> Vec<i32> {
    (0..n_rows)
        .map(|r| {
            let index = r * n_cols + column;
            let row_kept = skip_rows == 0 || r % skip_rows == 0;
            let cell_kept = skip_cells == 0 || index % skip_cells == 0;
            if row_kept && cell_kept {
                element(index)
            } else {
                0
            }
        })
        .collect()
}

pub fn dot(row: &[i32], column: &[i32]) -> i32 {
    assert_eq!(row.len(), column.len(), "row and column lengths differ");
    row.iter().zip(column).map(|(a, b)| a * b).sum()
}
