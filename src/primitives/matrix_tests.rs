pub(crate) use super::*;

#[test]
fn test_from_vec() {
    let m = Matrix::from_vec(2, 3, vec![1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    assert_eq!(m.shape(), (2, 3));
    assert!((m.get(0, 0) - 1.0).abs() < 1e-6);
    assert!((m.get(1, 2) - 6.0).abs() < 1e-6);
}

#[test]
fn test_from_vec_error() {
    let result = Matrix::from_vec(2, 3, vec![1.0_f32, 2.0, 3.0]);
    assert!(result.is_err());
}

#[test]
fn test_zeros() {
    let m = Matrix::<f32>::zeros(2, 3);
    assert_eq!(m.shape(), (2, 3));
    assert!(m.as_slice().iter().all(|&x| x == 0.0));
}

#[test]
fn test_set_then_get() {
    let mut m = Matrix::<f32>::zeros(2, 2);
    m.set(0, 1, 3.5);
    m.set(1, 0, -2.0);
    assert!((m.get(0, 1) - 3.5).abs() < 1e-6);
    assert!((m.get(1, 0) + 2.0).abs() < 1e-6);
    assert!((m.get(0, 0)).abs() < 1e-6);
}

#[test]
fn test_row() {
    let m = Matrix::from_vec(2, 3, vec![1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    let row = m.row(1);
    assert_eq!(row.len(), 3);
    assert!((row[0] - 4.0).abs() < 1e-6);
    assert!((row[1] - 5.0).abs() < 1e-6);
    assert!((row[2] - 6.0).abs() < 1e-6);
}

#[test]
fn test_column() {
    let m = Matrix::from_vec(2, 3, vec![1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    let col = m.column(1);
    assert_eq!(col.len(), 2);
    assert!((col[0] - 2.0).abs() < 1e-6);
    assert!((col[1] - 5.0).abs() < 1e-6);
}

#[test]
fn test_take_rows_gathers_in_order() {
    let m = Matrix::from_vec(3, 2, vec![1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 3*2=6 elements");
    let sub = m.take_rows(&[2, 0]);
    assert_eq!(sub.shape(), (2, 2));
    assert!((sub.get(0, 0) - 5.0).abs() < 1e-6);
    assert!((sub.get(0, 1) - 6.0).abs() < 1e-6);
    assert!((sub.get(1, 0) - 1.0).abs() < 1e-6);
}

#[test]
fn test_take_rows_allows_repeats() {
    let m = Matrix::from_vec(2, 2, vec![1.0_f32, 2.0, 3.0, 4.0])
        .expect("test data has correct dimensions: 2*2=4 elements");
    let sub = m.take_rows(&[1, 1, 1]);
    assert_eq!(sub.shape(), (3, 2));
    for i in 0..3 {
        assert!((sub.get(i, 0) - 3.0).abs() < 1e-6);
        assert!((sub.get(i, 1) - 4.0).abs() < 1e-6);
    }
}

#[test]
fn test_take_rows_empty() {
    let m = Matrix::from_vec(2, 2, vec![1.0_f32, 2.0, 3.0, 4.0])
        .expect("test data has correct dimensions: 2*2=4 elements");
    let sub = m.take_rows(&[]);
    assert_eq!(sub.shape(), (0, 2));
}

#[test]
fn test_generic_matrix_usize() {
    let m = Matrix::from_vec(2, 2, vec![1_usize, 2, 3, 4])
        .expect("test data has correct dimensions: 2*2=4 elements");
    assert_eq!(m.get(1, 1), 4);
    assert_eq!(m.n_rows(), 2);
    assert_eq!(m.n_cols(), 2);
}

#[test]
fn test_as_slice_is_row_major() {
    let m = Matrix::from_vec(2, 2, vec![1.0_f32, 2.0, 3.0, 4.0])
        .expect("test data has correct dimensions: 2*2=4 elements");
    assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_serde_round_trip() {
    let m = Matrix::from_vec(2, 2, vec![1.0_f32, 2.0, 3.0, 4.0])
        .expect("test data has correct dimensions: 2*2=4 elements");
    let json = serde_json::to_string(&m).expect("matrix serializes");
    let back: Matrix<f32> = serde_json::from_str(&json).expect("matrix deserializes");
    assert_eq!(m, back);
}
