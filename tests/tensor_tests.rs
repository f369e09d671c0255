use tensorflux::tensor;
use tensorflux::tensors::{Tensor, broadcast::broadcast_shape, matrix_product};
use tensorflux::TensorError;

#[test]
fn test_tensor_creation() {
    let t = Tensor::from_vec([2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    assert_eq!(t.shape(), &[2, 2]);
    assert_eq!(t.data(), &[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(t.len(), 4);
}

#[test]
fn test_tensor_wrong_length() {
    let err = Tensor::from_vec([2, 2], vec![1.0, 2.0, 3.0]).unwrap_err();
    assert_eq!(
        err,
        TensorError::DataLength {
            shape: vec![2, 2],
            expected: 4,
            got: 3
        }
    );
}

#[test]
fn test_zeros_overflow() {
    assert!(matches!(
        Tensor::<f64, 2>::zeros([usize::MAX, 2]),
        Err(TensorError::ShapeOverflow { .. })
    ));
}

#[test]
fn test_from_dims_rank_mismatch() {
    assert_eq!(
        Tensor::<f32, 3>::from_dims(&[2, 2]).unwrap_err(),
        TensorError::RankMismatch { expected: 3, got: 2 }
    );
    assert_eq!(Tensor::<f32, 3>::from_dims(&[2, 1, 4]).unwrap().len(), 8);
}

#[test]
fn test_tensor_macro() {
    let t: Tensor<f64, 2> = tensor!([[1.0, 2.0], [3.0, 4.0]]);
    assert_eq!(t.shape(), &[2, 2]);
    assert_eq!(t.data(), &[1.0, 2.0, 3.0, 4.0]);

    let cube: Tensor<f32, 3> = tensor!([[[1.0], [2.0]], [[3.0], [4.0]]]);
    assert_eq!(cube.shape(), &[2, 2, 1]);
}

#[test]
fn test_index_access() {
    let mut t = Tensor::<f64, 3>::zeros([2, 3, 4]).unwrap();
    t.set([1, 2, 3], 9.0).unwrap();
    assert_eq!(*t.get([1, 2, 3]).unwrap(), 9.0);
    assert_eq!(t[23], 9.0);
    *t.get_mut([0, 0, 1]).unwrap() = -1.0;
    assert_eq!(t[1], -1.0);

    assert_eq!(
        t.get([0, 3, 0]).unwrap_err(),
        TensorError::IndexOutOfRange {
            index: vec![0, 3, 0],
            shape: vec![2, 3, 4]
        }
    );
}

#[test]
fn test_broadcast_shape_rule() {
    let a: Tensor<f64, 2> = tensor!([[1.0], [2.0], [3.0]]);
    let b: Tensor<f64, 2> = tensor!([[10.0, 20.0]]);
    let c = a.broadcast_add(&b).unwrap();
    assert_eq!(c.shape(), &[3, 2]);
    assert_eq!(c.data(), &[11.0, 21.0, 12.0, 22.0, 13.0, 23.0]);

    let d = a.broadcast_mul(&b).unwrap();
    assert_eq!(d.data(), &[10.0, 20.0, 20.0, 40.0, 30.0, 60.0]);

    let e = b.broadcast_sub(&a).unwrap();
    assert_eq!(e.data(), &[9.0, 19.0, 8.0, 18.0, 7.0, 17.0]);

    assert_eq!(broadcast_shape(&[2, 1, 5], &[1, 4, 5]).unwrap(), [2, 4, 5]);
}

#[test]
fn test_broadcast_mismatch_leaves_operands() {
    let a: Tensor<f64, 2> = tensor!([[1.0, 2.0, 3.0]]);
    let b: Tensor<f64, 2> = tensor!([[1.0, 2.0]]);
    let (a0, b0) = (a.clone(), b.clone());
    assert!(matches!(
        a.broadcast_add(&b),
        Err(TensorError::BroadcastMismatch { .. })
    ));
    assert_eq!(a, a0);
    assert_eq!(b, b0);
}

#[test]
fn test_scalar_ops() {
    let t: Tensor<f64, 1> = tensor!([1.0, 2.0, 4.0]);
    assert_eq!((&t + 1.0).data(), &[2.0, 3.0, 5.0]);
    assert_eq!((&t - 1.0).data(), &[0.0, 1.0, 3.0]);
    assert_eq!((&t * 2.0).data(), &[2.0, 4.0, 8.0]);
    assert_eq!((t.clone() / 2.0).data(), &[0.5, 1.0, 2.0]);
    assert_eq!((3.0_f64 * &t).data(), &[3.0, 6.0, 12.0]);
    assert_eq!((1.0_f64 + t.clone()).data(), &[2.0, 3.0, 5.0]);

    let mut u = t;
    u += 0.5;
    assert_eq!(u.data(), &[1.5, 2.5, 4.5]);
}

#[test]
fn test_matmul_dimensions() {
    let a: Tensor<f64, 2> = tensor!([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    let b: Tensor<f64, 2> = tensor!([[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]]);
    let c = a.matmul(&b).unwrap();
    assert_eq!(c.shape(), &[2, 2]);
    assert_eq!(c.data(), &[58.0, 64.0, 139.0, 154.0]);

    assert!(matches!(
        a.matmul(&a),
        Err(TensorError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_batched_matmul() {
    let a: Tensor<f64, 3> = tensor!([[[1.0, 0.0], [0.0, 1.0]], [[2.0, 0.0], [0.0, 2.0]]]);
    let b: Tensor<f64, 3> = tensor!([[[1.0], [2.0]], [[3.0], [4.0]]]);
    let c = matrix_product(&a, &b).unwrap();
    assert_eq!(c.shape(), &[2, 2, 1]);
    assert_eq!(c.data(), &[1.0, 2.0, 6.0, 8.0]);

    let other_batch = Tensor::<f64, 3>::zeros([3, 2, 1]).unwrap();
    assert!(matrix_product(&a, &other_batch).is_err());
}

#[test]
fn test_matmul_rejects_low_rank() {
    let v: Tensor<f64, 1> = tensor!([1.0, 2.0]);
    assert!(matches!(
        v.matmul(&v),
        Err(TensorError::DimensionMismatch { .. })
    ));
    assert!(v.transpose().is_err());
}

#[test]
fn test_transpose_involution() {
    let m: Tensor<f64, 2> = tensor!([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    let t = m.transpose().unwrap();
    assert_eq!(t.shape(), &[3, 2]);
    assert_eq!(t.data(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    assert_eq!(t.transpose().unwrap(), m);

    let batch = Tensor::from_vec([2, 2, 3], (0..12_u32).map(f64::from).collect()).unwrap();
    assert_eq!(batch.transpose().unwrap().transpose().unwrap(), batch);
}

#[test]
fn test_sum_rows() {
    let m: Tensor<f64, 2> = tensor!([[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
    let s = m.sum_rows().unwrap();
    assert_eq!(s.shape(), &[1, 2]);
    assert_eq!(s.data(), &[9.0, 12.0]);

    let cube = Tensor::<f64, 3>::zeros([2, 2, 2]).unwrap();
    assert!(cube.sum_rows().is_err());
}

#[test]
fn test_reshape_shrinks_only() {
    let mut t = Tensor::from_vec([2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    t.reshape(&[3, 2]).unwrap();
    assert_eq!(t.shape(), &[3, 2]);

    t.reshape(&[2, 2]).unwrap();
    assert_eq!(t.data(), &[1.0, 2.0, 3.0, 4.0]);

    assert!(matches!(
        t.reshape(&[3, 3]),
        Err(TensorError::ReshapeTooLarge { .. })
    ));
    assert!(matches!(
        t.reshape(&[4]),
        Err(TensorError::RankMismatch { .. })
    ));
}

#[test]
fn test_row_helpers() {
    let m: Tensor<f64, 2> = tensor!([[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
    assert_eq!(m.row(1).unwrap(), &[3.0, 4.0]);
    assert!(m.row(3).is_err());
    assert_eq!(m.slice_rows(1, 3).unwrap().data(), &[3.0, 4.0, 5.0, 6.0]);
    assert_eq!(m.select_rows(&[2, 0]).unwrap().data(), &[5.0, 6.0, 1.0, 2.0]);
    assert!(m.select_rows(&[5]).is_err());
}

#[test]
fn test_display() {
    let v: Tensor<f64, 1> = tensor!([1.0, 2.5, 3.0]);
    assert_eq!(v.to_string(), "{1 2.5 3}");

    let m: Tensor<f64, 2> = tensor!([[1.0, 2.0], [3.0, 4.0]]);
    assert_eq!(m.to_string(), "{\n1 2\n3 4\n}");

    let c: Tensor<f64, 3> = tensor!([[[1.0]], [[2.0]]]);
    assert_eq!(c.to_string(), "{\n{\n1\n}\n{\n2\n}\n}");
}

#[test]
fn test_map_and_assign() {
    let mut t = Tensor::<f32, 2>::zeros([2, 2]).unwrap();
    t.assign(&[1.0, -2.0, 3.0, -4.0]).unwrap();
    let abs = t.map(|x| x.abs());
    assert_eq!(abs.data(), &[1.0, 2.0, 3.0, 4.0]);
    assert!(t.assign(&[1.0]).is_err());
    t.fill(7.0);
    assert!(t.iter().all(|&x| x == 7.0));
}
