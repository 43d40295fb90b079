mod common;

use common::synthetic::{constant, fill_block, noise_u8, ramp_i32};
use ndview::{Array, ArrayError, CompareOp, DataType, Range};

#[test]
fn masked_write_replaces_only_selected_pixels() {
    let _ = env_logger::builder().is_test(true).try_init();
    let a = constant(&[10, 20], DataType::U8, 0.0);
    // A few values below the threshold so "unchanged" is observable.
    fill_block(&a, (8, 10), (0, 20), 42.0);
    fill_block(&a, (0, 3), (0, 10), 100.0);
    fill_block(&a, (5, 7), (12, 17), 200.0);
    let before = a.samples();

    let m = a.compare(CompareOp::Ge, 100).unwrap();
    assert_eq!(m.count(), 3 * 10 + 2 * 5);
    a.scatter(&m, 176.0).unwrap();

    for (old, new) in before.iter().zip(a.samples()) {
        if *old >= 100.0 {
            assert_eq!(new, 176.0);
        } else {
            assert_eq!(new, *old);
        }
    }
}

#[test]
fn gather_then_scatter_round_trips() {
    let a = noise_u8(&[12, 9], 3, 5);
    let original = a.samples();
    let m = a.tensor_element(2).unwrap().compare(CompareOp::Lt, 128).unwrap();
    let picked = a.gather(&m).unwrap();
    assert_eq!(picked.len(), m.count() * 3);
    a.scatter_values(&m, &picked).unwrap();
    assert_eq!(a.samples(), original);
}

#[test]
fn round_trip_through_strided_mirrored_view() {
    let a = ramp_i32(6, 7);
    let v = a
        .slice(&[Range::all().with_step(2), Range::new(1, -1)])
        .unwrap()
        .mirror(&[])
        .unwrap()
        .swap_dimensions(0, 1)
        .unwrap();
    let original = a.samples();
    let m = v.compare(CompareOp::Ne, 15).unwrap();
    let picked = v.gather(&m).unwrap();
    v.scatter_values(&m, &picked).unwrap();
    assert_eq!(a.samples(), original);

    // Scan order runs over the view's own sizes, last dimension fastest.
    let first_row: Vec<f64> = (0..v.size(1)).map(|x| v.sample(&[0, x], 0).unwrap()).collect();
    assert_eq!(&v.samples()[..v.size(1)], first_row.as_slice());
}

#[test]
fn scatter_values_rejects_wrong_length() {
    let a = ramp_i32(4, 4);
    let m = a.compare(CompareOp::Gt, 9).unwrap();
    let before = a.samples();
    let err = a.scatter_values(&m, &[1.0, 2.0, 3.0]).unwrap_err();
    assert_eq!(err, ArrayError::LengthMismatch { expected: 6, found: 3 });
    assert_eq!(a.samples(), before);
}

#[test]
fn mask_from_another_array_of_same_shape() {
    let labels = ramp_i32(3, 3);
    let target = Array::new(&[3, 3], 2, DataType::F64).unwrap();
    let odd = labels.compare(CompareOp::Gt, 4).unwrap();
    target.scatter(&odd, 1.5).unwrap();
    assert_eq!(target.count(), 4 * 2);
    assert_eq!(target.at(&[2, 2]).unwrap(), vec![1.5, 1.5]);

    let wrong = ramp_i32(3, 4).compare(CompareOp::Gt, 4).unwrap();
    assert!(matches!(
        target.scatter(&wrong, 0.0),
        Err(ArrayError::ShapeMismatch { .. })
    ));
}

#[test]
fn masked_extracts_selected_pixels() {
    let a = ramp_i32(4, 5);
    let m = a.compare(CompareOp::Ge, 17).unwrap();
    let picked = a.masked(&m).unwrap();
    assert_eq!(picked.sizes(), &[3]);
    assert_eq!(picked.to_vec::<i32>().unwrap(), vec![17, 18, 19]);
    assert!(!picked.shares_storage(&a));
}

#[test]
fn combined_masks_select_a_band() {
    let a = ramp_i32(5, 5);
    let band = a
        .compare(CompareOp::Ge, 5)
        .unwrap()
        .and(&a.compare(CompareOp::Lt, 10).unwrap())
        .unwrap();
    assert_eq!(a.gather(&band).unwrap(), vec![5.0, 6.0, 7.0, 8.0, 9.0]);
}

#[test]
fn round_trip_keeps_non_finite_float_samples() {
    let a = Array::from_vec(
        &[2, 3],
        1,
        vec![1.0f32, f32::NAN, f32::INFINITY, f32::NEG_INFINITY, -0.5, 7.0],
    )
    .unwrap();
    let before = a.to_vec::<f32>().unwrap();
    let all = Array::new(&[2, 3], 1, DataType::Bin).unwrap();
    all.fill(1.0);

    let picked = a.gather(&all).unwrap();
    a.scatter_values(&all, &picked).unwrap();

    let after = a.to_vec::<f32>().unwrap();
    let bits = |v: &[f32]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&after), bits(&before));

    let wide = Array::from_vec(&[3], 1, vec![f64::NAN, f64::INFINITY, f64::NEG_INFINITY]).unwrap();
    let copy = Array::new(&[3], 1, DataType::F64).unwrap();
    copy.copy_from(&wide).unwrap();
    let values = copy.to_vec::<f64>().unwrap();
    assert!(values[0].is_nan());
    assert_eq!(&values[1..], &[f64::INFINITY, f64::NEG_INFINITY]);
}
