use ndview::{Array, DataType, Range};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Array of the given sizes filled with `value`.
pub fn constant(sizes: &[usize], dtype: DataType, value: f64) -> Array {
    let a = Array::new(sizes, 1, dtype).expect("valid sizes");
    a.fill(value);
    a
}

/// 2-D ramp where pixel `(y, x)` holds `y * width + x`.
pub fn ramp_i32(height: usize, width: usize) -> Array {
    let data: Vec<i32> = (0..(height * width) as i32).collect();
    Array::from_vec(&[height, width], 1, data).expect("valid sizes")
}

/// Seeded uniform noise in `[0, 256)`.
pub fn noise_u8(sizes: &[usize], channels: usize, seed: u64) -> Array {
    let a = Array::new(sizes, channels, DataType::U8).expect("valid sizes");
    let mut rng = StdRng::seed_from_u64(seed);
    a.fill_uniform(0.0, 256.0, &mut rng).expect("non-empty range");
    a
}

/// Writes `value` into the half-open block `[y0, y1) x [x0, x1)`.
pub fn fill_block(a: &Array, y: (isize, isize), x: (isize, isize), value: f64) {
    a.slice(&[Range::new(y.0, y.1), Range::new(x.0, x.1)])
        .expect("block inside the array")
        .fill(value);
}
