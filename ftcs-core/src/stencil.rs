use crate::field::Field;

/// One explicit FTCS update from `current` into `next`.
///
/// `current` and `next` are distinct borrows, so every read sees the previous
/// snapshot. Boundary cells are copied through unchanged.
///
/// Panics if the slices differ in length or hold fewer than three cells.
pub fn apply_stencil(current: &[f64], next: &mut [f64], k: f64) {
    let n = current.len();
    assert!(n >= 3 && next.len() == n, "stencil needs two equal buffers of >= 3 cells");

    next[0] = current[0];
    next[n - 1] = current[n - 1];

    for (i, w) in current.windows(3).enumerate() {
        let (left, u, right) = (w[0], w[1], w[2]);
        next[i + 1] = u + k * (right - 2.0 * u + left);
    }
}

/// Pure step: returns the next snapshot, leaves `current` untouched.
pub fn step(current: &Field, k: f64) -> Field {
    let mut next = vec![0.0; current.len()];
    apply_stencil(current.values(), &mut next, k);
    Field::from_raw(next)
}
