//! Softmax operations shared by the sampling pipeline.

use ndarray::Array1;

/// Numerically stable softmax, in place.
///
/// Subtracts the running maximum before exponentiation so large logits do
/// not overflow.
pub fn softmax_1d_inplace(x: &mut Array1<f32>) {
    let max = x.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0.0;
    for v in x.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    for v in x.iter_mut() {
        *v /= sum;
    }
}
