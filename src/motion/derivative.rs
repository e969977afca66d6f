// PetPal — Derivative Engine
//
// Rate of change between consecutive smoothed samples.

/// `output[i] = |input[i + 1] - input[i]| / dt`, length `input.len() - 1`.
pub fn derivative(input: &[f32], dt: f32) -> Vec<f32> {
    input
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).abs() / dt)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn constant_series_has_zero_slope() {
        let out = derivative(&[4.0; 10], 0.1);
        assert_eq!(out.len(), 9);
        assert!(out.iter().all(|&d| d == 0.0));
    }

    #[test]
    fn slope_is_absolute() {
        let out = derivative(&[0.0, 1.0, 0.5], 0.5);
        assert_eq!(out, vec![2.0, 1.0]);
    }

    #[test]
    fn short_inputs() {
        assert!(derivative(&[], 0.1).is_empty());
        assert!(derivative(&[1.0], 0.1).is_empty());
    }

    proptest! {
        #[test]
        fn length_and_sign(input in prop::collection::vec(-100.0f32..100.0, 1..60)) {
            let out = derivative(&input, 0.1);
            prop_assert_eq!(out.len(), input.len() - 1);
            prop_assert!(out.iter().all(|&d| d >= 0.0));
        }
    }
}
