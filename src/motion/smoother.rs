// PetPal — Smoother
//
// Windowed moving average and plain mean.

/// Moving average with a sliding window of `window` elements.
///
/// Output length is `input.len() - window + 1`; `output[i]` is the mean of
/// `input[i..i + window]`. A zero window, or one longer than the input,
/// yields an empty series.
pub fn moving_average(input: &[f32], window: usize) -> Vec<f32> {
    if window == 0 || window > input.len() {
        return Vec::new();
    }
    input
        .windows(window)
        .map(|w| w.iter().sum::<f32>() / window as f32)
        .collect()
}

/// Arithmetic mean; `0.0` for an empty series.
pub fn mean(input: &[f32]) -> f32 {
    if input.is_empty() {
        return 0.0;
    }
    input.iter().sum::<f32>() / input.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn window_of_three() {
        let out = moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(out, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn full_length_window_is_the_mean() {
        let input = [2.0, 4.0, 6.0, 8.0];
        let out = moving_average(&input, input.len());
        assert_eq!(out, vec![5.0]);
        assert_eq!(mean(&input), 5.0);
    }

    #[test]
    fn degenerate_windows() {
        assert!(moving_average(&[1.0, 2.0], 0).is_empty());
        assert!(moving_average(&[1.0, 2.0], 3).is_empty());
        assert_eq!(mean(&[]), 0.0);
    }

    proptest! {
        #[test]
        fn output_length(input in prop::collection::vec(-100.0f32..100.0, 1..60), window in 1usize..10) {
            prop_assume!(window <= input.len());
            let out = moving_average(&input, window);
            prop_assert_eq!(out.len(), input.len() - window + 1);
        }

        #[test]
        fn window_one_is_identity(input in prop::collection::vec(-100.0f32..100.0, 0..60)) {
            prop_assert_eq!(moving_average(&input, 1), input);
        }
    }
}
