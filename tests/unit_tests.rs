use marker_statistics::testing::inference::parametric::{welch_t_test, welch_t_test_from_moments};
use marker_statistics::testing::effect::calculate_log2_fold_change;
use marker_statistics::testing::TestResult;
use marker_statistics::error::MarkerError;

#[cfg(test)]
mod quick_test {
    use super::*;

    #[test]
    fn check_if_welch_works() {
        // Group 0: [1, 2, 3] -> mean=2, var=1
        // Group 1: [7, 8, 9] -> mean=8, var=1
        // Clearly separated, p-value should be well below 0.05
        let result: TestResult = welch_t_test_from_moments(2.0, 1.0, 3.0, 8.0, 1.0, 3.0);

        println!("=== WELCH T-TEST RESULTS ===");
        println!("T-statistic: {}", result.statistic);
        println!("P-value: {}", result.p_value);
        println!("DF: {:?}", result.degrees_of_freedom);

        assert!(result.p_value < 0.05, "Expected significant p-value, got {}", result.p_value);
        assert!(result.statistic < -2.0, "Expected large negative t, got {}", result.statistic);
        assert!((result.degrees_of_freedom.unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn check_identical_groups() {
        // Identical moments give t = 0 and p = 1
        let result = welch_t_test_from_moments(5.0, 2.0, 4.0, 5.0, 2.0, 4.0);

        println!("\n=== IDENTICAL GROUPS TEST ===");
        println!("T-statistic: {}", result.statistic);
        println!("P-value: {}", result.p_value);

        assert!(result.statistic.abs() < 1e-12);
        assert!((result.p_value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unequal_variances_shrink_degrees_of_freedom() {
        // Small noisy group against a large tight group
        let result = welch_t_test_from_moments(7.0, 9.0, 3.0, 5.0, 0.25, 30.0);

        println!("\n=== UNEQUAL VARIANCES TEST ===");
        println!("DF: {:?}", result.degrees_of_freedom);
        println!("P-value: {}", result.p_value);

        // Welch df collapses towards the noisy group's n - 1
        let df = result.degrees_of_freedom.unwrap();
        assert!(df > 2.0 && df < 3.0, "df = {}", df);
        assert!(result.p_value > 0.05, "Noisy small group should not be significant");
    }

    #[test]
    fn test_p_value_bounds() {
        let cases = [
            (0.0, 1.0, 5.0, 0.1, 1.0, 5.0),
            (0.0, 0.5, 10.0, 3.0, 0.5, 10.0),
            (-1.0, 2.0, 2.0, 1.0, 2.0, 2.0),
        ];
        for (m1, v1, n1, m2, v2, n2) in cases {
            let result = welch_t_test_from_moments(m1, v1, n1, m2, v2, n2);
            println!("t={:.4}, p={:.6}", result.statistic, result.p_value);
            assert!((0.0..=1.0).contains(&result.p_value));
            assert!(result.statistic.is_finite());
        }
    }

    #[test]
    fn test_standard_error() {
        let result = welch_t_test_from_moments(1.0, 4.0, 4.0, 0.0, 9.0, 9.0);
        // sqrt(4/4 + 9/9)
        assert!((result.standard_error.unwrap() - 2.0f64.sqrt()).abs() < 1e-12);
        assert!((result.statistic - 1.0 / 2.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_slice_and_moment_paths_agree() {
        let x = [2.0, 4.0, 4.0, 5.0];
        let y = [1.0, 1.5, 2.0, 1.0, 0.5];
        let from_slices = welch_t_test("m", &x, &y).unwrap();

        // x: mean 3.75, var 1.583333; y: mean 1.2, var 0.325
        let from_moments = welch_t_test_from_moments(3.75, 4.75 / 3.0, 4.0, 1.2, 1.3 / 4.0, 5.0);

        println!("\n=== SLICE VS MOMENTS ===");
        println!("slices: t={}, p={}", from_slices.statistic, from_slices.p_value);
        println!("moments: t={}, p={}", from_moments.statistic, from_moments.p_value);

        assert!((from_slices.statistic - from_moments.statistic).abs() < 1e-9);
        assert!((from_slices.p_value - from_moments.p_value).abs() < 1e-9);
    }

    #[test]
    fn test_fold_change_of_four() {
        let fc = calculate_log2_fold_change("m", &[1.0, 2.0, 3.0], &[6.0, 8.0, 10.0]).unwrap();
        println!("\n=== FOLD CHANGE ===\nlog2fc = {}", fc);
        assert_eq!(fc, 2.0);
    }

    #[test]
    fn test_fold_change_zero_reference() {
        let result = calculate_log2_fold_change("m", &[0.0, 0.0, 0.0], &[6.0, 8.0, 10.0]);
        assert!(matches!(result, Err(MarkerError::NonPositiveMean { .. })));
    }
}
