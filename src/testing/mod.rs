use serde::Serialize;

pub mod correction;
pub mod effect;
pub mod inference;
pub mod significance;

pub mod utils;

#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    /// The Welch t statistic (group 0 minus group 1)
    pub statistic: f64,
    /// Two-sided p-value of the test
    pub p_value: f64,
    /// Welch–Satterthwaite degrees of freedom
    pub degrees_of_freedom: Option<f64>,
    /// Standard error of the mean difference
    pub standard_error: Option<f64>,
}

impl TestResult {
    /// Create a new test result with minimal information
    pub fn new(statistic: f64, p_value: f64) -> Self {
        TestResult {
            statistic,
            p_value,
            degrees_of_freedom: None,
            standard_error: None,
        }
    }

    /// Add degrees of freedom to the result
    pub fn with_degrees_of_freedom(mut self, df: f64) -> Self {
        self.degrees_of_freedom = Some(df);
        self
    }

    /// Add standard error to the result
    pub fn with_standard_error(mut self, se: f64) -> Self {
        self.standard_error = Some(se);
        self
    }

    /// Check if the result is statistically significant at the given threshold
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Test outcome and effect size for one marker, before correction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerStatistic {
    pub marker: String,
    pub statistic: f64,
    pub degrees_of_freedom: f64,
    /// Raw two-sided Welch p-value
    pub p_value: f64,
    /// log2(mean raw group 1 / mean raw group 0)
    pub log2_fold_change: f64,
}
