//! Batch evaluation of calculation requests
//!
//! Every request is independent, so a batch can be spread across threads
//! without changing any result.

use log::warn;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::calculation::{CalculationKind, CalculationRequest, CalculationResult};

/// Configuration for a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchConfig {
    /// Evaluate requests on the rayon thread pool
    pub parallel: bool,

    /// Keep per-period series (loan schedules, pension years) in the output
    pub include_schedules: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            include_schedules: true,
        }
    }
}

/// Result of one request in a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    /// Position of the request in the input
    pub index: usize,
    pub kind: CalculationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<CalculationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Counts over a finished batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[BatchOutcome]) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_ok()).count();
        Self {
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
        }
    }
}

/// Runs many calculation requests with one configuration
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    config: BatchConfig,
}

impl BatchRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Evaluate every request; output order matches input order
    pub fn run(&self, requests: &[CalculationRequest]) -> Vec<BatchOutcome> {
        if self.config.parallel {
            requests
                .par_iter()
                .enumerate()
                .map(|(index, request)| self.run_one(index, request))
                .collect()
        } else {
            requests
                .iter()
                .enumerate()
                .map(|(index, request)| self.run_one(index, request))
                .collect()
        }
    }

    fn run_one(&self, index: usize, request: &CalculationRequest) -> BatchOutcome {
        let kind = request.kind();
        match request.evaluate() {
            Ok(result) => {
                let result = if self.config.include_schedules {
                    result
                } else {
                    result.without_series()
                };
                BatchOutcome {
                    index,
                    kind,
                    result: Some(result),
                    error: None,
                }
            }
            Err(e) => {
                warn!("request {} ({}) failed: {}", index, kind, e);
                BatchOutcome {
                    index,
                    kind,
                    result: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emergency::EmergencyFundRequest;
    use crate::interest::InterestRequest;
    use crate::loan::LoanRequest;
    use crate::net_worth::{BalanceItem, NetWorthRequest};
    use crate::pension::PensionRequest;

    fn mixed_batch() -> Vec<CalculationRequest> {
        vec![
            CalculationRequest::Loan(LoanRequest {
                principal: 200_000.0,
                annual_rate: 0.045,
                term_years: 30,
            }),
            CalculationRequest::Interest(InterestRequest::lump_sum(1000.0, 0.05, 10, 12)),
            CalculationRequest::EmergencyFund(EmergencyFundRequest {
                monthly_expenses: 3900.0,
                desired_months_coverage: 0,
                current_savings: 0.0,
            }),
            CalculationRequest::NetWorth(NetWorthRequest {
                assets: vec![BalanceItem::new("Cash", "Cash", 100_000.0)],
                liabilities: vec![BalanceItem::new("Loan", "Loans", 20_000.0)],
            }),
            CalculationRequest::Pension(PensionRequest {
                current_salary: 60_000.0,
                employee_contribution_pct: 8.0,
                employer_match_pct: 4.0,
                annual_salary_growth_pct: 3.0,
                annual_return_pct: 7.0,
                current_age: 30,
                retirement_age: 65,
                current_pension_value: 25_000.0,
            }),
        ]
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let batch = mixed_batch();
        let parallel = BatchRunner::new().run(&batch);
        let sequential = BatchRunner::with_config(BatchConfig {
            parallel: false,
            ..BatchConfig::default()
        })
        .run(&batch);

        assert_eq!(parallel, sequential);
        for (i, outcome) in parallel.iter().enumerate() {
            assert_eq!(outcome.index, i);
            assert_eq!(outcome.kind, batch[i].kind());
        }
    }

    #[test]
    fn test_failures_are_isolated() {
        let outcomes = BatchRunner::new().run(&mixed_batch());
        let summary = BatchSummary::from_outcomes(&outcomes);

        assert_eq!(summary.total, 5);
        assert_eq!(summary.failed, 1);
        assert!(!outcomes[2].is_ok());
        assert!(outcomes[2].error.as_ref().unwrap().contains("desiredMonthsCoverage"));
        assert!(outcomes[3].is_ok());
    }

    #[test]
    fn test_summary_only_drops_series() {
        let runner = BatchRunner::with_config(BatchConfig {
            parallel: true,
            include_schedules: false,
        });
        let outcomes = runner.run(&mixed_batch());

        match outcomes[0].result.as_ref().unwrap() {
            CalculationResult::Loan(loan) => {
                assert!(loan.schedule.is_empty());
                assert_eq!(loan.monthly_payment, 1013.37);
            }
            other => panic!("unexpected result {:?}", other),
        }
        match outcomes[4].result.as_ref().unwrap() {
            CalculationResult::Pension(pension) => assert!(pension.years.is_empty()),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_config_from_json() {
        let config: BatchConfig = serde_json::from_str(r#"{"parallel":false}"#).unwrap();
        assert!(!config.parallel);
        assert!(config.include_schedules);
    }
}
