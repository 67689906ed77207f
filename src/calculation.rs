//! Typed envelope over every calculator, and the saved-calculation record
//!
//! A `CalculationRequest` carries the calculator type next to its
//! parameters, so a stored `{type, parameters}` pair can be re-evaluated
//! without knowing ahead of time which calculator produced it.

use std::fmt;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

use crate::emergency::{EmergencyFundRequest, EmergencyFundResult};
use crate::error::CalcError;
use crate::interest::{compute_interest, InterestRequest, InterestResult};
use crate::loan::{compute_loan_schedule, LoanRequest, LoanResult};
use crate::net_worth::{NetWorthRequest, NetWorthResult};
use crate::pension::{compute_pension_projection, PensionRequest, PensionResult};
use crate::retirement::{compute_retirement_plan, RetirementRequest, RetirementResult};

/// Which calculator a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CalculationKind {
    Interest,
    NetWorth,
    Pension,
    Retirement,
    Loan,
    EmergencyFund,
}

impl CalculationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationKind::Interest => "interest",
            CalculationKind::NetWorth => "netWorth",
            CalculationKind::Pension => "pension",
            CalculationKind::Retirement => "retirement",
            CalculationKind::Loan => "loan",
            CalculationKind::EmergencyFund => "emergencyFund",
        }
    }
}

impl fmt::Display for CalculationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for any calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "parameters", rename_all = "camelCase")]
pub enum CalculationRequest {
    Interest(InterestRequest),
    NetWorth(NetWorthRequest),
    Pension(PensionRequest),
    Retirement(RetirementRequest),
    Loan(LoanRequest),
    EmergencyFund(EmergencyFundRequest),
}

/// Output of any calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "results", rename_all = "camelCase")]
pub enum CalculationResult {
    Interest(InterestResult),
    NetWorth(NetWorthResult),
    Pension(PensionResult),
    Retirement(RetirementResult),
    Loan(LoanResult),
    EmergencyFund(EmergencyFundResult),
}

impl CalculationRequest {
    pub fn kind(&self) -> CalculationKind {
        match self {
            CalculationRequest::Interest(_) => CalculationKind::Interest,
            CalculationRequest::NetWorth(_) => CalculationKind::NetWorth,
            CalculationRequest::Pension(_) => CalculationKind::Pension,
            CalculationRequest::Retirement(_) => CalculationKind::Retirement,
            CalculationRequest::Loan(_) => CalculationKind::Loan,
            CalculationRequest::EmergencyFund(_) => CalculationKind::EmergencyFund,
        }
    }

    /// Run the matching calculator
    pub fn evaluate(&self) -> Result<CalculationResult, CalcError> {
        debug!("evaluating {} calculation", self.kind());
        match self {
            CalculationRequest::Interest(r) => compute_interest(r).map(CalculationResult::Interest),
            CalculationRequest::NetWorth(r) => r.compute().map(CalculationResult::NetWorth),
            CalculationRequest::Pension(r) => {
                compute_pension_projection(r).map(CalculationResult::Pension)
            }
            CalculationRequest::Retirement(r) => {
                compute_retirement_plan(r).map(CalculationResult::Retirement)
            }
            CalculationRequest::Loan(r) => compute_loan_schedule(r).map(CalculationResult::Loan),
            CalculationRequest::EmergencyFund(r) => {
                r.compute().map(CalculationResult::EmergencyFund)
            }
        }
    }
}

impl CalculationResult {
    pub fn kind(&self) -> CalculationKind {
        match self {
            CalculationResult::Interest(_) => CalculationKind::Interest,
            CalculationResult::NetWorth(_) => CalculationKind::NetWorth,
            CalculationResult::Pension(_) => CalculationKind::Pension,
            CalculationResult::Retirement(_) => CalculationKind::Retirement,
            CalculationResult::Loan(_) => CalculationKind::Loan,
            CalculationResult::EmergencyFund(_) => CalculationKind::EmergencyFund,
        }
    }

    /// Drop per-period series, keeping only headline figures
    pub fn without_series(mut self) -> Self {
        match &mut self {
            CalculationResult::Loan(loan) => loan.schedule.clear(),
            CalculationResult::Pension(pension) => pension.years.clear(),
            _ => {}
        }
        self
    }
}

/// A titled calculation belonging to one user.
///
/// This is the record handed to whatever stores calculations; the engine
/// itself keeps nothing. On the wire it is a single flat object,
/// `{type, title, parameters, results, user, createdAt}`.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedCalculation {
    /// Opaque identifier of the user who created it
    pub owner: String,
    pub title: String,
    pub request: CalculationRequest,
    pub result: CalculationResult,
    pub created_at: DateTime<Utc>,
}

impl SavedCalculation {
    /// Evaluate `request` and wrap it for storage
    pub fn new(
        owner: impl Into<String>,
        title: impl Into<String>,
        request: CalculationRequest,
    ) -> Result<Self, CalcError> {
        Self::at(owner, title, request, Utc::now())
    }

    /// Same as `new` with an explicit timestamp
    pub fn at(
        owner: impl Into<String>,
        title: impl Into<String>,
        request: CalculationRequest,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CalcError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CalcError::invalid("title", "must not be blank"));
        }
        let owner = owner.into();
        if owner.trim().is_empty() {
            return Err(CalcError::invalid("owner", "must not be blank"));
        }

        let result = request.evaluate()?;
        Ok(Self {
            owner,
            title,
            request,
            result,
            created_at,
        })
    }

    pub fn kind(&self) -> CalculationKind {
        self.request.kind()
    }

    /// Only the creating user may read, update or delete a record
    pub fn is_owned_by(&self, user: &str) -> bool {
        self.owner == user
    }
}

/// Stored form of `SavedCalculation`: one `type` shared by both payloads
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedCalculationRecord {
    #[serde(rename = "type")]
    kind: CalculationKind,
    title: String,
    parameters: Value,
    results: Value,
    user: String,
    created_at: DateTime<Utc>,
}

/// Take the untagged payload out of an adjacently tagged value
fn payload<T: Serialize>(tagged: &T, key: &str) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(tagged)?;
    Ok(value.get_mut(key).map(Value::take).unwrap_or(Value::Null))
}

impl Serialize for SavedCalculation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.request.kind();
        if self.result.kind() != kind {
            return Err(ser::Error::custom(format!(
                "{} result stored against a {} request",
                self.result.kind(),
                kind
            )));
        }

        SavedCalculationRecord {
            kind,
            title: self.title.clone(),
            parameters: payload(&self.request, "parameters").map_err(ser::Error::custom)?,
            results: payload(&self.result, "results").map_err(ser::Error::custom)?,
            user: self.owner.clone(),
            created_at: self.created_at,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SavedCalculation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = SavedCalculationRecord::deserialize(deserializer)?;

        // Both payloads are read under the record's single type
        let request: CalculationRequest =
            serde_json::from_value(json!({ "type": record.kind, "parameters": record.parameters }))
                .map_err(de::Error::custom)?;
        let result: CalculationResult =
            serde_json::from_value(json!({ "type": record.kind, "results": record.results }))
                .map_err(de::Error::custom)?;

        Ok(Self {
            owner: record.user,
            title: record.title,
            request,
            result,
            created_at: record.created_at,
        })
    }
}
