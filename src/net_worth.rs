//! Net worth aggregation over assets and liabilities

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{require_non_negative, CalcError};
use crate::rounding::finish;

/// Category used when an item has none
pub const DEFAULT_CATEGORY: &str = "Other";

/// A single asset or liability line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub value: f64,
}

impl BalanceItem {
    pub fn new(name: impl Into<String>, category: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            value,
        }
    }

    fn category_or_default(&self) -> &str {
        let category = self.category.trim();
        if category.is_empty() {
            DEFAULT_CATEGORY
        } else {
            category
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthRequest {
    #[serde(default)]
    pub assets: Vec<BalanceItem>,
    #[serde(default)]
    pub liabilities: Vec<BalanceItem>,
}

impl NetWorthRequest {
    pub fn compute(&self) -> Result<NetWorthResult, CalcError> {
        compute_net_worth(&self.assets, &self.liabilities)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthResult {
    pub total_assets: f64,
    pub total_liabilities: f64,
    /// Assets minus liabilities; may be negative
    pub net_worth: f64,
    pub assets_by_category: BTreeMap<String, f64>,
    pub liabilities_by_category: BTreeMap<String, f64>,
}

/// Total and categorize a balance sheet
pub fn compute_net_worth(
    assets: &[BalanceItem],
    liabilities: &[BalanceItem],
) -> Result<NetWorthResult, CalcError> {
    let (total_assets, assets_by_category) = aggregate("assets", assets)?;
    let (total_liabilities, liabilities_by_category) = aggregate("liabilities", liabilities)?;

    Ok(NetWorthResult {
        total_assets: finish("net worth assets", total_assets)?,
        total_liabilities: finish("net worth liabilities", total_liabilities)?,
        net_worth: finish("net worth", total_assets - total_liabilities)?,
        assets_by_category,
        liabilities_by_category,
    })
}

fn aggregate(
    field: &'static str,
    items: &[BalanceItem],
) -> Result<(f64, BTreeMap<String, f64>), CalcError> {
    let mut total = 0.0;
    let mut by_category: BTreeMap<String, f64> = BTreeMap::new();

    for item in items {
        require_non_negative(field, item.value)?;
        total += item.value;
        *by_category
            .entry(item.category_or_default().to_string())
            .or_insert(0.0) += item.value;
    }

    for value in by_category.values_mut() {
        *value = finish("net worth category", *value)?;
    }

    Ok((total, by_category))
}
