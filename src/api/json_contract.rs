use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::{ChartBundle, MetricRow};

pub const CHART_BUNDLE_JSON_SCHEMA_V1: u32 = 1;
pub const SUMMARY_ROWS_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBundleJsonContractV1 {
    pub schema_version: u32,
    pub bundle: ChartBundle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRowsJsonContractV1<'a> {
    pub schema_version: u32,
    pub rows: &'a [MetricRow],
}

impl ChartBundle {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartBundleJsonContractV1 {
            schema_version: CHART_BUNDLE_JSON_SCHEMA_V1,
            bundle: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart bundle contract v1: {e}"))
        })
    }

    /// Accepts either a bare bundle or the versioned contract.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(bundle) = serde_json::from_str::<ChartBundle>(input) {
            return Ok(bundle);
        }
        let payload: ChartBundleJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart bundle json payload: {e}"))
        })?;
        if payload.schema_version != CHART_BUNDLE_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported chart bundle schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.bundle)
    }
}

pub fn summary_rows_json_contract_v1_pretty(rows: &[MetricRow]) -> ChartResult<String> {
    let payload = SummaryRowsJsonContractV1 {
        schema_version: SUMMARY_ROWS_JSON_SCHEMA_V1,
        rows,
    };
    serde_json::to_string_pretty(&payload).map_err(|e| {
        ChartError::InvalidData(format!("failed to serialize summary rows contract v1: {e}"))
    })
}
