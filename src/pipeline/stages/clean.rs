//! Clean stage - drop the dead fee column and recode categorical codes

use super::{PipelineStage, StageExecutor, require_columns};
use crate::rides::columns::{EHAIL_FEE, PAYMENT_TYPE, STORE_AND_FWD_FLAG, TRIP_TYPE};
use crate::rides::labels::{
    PAYMENT_TYPE_FALLBACK, PAYMENT_TYPE_LABELS, STORE_AND_FWD_FALLBACK, STORE_AND_FWD_LABELS,
    TRIP_TYPE_FALLBACK, TRIP_TYPE_LABELS, int_code_label_expr, str_code_label_expr,
};
use anyhow::Result;
use polars::prelude::*;

/// Clean stage executor
/// - Drops `ehailFee` (always null in the feed)
/// - Replaces `paymentType`, `storeAndFwdFlag` and `tripType` codes with labels
///
/// Column order is otherwise preserved.
#[derive(Debug, Default, Clone, Copy)]
pub struct CleanStageExecutor;

impl StageExecutor for CleanStageExecutor {
    fn execute(&self, mut lf: LazyFrame) -> Result<LazyFrame> {
        let schema = lf.collect_schema().map_err(|e| anyhow::anyhow!(e))?;
        require_columns(
            &schema,
            self.stage(),
            &[PAYMENT_TYPE, STORE_AND_FWD_FLAG, TRIP_TYPE],
        )?;

        if !schema.contains(EHAIL_FEE) {
            tracing::warn!("Column {EHAIL_FEE} not present, nothing to drop");
        }

        let exprs: Vec<Expr> = schema
            .iter_names()
            .filter(|name| name.as_str() != EHAIL_FEE)
            .map(|name| match name.as_str() {
                PAYMENT_TYPE => {
                    int_code_label_expr(PAYMENT_TYPE, &PAYMENT_TYPE_LABELS, PAYMENT_TYPE_FALLBACK)
                }
                STORE_AND_FWD_FLAG => str_code_label_expr(
                    STORE_AND_FWD_FLAG,
                    &STORE_AND_FWD_LABELS,
                    STORE_AND_FWD_FALLBACK,
                ),
                TRIP_TYPE => int_code_label_expr(TRIP_TYPE, &TRIP_TYPE_LABELS, TRIP_TYPE_FALLBACK),
                other => col(other),
            })
            .collect();

        Ok(lf.select(exprs))
    }

    fn stage(&self) -> PipelineStage {
        PipelineStage::Clean
    }

    fn description(&self) -> String {
        format!("Drop {EHAIL_FEE} and label {PAYMENT_TYPE}, {STORE_AND_FWD_FLAG}, {TRIP_TYPE}")
    }
}
