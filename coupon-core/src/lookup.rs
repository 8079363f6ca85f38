use async_trait::async_trait;
use std::sync::Arc;

use crate::normalize::CouponResult;
use crate::query::CouponQuery;
use crate::record::CouponRecord;
use crate::{CoreError, CoreResult};

/// Where coupon records come from. The production implementation calls the
/// operator REST APIs; tests plug in canned records.
#[async_trait]
pub trait CouponSource: Send + Sync {
    /// Fetch the first record matching the query, or `None` if the operator has
    /// no such coupon. A single attempt; failures surface as `CoreError::Upstream`.
    async fn find_coupon(&self, query: &CouponQuery) -> CoreResult<Option<CouponRecord>>;
}

/// Validate, dispatch, normalize. Any stage can end the lookup with exactly one error.
pub struct CouponLookup {
    source: Arc<dyn CouponSource>,
}

impl CouponLookup {
    pub fn new(source: Arc<dyn CouponSource>) -> Self {
        Self { source }
    }

    pub async fn lookup(&self, operador: &str, cupon: &str) -> CoreResult<CouponResult> {
        let query = CouponQuery::parse(operador, cupon).map_err(|e| {
            tracing::debug!("Rejected coupon query: {}", e);
            e
        })?;

        tracing::debug!("Dispatching lookup of {} to {}", query.code, query.operator);
        let record = self
            .source
            .find_coupon(&query)
            .await?
            .ok_or(CoreError::NotFound)?;

        tracing::info!("Coupon found at {}", query.operator);
        Ok(CouponResult::from_record(&record, query.operator))
    }
}
