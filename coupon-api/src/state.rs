use std::sync::Arc;

use coupon_core::CouponLookup;

use crate::middleware::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<CouponLookup>,
    pub rate_limiter: Arc<RateLimiter>,
}
