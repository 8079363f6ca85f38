pub mod operator;
pub mod query;
pub mod record;
pub mod cities;
pub mod dates;
pub mod normalize;
pub mod lookup;

pub use lookup::{CouponLookup, CouponSource};
pub use normalize::CouponResult;
pub use operator::{Operator, OperatorConfig, OperatorRegistry, SortDirection};
pub use query::{CouponCode, CouponQuery, SearchParams};
pub use record::{CouponEnvelope, CouponRecord};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown operator: {0:?}")]
    InvalidOperator(String),
    #[error("Coupon code must be 8 to 20 ASCII letters or digits")]
    InvalidCouponFormat,
    #[error("Coupon not found")]
    NotFound,
    #[error("Upstream request failed: {0}")]
    Upstream(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
