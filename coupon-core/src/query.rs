use serde::Serialize;
use std::fmt;

use crate::operator::{Operator, OperatorConfig};
use crate::{CoreError, CoreResult};

pub const COUPON_CODE_MIN_LEN: usize = 8;
pub const COUPON_CODE_MAX_LEN: usize = 20;

/// Coupon code that passed format validation: 8 to 20 ASCII letters or digits.
///
/// The inner value is private so a `CouponCode` can only come out of [`CouponCode::new`].
/// Case is preserved; operators match codes case-insensitively themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CouponCode(String);

impl CouponCode {
    pub fn new(raw: &str) -> CoreResult<Self> {
        let len_ok = (COUPON_CODE_MIN_LEN..=COUPON_CODE_MAX_LEN).contains(&raw.len());
        if !len_ok || !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidCouponFormat);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated lookup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponQuery {
    pub operator: Operator,
    pub code: CouponCode,
}

impl CouponQuery {
    /// Validates raw request input. The operator is checked before the code, so a
    /// request that is wrong on both counts reports the operator.
    pub fn parse(operador: &str, cupon: &str) -> CoreResult<Self> {
        let operator = operador.parse::<Operator>()?;
        let code = CouponCode::new(cupon)?;
        Ok(Self { operator, code })
    }
}

/// Query string sent to an operator's coupon listing endpoint.
#[derive(Debug, Serialize, PartialEq)]
pub struct SearchParams<'a> {
    pub page: u32,
    pub items: u32,
    pub manual_open_ticket_coupons: bool,
    pub sort_field: &'a str,
    pub sort_type: &'static str,
    pub search: &'a str,
    pub locale: &'static str,
}

impl<'a> SearchParams<'a> {
    pub fn for_query(query: &'a CouponQuery, config: &'a OperatorConfig) -> Self {
        Self {
            page: 1,
            items: 10,
            manual_open_ticket_coupons: true,
            sort_field: &config.sort_field,
            sort_type: config.sort_type.as_str(),
            search: query.code.as_str(),
            locale: "es",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coupon_shared::Masked;

    #[test]
    fn test_accepts_valid_codes() {
        for raw in ["ABC12345", "abc12345", "A1B2C3D4E5F6G7H8I9J0", "TESTCODE1"] {
            assert_eq!(CouponCode::new(raw).unwrap().as_str(), raw);
        }
    }

    #[test]
    fn test_rejects_malformed_codes() {
        let too_long = "A".repeat(21);
        for raw in ["", "AB12", "ABC1234", "AB12-CD34!", "ABC 12345", "ÁBC12345", " ABC12345", too_long.as_str()] {
            assert!(
                matches!(CouponCode::new(raw), Err(CoreError::InvalidCouponFormat)),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_operator_checked_before_code() {
        let err = CouponQuery::parse("flixbus", "AB12").unwrap_err();
        assert!(matches!(err, CoreError::InvalidOperator(_)));

        let err = CouponQuery::parse("pullman", "AB12").unwrap_err();
        assert!(matches!(err, CoreError::InvalidCouponFormat));
    }

    #[test]
    fn test_search_params_shape() {
        let query = CouponQuery::parse("tacoha", "TESTCODE1").unwrap();
        let config = OperatorConfig::new(
            Operator::Tacoha,
            "https://tacoha.example/coupons",
            Masked::new("auth".to_string()),
            Masked::new("key".to_string()),
        );
        let params = SearchParams::for_query(&query, &config);

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({
                "page": 1,
                "items": 10,
                "manual_open_ticket_coupons": true,
                "sort_field": "id",
                "sort_type": "desc",
                "search": "TESTCODE1",
                "locale": "es"
            })
        );
    }
}
