use serde::Deserialize;
use serde_json::Value;

/// Body returned by an operator's coupon listing endpoint.
///
/// Only the path `data.coupons_records` is consumed; everything else in the
/// envelope (pagination, totals) is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct CouponEnvelope {
    #[serde(default)]
    pub data: Option<CouponPage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CouponPage {
    #[serde(default)]
    pub coupons_records: Option<Vec<CouponRecord>>,
}

impl CouponEnvelope {
    pub fn into_first_record(self) -> Option<CouponRecord> {
        self.data?.coupons_records?.into_iter().next()
    }
}

/// One coupon as the operator API reports it.
///
/// Operators are not consistent about field types (codes arrive as numbers or
/// strings, dates as strings or null), so every field is kept as raw JSON and
/// interpreted by the normalizer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CouponRecord {
    pub coupon_code: Option<Value>,
    pub passenger_name: Option<Value>,
    pub created_on: Option<Value>,
    pub created_at: Option<Value>,
    pub expiry_date: Option<Value>,
    pub email: Option<Value>,
    pub mobile_number: Option<Value>,
    pub origin: Option<Value>,
    pub destination: Option<Value>,
    pub zone_id_str: Option<Value>,
    pub zone_id: Option<Value>,
    pub status_str: Option<Value>,
    pub status: Option<Value>,
    pub used_on: Option<Value>,
    pub used_by_pnr: Option<Value>,
}

/// Whether an upstream value counts as "present". Null, `false`, `0` and the
/// empty string are treated as missing, which is how the operator portals
/// themselves leave optional fields blank.
pub(crate) fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// First present value of the candidates.
pub(crate) fn first_present<'a>(candidates: &[Option<&'a Value>]) -> Option<&'a Value> {
    candidates.iter().copied().find(|v| is_present(*v)).flatten()
}

/// Renders a raw value as display text: strings as-is, other scalars via their
/// JSON text, null/absent as empty.
pub(crate) fn text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_record_is_taken() {
        let envelope: CouponEnvelope = serde_json::from_value(json!({
            "data": {
                "coupons_records": [
                    { "coupon_code": "FIRST001", "origin": 9 },
                    { "coupon_code": "SECOND01" }
                ],
                "total_count": 2
            }
        }))
        .unwrap();

        let record = envelope.into_first_record().unwrap();
        assert_eq!(record.coupon_code, Some(json!("FIRST001")));
        assert_eq!(record.origin, Some(json!(9)));
    }

    #[test]
    fn test_missing_or_empty_records_yield_none() {
        for body in [json!({}), json!({ "data": null }), json!({ "data": {} }), json!({ "data": { "coupons_records": [] } })] {
            let envelope: CouponEnvelope = serde_json::from_value(body).unwrap();
            assert!(envelope.into_first_record().is_none());
        }
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        let result = serde_json::from_value::<CouponEnvelope>(json!({ "data": { "coupons_records": "nope" } }));
        assert!(result.is_err());
    }

    #[test]
    fn test_presence_rules() {
        assert!(!is_present(None));
        assert!(!is_present(Some(&json!(null))));
        assert!(!is_present(Some(&json!(""))));
        assert!(!is_present(Some(&json!(0))));
        assert!(!is_present(Some(&json!(false))));
        assert!(is_present(Some(&json!("0"))));
        assert!(is_present(Some(&json!(3))));

        let a = json!("");
        let b = json!("Zona Norte");
        assert_eq!(first_present(&[Some(&a), Some(&b)]), Some(&b));
        assert_eq!(first_present(&[None, Some(&a)]), None);
    }

    #[test]
    fn test_text_rendering() {
        assert_eq!(text(None), "");
        assert_eq!(text(Some(&json!(null))), "");
        assert_eq!(text(Some(&json!("Ana"))), "Ana");
        assert_eq!(text(Some(&json!(56912345678_i64))), "56912345678");
        assert_eq!(text(Some(&json!(true))), "true");
    }
}
