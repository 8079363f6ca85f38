use serde::{Deserialize, Serialize};

use crate::cities::resolve_city;
use crate::dates::format_chile;
use crate::operator::Operator;
use crate::record::{first_present, text, CouponRecord};

/// Normalized coupon as returned to API clients. The shape is the same for
/// every operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponResult {
    pub coupon_code: String,
    pub passenger_name: String,
    pub created_at: String,
    pub expiry_date: String,
    pub email: String,
    pub mobile_number: String,
    pub origin: String,
    pub destination: String,
    pub zone: String,
    pub status: String,
    pub used_on: String,
    pub used_by_pnr: String,
}

impl CouponResult {
    pub fn from_record(record: &CouponRecord, operator: Operator) -> Self {
        let created = first_present(&[record.created_on.as_ref(), record.created_at.as_ref()]);
        let zone = first_present(&[record.zone_id_str.as_ref(), record.zone_id.as_ref()]);
        let status = first_present(&[record.status_str.as_ref(), record.status.as_ref()]);

        Self {
            coupon_code: text(record.coupon_code.as_ref()),
            passenger_name: text(record.passenger_name.as_ref()),
            created_at: format_chile(created),
            expiry_date: format_chile(record.expiry_date.as_ref()),
            email: text(record.email.as_ref()),
            mobile_number: text(record.mobile_number.as_ref()),
            origin: resolve_city(operator, record.origin.as_ref()),
            destination: resolve_city(operator, record.destination.as_ref()),
            zone: text(zone),
            status: text(status),
            used_on: format_chile(record.used_on.as_ref()),
            used_by_pnr: text(record.used_by_pnr.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> CouponRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_full_record() {
        let rec = record(json!({
            "coupon_code": "ABC12345",
            "passenger_name": "Camila Rojas",
            "created_on": "2024-03-15T13:30:00Z",
            "expiry_date": "2024-07-01T16:05:09Z",
            "email": "camila@example.cl",
            "mobile_number": "+56912345678",
            "origin": 1,
            "destination": 9,
            "zone_id_str": "Costa",
            "zone_id": 4,
            "status_str": "Utilizado",
            "status": 2,
            "used_on": "2024-07-01T12:05:09Z",
            "used_by_pnr": "PNR7781",
            "id": 8812
        }));

        let result = CouponResult::from_record(&rec, Operator::Pullman);
        assert_eq!(
            result,
            CouponResult {
                coupon_code: "ABC12345".into(),
                passenger_name: "Camila Rojas".into(),
                created_at: "15-03-2024, 10:30:00 a. m.".into(),
                expiry_date: "01-07-2024, 12:05:09 p. m.".into(),
                email: "camila@example.cl".into(),
                mobile_number: "+56912345678".into(),
                origin: "Santiago".into(),
                destination: "Valparaiso".into(),
                zone: "Costa".into(),
                status: "Utilizado".into(),
                used_on: "01-07-2024, 8:05:09 a. m.".into(),
                used_by_pnr: "PNR7781".into(),
            }
        );
    }

    #[test]
    fn test_fallback_fields() {
        let rec = record(json!({
            "created_on": null,
            "created_at": "2024-07-01T16:05:09Z",
            "zone_id_str": "",
            "zone_id": 4,
            "status": "active"
        }));

        let result = CouponResult::from_record(&rec, Operator::Tacoha);
        assert_eq!(result.created_at, "01-07-2024, 12:05:09 p. m.");
        assert_eq!(result.zone, "4");
        assert_eq!(result.status, "active");
    }

    #[test]
    fn test_sparse_record_renders_empty_fields() {
        let result = CouponResult::from_record(&CouponRecord::default(), Operator::Rutabus);
        assert_eq!(result, CouponResult::default());
    }

    #[test]
    fn test_city_codes_are_operator_specific() {
        let rec = record(json!({ "origin": 2, "destination": 999 }));

        let pullman = CouponResult::from_record(&rec, Operator::Pullman);
        assert_eq!(pullman.origin, "Algarrobo");
        assert_eq!(pullman.destination, "999");

        let rutabus = CouponResult::from_record(&rec, Operator::Rutabus);
        assert_eq!(rutabus.origin, "Melipilla");
    }
}
