use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use coupon_core::CouponResult;
use serde::Deserialize;
use serde_json::Value;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct ConsultaRequest {
    #[serde(default)]
    pub operador: Option<Value>,
    #[serde(default)]
    pub cupon: Option<Value>,
}

impl ConsultaRequest {
    /// Reads the form body. A body not sent as JSON, or one that does not parse as
    /// a JSON object, counts as an empty form and fails field validation.
    pub fn from_request(headers: &HeaderMap, body: &[u8]) -> Self {
        if !is_json(headers) {
            return Self::default();
        }
        serde_json::from_slice(body).unwrap_or_else(|e| {
            tracing::debug!("Unreadable request body: {}", e);
            Self::default()
        })
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// Strings are taken as-is and numbers as their text; anything else is blank.
fn field_text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// POST /api/consulta
/// Look a coupon up at the selected operator
pub async fn consultar(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CouponResult>, AppError> {
    let req = ConsultaRequest::from_request(&headers, &body);
    let operador = field_text(req.operador);
    let cupon = field_text(req.cupon);

    let result = state.lookup.lookup(&operador, &cupon).await?;
    Ok(Json(result))
}
