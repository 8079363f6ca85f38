use axum::Json;
use coupon_core::Operator;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct OperatorOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// GET /api/operadores
/// Operators the lookup form offers, in display order
pub async fn list_operators() -> Json<Vec<OperatorOption>> {
    Json(
        Operator::ALL
            .into_iter()
            .map(|op| OperatorOption { value: op.as_str(), label: op.label() })
            .collect(),
    )
}
