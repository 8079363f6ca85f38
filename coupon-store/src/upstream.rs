use async_trait::async_trait;
use coupon_core::{
    CoreError, CoreResult, CouponEnvelope, CouponQuery, CouponRecord, CouponSource, OperatorConfig,
    OperatorRegistry, SearchParams,
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use std::time::Duration;

use crate::app_config::UpstreamConfig;

const API_KEY_HEADER: &str = "x-api-key";

/// Looks coupons up through the operators' REST APIs: one GET per query, no retries.
pub struct HttpCouponSource {
    client: reqwest::Client,
    registry: OperatorRegistry,
}

impl HttpCouponSource {
    pub fn new(registry: OperatorRegistry, config: &UpstreamConfig) -> CoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| CoreError::Upstream(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, registry })
    }
}

/// Static profile plus the operator's credentials. Header errors never echo the value.
fn build_headers(config: &OperatorConfig) -> CoreResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    for (name, value) in config.static_headers() {
        headers.insert(
            HeaderName::from_static(*name),
            HeaderValue::from_static(*value),
        );
    }

    let mut authorization = HeaderValue::from_str(config.authorization.expose())
        .map_err(|_| CoreError::Upstream(format!("Invalid authorization header for {}", config.operator)))?;
    authorization.set_sensitive(true);
    headers.insert(AUTHORIZATION, authorization);

    let mut api_key = HeaderValue::from_str(config.api_key.expose())
        .map_err(|_| CoreError::Upstream(format!("Invalid API key header for {}", config.operator)))?;
    api_key.set_sensitive(true);
    headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);

    Ok(headers)
}

#[async_trait]
impl CouponSource for HttpCouponSource {
    async fn find_coupon(&self, query: &CouponQuery) -> CoreResult<Option<CouponRecord>> {
        let config = self.registry.get(query.operator);
        let headers = build_headers(config)?;
        let params = SearchParams::for_query(query, config);

        tracing::debug!("GET {} for operator {}", config.base_url, config.operator);

        let response = self
            .client
            .get(&config.base_url)
            .headers(headers)
            .query(&params)
            .send()
            .await
            .map_err(|e| CoreError::Upstream(format!("{} request failed: {}", config.operator, e)))?
            .error_for_status()
            .map_err(|e| CoreError::Upstream(format!("{} returned an error status: {}", config.operator, e)))?;

        let envelope: CouponEnvelope = response
            .json()
            .await
            .map_err(|e| CoreError::Upstream(format!("{} returned a malformed body: {}", config.operator, e)))?;

        Ok(envelope.into_first_record())
    }
}
