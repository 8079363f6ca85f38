use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use coupon_shared::Masked;

use crate::CoreError;

// ============================================================================
// Operators
// ============================================================================

/// Bus operators whose ticketing API can be queried for coupons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Pullman,
    Rutabus,
    Tacoha,
}

impl Operator {
    /// All operators, in the order the lookup form shows them.
    pub const ALL: [Operator; 3] = [Operator::Pullman, Operator::Rutabus, Operator::Tacoha];

    /// Identifier used on the wire (`operador` field of the request body).
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Pullman => "pullman",
            Operator::Rutabus => "rutabus",
            Operator::Tacoha => "tacoha",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Operator::Pullman => "Pullman Costa",
            Operator::Rutabus => "Ruta Bus 78",
            Operator::Tacoha => "Tacoha",
        }
    }

    fn index(self) -> usize {
        match self {
            Operator::Pullman => 0,
            Operator::Rutabus => 1,
            Operator::Tacoha => 2,
        }
    }

    /// Non-secret headers each operator portal expects. The operator APIs sit behind
    /// the same web front-ends their booking portals use, so requests mimic those.
    pub fn static_headers(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Operator::Pullman => PULLMAN_HEADERS,
            Operator::Rutabus => RUTABUS_HEADERS,
            Operator::Tacoha => TACOHA_HEADERS,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| CoreError::InvalidOperator(s.to_string()))
    }
}

const SEC_CH_UA: &str = r#""Chromium";v="140", "Not=A?Brand";v="24", "Google Chrome";v="140""#;
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/140.0.0.0 Safari/537.36";

const PULLMAN_HEADERS: &[(&str, &str)] = &[
    ("sec-ch-ua-platform", "\"Windows\""),
    ("cache-control", "no-store"),
    ("referer", "https://costas.konnectpro.cl/"),
    ("sec-ch-ua", SEC_CH_UA),
    ("sec-ch-ua-mobile", "?0"),
    ("category_type", "1"),
    ("user-agent", USER_AGENT),
    ("accept", "application/json"),
];

const RUTABUS_HEADERS: &[(&str, &str)] = &[
    ("sec-ch-ua-platform", "\"Windows\""),
    ("cache-control", "no-store"),
    ("referer", "https://rutabus.konnectpro.cl/"),
    ("sec-ch-ua", SEC_CH_UA),
    ("sec-ch-ua-mobile", "?0"),
    ("category_type", "1"),
    ("user-agent", USER_AGENT),
    ("accept", "application/json"),
];

const TACOHA_HEADERS: &[(&str, &str)] = &[
    ("accept", "application/json"),
    ("accept-language", "es-ES,es;q=0.9"),
    ("cache-control", "no-store"),
    ("category_type", "1"),
    ("origin", "https://tacoha.konnectpro.cl"),
    ("priority", "u=1, i"),
    ("referer", "https://tacoha.konnectpro.cl/"),
    ("sec-ch-ua", SEC_CH_UA),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", "\"Windows\""),
    ("sec-fetch-dest", "empty"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-site", "same-site"),
    ("user-agent", USER_AGENT),
];

// ============================================================================
// Connection settings
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Connection settings for one operator API.
#[derive(Debug, Clone)]
pub struct OperatorConfig {
    pub operator: Operator,
    pub base_url: String,
    /// Sent verbatim as the `Authorization` header.
    pub authorization: Masked<String>,
    /// Sent as `X-Api-Key`.
    pub api_key: Masked<String>,
    pub sort_field: String,
    pub sort_type: SortDirection,
}

impl OperatorConfig {
    pub fn new(
        operator: Operator,
        base_url: impl Into<String>,
        authorization: Masked<String>,
        api_key: Masked<String>,
    ) -> Self {
        Self {
            operator,
            base_url: base_url.into(),
            authorization,
            api_key,
            sort_field: "id".to_string(),
            sort_type: SortDirection::Desc,
        }
    }

    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_field = field.into();
        self.sort_type = direction;
        self
    }

    pub fn static_headers(&self) -> &'static [(&'static str, &'static str)] {
        self.operator.static_headers()
    }
}

/// Immutable, operator-indexed table of connection settings built once at startup.
#[derive(Debug, Clone)]
pub struct OperatorRegistry {
    configs: [OperatorConfig; 3],
}

impl OperatorRegistry {
    /// Builds the registry by asking `build` for each operator in turn, so every
    /// operator always has exactly one entry.
    pub fn from_fn<F>(mut build: F) -> Self
    where
        F: FnMut(Operator) -> OperatorConfig,
    {
        let configs = std::array::from_fn(|i| {
            let operator = Operator::ALL[i];
            let mut config = build(operator);
            config.operator = operator;
            config
        });
        Self { configs }
    }

    pub fn get(&self, operator: Operator) -> &OperatorConfig {
        &self.configs[operator.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &OperatorConfig> {
        self.configs.iter()
    }
}
