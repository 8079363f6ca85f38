use serde_json::Value;

use crate::operator::Operator;
use crate::record::{is_present, text};

// Indexed by city code - 1.
const PULLMAN_CITIES: &[&str] = &[
    "Santiago",
    "Algarrobo",
    "Cartagena",
    "El Quisco",
    "Maitencillo",
    "Quillota",
    "Quilpué",
    "San Antonio",
    "Valparaiso",
    "Villa Alemana",
    "Viña Del Mar",
    "El Tabo",
    "Limache",
    "Los Andes",
    "Olmue",
    "San Felipe",
    "Concón",
    "Llay Llay",
    "Ramayana",
    "Til Til",
    "Laguna Verde",
    "Quintero",
    "Curacavi",
    "La Calera",
    "Santo Domingo",
    "Curauma",
];

const RUTABUS_CITIES: &[&str] = &[
    "Santiago",
    "Melipilla",
    "Las Cabras",
    "Litueche",
    "Pichilemu",
    "Quelentaro",
    "Loica",
    "Cruce Las Rosas",
    "El Manzano",
    "Lago Rapel",
];

const TACOHA_CITIES: &[&str] = &[
    "Santiago",
    "Las Cabras",
    "Peumo",
    "Rancagua",
    "San Vicente De Tagua Tagua",
    "Requinoa",
    "Rosario",
    "Rengo",
    "Pelequen",
    "San Francisco",
    "Granero",
    "Pichidegua",
    "Patagua",
    "Las Pataguas",
];

fn table(operator: Operator) -> &'static [&'static str] {
    match operator {
        Operator::Pullman => PULLMAN_CITIES,
        Operator::Rutabus => RUTABUS_CITIES,
        Operator::Tacoha => TACOHA_CITIES,
    }
}

/// City name for an operator's numeric city code.
pub fn city_name(operator: Operator, code: u64) -> Option<&'static str> {
    let index = usize::try_from(code.checked_sub(1)?).ok()?;
    table(operator).get(index).copied()
}

/// Resolves a raw origin/destination value. Codes may arrive as numbers or numeric
/// strings; anything that does not resolve is shown as-is.
pub fn resolve_city(operator: Operator, raw: Option<&Value>) -> String {
    if !is_present(raw) {
        return String::new();
    }

    let code = match raw {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.parse::<u64>().ok(),
        _ => None,
    };

    code.and_then(|c| city_name(operator, c))
        .map(str::to_string)
        .unwrap_or_else(|| text(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_sizes() {
        assert_eq!(PULLMAN_CITIES.len(), 26);
        assert_eq!(RUTABUS_CITIES.len(), 10);
        assert_eq!(TACOHA_CITIES.len(), 14);
    }

    #[test]
    fn test_known_codes() {
        assert_eq!(city_name(Operator::Pullman, 9), Some("Valparaiso"));
        assert_eq!(city_name(Operator::Pullman, 26), Some("Curauma"));
        assert_eq!(city_name(Operator::Rutabus, 5), Some("Pichilemu"));
        assert_eq!(city_name(Operator::Tacoha, 4), Some("Rancagua"));
        assert_eq!(city_name(Operator::Tacoha, 0), None);
        assert_eq!(city_name(Operator::Rutabus, 11), None);
    }

    #[test]
    fn test_resolve_numbers_and_numeric_strings() {
        assert_eq!(resolve_city(Operator::Pullman, Some(&json!(9))), "Valparaiso");
        assert_eq!(resolve_city(Operator::Pullman, Some(&json!("9"))), "Valparaiso");
        assert_eq!(resolve_city(Operator::Tacoha, Some(&json!(1))), "Santiago");
    }

    #[test]
    fn test_unknown_codes_pass_through() {
        assert_eq!(resolve_city(Operator::Pullman, Some(&json!(999))), "999");
        assert_eq!(resolve_city(Operator::Rutabus, Some(&json!("Terminal Sur"))), "Terminal Sur");
        assert_eq!(resolve_city(Operator::Tacoha, Some(&json!(-3))), "-3");
        assert_eq!(resolve_city(Operator::Pullman, Some(&json!(" 9 "))), " 9 ");
    }

    #[test]
    fn test_blank_codes_render_empty() {
        assert_eq!(resolve_city(Operator::Pullman, None), "");
        assert_eq!(resolve_city(Operator::Pullman, Some(&json!(null))), "");
        assert_eq!(resolve_city(Operator::Pullman, Some(&json!(0))), "");
        assert_eq!(resolve_city(Operator::Pullman, Some(&json!(""))), "");
    }
}
