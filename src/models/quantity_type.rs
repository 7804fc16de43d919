use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit tag attached to a logged food quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityType {
    G,
    Kg,
    Ml,
    L,
}

impl QuantityType {
    /// Grams represented by one unit. Volumes are treated as mass 1:1.
    pub fn grams_per_unit(&self) -> f64 {
        match self {
            QuantityType::G | QuantityType::Ml => 1.0,
            QuantityType::Kg | QuantityType::L => 1000.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuantityType::G => "g",
            QuantityType::Kg => "kg",
            QuantityType::Ml => "ml",
            QuantityType::L => "l",
        }
    }
}

impl fmt::Display for QuantityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuantityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "g" => Ok(QuantityType::G),
            "kg" => Ok(QuantityType::Kg),
            "ml" => Ok(QuantityType::Ml),
            "l" => Ok(QuantityType::L),
            _ => Err(format!(
                "Invalid quantity type '{}'. Valid options: g, kg, ml, l",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_type_from_str() {
        assert_eq!(QuantityType::from_str("g").unwrap(), QuantityType::G);
        assert_eq!(QuantityType::from_str("kg").unwrap(), QuantityType::Kg);
        assert_eq!(QuantityType::from_str("ml").unwrap(), QuantityType::Ml);
        assert_eq!(QuantityType::from_str("l").unwrap(), QuantityType::L);
    }

    #[test]
    fn test_quantity_type_is_case_sensitive() {
        assert!(QuantityType::from_str("KG").is_err());
        assert!(QuantityType::from_str("oz").is_err());
        assert!(QuantityType::from_str("").is_err());
    }

    #[test]
    fn test_grams_per_unit() {
        assert_eq!(QuantityType::G.grams_per_unit(), 1.0);
        assert_eq!(QuantityType::Kg.grams_per_unit(), 1000.0);
        assert_eq!(QuantityType::Ml.grams_per_unit(), 1.0);
        assert_eq!(QuantityType::L.grams_per_unit(), 1000.0);
    }

    #[test]
    fn test_quantity_type_serializes_lowercase() {
        let json = serde_json::to_string(&QuantityType::Kg).unwrap();
        assert_eq!(json, "\"kg\"");
    }
}
