use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ParseLabelError;

/// Fuel categories offered by the calculator form.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    #[default]
    Gasoline,
    Diesel,
    Hybrid,
    Electric,
}

impl FuelType {
    pub const ALL: [FuelType; 4] = [
        FuelType::Gasoline,
        FuelType::Diesel,
        FuelType::Hybrid,
        FuelType::Electric,
    ];

    /// Label as shown in the form's fuel select.
    pub fn label(self) -> &'static str {
        match self {
            FuelType::Gasoline => "Gasoline",
            FuelType::Diesel => "Diesel",
            FuelType::Hybrid => "Hybrid",
            FuelType::Electric => "Electric",
        }
    }

    /// Unit the consumed quantity is reported in.
    pub fn consumption_unit(self) -> &'static str {
        match self {
            FuelType::Electric => "kWh",
            _ => "gallons",
        }
    }

    /// Lenient lookup used by the form. Only the exact select labels match
    /// (`"Diesel"`, not `"diesel"`); anything else counts as gasoline.
    pub fn from_label(label: &str) -> Self {
        match FuelType::ALL.into_iter().find(|fuel| fuel.label() == label) {
            Some(fuel) => fuel,
            None => {
                warn!(label, "unrecognized fuel type, falling back to gasoline emission factor");
                FuelType::Gasoline
            }
        }
    }
}

/// Strict parse: trims and ignores ASCII case, but errors on unknown labels.
impl FromStr for FuelType {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        FuelType::ALL
            .into_iter()
            .find(|fuel| fuel.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLabelError {
                kind: "fuel type",
                label: s.to_string(),
            })
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Source of emission factors (kg CO2 per gallon, or per kWh for electric).
pub trait EmissionModel {
    /// Kilograms of CO2 per unit of fuel consumed.
    fn factor(&self, fuel: FuelType) -> f64;
}

/// Fixed per-fuel factor table. Every key is optional when read from config.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionFactorTable {
    pub gasoline: f64,
    pub diesel: f64,
    pub hybrid: f64,
    /// Grid average; varies a lot with the electricity source.
    pub electric: f64,
}

impl Default for EmissionFactorTable {
    fn default() -> Self {
        EmissionFactorTable {
            gasoline: 8.89,
            diesel: 10.16,
            hybrid: 6.72,
            electric: 0.12,
        }
    }
}

impl EmissionFactorTable {
    /// Every fuel paired with its factor, in `FuelType::ALL` order.
    pub fn entries(&self) -> [(FuelType, f64); 4] {
        FuelType::ALL.map(|fuel| (fuel, self.factor(fuel)))
    }

    /// Factor for a raw form label, gasoline when the label is unknown.
    pub fn factor_for_label(&self, label: &str) -> f64 {
        self.factor(FuelType::from_label(label))
    }
}

impl EmissionModel for EmissionFactorTable {
    fn factor(&self, fuel: FuelType) -> f64 {
        match fuel {
            FuelType::Gasoline => self.gasoline,
            FuelType::Diesel => self.diesel,
            FuelType::Hybrid => self.hybrid,
            FuelType::Electric => self.electric,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_parse_case_insensitive() {
        assert_eq!("diesel".parse::<FuelType>(), Ok(FuelType::Diesel));
        assert_eq!(" ELECTRIC ".parse::<FuelType>(), Ok(FuelType::Electric));
        assert!("Kerosene".parse::<FuelType>().is_err());
    }

    #[test]
    fn test_unknown_label_falls_back_to_gasoline() {
        let table = EmissionFactorTable::default();
        assert_eq!(FuelType::from_label("Kerosene"), FuelType::Gasoline);
        assert_eq!(FuelType::from_label("Diesel"), FuelType::Diesel);
        assert_eq!(table.factor_for_label("Kerosene"), table.gasoline);
        assert_eq!(table.factor_for_label(""), 8.89);
        assert_eq!(table.factor_for_label("Hybrid"), 6.72);
    }

    #[test]
    fn test_form_lookup_is_exact() {
        let table = EmissionFactorTable::default();
        assert_eq!(FuelType::from_label("diesel"), FuelType::Gasoline);
        assert_eq!(FuelType::from_label(" Diesel"), FuelType::Gasoline);
        assert_eq!(table.factor_for_label("diesel"), table.gasoline);
        assert_eq!(table.factor_for_label("Diesel"), table.diesel);
    }

    #[test]
    fn test_default_table() {
        let table = EmissionFactorTable::default();
        let entries = table.entries();
        assert_eq!(entries[0], (FuelType::Gasoline, 8.89));
        assert_eq!(entries[1], (FuelType::Diesel, 10.16));
        assert_eq!(entries[3], (FuelType::Electric, 0.12));
    }

    #[test]
    fn test_consumption_unit() {
        assert_eq!(FuelType::Electric.consumption_unit(), "kWh");
        assert_eq!(FuelType::Diesel.consumption_unit(), "gallons");
    }
}
