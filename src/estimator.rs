use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{check_constants, EstimatorConfig};
use crate::error::{ConfigError, ValidationError};
use crate::factors::{EmissionFactorTable, EmissionModel, FuelType};
use crate::timeframe::TimeFrame;

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    // + 0.0 turns -0.0 into 0.0
    (value * scale).round() / scale + 0.0
}

/// Validated calculator input.
///
/// Only obtainable through `new`, `parse` or deserialization, and all three
/// apply the same range checks.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCalculationInput")]
pub struct CalculationInput {
    fuel_type: FuelType,
    fuel_efficiency: f64,
    distance: f64,
    time_frame: TimeFrame,
}

/// Unchecked wire shape of `CalculationInput`.
#[derive(Deserialize)]
struct RawCalculationInput {
    #[serde(default)]
    fuel_type: FuelType,
    fuel_efficiency: f64,
    distance: f64,
    #[serde(default)]
    time_frame: TimeFrame,
}

impl TryFrom<RawCalculationInput> for CalculationInput {
    type Error = ValidationError;

    fn try_from(raw: RawCalculationInput) -> Result<Self, Self::Error> {
        CalculationInput::new(raw.fuel_type, raw.fuel_efficiency, raw.distance, raw.time_frame)
    }
}

impl CalculationInput {
    /// Range checks on already-numeric values.
    pub fn new(
        fuel_type: FuelType,
        fuel_efficiency: f64,
        distance: f64,
        time_frame: TimeFrame,
    ) -> Result<Self, ValidationError> {
        if !fuel_efficiency.is_finite() || !distance.is_finite() {
            return Err(ValidationError::InvalidNumber);
        }
        if fuel_efficiency <= 0.0 || distance < 0.0 {
            return Err(ValidationError::OutOfRange);
        }
        Ok(CalculationInput {
            fuel_type,
            fuel_efficiency,
            distance,
            time_frame,
        })
    }

    /// Validate raw form text. Checks run in order: presence, numeric, range.
    pub fn parse(
        fuel_type: FuelType,
        fuel_efficiency: &str,
        distance: &str,
        time_frame: TimeFrame,
    ) -> Result<Self, ValidationError> {
        if fuel_efficiency.is_empty() || distance.is_empty() {
            return Err(ValidationError::MissingField);
        }
        let fuel_efficiency = parse_number(fuel_efficiency)?;
        let distance = parse_number(distance)?;
        Self::new(fuel_type, fuel_efficiency, distance, time_frame)
    }

    pub fn fuel_type(&self) -> FuelType {
        self.fuel_type
    }

    /// Miles per gallon (kWh-equivalent for electric), always > 0.
    pub fn fuel_efficiency(&self) -> f64 {
        self.fuel_efficiency
    }

    /// Miles driven over a year, always >= 0.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn time_frame(&self) -> TimeFrame {
        self.time_frame
    }
}

fn parse_number(text: &str) -> Result<f64, ValidationError> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::InvalidNumber),
    }
}

/// Consumption and emissions for the chosen period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub fuel_type: FuelType,
    pub time_frame: TimeFrame,
    /// Gallons (or kWh) over the whole distance, unrounded.
    pub gallons_used: f64,
    /// Emissions over the whole distance, unrounded.
    pub annual_emissions_kg: f64,
    /// Rounded to 2 decimals.
    pub period_emissions_kg: f64,
    /// Rounded to 1 decimal.
    pub period_distance: f64,
}

impl CalculationResult {
    /// Gallons used as displayed, 1 decimal.
    pub fn gallons_used_rounded(&self) -> f64 {
        round_to(self.gallons_used, 1)
    }

    /// Annual total as displayed, 2 decimals.
    pub fn annual_emissions_rounded(&self) -> f64 {
        round_to(self.annual_emissions_kg, 2)
    }
}

/// What the same distance would have emitted in an average EV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// EV emissions over the whole distance, unrounded.
    pub ev_emissions_kg: f64,
    /// Negative when the EV would emit more under the configured factors.
    pub emissions_saved_kg: f64,
    pub period_ev_emissions_kg: f64,
    pub period_saved_kg: f64,
    /// Trees whose yearly uptake matches the annual savings; may be <= 0.
    pub tree_equivalent: i64,
}

/// One submission's outcome: the result block plus the EV comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub result: CalculationResult,
    pub comparison: ComparisonResult,
}

/// Pure emissions estimator over an immutable emission model.
#[derive(Debug, Clone)]
pub struct Estimator<M = EmissionFactorTable>
where
    M: EmissionModel,
{
    model: M,
    ev_kwh_per_mile: f64,
    tree_absorption_kg_per_year: f64,
}

impl Estimator<EmissionFactorTable> {
    /// Estimator over the built-in factor table and constants.
    pub fn new() -> Self {
        let config = EstimatorConfig::default();
        Estimator {
            model: config.emission_factors,
            ev_kwh_per_mile: config.ev_kwh_per_mile,
            tree_absorption_kg_per_year: config.tree_absorption_kg_per_year,
        }
    }

    /// Validates `config` and takes a copy of its table and constants.
    pub fn from_config(config: &EstimatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Estimator {
            model: config.emission_factors,
            ev_kwh_per_mile: config.ev_kwh_per_mile,
            tree_absorption_kg_per_year: config.tree_absorption_kg_per_year,
        })
    }
}

impl Default for Estimator<EmissionFactorTable> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Estimator<M>
where
    M: EmissionModel,
{
    /// Estimator over a custom model. The constants follow the same rules as
    /// `EstimatorConfig`: EV use finite and >= 0, tree uptake finite and > 0.
    pub fn with_model(
        model: M,
        ev_kwh_per_mile: f64,
        tree_absorption_kg_per_year: f64,
    ) -> Result<Self, ConfigError> {
        check_constants(ev_kwh_per_mile, tree_absorption_kg_per_year)?;
        Ok(Estimator {
            model,
            ev_kwh_per_mile,
            tree_absorption_kg_per_year,
        })
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run the calculation on a validated input.
    ///
    /// Fails with `OutOfRange` when a finite input still overflows, e.g. a
    /// vanishingly small efficiency, or the tree count leaves the `i64` range.
    pub fn estimate(&self, input: &CalculationInput) -> Result<Estimate, ValidationError> {
        let divisor = input.time_frame.divisor();

        let gallons_used = input.distance / input.fuel_efficiency;
        let emissions_kg = gallons_used * self.model.factor(input.fuel_type);

        let ev_emissions_kg =
            input.distance * self.ev_kwh_per_mile * self.model.factor(FuelType::Electric);
        let emissions_saved_kg = emissions_kg - ev_emissions_kg;
        let trees = (emissions_saved_kg / self.tree_absorption_kg_per_year).round();

        let finite = [gallons_used, emissions_kg, ev_emissions_kg, emissions_saved_kg, trees]
            .iter()
            .all(|v| v.is_finite());
        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        if !finite || trees.abs() >= i64::MAX as f64 {
            debug!(gallons_used, emissions_kg, trees, "estimate overflowed");
            return Err(ValidationError::OutOfRange);
        }

        debug!(
            fuel = %input.fuel_type,
            time_frame = %input.time_frame,
            gallons_used,
            emissions_kg,
            ev_emissions_kg,
            "estimated vehicle emissions"
        );

        Ok(Estimate {
            result: CalculationResult {
                fuel_type: input.fuel_type,
                time_frame: input.time_frame,
                gallons_used,
                annual_emissions_kg: emissions_kg,
                period_emissions_kg: round_to(emissions_kg / divisor, 2),
                period_distance: round_to(input.distance / divisor, 1),
            },
            comparison: ComparisonResult {
                ev_emissions_kg,
                emissions_saved_kg,
                period_ev_emissions_kg: round_to(ev_emissions_kg / divisor, 2),
                period_saved_kg: round_to(emissions_saved_kg / divisor, 2),
                tree_equivalent: trees as i64,
            },
        })
    }

    /// Validate raw form text and estimate in one step.
    pub fn estimate_form(
        &self,
        fuel_type: FuelType,
        fuel_efficiency: &str,
        distance: &str,
        time_frame: TimeFrame,
    ) -> Result<Estimate, ValidationError> {
        let input = CalculationInput::parse(fuel_type, fuel_efficiency, distance, time_frame)?;
        self.estimate(&input)
    }
}
