use crate::error::ValidationError;
use crate::estimator::{Estimate, Estimator};
use crate::factors::{EmissionModel, FuelType};
use crate::timeframe::TimeFrame;

/// State of the impact calculator form.
///
/// The numeric fields hold raw user text; validation happens on submit.
/// Each submit replaces the previous outcome wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImpactForm {
    pub fuel_type: FuelType,
    pub fuel_efficiency: String,
    pub distance: String,
    pub time_frame: TimeFrame,
    estimate: Option<Estimate>,
    error: Option<ValidationError>,
}

impl ImpactForm {
    /// Empty form with the given selections.
    pub fn new(fuel_type: FuelType, time_frame: TimeFrame) -> Self {
        ImpactForm {
            fuel_type,
            time_frame,
            ..ImpactForm::default()
        }
    }

    /// Outcome of the last successful submit, if it has not been reset.
    pub fn estimate(&self) -> Option<&Estimate> {
        self.estimate.as_ref()
    }

    /// Validation failure of the last submit.
    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    /// Validate the current fields and compute a fresh estimate.
    ///
    /// The previous estimate and error are dropped first, so a failed
    /// submit leaves no stale result behind.
    pub fn submit<M>(&mut self, estimator: &Estimator<M>) -> Result<&Estimate, ValidationError>
    where
        M: EmissionModel,
    {
        self.error = None;
        self.estimate = None;
        match estimator.estimate_form(
            self.fuel_type,
            &self.fuel_efficiency,
            &self.distance,
            self.time_frame,
        ) {
            Ok(estimate) => {
                let estimate: &Estimate = self.estimate.insert(estimate);
                Ok(estimate)
            }
            Err(err) => {
                self.error = Some(err);
                Err(err)
            }
        }
    }

    /// Clears the outcome and the typed numbers. Fuel type and time frame
    /// selections stay, and so does any stored validation message.
    pub fn reset(&mut self) {
        self.estimate = None;
        self.fuel_efficiency.clear();
        self.distance.clear();
    }

    /// Reset is only offered while a result is shown.
    pub fn can_reset(&self) -> bool {
        self.estimate.is_some()
    }

    /// Submit button text: "Calculate", or "Recalculate" once a result is shown.
    pub fn submit_label(&self) -> &'static str {
        if self.estimate.is_some() {
            "Recalculate"
        } else {
            "Calculate"
        }
    }

    /// Efficiency field label, in kWh terms for electric vehicles.
    pub fn efficiency_label(&self) -> &'static str {
        match self.fuel_type {
            FuelType::Electric => "Efficiency (kWh/100mi)",
            _ => "Fuel Efficiency (MPG)",
        }
    }

    pub fn efficiency_placeholder(&self) -> &'static str {
        match self.fuel_type {
            FuelType::Electric => "e.g. 30",
            _ => "e.g. 25",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filled(fuel: FuelType, frame: TimeFrame, eff: &str, dist: &str) -> ImpactForm {
        let mut form = ImpactForm::new(fuel, frame);
        form.fuel_efficiency = eff.to_string();
        form.distance = dist.to_string();
        form
    }

    #[test]
    fn test_defaults() {
        let form = ImpactForm::default();
        assert_eq!(form.fuel_type, FuelType::Gasoline);
        assert_eq!(form.time_frame, TimeFrame::Annual);
        assert!(form.estimate().is_none());
        assert_eq!(form.submit_label(), "Calculate");
        assert!(!form.can_reset());
    }

    #[test]
    fn test_submit_stores_estimate() {
        let estimator = Estimator::new();
        let mut form = filled(FuelType::Gasoline, TimeFrame::Weekly, "25", "15000");
        let est = form.submit(&estimator).unwrap();
        assert_eq!(est.result.period_emissions_kg, 102.58);
        assert!(form.error().is_none());
        assert_eq!(form.submit_label(), "Recalculate");
        assert!(form.can_reset());
    }

    #[test]
    fn test_failed_submit_clears_previous_result() {
        let estimator = Estimator::new();
        let mut form = filled(FuelType::Gasoline, TimeFrame::Annual, "25", "15000");
        form.submit(&estimator).unwrap();

        form.fuel_efficiency = "0".to_string();
        assert_eq!(form.submit(&estimator), Err(ValidationError::OutOfRange));
        assert!(form.estimate().is_none());
        assert_eq!(form.error(), Some(ValidationError::OutOfRange));
    }

    #[test]
    fn test_successful_submit_clears_previous_error() {
        let estimator = Estimator::new();
        let mut form = filled(FuelType::Diesel, TimeFrame::Annual, "abc", "100");
        assert_eq!(form.submit(&estimator), Err(ValidationError::InvalidNumber));

        form.fuel_efficiency = "20".to_string();
        assert!(form.submit(&estimator).is_ok());
        assert!(form.error().is_none());
    }

    #[test]
    fn test_reset_preserves_selections() {
        let estimator = Estimator::new();
        let mut form = filled(FuelType::Hybrid, TimeFrame::Daily, "50", "12000");
        form.submit(&estimator).unwrap();

        form.reset();
        assert!(form.estimate().is_none());
        assert!(form.fuel_efficiency.is_empty());
        assert!(form.distance.is_empty());
        assert_eq!(form.fuel_type, FuelType::Hybrid);
        assert_eq!(form.time_frame, TimeFrame::Daily);
        assert_eq!(form.submit_label(), "Calculate");

        assert_eq!(form.submit(&estimator), Err(ValidationError::MissingField));
    }

    #[test]
    fn test_reset_leaves_validation_message() {
        let mut form = filled(FuelType::Gasoline, TimeFrame::Annual, "", "");
        let _ = form.submit(&Estimator::new());
        form.reset();
        assert_eq!(form.error(), Some(ValidationError::MissingField));
    }

    #[test]
    fn test_electric_labels() {
        let form = ImpactForm::new(FuelType::Electric, TimeFrame::Annual);
        assert_eq!(form.efficiency_label(), "Efficiency (kWh/100mi)");
        assert_eq!(form.efficiency_placeholder(), "e.g. 30");
        let form = ImpactForm::new(FuelType::Diesel, TimeFrame::Annual);
        assert_eq!(form.efficiency_label(), "Fuel Efficiency (MPG)");
        assert_eq!(form.efficiency_placeholder(), "e.g. 25");
    }
}
