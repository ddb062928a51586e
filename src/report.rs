use std::fmt;

use crate::estimator::Estimate;

/// Text rendering of an estimate, laid out like the impact page's result panel.
pub struct Report<'a> {
    estimate: &'a Estimate,
}

impl<'a> Report<'a> {
    pub fn new(estimate: &'a Estimate) -> Self {
        Report { estimate }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = &self.estimate.result;
        let comparison = &self.estimate.comparison;
        let frame = result.time_frame;

        writeln!(f, "Your Current Emissions ({frame}):")?;
        writeln!(f, "  {:.2} kg CO2", result.period_emissions_kg)?;
        writeln!(f, "  {:.1} miles", result.period_distance)?;
        writeln!(
            f,
            "Annual total: {:.2} kg CO2 ({:.1} {})",
            result.annual_emissions_rounded(),
            result.gallons_used_rounded(),
            result.fuel_type.consumption_unit()
        )?;
        writeln!(f)?;
        writeln!(f, "EV Comparison:")?;
        writeln!(
            f,
            "  You could save {:.2} kg CO2/{frame}",
            comparison.period_saved_kg
        )?;
        writeln!(f, "  {:.2} kg CO2", comparison.period_ev_emissions_kg)?;
        writeln!(
            f,
            "  Equivalent to planting {} trees annually!",
            comparison.tree_equivalent
        )
    }
}
