//! Report output port.

use crate::domain::error::MeanrevError;
use crate::domain::metrics::RunSummary;
use crate::domain::optimizer::OptimizationResult;
use crate::domain::params::ParameterSet;

/// Port for writing run and sweep reports. `results` handed to
/// [`ReportPort::write_sweep`] are already ranked; writers keep the order.
pub trait ReportPort {
    fn write_run(
        &self,
        symbol: &str,
        params: &ParameterSet,
        summary: &RunSummary,
    ) -> Result<(), MeanrevError>;

    fn write_sweep(&self, results: &[OptimizationResult]) -> Result<(), MeanrevError>;
}
