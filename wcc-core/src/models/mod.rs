mod input;
mod options;
mod submission;

pub use input::{
    AirLeakageMeasures, CalculatorInput, EnvelopeMeasures, HomeFacts, HvacDistributionMeasures,
    HvacMeasures, OptionSelections, WaterMeasures,
};
pub use options::{
    AirLeakageControl, Appliances, BuildingEnvelope, DuctLocation, Dwhr, EfficientWaterHeating,
    FireplaceType, FramingType, FurnaceLocation, HighEfficiencyHvac, HighEfficiencyHvacDistribution,
    ParseOptionError, RenewableEnergy, ThermostatType, VentilationType, WaterHeatingFuel, YesNo,
};
pub use submission::SubmissionRecord;
