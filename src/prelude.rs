//! Includes commonly used library components.

pub use crate::{
    PointSink,
    RunDescriptor,
    SaveSettings,
    SaveType,
    Simulation,
    SimulationDescriptor,
};
pub use crate::envelope::{PointCloud, RadialProjector, RadialProjectorDescriptor};
pub use crate::line::{DelayLine, DelayLineDescriptor, Element};
