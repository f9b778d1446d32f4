//! A discrete-time model of the current distribution on a quarter-wave
//! vertical antenna, and of the magnetic field envelope that surrounds it.
//!
//! The model does not solve for real field values; it relies on the field's
//! magnitude being linearly proportional to the local current and renders
//! the envelope to that proportion.
//!
//! To get started, refer to the `\demos` directory in the main repository.

mod simulation;

pub mod envelope;
pub mod line;
pub mod prelude;

pub use simulation::{RunDescriptor, SaveSettings, SaveType, Simulation, SimulationDescriptor};

/// Represents an error in the model.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Descriptor field {name} must be positive \
        ( {name}: {value} )")]
    BadParameter { name: String, value: f64 },
    #[error("Init element array does not have expected length \
        ( element array length: {input_length}, \
        expected length: {expected_length} )")]
    BadInit {
        input_length: usize,
        expected_length: usize,
    },
    #[error("There was an error delivering points to the presentation layer")]
    SinkError(i32),
    #[error(transparent)]
    H5Error(#[from] hdf5::Error),
}

/// Receives the envelope points produced for each tick.
///
/// This is the seam to the presentation layer: the model produces one cloud
/// of coordinates per tick and hands it over here, and whatever renders,
/// records, or discards those points lives entirely behind this trait.
pub trait PointSink {
    /// Accepts the point cloud for the tick that just completed.
    fn consume(&mut self, tick: u64, cloud: &envelope::PointCloud) -> Result<(), Error>;
}
