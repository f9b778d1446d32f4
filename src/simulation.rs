use std::cmp::min;
use std::path::Path;

use crate::envelope::{PointCloud, RadialProjector};
use crate::line::DelayLine;
use crate::{Error, PointSink};

/// Describes a simulation.
pub struct SimulationDescriptor<S: PointSink> {
    /// The delay line holding the antenna's current state.
    pub line: DelayLine,
    /// The projector that turns element currents into sample points.
    pub projector: RadialProjector,
    /// The sink that receives each tick's point cloud.
    pub sink: S,
}

/// Describes a simulation run.
pub struct RunDescriptor<P: AsRef<Path>> {
    /// How many ticks the simulation should run.
    pub nticks: usize,
    /// Whether or not to print information to the console.
    pub verbose: bool,
    /// What, if any, information to save to file.
    pub save_settings: Option<SaveSettings<P>>,
}

/// How data should be saved to file.
#[derive(Debug)]
pub struct SaveSettings<P: AsRef<Path>> {
    /// The path to the save file.
    pub filename: P,
    /// What information to save.
    pub save_type: SaveType,
    /// Whether or not to overwrite any possible saved data.
    pub overwrite: bool,
}

/// Represents what data to save.
#[derive(PartialEq, Debug)]
pub enum SaveType {
    /// Save forward and backward current data for every element on the line.
    Full,
    /// Save forward and backward current data for only the boundary
    /// elements, the driven base and the open tip.
    End,
}

/// The main `struct` of the framework.
pub struct Simulation<S: PointSink> {
    line: DelayLine,
    projector: RadialProjector,
    cloud: PointCloud,
    sink: S,
}

impl<S: PointSink> Simulation<S> {
    /// Creates a new `Simulation` instance.
    ///
    /// The point cloud is sized to the line and projector here and keeps
    /// that slot count for the simulation's lifetime.
    #[inline]
    pub fn new(desc: SimulationDescriptor<S>) -> Self {
        let cloud = PointCloud::new(desc.line.length(), desc.projector.points_around());

        Self {
            line: desc.line,
            projector: desc.projector,
            cloud,
            sink: desc.sink,
        }
    }

    /// Advances the model by one tick and delivers the resulting points.
    ///
    /// Exactly one `advance`, then a fresh projection of every
    /// (element, angular step) pair, then one call into the sink.  All
    /// reads of the line for a tick happen after that tick's advance and
    /// before the next one.
    pub fn step(&mut self) -> Result<(), Error> {
        self.line.advance();
        self.projector.project_line(&self.line, &mut self.cloud);
        self.sink.consume(self.line.tick(), &self.cloud)
    }

    /// Does a computational run.
    pub fn run<P: AsRef<Path>>(&mut self, desc: RunDescriptor<P>) -> Result<(), Error> {
        let length = self.line.length();
        let store_size = min(desc.nticks, (100_000_000 / length) + 1);
        let mut end_offset = 0;
        let mut full_offset = 0;

        // optionally create file
        if let Some(SaveSettings {
            ref filename,
            ref save_type,
            overwrite,
        }) = desc.save_settings {
            let filename = filename.as_ref();
            if filename.exists() && !overwrite {
                let file = hdf5::File::append(filename)?;

                let previous_end_size = file.dataset("base/forward")?.shape()[0];
                end_offset = previous_end_size;

                // resize boundary datasets
                file.dataset("base/forward")?.resize(previous_end_size + desc.nticks)?;
                file.dataset("base/backward")?.resize(previous_end_size + desc.nticks)?;
                file.dataset("tip/forward")?.resize(previous_end_size + desc.nticks)?;
                file.dataset("tip/backward")?.resize(previous_end_size + desc.nticks)?;

                if *save_type == SaveType::Full {
                    if let Ok(full_group) = file.group("full") {
                        let previous_full_size = file.dataset("full/forward")?.shape()[0];
                        full_offset = previous_full_size;
                        // resize full datasets
                        full_group.dataset("forward")?.resize(
                            (previous_full_size + desc.nticks, length)
                        )?;
                        full_group.dataset("backward")?.resize(
                            (previous_full_size + desc.nticks, length)
                        )?;
                    } else {
                        // create full datasets
                        let full_group = file.create_group("full")?;
                        full_group.new_dataset::<f32>()
                            .shape((hdf5::Extent::resizable(desc.nticks), length))
                            .create("forward")?;
                        full_group.new_dataset::<f32>()
                            .shape((hdf5::Extent::resizable(desc.nticks), length))
                            .create("backward")?;
                    }
                }

                file.close()?;
            } else {
                let file = hdf5::File::create(filename)?;

                // create boundary datasets
                let base_group = file.create_group("base")?;
                base_group.new_dataset::<f32>()
                    .shape(hdf5::Extent::resizable(desc.nticks))
                    .create("forward")?;
                base_group.new_dataset::<f32>()
                    .shape(hdf5::Extent::resizable(desc.nticks))
                    .create("backward")?;
                let tip_group = file.create_group("tip")?;
                tip_group.new_dataset::<f32>()
                    .shape(hdf5::Extent::resizable(desc.nticks))
                    .create("forward")?;
                tip_group.new_dataset::<f32>()
                    .shape(hdf5::Extent::resizable(desc.nticks))
                    .create("backward")?;

                if *save_type == SaveType::Full {
                    // create full datasets
                    let full_group = file.create_group("full")?;
                    full_group.new_dataset::<f32>()
                        .shape((hdf5::Extent::resizable(desc.nticks), length))
                        .create("forward")?;
                    full_group.new_dataset::<f32>()
                        .shape((hdf5::Extent::resizable(desc.nticks), length))
                        .create("backward")?;
                }

                // save the line's configuration as file attributes
                let wavelength_attr = file.new_attr::<u32>()
                    .shape(hdf5::Extents::Scalar)
                    .create("wavelength");
                if let Ok(attr) = wavelength_attr {
                    attr.write_scalar(&self.line.wavelength())?;
                }
                let length_attr = file.new_attr::<u64>()
                    .shape(hdf5::Extents::Scalar)
                    .create("length");
                if let Ok(attr) = length_attr {
                    attr.write_scalar(&(length as u64))?;
                }

                file.close()?;
            }
        }

        // setup output if verbose
        let bar = if desc.verbose {
            println!("# of ticks: {}", desc.nticks);
            Some(indicatif::ProgressBar::new(desc.nticks as u64))
        } else {
            None
        };

        // separate the run into bounded spans of ticks
        let mut forward_history = ndarray::Array2::<f32>::zeros((store_size, length));
        let mut backward_history = ndarray::Array2::<f32>::zeros((store_size, length));
        let mut written = 0;
        let mut remaining = desc.nticks;

        while remaining > 0 {
            let niters = min(store_size, remaining);

            // advance, deliver points, and record the span's line states
            for n in 0..niters {
                self.step()?;

                for (z, element) in self.line.elements().iter().enumerate() {
                    forward_history[[n, z]] = element.forward;
                    backward_history[[n, z]] = element.backward;
                }

                if let Some(ref bar) = bar {
                    bar.inc(1)
                }
            }

            // optionally write the span to file
            if let Some(SaveSettings {
                ref filename,
                ref save_type,
                ..
            }) = desc.save_settings {
                let file = hdf5::File::open_rw(filename)?;

                // save boundary data
                file.dataset("base/forward")?
                    .write_slice(
                        forward_history.slice(ndarray::s![0..niters, 0]).to_owned().view(),
                        ndarray::s![(end_offset + written)..(end_offset + written + niters)],
                    )?;
                file.dataset("base/backward")?
                    .write_slice(
                        backward_history.slice(ndarray::s![0..niters, 0]).to_owned().view(),
                        ndarray::s![(end_offset + written)..(end_offset + written + niters)],
                    )?;
                file.dataset("tip/forward")?
                    .write_slice(
                        forward_history.slice(ndarray::s![0..niters, -1]).to_owned().view(),
                        ndarray::s![(end_offset + written)..(end_offset + written + niters)],
                    )?;
                file.dataset("tip/backward")?
                    .write_slice(
                        backward_history.slice(ndarray::s![0..niters, -1]).to_owned().view(),
                        ndarray::s![(end_offset + written)..(end_offset + written + niters)],
                    )?;

                // optionally save full data
                if *save_type == SaveType::Full {
                    file.dataset("full/forward")?
                        .write_slice(
                            forward_history.slice(ndarray::s![0..niters, ..]),
                            ndarray::s![(full_offset + written)..(full_offset + written + niters), ..],
                        )?;
                    file.dataset("full/backward")?
                        .write_slice(
                            backward_history.slice(ndarray::s![0..niters, ..]),
                            ndarray::s![(full_offset + written)..(full_offset + written + niters), ..],
                        )?;
                }

                file.close()?;
            }

            written += niters;
            remaining -= niters;
        }

        if let Some(ref bar) = bar {
            bar.finish();
        }

        Ok(())
    }

    /// The delay line in its current state.
    #[inline]
    pub fn line(&self) -> &DelayLine {
        &self.line
    }

    /// The point cloud produced by the latest tick.
    #[inline]
    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    /// The sink receiving the per-tick point clouds.
    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }
}
