use monopole::prelude::*;

/// Discards the envelope points; this demo only cares about the recorded
/// boundary currents.
struct Discard;

impl PointSink for Discard {
    fn consume(&mut self, _tick: u64, _cloud: &PointCloud) -> Result<(), monopole::Error> {
        Ok(())
    }
}

fn main() {
    let wavelength = 80;
    let length = 20;

    let line = DelayLine::new(DelayLineDescriptor {
        wavelength,
        length,
        init_elements: None,
    })
    .unwrap();

    // a single ring sample per element keeps projection overhead negligible
    let projector = RadialProjector::new(RadialProjectorDescriptor {
        points_around: 1,
        r_max: 1.0,
    })
    .unwrap();

    let mut simulation = Simulation::new(SimulationDescriptor {
        line,
        projector,
        sink: Discard,
    });

    println!(
        "\n-- General Simulation Info --\n\
        # of elements:   {}\n\
        carrier period:  {} ticks\n",
        length, wavelength,
    );

    println!("-- Run Part 1 --");
    // get past the initial transient and save the boundary currents
    simulation.run(RunDescriptor {
        nticks: 10 * wavelength as usize,
        verbose: true,
        save_settings: Some(SaveSettings {
            filename: "data/feedpoint.h5",
            save_type: SaveType::End,
            overwrite: true,
        }),
    })
    .unwrap();

    println!("-- Run Part 2 --");
    // append two settled carrier cycles
    simulation.run(RunDescriptor {
        nticks: 2 * wavelength as usize,
        verbose: true,
        save_settings: Some(SaveSettings {
            filename: "data/feedpoint.h5",
            save_type: SaveType::End,
            overwrite: false,
        }),
    })
    .unwrap();

    let base = simulation.line().element(0);
    println!(
        "\nfeed point after {} ticks: forward {:+.3}, backward {:+.3}, net {:+.3}",
        simulation.line().tick(),
        base.forward,
        base.backward,
        base.current(),
    );
}
