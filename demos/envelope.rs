use monopole::prelude::*;

/// Tracks the widest radial excursion the envelope reaches over a run.
struct WidestRing {
    radius: f32,
    at_tick: u64,
}

impl PointSink for WidestRing {
    fn consume(&mut self, tick: u64, cloud: &PointCloud) -> Result<(), monopole::Error> {
        for point in cloud.as_slice() {
            let radius = f32::hypot(point.x, point.z);
            if radius > self.radius {
                self.radius = radius;
                self.at_tick = tick;
            }
        }
        Ok(())
    }
}

fn main() {
    // the carrier's period in ticks; the visualization stays readable
    // between roughly 10 and 800
    let wavelength = 400;
    // one element per tick of transit time along the antenna
    let length = 100;
    let points_around = 100;
    let r_max = 100.0;

    let line = DelayLine::new(DelayLineDescriptor {
        wavelength,
        length,
        init_elements: None,
    })
    .unwrap();

    let projector = RadialProjector::new(RadialProjectorDescriptor {
        points_around,
        r_max,
    })
    .unwrap();

    let mut simulation = Simulation::new(SimulationDescriptor {
        line,
        projector,
        sink: WidestRing {
            radius: 0.0,
            at_tick: 0,
        },
    });

    println!(
        "\n-- General Simulation Info --\n\
        # of elements:   {}\n\
        carrier period:  {} ticks\n\
        ring samples:    {}\n",
        length, wavelength, points_around,
    );

    println!("-- Run Part 1 --");
    // let the standing wave build up and record the boundary currents
    simulation.run(RunDescriptor {
        nticks: 4 * wavelength as usize,
        verbose: true,
        save_settings: Some(SaveSettings {
            filename: "data/envelope.h5",
            save_type: SaveType::End,
            overwrite: true,
        }),
    })
    .unwrap();

    println!("-- Run Part 2 --");
    // append one settled carrier cycle with the full line state
    simulation.run(RunDescriptor {
        nticks: wavelength as usize,
        verbose: true,
        save_settings: Some(SaveSettings {
            filename: "data/envelope.h5",
            save_type: SaveType::Full,
            overwrite: false,
        }),
    })
    .unwrap();

    println!(
        "\nwidest ring: radius {:.1} at tick {}",
        simulation.sink().radius,
        simulation.sink().at_tick,
    );
}
