//! The discrete-time current model of the antenna conductor.

use std::f32::consts::PI;

use crate::Error;

/// One discretized slice of the antenna conductor.
///
/// Current flows through it in both directions at once; the two components
/// add to the net current that the surrounding field follows.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Element {
    /// Current traveling from the driven base toward the open tip.
    pub forward: f32,
    /// Current traveling from the tip back toward the base, produced by
    /// reflection at the open end.
    pub backward: f32,
}

impl Element {
    /// The net current through this slice.
    ///
    /// Positive values flow toward the tip, negative values toward the base.
    #[inline]
    pub fn current(&self) -> f32 {
        self.forward + self.backward
    }
}

/// Describes the composition of a `DelayLine`.
pub struct DelayLineDescriptor {
    /// The number of clock ticks per full cycle of the driving sinusoid.
    pub wavelength: u32,
    /// The number of discrete elements along the antenna.
    ///
    /// Length doubles as transit time: a sample injected at the base takes
    /// `length - 1` further ticks to reach the tip.
    pub length: usize,
    /// The state to start from, one entry per element.
    ///
    /// `None` starts the line with all currents zero.
    pub init_elements: Option<Vec<Element>>,
}

/// A bidirectional delay line driven by a sinusoidal source at its base.
///
/// Index 0 is the driven base, index `length - 1` the open, unterminated
/// tip.  Each `advance` shifts the two counter-propagating waves one element
/// and injects the next source sample.
pub struct DelayLine {
    elements: Vec<Element>,
    wavelength: u32,
    t: u64,
}

impl DelayLine {
    /// Creates a new `DelayLine` instance.
    #[inline]
    pub fn new(desc: DelayLineDescriptor) -> Result<Self, Error> {
        if desc.wavelength == 0 {
            return Err(Error::BadParameter {
                name: "wavelength".to_string(),
                value: 0.0,
            });
        }
        if desc.length == 0 {
            return Err(Error::BadParameter {
                name: "length".to_string(),
                value: 0.0,
            });
        }

        // create elements for initial data
        let elements = match desc.init_elements {
            Some(elements) => {
                if elements.len() != desc.length {
                    return Err(Error::BadInit {
                        input_length: elements.len(),
                        expected_length: desc.length,
                    });
                }
                elements
            }
            None => vec![Element::default(); desc.length],
        };

        Ok(Self {
            elements,
            wavelength: desc.wavelength,
            t: 0,
        })
    }

    /// Advances the model by one clock tick.
    ///
    /// The backward wave shifts one element toward the base and picks up the
    /// sign-inverted reflection of the tip's pre-shift forward sample; the
    /// forward wave then shifts one element toward the tip and picks up the
    /// next source sample at the base.
    pub fn advance(&mut self) {
        let last = self.elements.len() - 1;

        // shift the backward wave toward the base, reading each neighbor
        // before it is overwritten
        for n in 0..last {
            self.elements[n].backward = self.elements[n + 1].backward;
        }
        // open end: total reflection with a 180° phase inversion
        self.elements[last].backward = -self.elements[last].forward;

        // shift the forward wave toward the tip, again reading each neighbor
        // before it is overwritten
        for n in (1..=last).rev() {
            self.elements[n].forward = self.elements[n - 1].forward;
        }
        // inject this tick's source sample at the driven base
        self.elements[0].forward = self.source_sample();

        self.t += 1;
    }

    // the driving sinusoid at the current tick; the phase is reduced before
    // the float conversion so it stays exact for unbounded t
    fn source_sample(&self) -> f32 {
        let phase = (self.t % u64::from(self.wavelength)) as f32;
        f32::sin(2.0*PI * phase / (self.wavelength as f32))
    }

    /// The element at `index`, counting from the base.
    #[inline]
    pub fn element(&self, index: usize) -> Element {
        self.elements[index]
    }

    /// All elements in base-to-tip order.
    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The number of elements along the antenna.
    #[inline]
    pub fn length(&self) -> usize {
        self.elements.len()
    }

    /// The number of ticks per cycle of the driving sinusoid.
    #[inline]
    pub fn wavelength(&self) -> u32 {
        self.wavelength
    }

    /// The number of ticks completed so far.
    #[inline]
    pub fn tick(&self) -> u64 {
        self.t
    }
}
