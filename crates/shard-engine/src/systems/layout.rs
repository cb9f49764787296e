//! Floating keyword cloud layout for the entry page.
//!
//! Shuffles the choice elements and scatters them inside the cloud box.
//! Purely cosmetic and recomputed on every load.

use crate::api::config::LayoutConfig;
use crate::systems::rng::Rng;

/// Where and how one choice element floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Index of the element in its original document order.
    pub element: usize,
    /// Left offset in pixels.
    pub x: u32,
    /// Top offset in pixels.
    pub y: u32,
    /// Float animation start delay in seconds.
    pub float_delay: f64,
    /// Float animation amplitude in pixels.
    pub float_amp: f64,
}

impl Placement {
    pub fn left_css(&self) -> String {
        format!("{}px", self.x)
    }

    pub fn top_css(&self) -> String {
        format!("{}px", self.y)
    }

    /// Value for the `--floatDelay` custom property, e.g. `0.37s`.
    pub fn delay_css(&self) -> String {
        format!("{:.2}s", self.float_delay)
    }

    /// Value for the `--floatAmp` custom property, e.g. `15px`.
    pub fn amp_css(&self) -> String {
        format!("{}px", self.float_amp.round() as i64)
    }
}

/// Lay out `count` elements in a container of the measured size.
/// The returned order is the new document order. A zero dimension means
/// the container was not measured yet and the configured fallback is used.
pub fn layout_cloud(
    count: usize,
    width: f64,
    height: f64,
    config: &LayoutConfig,
    rng: &mut Rng,
) -> Vec<Placement> {
    let w = if width > 0.0 { width } else { config.fallback_width };
    let h = if height > 0.0 { height } else { config.fallback_height };
    let x_span = config.min_x_span.max(w - config.x_margin);
    let y_span = config.min_y_span.max(h - config.y_margin);

    let mut order: Vec<usize> = (0..count).collect();
    rng.shuffle(&mut order);

    order
        .into_iter()
        .map(|element| Placement {
            element,
            x: (rng.next_f64() * x_span).floor() as u32,
            y: (rng.next_f64() * y_span).floor() as u32,
            float_delay: rng.next_f64() * config.max_float_delay,
            float_amp: config.min_float_amp + rng.next_f64() * config.float_amp_range,
        })
        .collect()
}
