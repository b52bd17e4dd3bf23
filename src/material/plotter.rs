use super::LocalState;
use crate::StrError;
use plotpy::{Curve, Plot};

/// Plots damage evolution curves (debugging aid)
pub struct DamagePlotter {
    curves: Vec<Curve>,
}

impl DamagePlotter {
    /// Allocates a new instance
    pub fn new() -> Self {
        DamagePlotter { curves: Vec::new() }
    }

    /// Draws the damage versus strain-history curve of a state sequence
    ///
    /// * `extra` -- is a function `|curve| {}` to configure the curve
    pub fn draw<F>(&mut self, states: &[LocalState], mut extra: F)
    where
        F: FnMut(&mut Curve),
    {
        let xx: Vec<f64> = states.iter().map(|s| s.strain_history).collect();
        let yy: Vec<f64> = states.iter().map(|s| s.damage).collect();
        let mut curve = Curve::new();
        extra(&mut curve);
        curve.draw(&xx, &yy);
        self.curves.push(curve);
    }

    /// Saves the figure
    pub fn save(&self, filepath: &str) -> Result<(), StrError> {
        let mut plot = Plot::new();
        for curve in &self.curves {
            plot.add(curve);
        }
        plot.grid_and_labels("$\\kappa$", "$d$");
        plot.save(filepath)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::DamagePlotter;
    use crate::material::LocalState;
    use russell_tensor::Mandel;

    const SAVE_FIGURE: bool = false;

    #[test]
    fn draw_works() {
        let mut states = Vec::new();
        for i in 0..5 {
            let mut state = LocalState::new(Mandel::Symmetric2D);
            state.strain_history = (i as f64) * 1e-3;
            state.damage = (i as f64) * 0.2;
            states.push(state);
        }
        let mut plotter = DamagePlotter::new();
        plotter.draw(&states, |curve| {
            curve.set_marker_style(".");
        });
        if SAVE_FIGURE {
            plotter.save("/tmp/tpmech/test_damage_plotter.svg").unwrap();
        }
    }
}
