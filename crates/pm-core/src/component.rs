use serde::{Deserialize, Serialize};

/// Index of a component within a [`System`](crate::System).
///
/// Components, their node-capacity slots in the flow network, and the
/// activity list are all addressed by the same `0..N` index space, so a
/// `ComponentId` doubles as that index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentId(pub usize);

impl ComponentId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Weibull failure model and preventive-maintenance cost parameters for a
/// single component.
///
/// `x_star` and `phi_star` are the component's unconstrained optimum
/// maintenance interval and the marginal cost at that point; they are
/// precomputed once per component (outside this crate's scope) and used
/// as the reference point every activity's penalty function is built
/// around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    /// Fixed preventive maintenance cost.
    pub cp: f64,
    /// Corrective (failure) maintenance cost.
    pub cc: f64,
    /// Weibull shape parameter.
    pub beta: f64,
    /// Weibull scale parameter.
    pub alpha: f64,
    /// Unconstrained optimal maintenance interval.
    pub x_star: f64,
    /// Marginal expected cost rate at `x_star`.
    pub phi_star: f64,
}

impl Component {
    /// Expected long-run cost rate for a maintenance interval of length `x`.
    pub fn expected_cost(&self, x: f64) -> f64 {
        self.cp + self.cc * (x / self.alpha).powf(self.beta)
    }

    /// First derivative of [`Component::expected_cost`] with respect to `x`.
    pub fn expected_cost_derivative(&self, x: f64) -> f64 {
        self.cc * self.beta / self.alpha * (x / self.alpha).powf(self.beta - 1.0)
    }

    /// Second derivative of [`Component::expected_cost`] with respect to `x`.
    pub fn expected_cost_second_derivative(&self, x: f64) -> f64 {
        self.cc * self.beta * (self.beta - 1.0) / self.alpha.powi(2)
            * (x / self.alpha).powf(self.beta - 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Component {
        Component {
            id: ComponentId(0),
            cp: 100.0,
            cc: 500.0,
            beta: 2.0,
            alpha: 10.0,
            x_star: 7.0,
            phi_star: 12.0,
        }
    }

    #[test]
    fn expected_cost_is_monotone_increasing_past_x_star() {
        let c = sample();
        assert!(c.expected_cost(c.x_star + 5.0) > c.expected_cost(c.x_star));
    }

    #[test]
    fn second_derivative_is_positive_for_beta_above_one() {
        let c = sample();
        assert!(c.expected_cost_second_derivative(c.x_star) > 0.0);
    }

    #[test]
    fn round_trips_through_json() {
        let c = sample();
        let json = serde_json::to_string(&c).unwrap();
        let back: Component = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
