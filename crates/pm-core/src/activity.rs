use crate::component::Component;

/// A scheduled maintenance activity: one component, one proposed execution
/// date `t`, and a duration `d` the component is taken out of service for.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub component: Component,
    pub t: f64,
    pub d: f64,
}

impl Activity {
    pub fn new(component: Component, t: f64, d: f64) -> Self {
        Self { component, t, d }
    }

    /// Penalty of shifting this activity by `delta_t` away from its
    /// component's unconstrained optimum, relative to executing at the
    /// optimum itself.
    ///
    /// `h(0) == 0`; `h` is what a [`Group`](crate::Group) sums and
    /// Newton-minimizes over its members' shared execution date.
    pub fn h(&self, delta_t: f64) -> f64 {
        let c = &self.component;
        c.expected_cost(c.x_star + delta_t) - c.expected_cost(c.x_star) - delta_t * c.phi_star
    }

    /// First derivative of [`Activity::h`] with respect to `delta_t`.
    pub fn dh(&self, delta_t: f64) -> f64 {
        let c = &self.component;
        c.expected_cost_derivative(c.x_star + delta_t) - c.phi_star
    }

    /// Second derivative of [`Activity::h`] with respect to `delta_t`.
    pub fn ddh(&self, delta_t: f64) -> f64 {
        self.component.expected_cost_second_derivative(self.component.x_star + delta_t)
    }
}
