use crate::scalar::Scalar;

/// Reductions over a set of elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Aggregator {
    Sum,
    Product,
    /// Sum of squared magnitudes.
    SumOfSquares,
    /// Largest magnitude.
    Largest,
    /// Smallest nonzero magnitude; zero when every element is zero.
    Smallest,
    Norm1,
    Norm2,
    /// Number of nonzero elements.
    Count,
    /// Largest real part.
    Maximum,
    /// Smallest real part.
    Minimum,
}

impl Aggregator {
    /// Whether feeding zeros leaves the result unchanged, which lets sparse
    /// and occupancy-aware callers skip them.
    pub fn ignores_zeros(self) -> bool {
        !matches!(
            self,
            Aggregator::Product | Aggregator::Maximum | Aggregator::Minimum
        )
    }

    pub fn state<N: Scalar>(self) -> AggregatorState<N> {
        AggregatorState::new(self)
    }

    /// Aggregates `values` in iteration order.
    pub fn over<N: Scalar>(self, values: impl IntoIterator<Item = N>) -> N {
        let mut state = self.state();
        values.into_iter().for_each(|value| state.invoke(value));
        state.get()
    }
}

/// Running state of one [`Aggregator`]; partial states from disjoint chunks
/// combine with [`merge`](AggregatorState::merge).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AggregatorState<N> {
    aggregator: Aggregator,
    value: N,
    real: f64,
    count: usize,
}

impl<N: Scalar> AggregatorState<N> {
    pub fn new(aggregator: Aggregator) -> Self {
        let value = match aggregator {
            Aggregator::Product => N::one(),
            _ => N::zero(),
        };
        let real = match aggregator {
            Aggregator::Smallest => f64::INFINITY,
            _ => 0.0,
        };
        AggregatorState {
            aggregator,
            value,
            real,
            count: 0,
        }
    }

    pub fn aggregator(&self) -> Aggregator {
        self.aggregator
    }

    pub fn invoke(&mut self, value: N) {
        match self.aggregator {
            Aggregator::Sum => self.value = self.value + value,
            Aggregator::Product => self.value = self.value * value,
            Aggregator::SumOfSquares | Aggregator::Norm2 => {
                let magnitude = value.magnitude();
                self.real += magnitude * magnitude;
            }
            Aggregator::Largest => self.real = self.real.max(value.magnitude()),
            Aggregator::Smallest => {
                let magnitude = value.magnitude();
                if magnitude > 0.0 {
                    self.real = self.real.min(magnitude);
                }
            }
            Aggregator::Norm1 => self.real += value.magnitude(),
            Aggregator::Count => {
                if !value.is_zero() {
                    self.count += 1;
                }
            }
            Aggregator::Maximum => {
                if self.count == 0 || value.to_f64() > self.value.to_f64() {
                    self.value = value;
                }
                self.count += 1;
            }
            Aggregator::Minimum => {
                if self.count == 0 || value.to_f64() < self.value.to_f64() {
                    self.value = value;
                }
                self.count += 1;
            }
        }
    }

    pub fn merge(&mut self, other: AggregatorState<N>) {
        debug_assert_eq!(self.aggregator, other.aggregator);
        match self.aggregator {
            Aggregator::Sum => self.value = self.value + other.value,
            Aggregator::Product => self.value = self.value * other.value,
            Aggregator::SumOfSquares | Aggregator::Norm1 | Aggregator::Norm2 => {
                self.real += other.real
            }
            Aggregator::Largest => self.real = self.real.max(other.real),
            Aggregator::Smallest => self.real = self.real.min(other.real),
            Aggregator::Count => self.count += other.count,
            Aggregator::Maximum | Aggregator::Minimum => {
                if other.count > 0 {
                    self.invoke(other.value);
                    self.count += other.count - 1;
                }
            }
        }
    }

    pub fn get(&self) -> N {
        match self.aggregator {
            Aggregator::Sum | Aggregator::Product => self.value,
            Aggregator::SumOfSquares | Aggregator::Largest | Aggregator::Norm1 => {
                N::from_f64(self.real)
            }
            Aggregator::Smallest => {
                if self.real.is_finite() {
                    N::from_f64(self.real)
                } else {
                    N::zero()
                }
            }
            Aggregator::Norm2 => N::from_f64(self.real.sqrt()),
            Aggregator::Count => N::from_f64(self.count as f64),
            Aggregator::Maximum | Aggregator::Minimum => self.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_reductions() {
        let values = [3.0, -4.0, 0.0, 1.0];
        assert_eq!(Aggregator::Sum.over(values), 0.0);
        assert_eq!(Aggregator::Product.over(values), 0.0);
        assert_eq!(Aggregator::Largest.over(values), 4.0);
        assert_eq!(Aggregator::Smallest.over(values), 1.0);
        assert_eq!(Aggregator::Norm1.over(values), 8.0);
        assert_eq!(Aggregator::Norm2.over([3.0, 4.0]), 5.0);
        assert_eq!(Aggregator::Count.over(values), 3.0);
        assert_eq!(Aggregator::Maximum.over(values), 3.0);
        assert_eq!(Aggregator::Minimum.over(values), -4.0);
        assert_eq!(Aggregator::Smallest.over([0.0, 0.0]), 0.0);
    }

    #[test]
    fn merged_partials_match_single_pass() {
        let values: Vec<f64> = (1..=12).map(|v| v as f64 - 6.5).collect();
        for aggregator in [
            Aggregator::Sum,
            Aggregator::SumOfSquares,
            Aggregator::Largest,
            Aggregator::Smallest,
            Aggregator::Count,
            Aggregator::Maximum,
            Aggregator::Minimum,
        ] {
            let mut left = aggregator.state::<f64>();
            let mut right = aggregator.state::<f64>();
            values[..5].iter().for_each(|&v| left.invoke(v));
            values[5..].iter().for_each(|&v| right.invoke(v));
            right.merge(left);
            assert_eq!(right.get(), aggregator.over(values.iter().copied()), "{aggregator:?}");
        }
    }

    #[test]
    fn zero_skipping_is_declared() {
        assert!(Aggregator::Sum.ignores_zeros());
        assert!(!Aggregator::Product.ignores_zeros());
        assert!(!Aggregator::Minimum.ignores_zeros());
    }
}
