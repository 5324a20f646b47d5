/// A stepped integer range control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slider {
    label: &'static str,
    unit: &'static str,
    min: u64,
    max: u64,
    step: u64,
    value: u64,
}

impl Slider {
    pub fn new(label: &'static str, unit: &'static str, min: u64, max: u64, step: u64) -> Self {
        Self {
            label,
            unit,
            min,
            max: max.max(min),
            step: step.max(1),
            value: min,
        }
    }

    pub fn with_value(mut self, value: u64) -> Self {
        self.set_value(value);
        self
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    /// Position within the range, `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        if self.max == self.min {
            return 0.0;
        }
        (self.value - self.min) as f64 / (self.max - self.min) as f64
    }

    pub fn caption(&self) -> String {
        format!("{}: {}{}", self.label, self.value, self.unit)
    }

    /// Clamps into range and snaps down to the step grid. Returns whether the value moved.
    pub fn set_value(&mut self, value: u64) -> bool {
        let clamped = value.clamp(self.min, self.max);
        let snapped = self.min + (clamped - self.min) / self.step * self.step;
        let changed = snapped != self.value;
        self.value = snapped;
        changed
    }

    pub fn increment(&mut self) -> bool {
        self.set_value(self.value.saturating_add(self.step))
    }

    pub fn decrement(&mut self) -> bool {
        let next = self.value.saturating_sub(self.step).max(self.min);
        self.set_value(next)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/slider.rs"]
mod tests;
