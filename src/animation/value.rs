use crate::jobs::Invalidator;

/// Observable progress scalar.
///
/// Written only by the component that advances its drivers; every change
/// notifies the single render target bound to it. Values are clamped into the
/// declared range, so readers never observe an out-of-range value.
#[derive(Debug)]
pub struct ProgressValue {
    value: f32,
    min: f32,
    max: f32,
    target: Option<Invalidator>,
}

impl ProgressValue {
    pub fn new(value: f32, start: f32, end: f32) -> Self {
        let (min, max) = (start.min(end), start.max(end));
        Self {
            value: value.clamp(min, max),
            min,
            max,
            target: None,
        }
    }

    pub fn get(&self) -> f32 {
        self.value
    }

    /// Store a new value, notifying the render target if it changed.
    pub fn set(&mut self, value: f32) {
        if !value.is_finite() {
            return;
        }
        let value = value.clamp(self.min, self.max);
        if value != self.value {
            self.value = value;
            if let Some(target) = &self.target {
                target.invalidate();
            }
        }
    }

    /// Bind the render target, replacing any previous one.
    pub fn bind(&mut self, target: Invalidator) {
        self.target = Some(target);
    }

    /// Detach the render target; later writes notify nobody.
    pub fn unbind(&mut self) {
        self.target = None;
    }

    pub fn is_bound(&self) -> bool {
        self.target.is_some()
    }

    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }
}
