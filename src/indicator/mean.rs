/// Arithmetic mean over every value pushed, with no window and no weighting.
#[derive(Debug, Clone, Default)]
pub struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new value, return the mean so far.
    pub fn push(&mut self, value: f64) -> f64 {
        self.sum += value;
        self.count += 1;
        self.sum / self.count as f64
    }

    pub fn value(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl FromIterator<f64> for Mean {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut mean = Mean::new();
        for v in iter {
            mean.push(v);
        }
        mean
    }
}
