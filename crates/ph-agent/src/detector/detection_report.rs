use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DetectionReport {
    pub count: usize,
    pub threshold: u32,
    pub exceeded: bool,
}

impl DetectionReport {
    pub fn new(count: usize, threshold: u32) -> Self {
        Self {
            count,
            threshold,
            exceeded: count > threshold as usize,
        }
    }

    pub fn message(&self) -> String {
        if self.exceeded {
            format!(
                "Profile count {} exceeds threshold {}",
                self.count, self.threshold
            )
        } else {
            format!(
                "Profile count {} is within threshold {}",
                self.count, self.threshold
            )
        }
    }
}
