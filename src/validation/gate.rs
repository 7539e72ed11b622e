use dashmap::DashSet;

/// Admits each distinct URL exactly once per run.
#[derive(Debug, Default)]
pub struct DedupGate {
    seen: DashSet<String>,
}

impl DedupGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time `url` is seen and `false` forever after.
    ///
    /// The insert is the atomic test-and-set; the `contains` check only
    /// avoids allocating for URLs that were already claimed.
    pub fn try_claim(&self, url: &str) -> bool {
        if self.seen.contains(url) {
            return false;
        }
        self.seen.insert(url.to_string())
    }

    /// Number of distinct URLs admitted so far.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
