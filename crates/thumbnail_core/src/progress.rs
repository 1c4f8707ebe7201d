/// Completion of the two long-running build phases, in whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressState {
    pub image_percent: u8,
    pub archive_percent: u8,
}

/// Keeps reported progress monotonic within one build.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    state: ProgressState,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ProgressState {
        self.state
    }

    /// Record that `finished` of `total` image lookups have settled.
    pub fn images_settled(&mut self, finished: usize, total: usize) -> ProgressState {
        let percent = percent_of(finished, total);
        self.state.image_percent = self.state.image_percent.max(percent);
        self.state
    }

    /// Record compression progress as reported by the packaging step.
    pub fn archive_progress(&mut self, percent: u8) -> ProgressState {
        self.state.archive_percent = self.state.archive_percent.max(percent.min(100));
        self.state
    }
}

/// `done * 100 / total`, rounded down; an empty batch is complete.
pub fn percent_of(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let percent = done.min(total) * 100 / total;
    percent as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_never_goes_backwards() {
        let mut tracker = ProgressTracker::new();
        assert_eq!(tracker.images_settled(2, 4).image_percent, 50);
        assert_eq!(tracker.images_settled(1, 4).image_percent, 50);
        assert_eq!(tracker.archive_progress(30).archive_percent, 30);
        assert_eq!(tracker.archive_progress(10).archive_percent, 30);
        assert_eq!(tracker.archive_progress(250).archive_percent, 100);
    }

    #[test]
    fn percent_only_reaches_hundred_when_done() {
        assert_eq!(percent_of(99, 100), 99);
        assert_eq!(percent_of(2, 3), 66);
        assert_eq!(percent_of(3, 3), 100);
        assert_eq!(percent_of(0, 0), 100);
    }
}
