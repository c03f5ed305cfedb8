use crate::core::bucket::ColorBucket;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEntry {
    pub index: usize,
    pub label: String,
    pub percentage: Option<i64>,
    pub bucket: ColorBucket,
}

impl ProgressEntry {
    pub fn new(index: usize, label: impl Into<String>, percentage: Option<i64>) -> Self {
        Self {
            index,
            label: label.into(),
            percentage,
            bucket: ColorBucket::for_percentage(percentage),
        }
    }

    /// Replaces the percentage; the previous bucket is discarded.
    pub fn set_percentage(&mut self, percentage: Option<i64>) {
        self.percentage = percentage;
        self.bucket = ColorBucket::for_percentage(percentage);
    }

    pub fn text(&self) -> String {
        match self.percentage {
            Some(p) => format!("{p}%"),
            None => "--%".to_string(),
        }
    }

    /// Filled cells out of `bar_width`, clamped to the bar.
    pub fn filled_cells(&self, bar_width: usize) -> usize {
        let Some(p) = self.percentage else {
            return 0;
        };
        let clamped = p.clamp(0, 100) as usize;
        (clamped * bar_width + 50) / 100
    }

    pub fn view(&self, bar_width: usize) -> ProgressView {
        ProgressView {
            index: self.index,
            label: self.label.clone(),
            percentage: self.percentage,
            bucket: self.bucket,
            class_name: self.bucket.class_name(),
            text: self.text(),
            filled: self.filled_cells(bar_width),
            width: bar_width,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressView {
    pub index: usize,
    pub label: String,
    pub percentage: Option<i64>,
    pub bucket: ColorBucket,
    pub class_name: &'static str,
    pub text: String,
    pub filled: usize,
    pub width: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_recomputes_bucket_and_text() {
        let mut entry = ProgressEntry::new(0, "Round 1", Some(95));
        assert_eq!(entry.bucket, ColorBucket::Red);

        entry.set_percentage(Some(55));
        assert_eq!(entry.bucket, ColorBucket::Orange);
        assert_eq!(entry.text(), "55%");
        assert_eq!(entry.filled_cells(100), 55);
    }

    #[test]
    fn malformed_percentage_renders_placeholder() {
        let entry = ProgressEntry::new(3, "Round 4", None);
        assert_eq!(entry.bucket, ColorBucket::Green);
        assert_eq!(entry.text(), "--%");
        assert_eq!(entry.filled_cells(30), 0);
    }

    #[test]
    fn width_is_clamped_to_the_bar() {
        let over = ProgressEntry::new(0, "over", Some(140));
        let under = ProgressEntry::new(1, "under", Some(-20));
        assert_eq!(over.filled_cells(30), 30);
        assert_eq!(over.text(), "140%");
        assert_eq!(under.filled_cells(30), 0);
    }

    #[test]
    fn view_carries_class_name() {
        let view = ProgressEntry::new(2, "Round 3", Some(70)).view(20);
        assert_eq!(view.class_name, "progress-dark-orange");
        assert_eq!(view.filled, 14);
        assert_eq!(view.width, 20);
    }
}
