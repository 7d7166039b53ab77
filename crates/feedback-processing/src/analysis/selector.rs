//! Sentiment-based selection over the working dataset.

use crate::types::{FeedbackRecord, SelectionCriterion};

/// Borrow the records matching `criterion`, preserving their order.
///
/// `NegativeOnly` matches every record without the happy glyph, so unrated
/// feedback is selected together with explicitly unhappy feedback.
pub fn select(records: &[FeedbackRecord], criterion: SelectionCriterion) -> Vec<&FeedbackRecord> {
    records
        .iter()
        .filter(|record| criterion.matches(record.sentiment))
        .collect()
}
