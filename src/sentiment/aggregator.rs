// =============================================================================
// Sentiment Aggregator — rolling FIFO of recent news scores
// =============================================================================
//
// Holds the scores of the most recent `capacity` distinct headlines.  A title
// is accepted once; repeats are ignored for as long as the title is still
// remembered by `SeenTitles`.

use std::collections::VecDeque;

use crate::sentiment::seen_titles::SeenTitles;
use crate::types::NewsItem;

#[derive(Debug)]
pub struct SentimentAggregator {
    scores: VecDeque<f64>,
    capacity: usize,
    processed: SeenTitles,
}

impl SentimentAggregator {
    pub fn new(capacity: usize, processed_titles_capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            scores: VecDeque::with_capacity(capacity),
            capacity,
            processed: SeenTitles::new(processed_titles_capacity),
        }
    }

    pub fn is_processed(&self, title: &str) -> bool {
        self.processed.contains(title)
    }

    /// Accept `score` for `item` if its title has not been seen.
    ///
    /// Returns `true` when the score entered the FIFO.
    pub fn ingest(&mut self, item: &NewsItem, score: f64) -> bool {
        if !self.processed.insert(&item.title) {
            return false;
        }
        if self.scores.len() == self.capacity {
            self.scores.pop_front();
        }
        self.scores.push_back(score);
        true
    }

    /// Mean of the FIFO contents; 0 (neutral) when empty.
    pub fn average(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        self.scores.iter().sum::<f64>() / self.scores.len() as f64
    }

    /// Scores oldest-first.
    #[cfg(test)]
    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.scores.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str) -> NewsItem {
        NewsItem::new(title, "")
    }

    #[test]
    fn empty_average_is_neutral() {
        let agg = SentimentAggregator::new(10, 100);
        assert_eq!(agg.average(), 0.0);
    }

    #[test]
    fn average_of_contents() {
        let mut agg = SentimentAggregator::new(10, 100);
        agg.ingest(&item("a"), 0.5);
        agg.ingest(&item("b"), -0.1);
        assert!((agg.average() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn eleventh_ingest_evicts_oldest() {
        let mut agg = SentimentAggregator::new(10, 100);
        for i in 0..11 {
            assert!(agg.ingest(&item(&format!("t{i}")), i as f64));
            assert!(agg.len() <= 10);
        }
        assert_eq!(agg.len(), 10);
        let scores: Vec<f64> = agg.scores().collect();
        assert_eq!(scores, (1..11).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    fn duplicate_title_ignored() {
        let mut agg = SentimentAggregator::new(10, 100);
        assert!(agg.ingest(&item("same"), 0.4));
        assert!(!agg.ingest(&NewsItem::new("same", "different body"), -0.9));
        assert_eq!(agg.len(), 1);
        assert_eq!(agg.processed_count(), 1);
        assert!((agg.average() - 0.4).abs() < 1e-12);
    }
}
