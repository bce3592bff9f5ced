//! Corpus coverage report
//!
//! For every max word length setting, counts how many quotes can be drawn in
//! random play and how many solution words they offer.

use crate::core::{MAX_CONFIGURABLE_WORD_LENGTH, MIN_WORD_LENGTH};
use crate::corpus::WordSelector;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::time::{Duration, Instant};

/// Playable content at one max word length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageRow {
    pub max_length: usize,
    /// Quotes random play can choose from
    pub eligible_quotes: usize,
    /// Guessable word occurrences across eligible quotes
    pub guessable_words: usize,
    /// Distinct guessable words across eligible quotes
    pub distinct_words: usize,
}

/// Coverage across every configurable max word length
#[derive(Debug)]
pub struct CoverageReport {
    pub total_quotes: usize,
    pub rows: Vec<CoverageRow>,
    pub duration: Duration,
}

fn coverage_at(selector: &WordSelector, max_length: usize) -> CoverageRow {
    let mut eligible_quotes = 0;
    let mut guessable_words = 0;
    let mut distinct: FxHashSet<String> = FxHashSet::default();

    for quote in selector.corpus().quotes() {
        if !selector.is_eligible(quote, max_length) {
            continue;
        }
        eligible_quotes += 1;
        guessable_words += selector.count_guessable(quote, max_length);
        distinct.extend(
            quote
                .text
                .split(' ')
                .filter_map(|token| selector.guessable(token, max_length))
                .map(|word| word.text().to_string()),
        );
    }

    CoverageRow {
        max_length,
        eligible_quotes,
        guessable_words,
        distinct_words: distinct.len(),
    }
}

/// Scan the corpus once per max length, in parallel
pub fn run_coverage(selector: &WordSelector, show_progress: bool) -> CoverageReport {
    let lengths: Vec<usize> = (MIN_WORD_LENGTH..=MAX_CONFIGURABLE_WORD_LENGTH).collect();

    let pb = if show_progress {
        let pb = ProgressBar::new(lengths.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} lengths | {msg}")
        {
            pb.set_style(style.progress_chars("█▓▒░"));
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let start = Instant::now();
    let mut rows: Vec<CoverageRow> = lengths
        .par_iter()
        .map(|&max_length| {
            let row = coverage_at(selector, max_length);
            pb.inc(1);
            row
        })
        .collect();
    rows.sort_by_key(|row| row.max_length);

    pb.finish_with_message("Complete!");

    CoverageReport {
        total_quotes: selector.corpus().len(),
        rows,
        duration: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Corpus, QuoteRecord};
    use std::sync::Arc;

    fn selector() -> WordSelector {
        let quotes = vec![
            QuoteRecord::new("1", "Quiet.", "Priya", "Library"),
            QuoteRecord::new("2", "The pigeon started it", "Marcus", "The Park"),
            QuoteRecord::new("3", "Confidence is panic, pigeon", "Marcus", "Pitch"),
        ];
        WordSelector::with_exclusions(Arc::new(Corpus::new(quotes)), &["started"])
    }

    #[test]
    fn coverage_covers_every_length() {
        let report = run_coverage(&selector(), false);
        assert_eq!(report.total_quotes, 3);
        assert_eq!(
            report.rows.len(),
            MAX_CONFIGURABLE_WORD_LENGTH - MIN_WORD_LENGTH + 1
        );
        assert!(report.rows.windows(2).all(|w| w[0].max_length < w[1].max_length));
    }

    #[test]
    fn coverage_counts_grow_with_length() {
        let report = run_coverage(&selector(), false);
        let at = |len: usize| report.rows.iter().find(|r| r.max_length == len).unwrap();

        // Nothing of 4 letters besides excluded or short words
        assert_eq!(at(4).eligible_quotes, 0);

        // "pigeon" in quote 2; "panic" and "pigeon" in quote 3
        assert_eq!(
            at(6),
            &CoverageRow {
                max_length: 6,
                eligible_quotes: 2,
                guessable_words: 3,
                distinct_words: 2,
            }
        );

        // "confidence" joins at 10; the single-token quote never counts
        assert_eq!(at(10).guessable_words, 4);
        assert_eq!(at(10).distinct_words, 3);
        assert_eq!(at(15).eligible_quotes, 2);
    }
}
