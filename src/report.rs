use core::fmt;

use compact_str::CompactString;
use serde::Serialize;

use crate::chained_hash_table::BucketStats;
use crate::hasher::WordHasher;
use crate::word_frequency::WordFrequency;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordEntry {
    pub word: CompactString,
    pub count: usize,
}

/// Snapshot of a [`WordFrequency`], as printed by the command line tool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyReport {
    pub number_of_words: usize,
    pub distinct_words: usize,
    pub most_frequent_word: CompactString,
    pub bucket_size_average: f64,
    pub max_bucket_size: usize,
    pub buckets: BucketStats,
    pub top: Vec<WordEntry>,
    /// Counts of explicitly queried words, absent ones included
    pub queried: Vec<WordEntry>,
}

impl FrequencyReport {
    pub fn new<H: WordHasher>(frequencies: &WordFrequency<H>, top: usize, queried: &[String]) -> Self {
        let entry = |word: &str, count| WordEntry {
            word: word.into(),
            count,
        };
        Self {
            number_of_words: frequencies.number_of_words(),
            distinct_words: frequencies.distinct_words(),
            most_frequent_word: frequencies.most_frequent_word().into(),
            bucket_size_average: frequencies.bucket_size_average(),
            max_bucket_size: frequencies.max_bucket_size(),
            buckets: frequencies.bucket_stats(),
            top: frequencies
                .top_words(top)
                .into_iter()
                .map(|(word, count)| entry(word, count))
                .collect(),
            queried: queried
                .iter()
                .map(|word| entry(word.as_str(), frequencies.word_count(word)))
                .collect(),
        }
    }
}

impl fmt::Display for FrequencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "numberOfWords:       {}", self.number_of_words)?;
        writeln!(f, "distinct words:      {}", self.distinct_words)?;
        writeln!(f, "mostFrequentWord:    {:?}", self.most_frequent_word.as_str())?;
        writeln!(f, "bucketSizeAverage:   {:.3}", self.bucket_size_average)?;
        writeln!(f, "maxBucketSize:       {}", self.max_bucket_size)?;
        writeln!(
            f,
            "buckets:             {} ({} occupied, {:.3} per occupied)",
            self.buckets.bucket_count, self.buckets.occupied_buckets, self.buckets.occupied_average
        )?;
        for WordEntry { word, count } in self.queried.iter().chain(&self.top) {
            writeln!(f, "{:>8}  {}", count, word)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_fields() {
        let frequencies = WordFrequency::from_reader("to be or not to be".as_bytes());
        let report = FrequencyReport::new(&frequencies, 2, &["be".to_string(), "Hamlet".to_string()]);
        assert_eq!(report.number_of_words, 6);
        assert_eq!(report.distinct_words, 4);
        assert_eq!(report.most_frequent_word, "to");
        assert_eq!(
            report.top,
            vec![
                WordEntry { word: "to".into(), count: 2 },
                WordEntry { word: "be".into(), count: 2 },
            ]
        );
        assert_eq!(report.queried[0].count, 2);
        assert_eq!(report.queried[1].count, 0);
    }

    #[test]
    fn test_report_json() {
        let report = FrequencyReport::new(&WordFrequency::new(), 10, &[]);
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["number_of_words"], 0);
        assert_eq!(json["most_frequent_word"], "");
        assert_eq!(json["bucket_size_average"], 0.0);
        assert_eq!(json["buckets"]["bucket_count"], 0);
        assert!(json["top"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_report_display() {
        let frequencies = WordFrequency::from_reader("a a b".as_bytes());
        let text = FrequencyReport::new(&frequencies, 1, &[]).to_string();
        assert!(text.contains("numberOfWords:       3"));
        assert!(text.contains("mostFrequentWord:    \"a\""));
        assert!(text.ends_with("       2  a\n"));
    }
}
