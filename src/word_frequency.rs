use std::{
    fs::File,
    io::{self, BufRead, BufReader, Read},
    path::Path,
};

use log::{debug, warn};
use measure_time::debug_time;

use crate::chained_hash_table::{BucketStats, HashTable, StrHashTable, TableConfig};
use crate::error::WordFrequencyError;
use crate::hasher::{FxWordHasher, WordHasher};
use crate::tokenizer;

/// Word occurrence counts of a text, kept in a [`StrHashTable`].
///
/// The wrapper holds the table and nothing else: every statistic is computed by walking
/// the buckets when asked for, so the type has the exact size of the table it wraps.
///
/// Constructors never fail. An unreadable source logs a warning and leaves whatever was
/// read before the failure (usually nothing). Use the `try_` variants to observe the error.
#[repr(transparent)]
#[derive(Debug, Clone)]
pub struct WordFrequency<H = FxWordHasher> {
    table: StrHashTable<usize, H>,
}

impl WordFrequency {
    /// An empty table. Performs no I/O
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_reader(reader: impl Read) -> Self {
        Self::from_reader_with_hasher(reader, FxWordHasher)
    }

    pub fn try_from_reader(reader: impl Read) -> Result<Self, WordFrequencyError> {
        Self::try_from_reader_with_hasher(reader, FxWordHasher)
    }

    /// Counts the words of a file. A missing file gives an empty table
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::from_path_with_hasher(path, FxWordHasher)
    }

    pub fn try_from_path(path: impl AsRef<Path>) -> Result<Self, WordFrequencyError> {
        Self::try_from_path_with_hasher(path, FxWordHasher)
    }

    /// Counts whatever standard input provides until end of stream.
    ///
    /// Standard input is the default text source. Once drained, further calls yield empty tables.
    pub fn from_stdin() -> Self {
        Self::from_stdin_with_hasher(FxWordHasher)
    }
}

impl<H: WordHasher + Default> Default for WordFrequency<H> {
    fn default() -> Self {
        Self::with_hasher(H::default())
    }
}

impl<H: WordHasher> WordFrequency<H> {
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            table: StrHashTable::with_hasher(hasher),
        }
    }

    pub fn with_config(config: TableConfig, hasher: H) -> Result<Self, WordFrequencyError> {
        Ok(Self {
            table: StrHashTable::with_config(config, hasher)?,
        })
    }

    pub fn from_reader_with_hasher(reader: impl Read, hasher: H) -> Self {
        let mut frequencies = Self::with_hasher(hasher);
        if let Err(e) = frequencies.load(reader) {
            warn!(
                "stopped reading text after {} words: {}",
                frequencies.number_of_words(),
                e
            );
        }
        frequencies
    }

    pub fn try_from_reader_with_hasher(
        reader: impl Read,
        hasher: H,
    ) -> Result<Self, WordFrequencyError> {
        let mut frequencies = Self::with_hasher(hasher);
        frequencies.load(reader)?;
        Ok(frequencies)
    }

    pub fn from_stdin_with_hasher(hasher: H) -> Self {
        let mut frequencies = Self::with_hasher(hasher);
        if let Err(e) = frequencies.load_stdin() {
            warn!("stopped reading standard input: {}", e);
        }
        frequencies
    }

    pub fn from_path_with_hasher(path: impl AsRef<Path>, hasher: H) -> Self {
        let mut frequencies = Self::with_hasher(hasher);
        if let Err(e) = frequencies.load_path(path) {
            warn!("{}", e);
        }
        frequencies
    }

    pub fn try_from_path_with_hasher(
        path: impl AsRef<Path>,
        hasher: H,
    ) -> Result<Self, WordFrequencyError> {
        let mut frequencies = Self::with_hasher(hasher);
        frequencies.load_path(path)?;
        Ok(frequencies)
    }

    /// Tokenizes `reader` line by line and counts every word. Returns the number of words read
    pub fn load(&mut self, reader: impl Read) -> Result<usize, WordFrequencyError> {
        let mut added = 0;
        for line in BufReader::new(reader).lines() {
            let line = line?;
            for word in tokenizer::words(&line) {
                self.add(word);
                added += 1;
            }
        }
        Ok(added)
    }

    /// Counts standard input up to end of stream
    pub fn load_stdin(&mut self) -> Result<usize, WordFrequencyError> {
        debug_time!("counting words from standard input");
        self.load(io::stdin().lock())
    }

    /// Like [`load`](Self::load), reporting failures together with the path
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<usize, WordFrequencyError> {
        let path = path.as_ref();
        debug_time!("counting words in {}", path.display());

        let into_io = |source: io::Error| WordFrequencyError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(into_io)?;
        let added = self.load(file).map_err(|e| match e {
            WordFrequencyError::Read(source) => into_io(source),
            other => other,
        })?;
        debug!(
            "{}: {} words, {} distinct",
            path.display(),
            added,
            self.distinct_words()
        );
        Ok(added)
    }

    /// Counts one occurrence of `word`, taken verbatim
    pub fn add(&mut self, word: &str) {
        *self.table.get_or_insert_with(word, || 0) += 1;
    }

    /// Counts the words of an in-memory text
    pub fn add_text(&mut self, text: &str) {
        self.extend(tokenizer::words(text));
    }

    /// Total word occurrences, i.e. the sum of all counts
    pub fn number_of_words(&self) -> usize {
        self.table.iter().map(|(_, count, _)| count).sum()
    }

    pub fn distinct_words(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Occurrences of `word`, matched case-sensitively. 0 when absent
    pub fn word_count(&self, word: &str) -> usize {
        self.table.get(word).copied().unwrap_or(0)
    }

    /// The word with the highest count, the earliest seen winning ties. Empty when no words
    pub fn most_frequent_word(&self) -> &str {
        self.table
            .iter()
            .max_by(|(_, a, a_order), (_, b, b_order)| a.cmp(b).then(b_order.cmp(a_order)))
            .map_or("", |(word, _, _)| word)
    }

    /// The `n` most frequent words, ties ordered by first appearance
    pub fn top_words(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize, usize)> = self
            .table
            .iter()
            .map(|(word, count, order)| (word, *count, order))
            .collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        ranked
            .into_iter()
            .take(n)
            .map(|(word, count, _)| (word, count))
            .collect()
    }

    /// Mean number of entries per bucket (the load factor). 0.0 when empty.
    ///
    /// Empty buckets count, so this measures table sizing rather than hash quality: the table
    /// rehashes before it exceeds its max load factor (1.0 by default) whatever the hash
    /// function does. Clustering from a poor hash shows in [`max_bucket_size`](Self::max_bucket_size)
    /// and in [`BucketStats::occupied_average`].
    pub fn bucket_size_average(&self) -> f64 {
        self.table.load_factor()
    }

    /// Length of the longest collision chain. 0 when empty
    pub fn max_bucket_size(&self) -> usize {
        self.table.max_bucket_len()
    }

    pub fn bucket_stats(&self) -> BucketStats {
        self.table.bucket_stats()
    }

    /// Iterates `(word, count)` in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.table.iter().map(|(word, count, _)| (word, *count))
    }

    pub fn table(&self) -> &StrHashTable<usize, H> {
        &self.table
    }
}

impl<'a, H: WordHasher> Extend<&'a str> for WordFrequency<H> {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, words: I) {
        for word in words {
            self.add(word);
        }
    }
}
