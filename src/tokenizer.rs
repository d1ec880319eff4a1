/// Splits text into case-preserved word tokens.
///
/// A word is a maximal run of alphabetic characters. An apostrophe (`'` or `’`) belongs to the
/// word only when letters sit on both sides of it, so `don't` stays whole while quotes and
/// possessive trailers (`dogs'`) are dropped. Digits, hyphens, punctuation and whitespace
/// all separate words.
pub fn words(text: &str) -> Words<'_> {
    Words { text, pos: 0 }
}

/// Count the number of word tokens in text.
pub fn word_count(text: &str) -> usize {
    words(text).count()
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// Iterator returned by [`words`], borrowing slices of the input
#[derive(Debug, Clone)]
pub struct Words<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let start = self.pos + self.text[self.pos..].find(char::is_alphabetic)?;
        let mut end = start;
        let mut chars = self.text[start..].char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if c.is_alphabetic() {
                end = start + i + c.len_utf8();
            } else if !(is_apostrophe(c) && chars.peek().is_some_and(|&(_, n)| n.is_alphabetic())) {
                break;
            }
        }
        self.pos = end;
        Some(&self.text[start..end])
    }
}
