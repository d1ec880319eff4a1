use fxhash::hash as fxhash;

/// Maps a word to a bucket index. Implementations must not panic.
///
/// The table reduces the returned value modulo its bucket count, so any `usize` is fine.
/// Plain closures `Fn(&str) -> usize` are hashers as well.
pub trait WordHasher {
    fn hash(&self, key: &str) -> usize;
}

/// Default hasher, backed by `fxhash`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FxWordHasher;

impl WordHasher for FxWordHasher {
    #[inline]
    fn hash(&self, key: &str) -> usize {
        fxhash(key)
    }
}

/// Sums the bytes of the word.
///
/// Anagrams collide and values cluster in a narrow range, which makes it useful
/// to observe how a poor hash degrades the bucket distribution.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaiveWordHasher;

impl WordHasher for NaiveWordHasher {
    fn hash(&self, key: &str) -> usize {
        key.bytes().map(usize::from).sum()
    }
}

impl<F> WordHasher for F
where
    F: Fn(&str) -> usize,
{
    #[inline]
    fn hash(&self, key: &str) -> usize {
        self(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fx_is_deterministic() {
        let h = FxWordHasher;
        assert_eq!(h.hash("the"), h.hash("the"));
        assert_ne!(h.hash("the"), h.hash("The"));
    }

    #[test]
    fn test_naive_collides_on_anagrams() {
        let h = NaiveWordHasher;
        assert_eq!(h.hash("listen"), h.hash("silent"));
        assert_eq!(h.hash(""), 0);
        assert_eq!(h.hash("a"), 97);
    }

    #[test]
    fn test_closure_hasher() {
        let constant = |_: &str| 7usize;
        assert_eq!(constant.hash("anything"), 7);
        assert_eq!(WordHasher::hash(&constant, ""), 7);
    }
}
