//! Words and the vocabulary they are drawn from.

use std::collections::BTreeSet;
use std::fmt;
use std::ops;
use std::rc::Rc;

/// A candidate word.
///
/// Letters are Unicode scalar values, so the length of a word is its
/// letter count rather than its byte count.  Cloning is cheap.
#[derive(Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Word(Rc<[char]>);

impl Word {
    pub fn new(text: &str) -> Self {
        Word(text.chars().collect())
    }

    /// The number of letters in the word.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the letter at `idx`, or None past the end of the word.
    pub fn letter(&self, idx: usize) -> Option<char> {
        self.0.get(idx).copied()
    }

    pub fn letters(&self) -> &[char] {
        &self.0
    }
}

impl From<&str> for Word {
    fn from(text: &str) -> Self {
        Word::new(text)
    }
}

impl From<String> for Word {
    fn from(text: String) -> Self {
        Word::new(&text)
    }
}

impl PartialEq<str> for Word {
    fn eq(&self, other: &str) -> bool {
        self.0.iter().copied().eq(other.chars())
    }
}

impl PartialEq<&str> for Word {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl ops::Index<usize> for Word {
    type Output = char;

    /// Get the letter at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is past the end of the word.
    fn index(&self, idx: usize) -> &char {
        &self.0[idx]
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in self.0.iter() {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({:?})", self.to_string())
    }
}

/*--------------------------------------------------------------*/

/// The set of words a grid may be filled with, kept in ascending order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Vocabulary {
    words: BTreeSet<Word>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Vocabulary {
            words: BTreeSet::new(),
        }
    }

    /// Parse a word list with one word per line.
    ///
    /// Surrounding whitespace and blank lines are ignored and every word
    /// is upper-cased, matching the letters of a printed grid.
    ///
    /// # Examples
    ///
    /// ```
    /// let vocabulary = crossword_csp::Vocabulary::parse("one\n  two \n\nthree\n");
    /// assert_eq!(vocabulary.len(), 3);
    /// assert!(vocabulary.contains(&"TWO".into()));
    /// ```
    pub fn parse(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_uppercase)
            .collect()
    }

    /// Add a word, returning false if it was already present.
    pub fn insert<W: Into<Word>>(&mut self, word: W) -> bool {
        self.words.insert(word.into())
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Word> + '_ {
        self.words.iter()
    }

    /// Iterate over the words with exactly `len` letters.
    pub fn of_length(&self, len: usize) -> impl Iterator<Item = &Word> + '_ {
        self.words.iter().filter(move |word| word.len() == len)
    }
}

impl<S: AsRef<str>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Vocabulary {
            words: iter.into_iter().map(|s| Word::new(s.as_ref())).collect(),
        }
    }
}

impl<S: AsRef<str>> Extend<S> for Vocabulary {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.words
            .extend(iter.into_iter().map(|s| Word::new(s.as_ref())));
    }
}
