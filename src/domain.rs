//! Candidate words per slot.

use log::debug;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::rc::Rc;

use crate::{SlotToken, Topology, Vocabulary, Word};

/// The words each slot may still take.
///
/// Candidate sets are shared between clones until one of them is
/// narrowed, so a search branch can take its own copy cheaply.
#[derive(Clone, Eq, PartialEq)]
pub struct Domains {
    words: Vec<Rc<BTreeSet<Word>>>,
}

/// Build the domains of `topology`, keeping for each slot exactly the
/// vocabulary words with the slot's length.
pub fn initialize(topology: &Topology, vocabulary: &Vocabulary) -> Domains {
    let words: Vec<Rc<BTreeSet<Word>>> = topology
        .slots()
        .map(|slot| Rc::new(vocabulary.of_length(topology[slot].length()).cloned().collect()))
        .collect();
    let domains = Domains { words };

    debug!(
        "node consistency: {} slots, {} candidates",
        topology.len(),
        domains.total_len()
    );
    domains
}

impl Domains {
    /// Remove every word whose length differs from its slot's length.
    /// Returns true if anything was removed.
    pub fn enforce_node_consistency(&mut self, topology: &Topology) -> bool {
        let mut changed = false;
        for slot in topology.slots() {
            let length = topology[slot].length();
            if self.get(slot).iter().any(|word| word.len() != length) {
                self.retain(slot, |word| word.len() == length);
                changed = true;
            }
        }
        changed
    }

    /// The number of slots covered.
    pub fn num_slots(&self) -> usize {
        self.words.len()
    }

    /// The candidate set of a slot.
    pub fn get(&self, slot: SlotToken) -> &BTreeSet<Word> {
        &self.words[slot.index()]
    }

    /// Count the candidates of a slot.
    pub fn len(&self, slot: SlotToken) -> usize {
        self.words[slot.index()].len()
    }

    pub fn is_empty(&self, slot: SlotToken) -> bool {
        self.words[slot.index()].is_empty()
    }

    /// The total number of candidates over all slots.
    pub fn total_len(&self) -> usize {
        self.words.iter().map(|set| set.len()).sum()
    }

    /// Get the first slot left without candidates, if any.
    pub fn first_empty(&self) -> Option<SlotToken> {
        self.words
            .iter()
            .position(|set| set.is_empty())
            .map(SlotToken)
    }

    pub fn contains(&self, slot: SlotToken, word: &Word) -> bool {
        self.words[slot.index()].contains(word)
    }

    /// Iterate over the candidates of a slot in ascending order.
    pub fn iter(&self, slot: SlotToken) -> impl Iterator<Item = &Word> + '_ {
        self.words[slot.index()].iter()
    }

    /// Remove a single candidate from a slot.
    pub fn remove(&mut self, slot: SlotToken, word: &Word) -> bool {
        let set = &mut self.words[slot.index()];
        if set.contains(word) {
            Rc::make_mut(set).remove(word)
        } else {
            false
        }
    }

    /// Keep only the candidates of a slot matching `keep`.
    pub fn retain<F: FnMut(&Word) -> bool>(&mut self, slot: SlotToken, keep: F) {
        Rc::make_mut(&mut self.words[slot.index()]).retain(keep);
    }

    /// Narrow a slot down to the single candidate `word`.
    pub fn restrict(&mut self, slot: SlotToken, word: &Word) {
        let set = &mut self.words[slot.index()];
        *set = Rc::new(singleton(word));
    }

    /// Count, for each letter, the candidates of `slot` with that letter
    /// at position `idx`.
    pub fn letter_counts(&self, slot: SlotToken, idx: usize) -> HashMap<char, usize> {
        let mut counts = HashMap::new();
        for word in self.iter(slot) {
            if let Some(c) = word.letter(idx) {
                *counts.entry(c).or_insert(0) += 1;
            }
        }
        counts
    }
}

fn singleton(word: &Word) -> BTreeSet<Word> {
    let mut set = BTreeSet::new();
    set.insert(word.clone());
    set
}

impl fmt::Debug for Domains {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "Domains={{")?;
        for (idx, set) in self.words.iter().enumerate() {
            writeln!(f)?;
            write!(f, "  slot {}:", idx)?;
            for word in set.iter() {
                write!(f, " {}", word)?;
            }
        }
        write!(f, "}}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::initialize;
    use crate::{Direction, Topology, Vocabulary, Word};

    fn two_slots() -> Topology {
        let mut topology = Topology::new();
        topology.add_slot(0, 0, Direction::Across, 3).unwrap();
        topology.add_slot(0, 0, Direction::Down, 4).unwrap();
        topology
    }

    #[test]
    fn test_initialize_matches_lengths() {
        let topology = two_slots();
        let vocabulary: Vocabulary = ["ant", "bee", "wasp", "moth", "beetle"].into_iter().collect();
        let domains = initialize(&topology, &vocabulary);
        assert_eq!(domains.num_slots(), topology.len());

        for slot in topology.slots() {
            assert!(domains.iter(slot).all(|w| w.len() == topology[slot].length()));
        }
        let slots: Vec<_> = topology.slots().collect();
        assert_eq!(domains.len(slots[0]), 2);
        assert_eq!(domains.len(slots[1]), 2);
    }

    #[test]
    fn test_node_consistency_is_idempotent() {
        let topology = two_slots();
        let vocabulary: Vocabulary = ["ant", "wasp", "moth", "x"].into_iter().collect();
        let mut domains = initialize(&topology, &vocabulary);
        let before = domains.clone();

        assert!(!domains.enforce_node_consistency(&topology));
        assert_eq!(domains, before);
    }

    #[test]
    fn test_clones_do_not_alias() {
        let topology = two_slots();
        let vocabulary: Vocabulary = ["ant", "bee", "wasp"].into_iter().collect();
        let domains = initialize(&topology, &vocabulary);
        let slot = topology.slots().next().unwrap();

        let mut branch = domains.clone();
        branch.restrict(slot, &Word::new("bee"));
        assert_eq!(branch.len(slot), 1);
        assert_eq!(domains.len(slot), 2);

        assert!(!branch.remove(slot, &Word::new("ant")));
        assert!(branch.remove(slot, &Word::new("bee")));
        assert_eq!(branch.first_empty(), Some(slot));
        assert_eq!(domains.first_empty(), None);
    }
}
