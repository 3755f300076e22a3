//! Backtracking search over slot assignments.

use log::trace;
use std::cell::Cell;
use std::cmp::Reverse;
use std::collections::HashSet;
use std::fmt;
use std::ops;

use crate::arc;
use crate::{Domains, Error, PsResult, SolverConfig, SlotToken, Topology, Word};

/// The state of one slot in an [`Assignment`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Entry {
    /// Never assigned.
    Unassigned,
    Assigned(Word),
    /// Assigned once, then undone while backtracking.
    Cleared,
}

/// A partial mapping from slots to words.
#[derive(Clone, Eq, PartialEq)]
pub struct Assignment {
    entries: Vec<Entry>,
}

/// Intermediate search state.
pub(crate) struct CrosswordSearch<'a> {
    topology: &'a Topology,

    // Domains after the initial propagation.  The heuristics only ever
    // read these, so the order of exploration does not depend on
    // whether arc consistency is maintained.
    domains: &'a Domains,

    config: &'a SolverConfig,
    num_guesses: &'a Cell<u32>,
    assignment: Assignment,
}

/*--------------------------------------------------------------*/

impl Assignment {
    /// An assignment for `topology` with every slot unassigned.
    pub fn new(topology: &Topology) -> Self {
        Assignment {
            entries: vec![Entry::Unassigned; topology.len()],
        }
    }

    /// Get the state of a slot, or None for a slot of another topology.
    pub fn entry(&self, slot: SlotToken) -> Option<&Entry> {
        self.entries.get(slot.index())
    }

    /// Get the word assigned to a slot, or None.
    pub fn get(&self, slot: SlotToken) -> Option<&Word> {
        match self.entry(slot) {
            Some(Entry::Assigned(word)) => Some(word),
            _ => None,
        }
    }

    pub fn is_assigned(&self, slot: SlotToken) -> bool {
        self.get(slot).is_some()
    }

    /// Give a slot a word.
    ///
    /// # Panics
    ///
    /// Panics if the slot belongs to another topology.
    pub fn assign(&mut self, slot: SlotToken, word: Word) {
        self.entries[slot.index()] = Entry::Assigned(word);
    }

    /// Undo the assignment of a slot.
    pub fn unassign(&mut self, slot: SlotToken) {
        if let Some(entry) = self.entries.get_mut(slot.index()) {
            if matches!(entry, Entry::Assigned(_)) {
                *entry = Entry::Cleared;
            }
        }
    }

    /// Iterate over the assigned slots and their words.
    pub fn iter(&self) -> impl Iterator<Item = (SlotToken, &Word)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(idx, entry)| match entry {
                Entry::Assigned(word) => Some((SlotToken(idx), word)),
                Entry::Unassigned | Entry::Cleared => None,
            })
    }

    /// Count the assigned slots.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ops::Index<SlotToken> for Assignment {
    type Output = Word;

    /// Get the word assigned to a slot.
    ///
    /// # Panics
    ///
    /// Panics if the slot has not been assigned.
    fn index(&self, slot: SlotToken) -> &Word {
        match self.get(slot) {
            Some(word) => word,
            None => panic!("unassigned"),
        }
    }
}

impl fmt::Debug for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "Assignment={{")?;
        for (idx, entry) in self.entries.iter().enumerate() {
            writeln!(f)?;
            match entry {
                Entry::Assigned(word) => write!(f, "  slot {}: {}", idx, word)?,
                Entry::Unassigned => write!(f, "  slot {}: -", idx)?,
                Entry::Cleared => write!(f, "  slot {}: (cleared)", idx)?,
            }
        }
        write!(f, "}}")?;
        Ok(())
    }
}

/*--------------------------------------------------------------*/

/// Check whether every slot of `topology` has a word.
pub fn complete(assignment: &Assignment, topology: &Topology) -> bool {
    topology.slots().all(|slot| assignment.is_assigned(slot))
}

/// Check that the assigned words fit: no word is used twice, every word
/// has its slot's length, and crossing slots agree on their shared
/// letter.
pub fn consistent(assignment: &Assignment, topology: &Topology) -> bool {
    let mut used = HashSet::new();

    for (slot, word) in assignment.iter() {
        match topology.slot(slot) {
            Some(s) if s.length() == word.len() => (),
            _ => return false,
        }

        if !used.insert(word) {
            return false;
        }

        for other in topology.neighbors(slot) {
            if let (Some(other_word), Some((i, j))) =
                (assignment.get(other), topology.overlap(slot, other))
            {
                if word.letter(i) != other_word.letter(j) {
                    return false;
                }
            }
        }
    }

    true
}

/// Choose the next slot to fill.
///
/// Prefers the fewest remaining candidates, then the most crossings,
/// then the earliest slot.  Returns None if every slot is assigned.
pub fn select_unassigned(
    assignment: &Assignment,
    domains: &Domains,
    topology: &Topology,
) -> Option<SlotToken> {
    topology
        .slots()
        .filter(|&slot| !assignment.is_assigned(slot))
        .min_by_key(|&slot| {
            (
                domains.len(slot),
                Reverse(topology.neighbor_count(slot)),
                slot,
            )
        })
}

/// Order the candidates of `slot`, least constraining first.
///
/// A word is scored by how many candidates of the unassigned crossing
/// slots it would rule out, either by disagreeing on the shared letter
/// or by being the same word.  Equal scores keep ascending word order.
pub fn order_values(
    slot: SlotToken,
    assignment: &Assignment,
    domains: &Domains,
    topology: &Topology,
) -> Vec<Word> {
    let crossings: Vec<_> = topology
        .neighbors(slot)
        .filter(|&other| !assignment.is_assigned(other))
        .filter_map(|other| {
            topology
                .overlap(slot, other)
                .map(|(i, j)| (other, i, j, domains.letter_counts(other, j)))
        })
        .collect();

    let mut scored: Vec<(usize, &Word)> = domains
        .iter(slot)
        .map(|word| {
            let eliminated: usize = crossings
                .iter()
                .map(|(other, i, j, counts)| {
                    let letter = word.letter(*i);
                    let kept = letter.and_then(|c| counts.get(&c)).copied().unwrap_or(0);
                    let itself = domains.contains(*other, word) && word.letter(*j) == letter;
                    domains.len(*other) - kept + usize::from(itself)
                })
                .sum();
            (eliminated, word)
        })
        .collect();

    scored.sort_by_key(|&(eliminated, _)| eliminated);
    scored.into_iter().map(|(_, word)| word.clone()).collect()
}

/*--------------------------------------------------------------*/

impl<'a> CrosswordSearch<'a> {
    pub(crate) fn new(
        topology: &'a Topology,
        domains: &'a Domains,
        config: &'a SolverConfig,
        num_guesses: &'a Cell<u32>,
    ) -> Self {
        CrosswordSearch {
            topology,
            domains,
            config,
            num_guesses,
            assignment: Assignment::new(topology),
        }
    }

    /// Search for a complete assignment.
    pub(crate) fn run(mut self) -> PsResult<Option<Assignment>> {
        let live = if self.config.maintain_arc_consistency {
            Some(self.domains.clone())
        } else {
            None
        };

        if self.backtrack(live.as_ref())? {
            Ok(Some(self.assignment))
        } else {
            Ok(None)
        }
    }

    /// Extend the current assignment depth first.
    ///
    /// `live` holds the candidates still possible in this branch when
    /// arc consistency is maintained.
    fn backtrack(&mut self, live: Option<&Domains>) -> PsResult<bool> {
        if complete(&self.assignment, self.topology) {
            return Ok(true);
        }

        let slot = match select_unassigned(&self.assignment, self.domains, self.topology) {
            Some(slot) => slot,
            None => return Ok(false),
        };

        for word in order_values(slot, &self.assignment, self.domains, self.topology) {
            if live.map_or(false, |live| !live.contains(slot, &word)) {
                continue;
            }

            self.guess()?;
            trace!("guess {:?} = {}", slot, word);
            self.assignment.assign(slot, word.clone());

            if consistent(&self.assignment, self.topology) {
                let found = match live {
                    None => self.backtrack(None)?,
                    Some(live) => match propagate(self.topology, live, slot, &word) {
                        Some(branch) => self.backtrack(Some(&branch))?,
                        None => false,
                    },
                };

                if found {
                    return Ok(true);
                }
            }

            self.assignment.unassign(slot);
        }

        Ok(false)
    }

    fn guess(&self) -> PsResult<()> {
        let num_guesses = self.num_guesses.get() + 1;
        self.num_guesses.set(num_guesses);

        match self.config.guess_limit {
            Some(limit) if num_guesses > limit => Err(Error::GuessLimitExceeded(limit)),
            _ => Ok(()),
        }
    }
}

/// Fix `slot` to `word` in a copy of `live` and restore arc consistency.
/// Returns None if some slot runs out of candidates.
fn propagate(topology: &Topology, live: &Domains, slot: SlotToken, word: &Word) -> Option<Domains> {
    let mut branch = live.clone();
    branch.restrict(slot, word);

    let arcs = topology.neighbors(slot).map(|other| (other, slot)).collect();
    if arc::enforce(topology, &mut branch, Some(arcs)) {
        Some(branch)
    } else {
        None
    }
}
