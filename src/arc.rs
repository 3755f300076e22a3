//! Arc consistency (AC-3) over slot overlaps.

use log::{debug, trace};
use std::collections::VecDeque;

use crate::{Domains, SlotToken, Topology, Word};

/// Make `x` arc consistent with `y`.
///
/// A candidate of `x` survives only if some other word among the
/// candidates of `y` carries the same letter in the shared cell.
/// Returns true if any candidate was removed from `x`.  Slots that do
/// not cross are left alone.
pub fn revise(topology: &Topology, domains: &mut Domains, x: SlotToken, y: SlotToken) -> bool {
    let (ix, iy) = match topology.overlap(x, y) {
        Some(overlap) => overlap,
        None => return false,
    };

    let counts = domains.letter_counts(y, iy);
    let unsupported: Vec<Word> = domains
        .iter(x)
        .filter(|wx| {
            let letter = wx.letter(ix);
            let matching = letter.and_then(|c| counts.get(&c)).copied().unwrap_or(0);

            // The word itself is no support for its own letter.
            let itself = domains.contains(y, wx) && wx.letter(iy) == letter;
            matching <= usize::from(itself)
        })
        .cloned()
        .collect();

    if unsupported.is_empty() {
        return false;
    }

    trace!(
        "revise {:?} against {:?}: removing {} of {}",
        x,
        y,
        unsupported.len(),
        domains.len(x)
    );
    for word in unsupported.iter() {
        domains.remove(x, word);
    }
    true
}

/// Propagate the overlap constraints until every arc is consistent.
///
/// With `arcs` of None the queue starts with every ordered pair of
/// crossing slots; otherwise it starts with the given arcs only.
/// Returns false as soon as some slot runs out of candidates.
pub fn enforce(
    topology: &Topology,
    domains: &mut Domains,
    arcs: Option<Vec<(SlotToken, SlotToken)>>,
) -> bool {
    let mut queue: VecDeque<(SlotToken, SlotToken)> = match arcs {
        Some(arcs) => arcs.into(),
        None => topology.arcs().into(),
    };

    let mut revisions = 0;
    while let Some((x, y)) = queue.pop_front() {
        if !revise(topology, domains, x, y) {
            continue;
        }
        revisions += 1;

        if domains.is_empty(x) {
            debug!("arc consistency: {:?} has no candidates left", x);
            return false;
        }

        for z in topology.neighbors(x) {
            if z != y {
                queue.push_back((z, x));
            }
        }
    }

    debug!(
        "arc consistency: {} revisions, {} candidates remain",
        revisions,
        domains.total_len()
    );
    true
}

#[cfg(test)]
mod tests {
    use super::{enforce, revise};
    use crate::domain::initialize;
    use crate::{Direction, Topology, Vocabulary, Word};

    #[test]
    fn test_revise_requires_distinct_support() {
        let mut topology = Topology::new();
        let a = topology.add_slot(0, 0, Direction::Across, 3).unwrap();
        let b = topology.add_slot(0, 0, Direction::Down, 3).unwrap();
        topology.add_overlap(a, b, 0, 0).unwrap();

        // "bob" could only be supported by itself.
        let vocabulary: Vocabulary = ["bob", "cat", "cow"].into_iter().collect();
        let mut domains = initialize(&topology, &vocabulary);

        assert!(revise(&topology, &mut domains, a, b));
        assert!(!domains.contains(a, &Word::new("bob")));
        assert!(domains.contains(a, &Word::new("cat")));
        assert!(domains.contains(a, &Word::new("cow")));
        assert!(!revise(&topology, &mut domains, a, b));
    }

    #[test]
    fn test_revise_ignores_non_neighbors() {
        let mut topology = Topology::new();
        let a = topology.add_slot(0, 0, Direction::Across, 3).unwrap();
        let b = topology.add_slot(5, 5, Direction::Down, 3).unwrap();

        let vocabulary: Vocabulary = ["bob"].into_iter().collect();
        let mut domains = initialize(&topology, &vocabulary);
        assert!(!revise(&topology, &mut domains, a, b));
        assert_eq!(domains.len(a), 1);
    }

    #[test]
    fn test_enforce_propagates_along_chain() {
        // a crosses b, b crosses c.  Pruning c's only match for b
        // must ripple back to a.
        let mut topology = Topology::new();
        let a = topology.add_slot(0, 0, Direction::Across, 2).unwrap();
        let b = topology.add_slot(0, 1, Direction::Down, 3).unwrap();
        let c = topology.add_slot(2, 1, Direction::Across, 2).unwrap();
        topology.add_overlap(a, b, 1, 0).unwrap();
        topology.add_overlap(b, c, 2, 0).unwrap();

        let vocabulary: Vocabulary = ["ab", "ax", "bcd", "xyz", "dq"].into_iter().collect();
        let mut domains = initialize(&topology, &vocabulary);

        assert!(enforce(&topology, &mut domains, None));
        assert_eq!(domains.iter(a).collect::<Vec<_>>(), [&Word::new("ab")]);
        assert_eq!(domains.iter(b).collect::<Vec<_>>(), [&Word::new("bcd")]);
        assert_eq!(domains.iter(c).collect::<Vec<_>>(), [&Word::new("dq")]);
    }

    #[test]
    fn test_enforce_reports_wipeout() {
        let mut topology = Topology::new();
        let a = topology.add_slot(0, 0, Direction::Across, 3).unwrap();
        let b = topology.add_slot(0, 1, Direction::Down, 3).unwrap();
        topology.add_overlap(a, b, 1, 1).unwrap();

        let vocabulary: Vocabulary = ["cat", "dog"].into_iter().collect();
        let mut domains = initialize(&topology, &vocabulary);
        assert!(!enforce(&topology, &mut domains, None));
    }

    #[test]
    fn test_enforce_with_seed_arcs() {
        let mut topology = Topology::new();
        let a = topology.add_slot(0, 0, Direction::Across, 3).unwrap();
        let b = topology.add_slot(0, 2, Direction::Down, 3).unwrap();
        topology.add_overlap(a, b, 2, 0).unwrap();

        let vocabulary: Vocabulary = ["nap", "pen", "pit", "tan", "tip"].into_iter().collect();
        let mut domains = initialize(&topology, &vocabulary);
        domains.restrict(a, &Word::new("tip"));

        assert!(enforce(&topology, &mut domains, Some(vec![(b, a)])));
        assert_eq!(
            domains.iter(b).collect::<Vec<_>>(),
            [&Word::new("pen"), &Word::new("pit")]
        );
        assert_eq!(domains.len(a), 1);
    }
}
