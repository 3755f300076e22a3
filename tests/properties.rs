//! Solver properties checked against brute force on many small,
//! pseudo-randomly generated puzzles.

use crossword_csp::search::{complete, consistent};
use crossword_csp::*;

/// A tiny deterministic generator, so failures are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }
}

fn make_puzzle(rng: &mut Lcg) -> (Topology, Vocabulary) {
    let mut topology = Topology::new();
    let num_slots = 2 + rng.below(3);
    let slots: Vec<SlotToken> = (0..num_slots)
        .map(|row| {
            let length = 2 + rng.below(2);
            topology
                .add_slot(row, 0, Direction::Across, length)
                .unwrap()
        })
        .collect();

    for (n, &a) in slots.iter().enumerate() {
        for &b in &slots[n + 1..] {
            if rng.below(3) != 0 {
                let index_a = rng.below(topology[a].length());
                let index_b = rng.below(topology[b].length());
                topology.add_overlap(a, b, index_a, index_b).unwrap();
            }
        }
    }

    let letters = ['a', 'b', 'c'];
    let num_words = 3 + rng.below(6);
    let vocabulary = (0..num_words)
        .map(|_| {
            let length = 2 + rng.below(2);
            (0..length)
                .map(|_| letters[rng.below(letters.len())])
                .collect::<String>()
        })
        .collect();

    (topology, vocabulary)
}

/// Try every combination of words.
fn brute_force(topology: &Topology, vocabulary: &Vocabulary) -> bool {
    fn extend(
        topology: &Topology,
        vocabulary: &Vocabulary,
        slots: &[SlotToken],
        assignment: &mut Assignment,
    ) -> bool {
        let (&slot, rest) = match slots.split_first() {
            Some(split) => split,
            None => return complete(assignment, topology),
        };

        for word in vocabulary.of_length(topology[slot].length()) {
            assignment.assign(slot, word.clone());
            if consistent(assignment, topology) && extend(topology, vocabulary, rest, assignment) {
                return true;
            }
            assignment.unassign(slot);
        }
        false
    }

    let slots: Vec<SlotToken> = topology.slots().collect();
    extend(topology, vocabulary, &slots, &mut Assignment::new(topology))
}

fn for_each_puzzle<F: FnMut(Topology, Vocabulary)>(mut f: F) {
    let mut rng = Lcg(0x5eed);
    for _ in 0..300 {
        let (topology, vocabulary) = make_puzzle(&mut rng);
        f(topology, vocabulary);
    }
}

#[test]
fn solutions_are_valid() {
    for_each_puzzle(|topology, vocabulary| {
        if let Some(solution) = solve(&topology, &vocabulary) {
            assert!(complete(&solution, &topology));
            assert!(consistent(&solution, &topology));
            for (slot, word) in solution.iter() {
                assert_eq!(word.len(), topology[slot].length());
                assert!(vocabulary.contains(word));
            }
        }
    });
}

#[test]
fn failure_is_sound() {
    let mut solved = 0;
    let mut unsolved = 0;

    for_each_puzzle(|topology, vocabulary| {
        let expected = brute_force(&topology, &vocabulary);
        let actual = solve(&topology, &vocabulary).is_some();
        assert_eq!(actual, expected, "{:?} {:?}", topology, vocabulary);

        if actual {
            solved += 1;
        } else {
            unsolved += 1;
        }
    });

    // Make sure the generator covers both outcomes.
    assert!(solved > 0);
    assert!(unsolved > 0);
}

#[test]
fn domains_are_node_consistent() {
    for_each_puzzle(|topology, vocabulary| {
        let domains = domain::initialize(&topology, &vocabulary);
        for slot in topology.slots() {
            assert!(domains
                .iter(slot)
                .all(|word| word.len() == topology[slot].length()));
        }

        let mut again = domains.clone();
        assert!(!again.enforce_node_consistency(&topology));
        assert_eq!(again, domains);
    });
}

#[test]
fn arc_consistency_is_a_fixed_point() {
    for_each_puzzle(|topology, vocabulary| {
        let mut domains = domain::initialize(&topology, &vocabulary);
        if !arc::enforce(&topology, &mut domains, None) {
            return;
        }

        for (x, y) in topology.arcs() {
            let (i, j) = topology.overlap(x, y).unwrap();
            for wx in domains.iter(x) {
                assert!(domains.iter(y).any(|wy| wx != wy && wx[i] == wy[j]));
            }
        }

        let before = domains.clone();
        assert!(arc::enforce(&topology, &mut domains, None));
        assert_eq!(domains, before);
    });
}

#[test]
fn solving_is_deterministic() {
    for_each_puzzle(|topology, vocabulary| {
        let first = solve(&topology, &vocabulary);
        let second = solve(&topology, &vocabulary);
        assert_eq!(first, second);
    });
}

#[test]
fn maintained_arc_consistency_finds_the_same_solution() {
    for_each_puzzle(|topology, vocabulary| {
        let baseline = Crossword::new(topology.clone(), vocabulary.clone());
        let mac = Crossword::new(topology, vocabulary)
            .with_config(SolverConfig::new().maintain_arc_consistency(true));

        assert_eq!(baseline.try_solve(), mac.try_solve());
        assert!(mac.num_guesses() <= baseline.num_guesses());
    });
}
