//! The crossword to be filled.

use log::{debug, info, warn};
use std::cell::Cell;

use crate::arc;
use crate::domain::{self, Domains};
use crate::search::{Assignment, CrosswordSearch};
use crate::{PsResult, SolverConfig, Topology, Vocabulary};

/// A grid and the words it may be filled with.
pub struct Crossword {
    topology: Topology,
    vocabulary: Vocabulary,
    config: SolverConfig,

    // The number of guesses taken by the last solve.
    num_guesses: Cell<u32>,
}

impl Crossword {
    /// Pair a grid with a vocabulary, using the default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossword_csp::{Crossword, Topology, Vocabulary};
    ///
    /// let topology = Topology::from_structure("___\n").unwrap();
    /// let crossword = Crossword::new(topology, Vocabulary::parse("owl\nbat\n"));
    /// assert_eq!(crossword.solve_any().unwrap().len(), 1);
    /// ```
    pub fn new(topology: Topology, vocabulary: Vocabulary) -> Self {
        Crossword {
            topology,
            vocabulary,
            config: SolverConfig::default(),
            num_guesses: Cell::new(0),
        }
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Find a complete assignment, or None if there is none.
    ///
    /// Running out of guesses is also reported as None; use
    /// [`Crossword::try_solve`] to tell the two apart.
    pub fn solve_any(&self) -> Option<Assignment> {
        match self.try_solve() {
            Ok(assignment) => assignment,
            Err(err) => {
                warn!("{}", err);
                None
            }
        }
    }

    /// Find a complete assignment.
    ///
    /// Returns `Ok(None)` if no assignment exists and an error if the
    /// configured guess limit was reached first.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossword_csp::{Crossword, Error, SolverConfig, Topology, Vocabulary};
    ///
    /// let topology = Topology::from_structure("___\n").unwrap();
    /// let crossword = Crossword::new(topology, Vocabulary::parse("owl\n"))
    ///     .with_config(SolverConfig::new().guess_limit(0));
    /// assert_eq!(crossword.try_solve(), Err(Error::GuessLimitExceeded(0)));
    /// ```
    pub fn try_solve(&self) -> PsResult<Option<Assignment>> {
        solve_with(&self.topology, &self.vocabulary, &self.config, &self.num_guesses)
    }

    /// Apply node and arc consistency without guessing.
    /// Primarily for testing.
    ///
    /// Returns the narrowed domains, or None if a contradiction was found.
    pub fn step(&self) -> Option<Domains> {
        consistent_domains(&self.topology, &self.vocabulary)
    }

    /// Get the number of guesses taken by the last solve.
    pub fn num_guesses(&self) -> u32 {
        self.num_guesses.get()
    }
}

/// Node consistency, then arc consistency over every arc.
fn consistent_domains(topology: &Topology, vocabulary: &Vocabulary) -> Option<Domains> {
    let mut domains = domain::initialize(topology, vocabulary);

    if !arc::enforce(topology, &mut domains, None) {
        return None;
    }

    // Slots without crossings are never revised.
    if let Some(slot) = domains.first_empty() {
        debug!("{:?} has no word of length {}", slot, topology[slot].length());
        return None;
    }

    Some(domains)
}

pub(crate) fn solve_with(
    topology: &Topology,
    vocabulary: &Vocabulary,
    config: &SolverConfig,
    num_guesses: &Cell<u32>,
) -> PsResult<Option<Assignment>> {
    num_guesses.set(0);

    let domains = match consistent_domains(topology, vocabulary) {
        Some(domains) => domains,
        None => {
            info!("no solution: propagation emptied a slot");
            return Ok(None);
        }
    };

    let result = CrosswordSearch::new(topology, &domains, config, num_guesses).run()?;
    match result {
        Some(_) => info!("solved after {} guesses", num_guesses.get()),
        None => info!("no solution after {} guesses", num_guesses.get()),
    }
    Ok(result)
}
