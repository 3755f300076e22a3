/// Tuning knobs for a solve.
///
/// # Examples
///
/// ```
/// let config = crossword_csp::SolverConfig::new()
///     .maintain_arc_consistency(true)
///     .guess_limit(10_000);
/// assert!(config.maintain_arc_consistency);
/// assert_eq!(config.guess_limit, Some(10_000));
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SolverConfig {
    /// Re-run arc consistency after every guess.  Prunes dead branches
    /// sooner without changing which solution is found.
    pub maintain_arc_consistency: bool,

    /// Give up after this many guesses.
    pub guess_limit: Option<u32>,
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn maintain_arc_consistency(mut self, enabled: bool) -> Self {
        self.maintain_arc_consistency = enabled;
        self
    }

    pub fn guess_limit(mut self, limit: u32) -> Self {
        self.guess_limit = Some(limit);
        self
    }
}
