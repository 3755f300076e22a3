//! The shape of the grid: its slots and where they cross.

use bit_set::BitSet;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops;

use crate::{Error, PsResult, SlotToken};

/// The orientation of a slot.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Direction {
    Across,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => write!(f, "across"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// A run of cells that holds one word.
///
/// Two slots are the same slot if they start on the same cell and run
/// in the same direction.
#[derive(Copy, Clone, Debug)]
pub struct Slot {
    row: usize,
    col: usize,
    direction: Direction,
    length: usize,
}

/// Where two slots cross: the letter index into the first slot's word
/// and the letter index into the second slot's word.
pub type Overlap = (usize, usize);

/// The slots of a grid and the overlaps between them.
#[derive(Clone, Debug, Default)]
pub struct Topology {
    slots: Vec<Slot>,

    // Keyed by both orderings of each crossing pair.
    overlaps: HashMap<(usize, usize), Overlap>,

    // The slots crossing each slot.
    neighbors: Vec<BitSet>,
}

/*--------------------------------------------------------------*/

impl Slot {
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// The (row, column) of the cell holding letter `idx`.
    pub fn cell(&self, idx: usize) -> (usize, usize) {
        match self.direction {
            Direction::Across => (self.row, self.col + idx),
            Direction::Down => (self.row + idx, self.col),
        }
    }

    /// The (row, column) of every cell in the slot, in letter order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(move |idx| self.cell(idx))
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        (self.row, self.col, self.direction) == (other.row, other.col, other.direction)
    }
}

impl Eq for Slot {}

impl Hash for Slot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.row, self.col, self.direction).hash(state);
    }
}

/*--------------------------------------------------------------*/

impl Topology {
    /// Allocate an empty topology.
    ///
    /// # Examples
    ///
    /// ```
    /// crossword_csp::Topology::new();
    /// ```
    pub fn new() -> Self {
        Topology {
            slots: Vec::new(),
            overlaps: HashMap::new(),
            neighbors: Vec::new(),
        }
    }

    /// Add a slot of `length` cells starting at (`row`, `col`).
    ///
    /// # Examples
    ///
    /// ```
    /// use crossword_csp::{Direction, Topology};
    ///
    /// let mut topology = Topology::new();
    /// let slot = topology.add_slot(0, 0, Direction::Across, 5).unwrap();
    /// assert_eq!(topology[slot].length(), 5);
    ///
    /// // The same start cell and direction is the same slot.
    /// assert!(topology.add_slot(0, 0, Direction::Across, 3).is_err());
    /// ```
    pub fn add_slot(
        &mut self,
        row: usize,
        col: usize,
        direction: Direction,
        length: usize,
    ) -> PsResult<SlotToken> {
        if length == 0 {
            return Err(Error::EmptySlot { row, col });
        }

        let slot = Slot {
            row,
            col,
            direction,
            length,
        };

        if self.slots.contains(&slot) {
            return Err(Error::DuplicateSlot {
                row,
                col,
                direction,
            });
        }

        let token = SlotToken(self.slots.len());
        self.slots.push(slot);
        self.neighbors.push(BitSet::new());
        Ok(token)
    }

    /// Declare that letter `index_a` of slot `a` shares a cell with
    /// letter `index_b` of slot `b`.
    ///
    /// Declaring the same overlap twice, in either order, is harmless.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossword_csp::{Direction, Topology};
    ///
    /// let mut topology = Topology::new();
    /// let a = topology.add_slot(0, 0, Direction::Across, 3).unwrap();
    /// let b = topology.add_slot(0, 2, Direction::Down, 4).unwrap();
    /// topology.add_overlap(a, b, 2, 0).unwrap();
    ///
    /// assert_eq!(topology.overlap(a, b), Some((2, 0)));
    /// assert_eq!(topology.overlap(b, a), Some((0, 2)));
    /// ```
    pub fn add_overlap(
        &mut self,
        a: SlotToken,
        b: SlotToken,
        index_a: usize,
        index_b: usize,
    ) -> PsResult<()> {
        self.check_index(a, index_a)?;
        self.check_index(b, index_b)?;
        if a == b {
            return Err(Error::SelfOverlap(a));
        }

        let SlotToken(ia) = a;
        let SlotToken(ib) = b;

        if let Some(&existing) = self.overlaps.get(&(ia, ib)) {
            if existing != (index_a, index_b) {
                return Err(Error::ConflictingOverlap(a, b));
            }
            return Ok(());
        }

        self.overlaps.insert((ia, ib), (index_a, index_b));
        self.overlaps.insert((ib, ia), (index_b, index_a));
        self.neighbors[ia].insert(ib);
        self.neighbors[ib].insert(ia);
        Ok(())
    }

    fn check_index(&self, slot: SlotToken, index: usize) -> PsResult<()> {
        let length = self.slot(slot).ok_or(Error::UnknownSlot(slot))?.length;
        if index >= length {
            return Err(Error::OverlapOutOfBounds {
                slot,
                index,
                length,
            });
        }
        Ok(())
    }

    /// Build a topology from a text grid.
    ///
    /// Each line is one row; `_` is an open cell and `#` is a block.
    /// Every horizontal or vertical run of two or more open cells
    /// becomes a slot, across slots before down slots at each cell in
    /// reading order.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossword_csp::{Direction, Topology};
    ///
    /// let topology = Topology::from_structure("___\n_#_\n___\n").unwrap();
    /// assert_eq!(topology.len(), 4);
    ///
    /// let top = topology.slots().next().unwrap();
    /// assert_eq!(topology[top].direction(), Direction::Across);
    /// assert_eq!(topology.neighbors(top).count(), 2);
    /// ```
    pub fn from_structure(text: &str) -> PsResult<Self> {
        let grid = parse_structure(text)?;
        let height = grid.len();
        let width = grid.first().map_or(0, Vec::len);
        let open = |row: usize, col: usize| row < height && col < width && grid[row][col];

        let mut topology = Topology::new();
        let mut cells: HashMap<(usize, usize), Vec<(SlotToken, usize)>> = HashMap::new();

        for row in 0..height {
            for col in 0..width {
                if !open(row, col) {
                    continue;
                }

                for direction in [Direction::Across, Direction::Down] {
                    let (starts, length) = match direction {
                        Direction::Across => (
                            col == 0 || !open(row, col - 1),
                            (col..width).take_while(|&c| open(row, c)).count(),
                        ),
                        Direction::Down => (
                            row == 0 || !open(row - 1, col),
                            (row..height).take_while(|&r| open(r, col)).count(),
                        ),
                    };

                    if starts && length > 1 {
                        let token = topology.add_slot(row, col, direction, length)?;
                        for (idx, cell) in topology[token].cells().enumerate() {
                            cells.entry(cell).or_default().push((token, idx));
                        }
                    }
                }
            }
        }

        for entries in cells.values() {
            if let [(a, index_a), (b, index_b)] = entries[..] {
                topology.add_overlap(a, b, index_a, index_b)?;
            }
        }

        Ok(topology)
    }

    /// The number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, slot: SlotToken) -> Option<&Slot> {
        let SlotToken(idx) = slot;
        self.slots.get(idx)
    }

    /// Iterate over every slot token in insertion order.
    pub fn slots(&self) -> impl Iterator<Item = SlotToken> {
        (0..self.slots.len()).map(SlotToken)
    }

    /// Get the overlap between `x` and `y`, indexed in that order.
    pub fn overlap(&self, x: SlotToken, y: SlotToken) -> Option<Overlap> {
        let SlotToken(ix) = x;
        let SlotToken(iy) = y;
        self.overlaps.get(&(ix, iy)).copied()
    }

    /// Iterate over the slots crossing `slot`, in ascending order.
    pub fn neighbors(&self, slot: SlotToken) -> impl Iterator<Item = SlotToken> + '_ {
        let SlotToken(idx) = slot;
        self.neighbors[idx].iter().map(SlotToken)
    }

    pub fn neighbor_count(&self, slot: SlotToken) -> usize {
        let SlotToken(idx) = slot;
        self.neighbors[idx].len()
    }

    /// Every ordered pair of crossing slots.
    pub fn arcs(&self) -> Vec<(SlotToken, SlotToken)> {
        self.slots()
            .flat_map(|x| self.neighbors(x).map(move |y| (x, y)))
            .collect()
    }
}

impl ops::Index<SlotToken> for Topology {
    type Output = Slot;

    /// Get a slot.
    ///
    /// # Panics
    ///
    /// Panics if the token belongs to another topology.
    fn index(&self, slot: SlotToken) -> &Slot {
        let SlotToken(idx) = slot;
        &self.slots[idx]
    }
}

/// Split a text grid into rows of open (true) and blocked (false) cells.
///
/// Trailing blank lines are ignored; any other blank line is a row of
/// blocks.
fn parse_structure(text: &str) -> PsResult<Vec<Vec<bool>>> {
    let mut lines: Vec<&str> = text.lines().map(|line| line.trim_end_matches('\r')).collect();
    while lines.last().map_or(false, |line| line.is_empty()) {
        lines.pop();
    }

    let mut rows = lines
        .into_iter()
        .enumerate()
        .map(|(row, line)| {
            line.chars()
                .map(|c| match c {
                    '_' => Ok(true),
                    '#' => Ok(false),
                    _ => Err(Error::Structure(format!(
                        "unrecognized cell {:?} on row {}",
                        c, row
                    ))),
                })
                .collect::<PsResult<Vec<bool>>>()
        })
        .collect::<PsResult<Vec<_>>>()?;

    let width = rows.iter().map(Vec::len).find(|&len| len > 0).unwrap_or(0);
    for (row, line) in rows.iter_mut().enumerate() {
        if line.is_empty() {
            line.resize(width, false);
        } else if line.len() != width {
            return Err(Error::Structure(format!(
                "row {} has {} cells, expected {}",
                row,
                line.len(),
                width
            )));
        }
    }

    Ok(rows)
}
