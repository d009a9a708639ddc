//! Toroidal dancing-links structure over a sparse item × option incidence matrix
//!
//! All nodes live in one arena and refer to each other by [`NodeIndex`].
//! Index 0 is the root: the self-looping head of the horizontal ring of
//! column headers. Indices `1..=n` are the column headers of the `n` items,
//! in universe order, and every later index is a node of some option row.

use crate::io::error::{CoverError, Result, invalid_parameter};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

/// Requirements on the values that identify items
///
/// Blanket-implemented for every type with the listed capabilities, such as
/// `char`, integers and `String`.
pub trait Item: Clone + Eq + Hash + fmt::Display + fmt::Debug + Send + 'static {}

impl<T> Item for T where T: Clone + Eq + Hash + fmt::Display + fmt::Debug + Send + 'static {}

/// Options keyed by their unique name, each listing the items it covers
///
/// Iteration follows name order, which fixes the row order of every matrix
/// built from the map and therefore the emission order of a search.
pub type OptionMap<I> = BTreeMap<String, Vec<I>>;

/// The position of a node in the arena of an [`ExactCoverMatrix`]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Returns the index value as a primitive type
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// The head of the horizontal ring of column headers
pub const ROOT: NodeIndex = NodeIndex(0);

/// One cell of the toroidal structure
///
/// `column` and `row` are fixed at construction; only the four links move.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Node {
    left: NodeIndex,
    right: NodeIndex,
    up: NodeIndex,
    down: NodeIndex,
    /// The column header this node belongs to. Headers and the root point
    /// to themselves.
    column: NodeIndex,
    /// Position of the owning option in `ExactCoverMatrix::names`, or
    /// [`None`] for the root and the column headers.
    row: Option<usize>,
}

impl Node {
    /// Creates a node whose four links all point to itself
    const fn detached(ix: NodeIndex, column: NodeIndex, row: Option<usize>) -> Self {
        Self {
            left: ix,
            right: ix,
            up: ix,
            down: ix,
            column,
            row,
        }
    }
}

/// Sparse incidence matrix supporting reversible cover and uncover
///
/// Cloning the matrix copies the whole arena; two matrices compare equal
/// only if every link and every row count matches, which makes the type
/// convenient for checking that an undo sequence restored the structure.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExactCoverMatrix<I> {
    nodes: Vec<Node>,
    /// Live row count per column, indexed by the header's node index.
    /// Slot 0 belongs to the root and stays zero.
    row_counts: Vec<usize>,
    /// `items[k]` labels the column header with node index `k + 1`.
    items: Vec<I>,
    /// Option names, indexed by row.
    names: Vec<String>,
    /// First node of each option's row.
    rows: HashMap<String, NodeIndex>,
}

impl<I: Item> ExactCoverMatrix<I> {
    /// Builds the matrix for the given item universe and options
    ///
    /// Creates one column per item, in the order given, and then for every
    /// option (in map order) one row whose nodes are appended to the bottom
    /// of each covered column and linked left to right in item order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An item appears twice in the universe
    /// - An option covers no items
    /// - An option lists an item twice or an item outside the universe
    pub fn new(items: &[I], options: &OptionMap<I>) -> Result<Self> {
        let node_count = 1 + items.len() + options.values().map(Vec::len).sum::<usize>();
        let mut matrix = Self {
            nodes: Vec::with_capacity(node_count),
            row_counts: vec![0; items.len() + 1],
            items: Vec::with_capacity(items.len()),
            names: Vec::with_capacity(options.len()),
            rows: HashMap::with_capacity(options.len()),
        };
        matrix.nodes.push(Node::detached(ROOT, ROOT, None));

        let mut columns = HashMap::with_capacity(items.len());
        for item in items {
            let header = NodeIndex(matrix.nodes.len());
            if columns.insert(item.clone(), header).is_some() {
                return Err(invalid_parameter(
                    "items",
                    item,
                    &"item appears more than once in the universe",
                ));
            }
            matrix.nodes.push(Node::detached(header, header, None));
            matrix.items.push(item.clone());
            matrix.link_before(ROOT, header);
        }

        for (name, option_items) in options {
            matrix.add_row(name, option_items, &columns)?;
        }
        Ok(matrix)
    }

    /// Builds the matrix over the distinct items of `options`, taken in the
    /// order in which they first appear
    ///
    /// # Errors
    ///
    /// Returns an error if an option covers no items or lists an item twice
    pub fn from_options(options: &OptionMap<I>) -> Result<Self> {
        let mut seen = HashSet::new();
        let items: Vec<I> = options
            .values()
            .flatten()
            .filter(|item| seen.insert(*item))
            .cloned()
            .collect();
        Self::new(&items, options)
    }

    fn add_row(
        &mut self,
        name: &str,
        option_items: &[I],
        columns: &HashMap<I, NodeIndex>,
    ) -> Result<()> {
        if option_items.is_empty() {
            return Err(CoverError::EmptyOption {
                option: name.to_string(),
            });
        }
        let row = self.names.len();
        let first = NodeIndex(self.nodes.len());
        let mut seen = HashSet::with_capacity(option_items.len());
        for item in option_items {
            let Some(&column) = columns.get(item) else {
                return Err(CoverError::UnknownItem {
                    option: name.to_string(),
                    item: item.to_string(),
                });
            };
            if !seen.insert(column) {
                return Err(CoverError::DuplicateItem {
                    option: name.to_string(),
                    item: item.to_string(),
                });
            }
            let ix = NodeIndex(self.nodes.len());
            self.nodes.push(Node::detached(ix, column, Some(row)));
            self.link_above(column, ix);
            if ix != first {
                self.link_before(first, ix);
            }
        }
        self.names.push(name.to_string());
        self.rows.insert(name.to_string(), first);
        Ok(())
    }

    /// Inserts a detached node at the bottom of a column's vertical ring
    fn link_above(&mut self, column: NodeIndex, ix: NodeIndex) {
        let last = self.node(column).up;
        self.node_mut(ix).up = last;
        self.node_mut(ix).down = column;
        self.node_mut(last).down = ix;
        self.node_mut(column).up = ix;
        self.add_to_count(column, 1);
    }

    /// Inserts a detached node just left of `anchor` in its horizontal ring
    fn link_before(&mut self, anchor: NodeIndex, ix: NodeIndex) {
        let last = self.node(anchor).left;
        self.node_mut(ix).left = last;
        self.node_mut(ix).right = anchor;
        self.node_mut(last).right = ix;
        self.node_mut(anchor).left = ix;
    }
}

impl<I> ExactCoverMatrix<I> {
    /// Removes a column from the header ring and hides every row that
    /// intersects it
    ///
    /// Rows are visited top to bottom and, within a row, the other nodes
    /// left to right; each of them leaves its own column's vertical ring.
    /// The nodes of `column` itself stay linked so that [`Self::uncover`]
    /// can find them again.
    pub fn cover(&mut self, column: NodeIndex) {
        let Node { left, right, .. } = *self.node(column);
        self.node_mut(left).right = right;
        self.node_mut(right).left = left;

        let mut row = self.node(column).down;
        while row != column {
            let mut peer = self.node(row).right;
            while peer != row {
                self.unlink_vertically(peer);
                peer = self.node(peer).right;
            }
            row = self.node(row).down;
        }
    }

    /// Undoes the last [`Self::cover`] of `column`
    ///
    /// Mirrors the covering traversal exactly: rows bottom to top, nodes
    /// right to left, and the header goes back into its ring last.
    pub fn uncover(&mut self, column: NodeIndex) {
        let mut row = self.node(column).up;
        while row != column {
            let mut peer = self.node(row).left;
            while peer != row {
                self.relink_vertically(peer);
                peer = self.node(peer).left;
            }
            row = self.node(row).up;
        }

        let Node { left, right, .. } = *self.node(column);
        self.node_mut(left).right = column;
        self.node_mut(right).left = column;
    }

    /// Chooses the column to branch on
    ///
    /// Returns the first column met with no rows at all, since such a
    /// column proves the current branch dead. Otherwise returns the column
    /// with the fewest rows, earliest in ring order on ties. Returns
    /// [`None`] once every column has been covered.
    pub fn select_column(&self) -> Option<NodeIndex> {
        let mut best: Option<(NodeIndex, usize)> = None;
        let mut column = self.node(ROOT).right;
        while column != ROOT {
            let count = self.row_count(column);
            if count == 0 {
                return Some(column);
            }
            if best.is_none_or(|(_, min)| count < min) {
                best = Some((column, count));
            }
            column = self.node(column).right;
        }
        best.map(|(column, _)| column)
    }

    /// Number of rows currently linked into a column
    pub fn row_count(&self, column: NodeIndex) -> usize {
        self.row_counts.get(column.0).copied().unwrap_or_default()
    }

    /// The item labelling a column header
    pub fn column_item(&self, column: NodeIndex) -> Option<&I> {
        column
            .0
            .checked_sub(1)
            .and_then(|position| self.items.get(position))
    }

    /// The column header of any node
    pub fn column_of(&self, ix: NodeIndex) -> NodeIndex {
        self.node(ix).column
    }

    /// The name of the option that owns a row node
    ///
    /// Returns [`None`] for the root and for column headers.
    pub fn row_option(&self, ix: NodeIndex) -> Option<&str> {
        self.node(ix)
            .row
            .and_then(|row| self.names.get(row))
            .map(String::as_str)
    }

    /// First node of the row built for the named option
    pub fn find_row(&self, name: &str) -> Option<NodeIndex> {
        self.rows.get(name).copied()
    }

    /// Whether a row can still be selected
    ///
    /// A row is live while its first column is in the header ring and its
    /// first node is still in that column's vertical ring. A row hidden by
    /// a cover fails the second test; a row whose column was covered, for
    /// instance because the row itself was already selected, fails the
    /// first.
    pub fn is_row_live(&self, row: NodeIndex) -> bool {
        let column = self.column_of(row);
        self.active_columns().contains(&column) && self.rows_of(column).contains(&row)
    }

    /// The next node to the right in a horizontal ring
    pub fn right(&self, ix: NodeIndex) -> NodeIndex {
        self.node(ix).right
    }

    /// The next node to the left in a horizontal ring
    pub fn left(&self, ix: NodeIndex) -> NodeIndex {
        self.node(ix).left
    }

    /// The next node below in a vertical ring
    pub fn down(&self, ix: NodeIndex) -> NodeIndex {
        self.node(ix).down
    }

    /// Column headers currently in the header ring, in ring order
    pub fn active_columns(&self) -> Vec<NodeIndex> {
        let mut columns = Vec::new();
        let mut column = self.node(ROOT).right;
        while column != ROOT {
            columns.push(column);
            column = self.node(column).right;
        }
        columns
    }

    /// Nodes currently linked under a column, top to bottom
    pub fn rows_of(&self, column: NodeIndex) -> Vec<NodeIndex> {
        let mut rows = Vec::with_capacity(self.row_count(column));
        let mut row = self.node(column).down;
        while row != column {
            rows.push(row);
            row = self.node(row).down;
        }
        rows
    }

    fn unlink_vertically(&mut self, ix: NodeIndex) {
        let Node {
            up, down, column, ..
        } = *self.node(ix);
        self.node_mut(up).down = down;
        self.node_mut(down).up = up;
        self.sub_from_count(column, 1);
    }

    fn relink_vertically(&mut self, ix: NodeIndex) {
        let Node {
            up, down, column, ..
        } = *self.node(ix);
        self.node_mut(up).down = ix;
        self.node_mut(down).up = ix;
        self.add_to_count(column, 1);
    }

    fn add_to_count(&mut self, column: NodeIndex, amount: usize) {
        if let Some(count) = self.row_counts.get_mut(column.0) {
            *count += amount;
        }
    }

    fn sub_from_count(&mut self, column: NodeIndex, amount: usize) {
        if let Some(count) = self.row_counts.get_mut(column.0) {
            *count = count.saturating_sub(amount);
        }
    }

    // Every `NodeIndex` is minted by this structure while pushing into
    // `nodes`, and nodes are never removed, so lookups cannot go out of bounds.
    #[allow(clippy::indexing_slicing)]
    fn node(&self, ix: NodeIndex) -> &Node {
        &self.nodes[ix.0]
    }

    #[allow(clippy::indexing_slicing)]
    fn node_mut(&mut self, ix: NodeIndex) -> &mut Node {
        &mut self.nodes[ix.0]
    }
}
