//! Title x user rating matrix.
//!
//! Rows are titles (sorted), columns are user ids (sorted ascending), and a
//! cell holds that user's rating of that title, or 0 when unrated. Row order
//! is the canonical index: a neighbour's row number is turned back into a
//! title through `title_at`.

use data_loader::{EnrichedRating, UserId};
use similarity::CsrMatrix;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tracing::info;

/// Immutable rating matrix: row and column labels over one shared CSR.
///
/// The cells live only in the CSR, behind an `Arc` so a nearest-neighbour
/// index can be fitted over the same storage.
#[derive(Debug, Clone)]
pub struct RatingMatrix {
    titles: Vec<String>,
    users: Vec<UserId>,
    title_rows: HashMap<String, usize>,
    user_cols: HashMap<UserId, usize>,
    sparse: Arc<CsrMatrix>,
}

impl RatingMatrix {
    /// Pivot ratings into the title x user grid.
    ///
    /// Several ratings for the same (title, user) cell, e.g. one user rating
    /// two editions of a title, are averaged. Ratings without a title are
    /// ignored.
    pub fn build(ratings: &[EnrichedRating]) -> Self {
        // (sum, count) per cell; BTreeMap gives the sorted row order for free
        let mut cells: BTreeMap<&str, BTreeMap<UserId, (f64, u32)>> = BTreeMap::new();
        let mut users: BTreeSet<UserId> = BTreeSet::new();

        for rating in ratings {
            let Some(title) = rating.title.as_deref() else {
                continue;
            };
            let cell = cells
                .entry(title)
                .or_default()
                .entry(rating.user_id)
                .or_insert((0.0, 0));
            cell.0 += f64::from(rating.rating);
            cell.1 += 1;
            users.insert(rating.user_id);
        }

        let users: Vec<UserId> = users.into_iter().collect();
        let user_cols: HashMap<UserId, usize> =
            users.iter().enumerate().map(|(col, &u)| (u, col)).collect();

        let titles: Vec<String> = cells.keys().map(|title| title.to_string()).collect();
        // Users ascend within each row, and so do their column numbers
        let cols = &user_cols;
        let sparse = CsrMatrix::from_sorted_rows(
            users.len(),
            cells.values().map(move |row_cells| {
                row_cells.iter().map(move |(user_id, &(sum, count))| {
                    (cols[user_id], (sum / f64::from(count)) as f32)
                })
            }),
        );

        let title_rows = titles
            .iter()
            .enumerate()
            .map(|(row, title)| (title.clone(), row))
            .collect();

        info!(
            "Built rating matrix: {} titles x {} users ({} rated cells)",
            titles.len(),
            users.len(),
            sparse.nnz()
        );
        Self {
            titles,
            users,
            title_rows,
            user_cols,
            sparse: Arc::new(sparse),
        }
    }

    /// Number of rows (distinct titles)
    pub fn n_rows(&self) -> usize {
        self.titles.len()
    }

    /// Number of columns (distinct users)
    pub fn n_cols(&self) -> usize {
        self.users.len()
    }

    /// Row labels in row order (sorted)
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Column labels in column order (ascending)
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    /// Row index of a title
    pub fn row_of(&self, title: &str) -> Option<usize> {
        self.title_rows.get(title).copied()
    }

    /// Title of a row index
    pub fn title_at(&self, row: usize) -> Option<&str> {
        self.titles.get(row).map(String::as_str)
    }

    /// Dense row; `None` when out of bounds
    pub fn row(&self, row: usize) -> Option<Vec<f32>> {
        self.sparse.row_dense(row)
    }

    /// Cell value; `None` when the title or the user is not in the matrix
    pub fn get(&self, title: &str, user_id: UserId) -> Option<f32> {
        let row = self.sparse.row(self.row_of(title)?)?;
        let col = *self.user_cols.get(&user_id)?;
        Some(row.get(col))
    }

    /// The cells in sparse form, shareable with a `NearestNeighbors` index
    pub fn sparse(&self) -> &Arc<CsrMatrix> {
        &self.sparse
    }
}
