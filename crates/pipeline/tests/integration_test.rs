//! Integration tests for the pipeline.
//!
//! These tests run the loader output through the two-pass filter and the
//! matrix builder, then check the properties the similarity search relies on.

use data_loader::{Book, DataIndex, EnrichedRating, Rating, UserId};
use pipeline::filters::active_users::user_counts;
use pipeline::filters::popular_titles::title_counts;
use pipeline::{FilterPipeline, RatingMatrix};
use similarity::NearestNeighbors;
use std::collections::HashSet;
use std::sync::Arc;

fn book(isbn: &str, title: &str) -> Book {
    Book {
        isbn: isbn.to_string(),
        title: title.to_string(),
        author: Some("Author".to_string()),
        publisher: Some("Publisher".to_string()),
        year: Some(2001),
    }
}

fn rating(user_id: UserId, isbn: &str, value: f32) -> Rating {
    Rating {
        user_id,
        isbn: isbn.to_string(),
        rating: value,
    }
}

/// 56 popular titles rated by 60 active users, plus noise that must be
/// filtered away: an obscure title, a casual user and an unknown ISBN.
fn create_test_setup() -> DataIndex {
    let mut books = vec![book("111", "Alpha")];
    for t in 0..55 {
        books.push(book(&format!("2{t:02}"), &format!("Book {t:02}")));
    }
    books.push(book("900", "Obscure Title"));

    let mut ratings = Vec::new();
    for user in 1..=60u32 {
        for (t, b) in books.iter().take(56).enumerate() {
            let value = ((user as usize * 7 + t * 3) % 10 + 1) as f32;
            ratings.push(rating(user, &b.isbn, value));
        }
    }
    for user in 1..=5 {
        ratings.push(rating(user, "900", 9.0));
    }
    for b in books.iter().take(10) {
        ratings.push(rating(1000, &b.isbn, 8.0));
    }
    ratings.push(rating(7, "unknown-isbn", 10.0));

    DataIndex::from_records(books, ratings)
}

fn prepare(index: &DataIndex, min_title: usize, min_user: usize) -> Vec<EnrichedRating> {
    FilterPipeline::popularity(min_title, min_user).apply(index.ratings().to_vec())
}

#[test]
fn test_noise_is_filtered() {
    let index = create_test_setup();
    let filtered = prepare(&index, 50, 50);

    assert_eq!(filtered.len(), 56 * 60);
    assert!(filtered
        .iter()
        .all(|r| r.title.as_deref() != Some("Obscure Title")));
    assert!(filtered.iter().all(|r| r.user_id != 1000));
    assert!(filtered.iter().all(|r| r.isbn != "unknown-isbn"));
}

#[test]
fn test_filter_properties_hold_for_all_thresholds() {
    let index = create_test_setup();
    let original_titles = title_counts(index.ratings());

    for (min_title, min_user) in [(0, 0), (5, 10), (50, 50), (60, 55), (61, 0), (0, 56)] {
        let filtered = prepare(&index, min_title, min_user);

        // Title counts come from the unfiltered set
        for r in &filtered {
            let title = r.title.as_deref().unwrap();
            assert!(original_titles[title] > min_title);
        }

        // User counts come from the title-filtered set
        let title_filtered = FilterPipeline::popularity(min_title, 0)
            .apply(index.ratings().to_vec());
        let title_filtered_users = user_counts(&title_filtered);
        for r in &filtered {
            assert!(title_filtered_users[&r.user_id] > min_user);
        }
    }
}

#[test]
fn test_matrix_matches_filtered_ratings() {
    let index = create_test_setup();
    let filtered = prepare(&index, 50, 50);
    let matrix = RatingMatrix::build(&filtered);

    let titles: HashSet<&str> = filtered.iter().filter_map(|r| r.title.as_deref()).collect();
    let users: HashSet<UserId> = filtered.iter().map(|r| r.user_id).collect();
    assert_eq!(matrix.n_rows(), titles.len());
    assert_eq!(matrix.n_cols(), users.len());

    for r in &filtered {
        assert_eq!(matrix.get(r.title.as_deref().unwrap(), r.user_id), Some(r.rating));
    }

    // Every title in the matrix survived filtering
    assert!(matrix.titles().iter().all(|t| titles.contains(t.as_str())));
    assert!(matrix.row_of("Obscure Title").is_none());
}

#[test]
fn test_self_is_nearest_with_k_equal_n() {
    let index = create_test_setup();
    let matrix = RatingMatrix::build(&prepare(&index, 50, 50));
    let knn = NearestNeighbors::fit(Arc::clone(matrix.sparse()));

    let row = matrix.row_of("Alpha").unwrap();
    let neighbors = knn.kneighbors_of_row(row, matrix.n_rows()).unwrap();
    assert_eq!(neighbors.len(), matrix.n_rows());
    assert_eq!(neighbors[0].row, row);
    assert_eq!(neighbors[0].distance, 0.0);
}

#[test]
fn test_pipeline_is_idempotent() {
    let index = create_test_setup();

    let first = RatingMatrix::build(&prepare(&index, 50, 50));
    let second = RatingMatrix::build(&prepare(&index, 50, 50));

    assert_eq!(first.titles(), second.titles());
    assert_eq!(first.users(), second.users());
    for row in 0..first.n_rows() {
        let a: Vec<u32> = first.row(row).unwrap().iter().map(|v| v.to_bits()).collect();
        let b: Vec<u32> = second.row(row).unwrap().iter().map(|v| v.to_bits()).collect();
        assert_eq!(a, b);
    }
    assert_eq!(first.sparse(), second.sparse());

    let knn_a = NearestNeighbors::fit(Arc::clone(first.sparse()));
    let knn_b = NearestNeighbors::fit(Arc::clone(second.sparse()));
    assert_eq!(
        knn_a.kneighbors_of_row(0, 6).unwrap(),
        knn_b.kneighbors_of_row(0, 6).unwrap()
    );
}

#[test]
fn test_high_thresholds_give_empty_matrix() {
    let index = create_test_setup();
    let filtered = prepare(&index, 1000, 50);
    assert!(filtered.is_empty());

    let matrix = RatingMatrix::build(&filtered);
    assert_eq!(matrix.n_rows(), 0);
    assert!(matrix.titles().is_empty());
}
