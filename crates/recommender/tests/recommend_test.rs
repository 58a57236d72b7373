//! End-to-end tests: DataIndex -> filters -> matrix -> index -> cards.

use data_loader::{Book, DataIndex, Rating, UserId};
use recommender::{BookRecommender, CardTag, RecommendError, RecommenderConfig};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

fn book(isbn: &str, title: &str, author: Option<&str>) -> Book {
    Book {
        isbn: isbn.to_string(),
        title: title.to_string(),
        author: author.map(str::to_string),
        publisher: Some("Publisher".to_string()),
        year: Some(1990),
    }
}

fn rating(user_id: UserId, isbn: &str, value: f32) -> Rating {
    Rating {
        user_id,
        isbn: isbn.to_string(),
        rating: value,
    }
}

/// "Alpha" (ISBN 111) and 55 other titles, all rated by 60 users, so every
/// user has 56 popular ratings. Ratings follow (7u + 3t) % 10 + 1, which
/// makes title t and title t + 10 co-rated identically: Alpha (t = 0) has
/// exactly five twins, "Book 09", "Book 19", ..., "Book 49".
fn create_test_index() -> DataIndex {
    let mut books = vec![book("111", "Alpha", Some("Ann Author"))];
    for t in 0..55 {
        books.push(book(&format!("2{t:02}"), &format!("Book {t:02}"), None));
    }
    // A second edition of Alpha appearing later in the catalog
    books.push(book("112", "Alpha", Some("Reprint Author")));
    books.push(book("900", "Obscure Title", Some("Nobody")));

    let mut ratings = Vec::new();
    for user in 1..=60u32 {
        for (t, b) in books.iter().take(56).enumerate() {
            let value = ((user as usize * 7 + t * 3) % 10 + 1) as f32;
            ratings.push(rating(user, &b.isbn, value));
        }
    }
    for user in 1..=3 {
        ratings.push(rating(user, "900", 10.0));
    }

    DataIndex::from_records(books, ratings)
}

fn build() -> BookRecommender {
    BookRecommender::from_data(create_test_index(), RecommenderConfig::default())
}

#[test]
fn test_alpha_recommendations() {
    let recommender = build();
    assert!(recommender.contains("Alpha"));

    let rec = recommender.recommend("Alpha").unwrap();

    assert_eq!(rec.selected.title, "Alpha");
    assert_eq!(rec.selected.tag, CardTag::Selection);
    // First catalog row with the title supplies the metadata
    assert_eq!(rec.selected.author.as_deref(), Some("Ann Author"));
    assert_eq!(rec.selected.isbn.as_deref(), Some("111"));

    assert_eq!(rec.recommended.len(), 5);
    assert!(rec.recommended.iter().all(|c| c.title != "Alpha"));
    assert!(rec.recommended.iter().all(|c| c.tag == CardTag::Recommended));

    let titles: HashSet<&str> = rec.recommended.iter().map(|c| c.title.as_str()).collect();
    let twins: HashSet<&str> = ["Book 09", "Book 19", "Book 29", "Book 39", "Book 49"]
        .into_iter()
        .collect();
    assert_eq!(titles, twins);

    for card in &rec.recommended {
        assert!(card.distance.unwrap() < 1e-6);
        assert_eq!(card.author_text(), "Unknown");
    }
}

#[test]
fn test_recommendations_sorted_by_distance() {
    let recommender = build();
    let rec = recommender.recommend("Book 03").unwrap();
    let distances: Vec<f64> = rec.recommended.iter().map(|c| c.distance.unwrap()).collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_unknown_title_is_not_found() {
    let recommender = build();
    let err = recommender.recommend("Nonexistent Book XYZ").unwrap_err();
    match &err {
        RecommendError::TitleNotFound { title } => assert_eq!(title, "Nonexistent Book XYZ"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.to_string(), "Book not found in database!");
}

#[test]
fn test_filtered_title_is_not_selectable() {
    let recommender = build();
    assert!(!recommender.titles().iter().any(|t| t == "Obscure Title"));
    assert!(matches!(
        recommender.recommend("Obscure Title"),
        Err(RecommendError::TitleNotFound { .. })
    ));
}

#[test]
fn test_titles_sorted_and_distinct() {
    let recommender = build();
    let titles = recommender.titles();
    assert_eq!(titles.len(), 56);
    assert!(titles.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(titles[0], "Alpha");
}

#[test]
fn test_repeated_queries_are_identical() {
    let first = build();
    let second = build();
    for title in ["Alpha", "Book 17", "Book 54"] {
        assert_eq!(first.recommend(title).unwrap(), second.recommend(title).unwrap());
        assert_eq!(first.recommend(title).unwrap(), first.recommend(title).unwrap());
    }
}

#[test]
fn test_sequential_matches_parallel() {
    let parallel = build();
    let sequential = BookRecommender::from_data(
        create_test_index(),
        RecommenderConfig::default().with_parallel(false),
    );
    assert_eq!(
        parallel.recommend("Book 21").unwrap(),
        sequential.recommend("Book 21").unwrap()
    );
}

#[test]
fn test_small_catalog_returns_fewer_cards() {
    let books = vec![book("1", "One", None), book("2", "Two", None), book("3", "Three", None)];
    let ratings = vec![
        rating(1, "1", 5.0),
        rating(1, "2", 4.0),
        rating(2, "2", 3.0),
        rating(2, "3", 5.0),
    ];
    let config = RecommenderConfig::default()
        .with_min_title_ratings(0)
        .with_min_user_ratings(0);
    let recommender = BookRecommender::from_data(DataIndex::from_records(books, ratings), config);

    let rec = recommender.recommend("Two").unwrap();
    assert_eq!(rec.recommended.len(), 2);
    assert!(rec.recommended.iter().all(|c| c.title != "Two"));
}

#[test]
fn test_empty_after_filtering() {
    let recommender = BookRecommender::from_data(
        DataIndex::from_records(vec![book("1", "One", None)], vec![rating(1, "1", 5.0)]),
        RecommenderConfig::default(),
    );
    assert!(recommender.titles().is_empty());
    assert!(matches!(
        recommender.recommend("One"),
        Err(RecommendError::TitleNotFound { .. })
    ));
}

#[test]
fn test_recommendation_serializes() {
    let rec = build().recommend("Alpha").unwrap();
    let json = serde_json::to_value(&rec).unwrap();
    assert_eq!(json["selected"]["title"], "Alpha");
    assert_eq!(json["selected"]["tag"], "Selection");
    assert_eq!(json["recommended"].as_array().unwrap().len(), 5);
}

/// Write the scenario of `create_test_index` as the two CSV input files
fn write_csv_dataset(dir: &Path) -> (PathBuf, PathBuf) {
    let index = create_test_index();

    let mut books = String::from("ISBN,Book-Title,Book-Author,Year-Of-Publication,Publisher\n");
    for b in index.books() {
        books.push_str(&format!(
            "{},{},{},{},{}\n",
            b.isbn,
            b.title,
            b.author.as_deref().unwrap_or(""),
            b.year.map(|y| y.to_string()).unwrap_or_default(),
            b.publisher.as_deref().unwrap_or("")
        ));
    }

    let mut ratings = String::from("User-ID,ISBN,Book-Rating\n");
    for r in index.ratings() {
        ratings.push_str(&format!("{},{},{}\n", r.user_id, r.isbn, r.rating));
    }

    let books_path = dir.join("Books.csv");
    let ratings_path = dir.join("Ratings.csv");
    std::fs::write(&books_path, books).expect("Failed to write Books.csv");
    std::fs::write(&ratings_path, ratings).expect("Failed to write Ratings.csv");
    (books_path, ratings_path)
}

#[test]
fn test_from_files_matches_in_memory_and_repeats() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (books, ratings) = write_csv_dataset(temp_dir.path());

    let first = BookRecommender::from_files(&books, &ratings, RecommenderConfig::default()).unwrap();
    let second = BookRecommender::from_files(&books, &ratings, RecommenderConfig::default()).unwrap();
    let in_memory = build();

    assert_eq!(first.titles(), in_memory.titles());
    assert_eq!(first.matrix().sparse(), second.matrix().sparse());
    for title in ["Alpha", "Book 05", "Book 33"] {
        let rec = first.recommend(title).unwrap();
        assert_eq!(rec, second.recommend(title).unwrap());
        assert_eq!(rec, in_memory.recommend(title).unwrap());
    }

    let rec = first.recommend("Alpha").unwrap();
    assert_eq!(rec.selected.author.as_deref(), Some("Ann Author"));
    assert!(matches!(
        first.recommend("Nonexistent Book XYZ"),
        Err(RecommendError::TitleNotFound { .. })
    ));
}

#[test]
fn test_index_shares_matrix_storage() {
    let recommender = build();
    assert!(Arc::ptr_eq(
        recommender.matrix().sparse(),
        recommender.index().shared_matrix()
    ));
}

#[test]
fn test_missing_files_fail_to_load() {
    let result = BookRecommender::from_files(
        std::path::Path::new("no/such/Books.csv"),
        std::path::Path::new("no/such/Ratings.csv"),
        RecommenderConfig::default(),
    );
    assert!(result.is_err());
}
