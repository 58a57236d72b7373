use data_loader::DataIndex;
use std::path::Path;
use std::time::Instant;

fn main() {
    let books = Path::new("data/Books.csv");
    let ratings = Path::new("data/Ratings.csv");

    println!("Loading book-crossing dataset...\n");

    let start = Instant::now();
    let index = DataIndex::load_from_files(books, ratings)
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let (books, ratings, unmatched) = index.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Books: {}", books);
    println!("Ratings: {}", ratings);
    println!("Ratings without a titled book: {}", unmatched);
    println!("\nPerformance: {:.0} ratings/second",
             ratings as f64 / elapsed.as_secs_f64());
}
