use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::seq::IndexedRandom;
use recommender::html;
use recommender::{BookCard, BookRecommender, RecommendError, Recommendation, RecommenderConfig};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// FRIDAY - Book Recommender
#[derive(Parser)]
#[command(name = "friday")]
#[command(about = "Book recommendations from co-rating patterns (cosine k-NN)", long_about = None)]
struct Cli {
    /// Path to the book catalog CSV
    #[arg(long, default_value = "Books.csv")]
    books: PathBuf,

    /// Path to the ratings CSV
    #[arg(long, default_value = "Ratings.csv")]
    ratings: PathBuf,

    /// Titles need more than this many ratings to be recommendable
    #[arg(long, default_value = "50")]
    min_title_ratings: usize,

    /// Users need more than this many ratings (among popular titles) to count
    #[arg(long, default_value = "50")]
    min_user_ratings: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the selectable titles
    Titles {
        /// Only show titles containing this text (case-insensitive)
        #[arg(long)]
        contains: Option<String>,
    },

    /// Recommend books similar to a title
    Recommend {
        /// Exact title of the selected book
        #[arg(long)]
        title: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Also write the result as an HTML page with cover images
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Pick books interactively and get recommendations
    Interactive,

    /// Run benchmark to test query latency
    Benchmark {
        /// Number of queries to run
        #[arg(long, default_value = "100")]
        requests: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = RecommenderConfig::default()
        .with_min_title_ratings(cli.min_title_ratings)
        .with_min_user_ratings(cli.min_user_ratings);

    // Build the recommender once; every command below only reads it
    println!(
        "Loading {} and {}...",
        cli.books.display(),
        cli.ratings.display()
    );
    let start = Instant::now();
    let recommender = BookRecommender::from_files(&cli.books, &cli.ratings, config)
        .context("Failed to build the recommender")?;
    println!(
        "{} Ready in {:?} ({} selectable titles)",
        "✓".green(),
        start.elapsed(),
        recommender.titles().len()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Titles { contains } => handle_titles(&recommender, contains.as_deref()),
        Commands::Recommend { title, json, html } => {
            handle_recommend(&recommender, &title, json, html)?
        }
        Commands::Interactive => handle_interactive(&recommender)?,
        Commands::Benchmark { requests } => handle_benchmark(&recommender, requests)?,
    }

    Ok(())
}

/// Handle the 'titles' command
fn handle_titles(recommender: &BookRecommender, contains: Option<&str>) {
    print_titles(recommender.titles(), contains);
}

/// Handle the 'recommend' command
///
/// An unknown title is a normal outcome: the message is shown and the
/// command still succeeds.
fn handle_recommend(
    recommender: &BookRecommender,
    title: &str,
    json: bool,
    html_path: Option<PathBuf>,
) -> Result<()> {
    let recommendation = match recommender.recommend(title) {
        Ok(recommendation) => recommendation,
        Err(err @ RecommendError::TitleNotFound { .. }) => {
            println!("{}", err.to_string().red());
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
    } else {
        print_recommendation(&recommendation);
    }

    if let Some(path) = html_path {
        std::fs::write(&path, html::render_page(&recommendation))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{} Wrote {}", "✓".green(), path.display());
    }
    Ok(())
}

/// Handle the 'interactive' command
fn handle_interactive(recommender: &BookRecommender) -> Result<()> {
    let titles = recommender.titles();

    println!("{}", "📚 FRIDAY: Book Recommender".bold().magenta());
    println!("Select a book and get personalized recommendations");
    println!(
        "{} titles available. Enter a list number or an exact title.",
        titles.len()
    );
    println!("Commands: /list, /search <text>, /quit (or an empty line)\n");

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("{} ", "Choose a book:".bold());
        io::stdout().flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let choice = input.trim();

        match choice {
            "" | "/quit" | "/q" => break,
            "/list" => print_titles(titles, None),
            _ if choice.starts_with("/search") => {
                let query = choice.trim_start_matches("/search").trim();
                print_titles(titles, Some(query));
            }
            _ => {
                let title = resolve_choice(titles, choice);
                println!("Finding recommendations...");
                match recommender.recommend(title) {
                    Ok(recommendation) => print_recommendation(&recommendation),
                    Err(err @ RecommendError::TitleNotFound { .. }) => {
                        println!("{}", err.to_string().red())
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        }
        println!();
    }
    Ok(())
}

/// Handle the 'benchmark' command
fn handle_benchmark(recommender: &BookRecommender, requests: usize) -> Result<()> {
    let titles = recommender.titles();
    if titles.is_empty() {
        bail!("No titles survived filtering; nothing to benchmark");
    }
    if requests == 0 {
        bail!("--requests must be at least 1");
    }

    // Pick random titles up front so sampling is not timed
    let mut rng = rand::rng();
    let picks: Vec<&String> = (0..requests)
        .filter_map(|_| titles.choose(&mut rng))
        .collect();

    let mut timings: Vec<Duration> = Vec::with_capacity(picks.len());
    for title in picks {
        let start = Instant::now();
        recommender.recommend(title)?;
        timings.push(start.elapsed());
    }

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = timings.len() as f32 / total_time.as_secs_f32();

    println!("Benchmark results:");
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} queries/second", throughput);

    Ok(())
}

/// An exact title wins; otherwise a list number (1-based) selects from the
/// sorted titles, and anything else is taken as a title verbatim
fn resolve_choice<'a>(titles: &'a [String], choice: &'a str) -> &'a str {
    if let Ok(pos) = titles.binary_search_by(|title| title.as_str().cmp(choice)) {
        return titles[pos].as_str();
    }
    match choice.parse::<usize>() {
        Ok(n) if (1..=titles.len()).contains(&n) => titles[n - 1].as_str(),
        _ => choice,
    }
}

/// Print titles with their list numbers, optionally filtered by substring
fn print_titles(titles: &[String], contains: Option<&str>) {
    let needle = contains.map(str::to_lowercase);
    let mut shown = 0;
    for (i, title) in titles.iter().enumerate() {
        if let Some(needle) = &needle {
            if !title.to_lowercase().contains(needle.as_str()) {
                continue;
            }
        }
        println!("{:>5}. {}", (i + 1).to_string().green(), title);
        shown += 1;
    }
    if shown == 0 {
        println!("{}", "No matching titles".yellow());
    }
}

/// Helper function to format and print a recommendation
fn print_recommendation(recommendation: &Recommendation) {
    println!("\n{}", "Selected Book".bold().blue());
    print_card(&recommendation.selected);

    println!("\n{}", "Recommendations".bold().blue());
    for (rank, card) in recommendation.recommended.iter().enumerate() {
        print!("{}. ", (rank + 1).to_string().green());
        print_card(card);
    }
}

fn print_card(card: &BookCard) {
    println!("{}", card.title.bold().yellow());
    println!("   {} {}", "Author:".bold(), card.author_text());
    println!("   {} {}", "Publisher:".bold(), card.publisher_text());
    println!("   {} {}", "Year:".bold(), card.year_text());
    println!("   {} {}", "Cover:".bold(), card.cover_url());
    match card.distance {
        Some(distance) => println!("   {} (distance {:.4})", card.tag.to_string().cyan(), distance),
        None => println!("   {}", card.tag.to_string().cyan()),
    }
}
