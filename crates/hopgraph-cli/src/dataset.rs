//! MovieLens-style CSV loading.
//!
//! `movies.csv`: `movieId,title,genres`, titles optionally double-quoted
//! (quoted titles may contain commas, `""` escapes a quote), genres
//! separated by `|`.
//!
//! `ratings.csv`: `userId,movieId,rating[,timestamp]`.
//!
//! A header row is recognized by its first field and skipped. Blank lines are
//! ignored. Any other line that does not parse is an error naming the file
//! and the 1-based line number.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Genre placeholder used by MovieLens for untagged movies.
const NO_GENRES: &str = "(no genres listed)";

/// One movie and every rating it received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub id: u32,
    pub title: String,
    pub genres: Vec<String>,
    /// Rating by user id.
    #[serde(skip)]
    pub ratings: BTreeMap<u32, f64>,
}

impl Movie {
    /// Mean rating, or `None` when the movie has no ratings.
    #[allow(clippy::cast_precision_loss)]
    pub fn average_rating(&self) -> Option<f64> {
        if self.ratings.is_empty() {
            return None;
        }
        let sum: f64 = self.ratings.values().sum();
        Some(sum / self.ratings.len() as f64)
    }

    /// Number of users who rated both `self` and `other`, counting no
    /// further than `limit`.
    pub fn shared_reviewers(&self, other: &Self, limit: usize) -> usize {
        let (small, large) = if self.ratings.len() <= other.ratings.len() {
            (&self.ratings, &other.ratings)
        } else {
            (&other.ratings, &self.ratings)
        };
        small
            .keys()
            .filter(|user| large.contains_key(user))
            .take(limit)
            .count()
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.id, self.title)?;
        if !self.genres.is_empty() {
            write!(f, " ({})", self.genres.join(", "))?;
        }
        Ok(())
    }
}

/// Every movie keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub movies: BTreeMap<u32, Movie>,
    /// Rating rows that referenced a movie missing from the movies file.
    pub skipped_ratings: usize,
}

impl Dataset {
    /// Load both files from disk.
    #[instrument(
        skip_all,
        fields(ratings = %ratings_path.display(), movies = %movies_path.display())
    )]
    pub fn load(ratings_path: &Path, movies_path: &Path) -> Result<Self> {
        let mut dataset = Self::default();
        dataset.read_movies(open(movies_path)?, &movies_path.display().to_string())?;
        dataset.read_ratings(open(ratings_path)?, &ratings_path.display().to_string())?;

        info!(
            movies = dataset.movies.len(),
            ratings = dataset.rating_count(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    pub fn get(&self, id: u32) -> Option<&Movie> {
        self.movies.get(&id)
    }

    /// Title of `id`, or a placeholder naming the id.
    pub fn title(&self, id: u32) -> String {
        self.get(id)
            .map_or_else(|| format!("<movie {id}>"), |movie| movie.title.clone())
    }

    pub fn rating_count(&self) -> usize {
        self.movies.values().map(|m| m.ratings.len()).sum()
    }

    /// Parse movie rows from `reader`; `source` names the input in errors.
    pub fn read_movies(&mut self, reader: impl BufRead, source: &str) -> Result<()> {
        for (line_no, line) in numbered_lines(reader, source) {
            let line = line?;
            let fields = split_record(&line)
                .with_context(|| format!("{source}:{line_no}: malformed movie row"))?;
            if line_no == 1 && is_header(&fields, "movieId") {
                continue;
            }
            let [id, title, genres] = fields.as_slice() else {
                bail!(
                    "{source}:{line_no}: expected 3 fields (movieId,title,genres), found {}",
                    fields.len()
                );
            };

            let id: u32 = parse_field(id, "movieId", source, line_no)?;
            if self.movies.contains_key(&id) {
                bail!("{source}:{line_no}: duplicate movieId {id}");
            }
            let genres = if genres.is_empty() || genres == NO_GENRES {
                Vec::new()
            } else {
                genres.split('|').map(str::to_string).collect()
            };
            self.movies.insert(
                id,
                Movie {
                    id,
                    title: title.clone(),
                    genres,
                    ratings: BTreeMap::new(),
                },
            );
        }
        debug!(source, movies = self.movies.len(), "movies parsed");
        Ok(())
    }

    /// Parse rating rows from `reader` and attach them to known movies.
    ///
    /// Ratings of unknown movies are skipped and counted in
    /// [`Dataset::skipped_ratings`].
    pub fn read_ratings(&mut self, reader: impl BufRead, source: &str) -> Result<()> {
        let mut skipped = 0_usize;
        for (line_no, line) in numbered_lines(reader, source) {
            let line = line?;
            let fields = split_record(&line)
                .with_context(|| format!("{source}:{line_no}: malformed rating row"))?;
            if line_no == 1 && is_header(&fields, "userId") {
                continue;
            }
            if !(3..=4).contains(&fields.len()) {
                bail!(
                    "{source}:{line_no}: expected 3 or 4 fields \
                     (userId,movieId,rating[,timestamp]), found {}",
                    fields.len()
                );
            }

            let user: u32 = parse_field(&fields[0], "userId", source, line_no)?;
            let movie_id: u32 = parse_field(&fields[1], "movieId", source, line_no)?;
            let rating: f64 = parse_field(&fields[2], "rating", source, line_no)?;
            if !rating.is_finite() {
                bail!("{source}:{line_no}: rating must be a finite number");
            }
            if rating < 0.0 {
                bail!("{source}:{line_no}: rating must not be negative, got {rating}");
            }

            match self.movies.get_mut(&movie_id) {
                Some(movie) => {
                    movie.ratings.insert(user, rating);
                }
                None => {
                    debug!(source, line_no, movie_id, "rating for unknown movie");
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            warn!(source, skipped, "skipped ratings for movies missing from the movies file");
        }
        self.skipped_ratings += skipped;
        Ok(())
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Non-blank lines with their 1-based line numbers. I/O errors carry the
/// source name.
fn numbered_lines<'a>(
    reader: impl BufRead + 'a,
    source: &'a str,
) -> impl Iterator<Item = (usize, Result<String>)> + 'a {
    reader
        .lines()
        .enumerate()
        .map(move |(i, line)| {
            let line_no = i + 1;
            let line = line
                .map(|l| l.trim_end_matches('\r').to_string())
                .with_context(|| format!("{source}:{line_no}: read failed"));
            (line_no, line)
        })
        .filter(|(_, line)| !matches!(line, Ok(l) if l.trim().is_empty()))
}

fn is_header(fields: &[String], first: &str) -> bool {
    fields
        .first()
        .is_some_and(|f| f.trim().eq_ignore_ascii_case(first))
}

fn parse_field<T: std::str::FromStr>(
    raw: &str,
    name: &str,
    source: &str,
    line_no: usize,
) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("{source}:{line_no}: invalid {name} {raw:?}"))
}

/// Split one CSV record. Quoted fields may contain commas and `""` escapes.
fn split_record(line: &str) -> Result<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            ('"', true) => in_quotes = false,
            ('"', false) if field.is_empty() => in_quotes = true,
            (',', false) => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }

    if in_quotes {
        bail!("unterminated quoted field");
    }
    fields.push(field);
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVIES: &str = "movieId,title,genres\n\
        1,Toy Story (1995),Adventure|Animation|Children\n\
        2,\"American President, The (1995)\",Comedy|Drama|Romance\n\
        3,Heat (1995),(no genres listed)\n";

    const RATINGS: &str = "userId,movieId,rating,timestamp\n\
        1,1,4.0,964982703\n\
        1,2,3.5,964981247\n\
        2,1,5.0,964982224\n\
        \n\
        3,99,2.0,964983815\n";

    fn load(movies: &str, ratings: &str) -> Result<Dataset> {
        let mut dataset = Dataset::default();
        dataset.read_movies(movies.as_bytes(), "movies.csv")?;
        dataset.read_ratings(ratings.as_bytes(), "ratings.csv")?;
        Ok(dataset)
    }

    #[test]
    fn parses_quoted_titles_and_genres() {
        let dataset = load(MOVIES, "").expect("valid movies");

        assert_eq!(dataset.movies.len(), 3);
        let president = dataset.get(2).expect("movie 2");
        assert_eq!(president.title, "American President, The (1995)");
        assert_eq!(president.genres, vec!["Comedy", "Drama", "Romance"]);
        assert!(dataset.get(3).expect("movie 3").genres.is_empty());
    }

    #[test]
    fn attaches_ratings_and_skips_unknown_movies() {
        let dataset = load(MOVIES, RATINGS).expect("valid input");

        let toy_story = dataset.get(1).expect("movie 1");
        assert_eq!(toy_story.ratings.len(), 2);
        assert_eq!(toy_story.average_rating(), Some(4.5));
        assert_eq!(dataset.get(3).expect("movie 3").average_rating(), None);
        assert_eq!(dataset.skipped_ratings, 1);
        assert_eq!(dataset.rating_count(), 3);
    }

    #[test]
    fn malformed_line_names_file_and_line() {
        let err = load("movieId,title,genres\n1,Only two\n", "").expect_err("too few fields");
        assert!(err.to_string().starts_with("movies.csv:2:"), "{err}");

        let err = load(MOVIES, "userId,movieId,rating\n1,abc,4.0\n").expect_err("bad id");
        assert!(err.to_string().contains("ratings.csv:2: invalid movieId"), "{err}");
    }

    #[test]
    fn negative_rating_is_an_error() {
        let err = load(MOVIES, "userId,movieId,rating\n1,1,4.0\n2,1,-0.5\n")
            .expect_err("negative rating");
        assert!(
            err.to_string().starts_with("ratings.csv:3: rating must not be negative"),
            "{err}"
        );

        let err = load(MOVIES, "1,1,NaN\n").expect_err("NaN rating");
        assert!(err.to_string().contains("finite"), "{err}");
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        let err = load("1,\"Broken,Drama\n", "").expect_err("unterminated quote");
        assert!(format!("{err:#}").contains("unterminated quoted field"));
    }

    #[test]
    fn duplicate_movie_id_is_an_error() {
        let err = load("1,A,Drama\n1,B,Drama\n", "").expect_err("duplicate id");
        assert!(err.to_string().contains("duplicate movieId 1"));
    }

    #[test]
    fn headerless_files_are_accepted() {
        let dataset = load("7,Ronin (1998),Action\n", "4,7,3.0\n").expect("valid input");
        assert_eq!(dataset.get(7).expect("movie 7").ratings.get(&4), Some(&3.0));
    }

    #[test]
    fn split_record_handles_escaped_quotes() {
        let fields = split_record(r#"5,"Say ""Hello"", World",Comedy"#).expect("valid record");
        assert_eq!(fields, vec!["5", "Say \"Hello\", World", "Comedy"]);
    }

    #[test]
    fn shared_reviewers_stops_at_limit() {
        let dataset = load(MOVIES, RATINGS).expect("valid input");
        let a = dataset.get(1).expect("movie 1");
        let b = dataset.get(2).expect("movie 2");
        assert_eq!(a.shared_reviewers(b, 12), 1);
        assert_eq!(a.shared_reviewers(a, 1), 1);
    }

    #[test]
    fn display_includes_genres() {
        let dataset = load(MOVIES, "").expect("valid movies");
        assert_eq!(
            dataset.get(1).expect("movie 1").to_string(),
            "[1] Toy Story (1995) (Adventure, Animation, Children)"
        );
    }
}
