use chrono::{Datelike, NaiveDate};

use crate::models::{Book, ReadingGoals, Shelves};
use crate::utils::parse_stored_date;

/// Aggregates derived from the Read shelf. Nothing here is persisted; the
/// numbers are recomputed from a shelves snapshot whenever a screen needs
/// them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingStats {
    pub total_books: usize,
    pub total_pages: i64,
    pub average_rating: f64,
    pub books_this_year: usize,
    pub books_this_month: usize,
    pub reading_streak: u32,
}

/// Compute statistics over the Read shelf as of `today`.
pub fn compute(read_books: &[Book], today: NaiveDate) -> ReadingStats {
    let total_books = read_books.len();
    let total_pages: i64 = read_books.iter().map(|b| b.pages.unwrap_or(0)).sum();

    let ratings: Vec<f64> = read_books
        .iter()
        .filter_map(|b| b.rating)
        .filter(|r| *r > 0.0)
        .collect();
    let average_rating = if ratings.is_empty() {
        0.0
    } else {
        let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
        (mean * 10.0).round() / 10.0
    };

    // A record without a completion date counts toward the current year
    // unconditionally (legacy entries predate the timestamp), but never
    // toward the current month. The asymmetry is intentional.
    let books_this_year = read_books
        .iter()
        .filter(|b| match completed_day(b) {
            Some(day) => day.year() == today.year(),
            None => b.completed_date.is_none(),
        })
        .count();

    let books_this_month = read_books
        .iter()
        .filter(|b| match completed_day(b) {
            Some(day) => day.year() == today.year() && day.month() == today.month(),
            None => false,
        })
        .count();

    ReadingStats {
        total_books,
        total_pages,
        average_rating,
        books_this_year,
        books_this_month,
        reading_streak: reading_streak(read_books, today),
    }
}

/// Compute statistics as of the local calendar date.
pub fn compute_today(read_books: &[Book]) -> ReadingStats {
    compute(read_books, chrono::Local::now().date_naive())
}

fn completed_day(book: &Book) -> Option<NaiveDate> {
    book.completed_date
        .as_deref()
        .and_then(parse_stored_date)
}

/// Consecutive days ending today with at least one completed book, scanning
/// at most 30 days back. The scan only breaks on a quiet day when that day is
/// not today itself: a day without a finished book today leaves yesterday's
/// run intact, while any later gap ends it.
fn reading_streak(books: &[Book], today: NaiveDate) -> u32 {
    if books.is_empty() {
        return 0;
    }

    let mut streak = 0;
    for i in 0..30 {
        let check_date = today - chrono::Days::new(i);
        let has_activity = books
            .iter()
            .any(|b| completed_day(b) == Some(check_date));

        if has_activity {
            streak += 1;
        } else if i > 0 {
            break;
        }
    }

    streak
}

/// Percentage of a goal reached, capped at 100. A zero goal reads as 0%.
pub fn goal_progress_percent(done: usize, goal: i64) -> u16 {
    if goal <= 0 {
        return 0;
    }
    (((done as i64 * 100) / goal).min(100)) as u16
}

/// Per-shelf counts shown on the home screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShelfCounts {
    pub read: usize,
    pub reading: usize,
    pub want_to_read: usize,
}

pub fn shelf_counts(shelves: &Shelves) -> ShelfCounts {
    ShelfCounts {
        read: shelves.read.len(),
        reading: shelves.reading.len(),
        want_to_read: shelves.want_to_read.len(),
    }
}

/// Goal progress for both targets, derived from the same year/month buckets
/// as the statistics.
pub fn goal_progress(stats: &ReadingStats, goals: &ReadingGoals) -> (u16, u16) {
    (
        goal_progress_percent(stats.books_this_year, goals.yearly),
        goal_progress_percent(stats.books_this_month, goals.monthly),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn read_book(rating: Option<f64>, pages: Option<i64>, completed: Option<&str>) -> Book {
        let mut book = Book::new("t".to_string(), "a".to_string());
        book.id = 1;
        book.rating = rating;
        book.pages = pages;
        book.completed_date = completed.map(|s| s.to_string());
        book
    }

    #[test]
    fn totals_treat_missing_pages_as_zero() {
        let books = vec![
            read_book(None, Some(200), None),
            read_book(None, None, None),
            read_book(None, Some(300), None),
        ];
        let stats = compute(&books, day(2024, 6, 15));
        assert_eq!(stats.total_books, 3);
        assert_eq!(stats.total_pages, 500);
    }

    #[test]
    fn average_rating_rounds_to_one_decimal() {
        let books = vec![
            read_book(Some(5.0), None, None),
            read_book(Some(3.0), None, None),
            read_book(None, None, None),
        ];
        let stats = compute(&books, day(2024, 6, 15));
        assert_eq!(stats.average_rating, 4.0);
    }

    #[test]
    fn average_rating_is_zero_with_no_rated_books() {
        let books = vec![read_book(None, None, None), read_book(Some(0.0), None, None)];
        let stats = compute(&books, day(2024, 6, 15));
        assert_eq!(stats.average_rating, 0.0);
    }

    #[test]
    fn undated_books_count_for_the_year_but_not_the_month() {
        let books = vec![read_book(Some(4.0), None, None)];
        let stats = compute(&books, day(2024, 6, 15));
        assert_eq!(stats.books_this_year, 1);
        assert_eq!(stats.books_this_month, 0);
    }

    #[test]
    fn year_and_month_buckets_follow_the_completion_date() {
        let books = vec![
            read_book(None, None, Some("2024-06-01T08:00:00+00:00")),
            read_book(None, None, Some("2024-01-01T08:00:00+00:00")),
            read_book(None, None, Some("2023-06-01T08:00:00+00:00")),
        ];
        let stats = compute(&books, day(2024, 6, 15));
        assert_eq!(stats.books_this_year, 2);
        assert_eq!(stats.books_this_month, 1);
    }

    #[test]
    fn unparseable_completion_date_counts_for_neither_bucket() {
        let books = vec![read_book(None, None, Some("not-a-date"))];
        let stats = compute(&books, day(2024, 6, 15));
        assert_eq!(stats.books_this_year, 0);
        assert_eq!(stats.books_this_month, 0);
    }

    #[test]
    fn streak_counts_consecutive_days_back_from_today() {
        let books = vec![
            read_book(None, None, Some("2024-06-15T10:00:00+00:00")),
            read_book(None, None, Some("2024-06-14T10:00:00+00:00")),
            read_book(None, None, Some("2024-06-13T10:00:00+00:00")),
            // gap on the 12th
            read_book(None, None, Some("2024-06-11T10:00:00+00:00")),
        ];
        let stats = compute(&books, day(2024, 6, 15));
        assert_eq!(stats.reading_streak, 3);
    }

    #[test]
    fn quiet_today_does_not_truncate_the_streak() {
        // Nothing finished today, but yesterday and the day before count.
        let books = vec![
            read_book(None, None, Some("2024-06-14T10:00:00+00:00")),
            read_book(None, None, Some("2024-06-13T10:00:00+00:00")),
        ];
        let stats = compute(&books, day(2024, 6, 15));
        assert_eq!(stats.reading_streak, 2);
    }

    #[test]
    fn quiet_today_and_yesterday_means_no_streak() {
        let books = vec![read_book(None, None, Some("2024-06-12T10:00:00+00:00"))];
        let stats = compute(&books, day(2024, 6, 15));
        assert_eq!(stats.reading_streak, 0);
    }

    #[test]
    fn streak_is_zero_for_an_empty_shelf() {
        let stats = compute(&[], day(2024, 6, 15));
        assert_eq!(stats.reading_streak, 0);
    }

    #[test]
    fn streak_scan_stops_at_thirty_days() {
        let mut books = Vec::new();
        for i in 0..40 {
            let date = day(2024, 6, 15) - chrono::Days::new(i);
            books.push(read_book(
                None,
                None,
                Some(&format!("{}T10:00:00+00:00", date)),
            ));
        }
        let stats = compute(&books, day(2024, 6, 15));
        assert_eq!(stats.reading_streak, 30);
    }

    #[test]
    fn goal_progress_caps_at_one_hundred() {
        assert_eq!(goal_progress_percent(6, 12), 50);
        assert_eq!(goal_progress_percent(20, 12), 100);
        assert_eq!(goal_progress_percent(3, 0), 0);
    }
}
