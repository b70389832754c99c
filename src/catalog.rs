use crate::models::Book;

fn catalog_book(
    id: i64,
    title: &str,
    author: &str,
    rating: f64,
    pages: i64,
    published: i64,
    color: &str,
    description: &str,
) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        rating: Some(rating),
        pages: Some(pages),
        published: Some(published),
        color: Some(color.to_string()),
        description: Some(description.to_string()),
        current_page: None,
        completed_date: None,
    }
}

/// Curated picks shown on the home screen. The ids here are catalog-local;
/// adding one of these to a shelf assigns a fresh id.
pub fn recommendations() -> Vec<Book> {
    vec![
        catalog_book(
            1,
            "The Shadow of the Wind",
            "Carlos Ruiz Zafón",
            4.3,
            487,
            2001,
            "#DC2626",
            "A mysterious book discovered in a cemetery leads a young boy into a labyrinth of secrets in post-war Barcelona.",
        ),
        catalog_book(
            2,
            "The Silent Patient",
            "Alex Michaelides",
            4.1,
            336,
            2019,
            "#1E293B",
            "A psychotherapist becomes obsessed with treating a woman who allegedly murdered her husband but refuses to speak.",
        ),
        catalog_book(
            3,
            "Project Hail Mary",
            "Andy Weir",
            4.6,
            496,
            2021,
            "#0284C7",
            "A lone astronaut wakes up on a mission to save Earth, with no memory of how he got there or who he is.",
        ),
        catalog_book(
            4,
            "The Seven Husbands of Evelyn Hugo",
            "Taylor Jenkins Reid",
            4.4,
            400,
            2017,
            "#BE185D",
            "Hollywood icon Evelyn Hugo finally tells her scandalous life story to an unknown journalist.",
        ),
        catalog_book(
            5,
            "Where the Crawdads Sing",
            "Delia Owens",
            4.2,
            368,
            2018,
            "#059669",
            "A young woman who raised herself in the marshes becomes the prime suspect in a murder investigation.",
        ),
        catalog_book(
            6,
            "The Midnight Library",
            "Matt Haig",
            4.2,
            304,
            2020,
            "#7C3AED",
            "Between life and death there is a library, and within that library, the shelves go on forever.",
        ),
        catalog_book(
            7,
            "Atomic Habits",
            "James Clear",
            4.5,
            320,
            2018,
            "#EA580C",
            "Small changes that deliver remarkable results - an easy way to build good habits and break bad ones.",
        ),
        catalog_book(
            8,
            "The Thursday Murder Club",
            "Richard Osman",
            4.0,
            384,
            2020,
            "#0891B2",
            "Four retirees with a few tricks up their sleeves investigate cold cases for fun.",
        ),
        catalog_book(
            9,
            "Klara and the Sun",
            "Kazuo Ishiguro",
            3.8,
            303,
            2021,
            "#65A30D",
            "An artificial friend observes the world from her place in the store, hoping to find a human companion.",
        ),
        catalog_book(
            10,
            "The Vanishing Half",
            "Brit Bennett",
            4.3,
            342,
            2020,
            "#DC2626",
            "Twin sisters grow up to lead different lives - one stays in her hometown while the other passes as white.",
        ),
        catalog_book(
            11,
            "Dune",
            "Frank Herbert",
            4.4,
            688,
            1965,
            "#92400E",
            "A noble family becomes embroiled in a war for control over the galaxy's most valuable asset.",
        ),
        catalog_book(
            12,
            "1984",
            "George Orwell",
            4.3,
            328,
            1949,
            "#475569",
            "A dystopian social science fiction novel and cautionary tale about totalitarianism.",
        ),
    ]
}

/// Everything searchable. Mostly overlaps the recommendations, with Pride
/// and Prejudice swapped in for The Midnight Library.
pub fn all_books() -> Vec<Book> {
    vec![
        catalog_book(
            1,
            "Pride and Prejudice",
            "Jane Austen",
            4.3,
            432,
            1813,
            "#059669",
            "The romantic clash between the opinionated Elizabeth Bennet and her proud beau, Mr. Darcy.",
        ),
        catalog_book(
            2,
            "The Shadow of the Wind",
            "Carlos Ruiz Zafón",
            4.3,
            487,
            2001,
            "#DC2626",
            "A mysterious book discovered in a cemetery leads a young boy into a labyrinth of secrets in post-war Barcelona.",
        ),
        catalog_book(
            3,
            "The Silent Patient",
            "Alex Michaelides",
            4.1,
            336,
            2019,
            "#1E293B",
            "A psychotherapist becomes obsessed with treating a woman who allegedly murdered her husband but refuses to speak.",
        ),
        catalog_book(
            4,
            "Project Hail Mary",
            "Andy Weir",
            4.6,
            496,
            2021,
            "#0284C7",
            "A lone astronaut wakes up on a mission to save Earth, with no memory of how he got there or who he is.",
        ),
        catalog_book(
            5,
            "The Seven Husbands of Evelyn Hugo",
            "Taylor Jenkins Reid",
            4.4,
            400,
            2017,
            "#BE185D",
            "Hollywood icon Evelyn Hugo finally tells her scandalous life story to an unknown journalist.",
        ),
        catalog_book(
            6,
            "Where the Crawdads Sing",
            "Delia Owens",
            4.2,
            368,
            2018,
            "#059669",
            "A young woman who raised herself in the marshes becomes the prime suspect in a murder investigation.",
        ),
        catalog_book(
            7,
            "Atomic Habits",
            "James Clear",
            4.5,
            320,
            2018,
            "#EA580C",
            "Small changes that deliver remarkable results - an easy way to build good habits and break bad ones.",
        ),
        catalog_book(
            8,
            "The Thursday Murder Club",
            "Richard Osman",
            4.0,
            384,
            2020,
            "#0891B2",
            "Four retirees with a few tricks up their sleeves investigate cold cases for fun.",
        ),
        catalog_book(
            9,
            "Klara and the Sun",
            "Kazuo Ishiguro",
            3.8,
            303,
            2021,
            "#65A30D",
            "An artificial friend observes the world from her place in the store, hoping to find a human companion.",
        ),
        catalog_book(
            10,
            "The Vanishing Half",
            "Brit Bennett",
            4.3,
            342,
            2020,
            "#DC2626",
            "Twin sisters grow up to lead different lives - one stays in her hometown while the other passes as white.",
        ),
        catalog_book(
            11,
            "Dune",
            "Frank Herbert",
            4.4,
            688,
            1965,
            "#92400E",
            "A noble family becomes embroiled in a war for control over the galaxy's most valuable asset.",
        ),
        catalog_book(
            12,
            "1984",
            "George Orwell",
            4.3,
            328,
            1949,
            "#475569",
            "A dystopian social science fiction novel and cautionary tale about totalitarianism.",
        ),
    ]
}

/// Case-insensitive substring match on title or author. An empty query
/// returns the whole catalog.
pub fn search(query: &str) -> Vec<Book> {
    let needle = query.to_lowercase();
    all_books()
        .into_iter()
        .filter(|b| {
            b.title.to_lowercase().contains(&needle) || b.author.to_lowercase().contains(&needle)
        })
        .collect()
}
