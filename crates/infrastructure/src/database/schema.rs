// Database schema for the film rating store
diesel::table! {
    users (id) {
        id -> BigInt,
        email -> Text,
        login -> Text,
        name -> Text,
        birthday -> Nullable<Date>,
    }
}

diesel::table! {
    ratings (id) {
        id -> Integer,
        name -> Text,              // MPA rating label, e.g. PG-13
    }
}

diesel::table! {
    genres (id) {
        id -> Integer,
        name -> Text,
    }
}

diesel::table! {
    films (id) {
        id -> BigInt,
        name -> Text,
        description -> Nullable<Text>,
        release_date -> Date,
        duration -> Integer,       // Minutes
        rating_id -> Nullable<Integer>,
    }
}

diesel::table! {
    film_genres (film_id, genre_id) {
        film_id -> BigInt,
        genre_id -> Integer,
    }
}

diesel::table! {
    friendships (user_low, user_high) {
        user_low -> BigInt,        // Smaller user id of the pair
        user_high -> BigInt,       // Larger user id of the pair
    }
}

diesel::table! {
    likes (film_id, user_id) {
        film_id -> BigInt,
        user_id -> BigInt,
    }
}

diesel::joinable!(films -> ratings (rating_id));
diesel::joinable!(film_genres -> films (film_id));
diesel::joinable!(film_genres -> genres (genre_id));
diesel::joinable!(likes -> films (film_id));
diesel::joinable!(likes -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    ratings,
    genres,
    films,
    film_genres,
    friendships,
    likes,
);

pub(crate) const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL,
    login TEXT NOT NULL,
    name TEXT NOT NULL,
    birthday DATE
);

CREATE TABLE IF NOT EXISTS ratings (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS genres (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS films (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT CHECK (description IS NULL OR length(description) <= 200),
    release_date DATE NOT NULL,
    duration INTEGER NOT NULL CHECK (duration > 0),
    rating_id INTEGER REFERENCES ratings (id)
);

CREATE TABLE IF NOT EXISTS film_genres (
    film_id INTEGER NOT NULL REFERENCES films (id),
    genre_id INTEGER NOT NULL REFERENCES genres (id),
    PRIMARY KEY (film_id, genre_id)
);

CREATE TABLE IF NOT EXISTS friendships (
    user_low INTEGER NOT NULL REFERENCES users (id),
    user_high INTEGER NOT NULL REFERENCES users (id),
    PRIMARY KEY (user_low, user_high),
    CHECK (user_low < user_high)
);

CREATE TABLE IF NOT EXISTS likes (
    film_id INTEGER NOT NULL REFERENCES films (id),
    user_id INTEGER NOT NULL REFERENCES users (id),
    PRIMARY KEY (film_id, user_id)
);
"#;
