//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`.
//! `diesel print-schema` regenerates them from a live database.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Serial primary key.
        id -> Int4,
        /// Unique, normalised email address.
        email -> Varchar,
        /// Optional display name.
        name -> Nullable<Varchar>,
        /// Argon2 PHC hash of the password.
        password -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Published articles.
    articles (id) {
        /// Serial primary key.
        id -> Int4,
        /// Article title.
        title -> Varchar,
        /// Article body.
        content -> Text,
        /// Owning user; cascades on delete.
        author_id -> Int4,
        /// Record creation timestamp; primary ordering key.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments attached to articles.
    comments (id) {
        /// Serial primary key.
        id -> Int4,
        /// Comment body.
        content -> Text,
        /// Commenting user.
        author_id -> Int4,
        /// Parent article; cascades on delete.
        article_id -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Likes; unique per `(user_id, article_id)`.
    likes (id) {
        /// Serial primary key.
        id -> Int4,
        /// Liking user.
        user_id -> Int4,
        /// Liked article.
        article_id -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Hashed refresh tokens, one row per live session.
    refresh_tokens (id) {
        /// Serial primary key.
        id -> Int4,
        /// Argon2 PHC hash of the issued refresh token.
        token -> Varchar,
        /// Session owner.
        user_id -> Int4,
        /// Issue timestamp.
        created_at -> Timestamptz,
        /// Expiry timestamp.
        expires_at -> Timestamptz,
    }
}

diesel::table! {
    /// Example data seed runs used to guard against reseeding.
    example_data_runs (seed_key) {
        /// Seed name from the registry.
        seed_key -> Text,
        /// RNG seed value.
        seed -> Int8,
        /// Number of users inserted.
        user_count -> Int4,
        /// Number of articles inserted.
        article_count -> Int4,
        /// Number of comments inserted.
        comment_count -> Int4,
        /// Number of likes inserted.
        like_count -> Int4,
        /// When the seed was applied.
        applied_at -> Timestamptz,
    }
}

diesel::joinable!(articles -> users (author_id));
diesel::joinable!(comments -> articles (article_id));
diesel::joinable!(comments -> users (author_id));
diesel::joinable!(likes -> articles (article_id));
diesel::joinable!(likes -> users (user_id));
diesel::joinable!(refresh_tokens -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    articles,
    comments,
    likes,
    refresh_tokens,
    example_data_runs,
);
