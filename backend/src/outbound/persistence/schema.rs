//! Diesel table definitions. Keep in sync with `backend/migrations`.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Trimmed name as submitted.
        name -> Varchar,
        /// Normalized email; unique via `users_email_key`.
        email -> Varchar,
        /// Opaque bcrypt hash.
        password_hash -> Varchar,
        created_at -> Timestamptz,
    }
}
