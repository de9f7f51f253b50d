//! Diesel table definitions for the PostgreSQL schema.
//!
//! Keep in step with `backend/migrations`; `diesel print-schema` regenerates
//! this block from a live database.

diesel::table! {
    /// Employee directory.
    ///
    /// `email` carries the `employees_email_key` unique constraint.
    employees (id) {
        /// Primary key assigned by the `BIGSERIAL` sequence.
        id -> Int8,
        first_name -> Varchar,
        last_name -> Varchar,
        email -> Varchar,
    }
}
