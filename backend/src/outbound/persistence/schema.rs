//! Diesel table definitions.
//!
//! Must match `backend/migrations`; regenerate with `diesel print-schema`
//! after changing a migration.

diesel::table! {
    /// Login accounts.
    users (id) {
        id -> Uuid,
        /// Unique; domain part stored lowercased.
        email -> Varchar,
        name -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        is_active -> Bool,
        is_staff -> Bool,
        is_superuser -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registered companies.
    companies (id) {
        id -> Uuid,
        name -> Varchar,
        /// Unique normalised fourteen-digit CNPJ.
        tax_id -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Drivers; `company_id` is `ON DELETE RESTRICT`.
    drivers (id) {
        id -> Uuid,
        name -> Varchar,
        license_number -> Varchar,
        company_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(drivers -> companies (company_id));

diesel::allow_tables_to_appear_in_same_query!(companies, drivers, users);
