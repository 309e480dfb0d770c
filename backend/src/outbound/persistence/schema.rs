//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Restaurants and their daily opening window.
    restaurants (id) {
        id -> Uuid,
        owner_id -> Uuid,
        name -> Varchar,
        description -> Nullable<Text>,
        address -> Varchar,
        phone -> Nullable<Varchar>,
        opens_at -> Time,
        closes_at -> Time,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    sections (id) {
        id -> Uuid,
        restaurant_id -> Uuid,
        name -> Varchar,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    dining_tables (id) {
        id -> Uuid,
        restaurant_id -> Uuid,
        section_id -> Nullable<Uuid>,
        label -> Varchar,
        capacity -> Int4,
        is_active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Priced items. `price_minor` is in the currency's minor unit.
    menu_items (id) {
        id -> Uuid,
        restaurant_id -> Uuid,
        name -> Varchar,
        description -> Nullable<Text>,
        category -> Varchar,
        price_minor -> Int8,
        currency -> Varchar,
        is_available -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Table bookings over half-open `[starts_at, ends_at)` windows.
    reservations (id) {
        id -> Uuid,
        restaurant_id -> Uuid,
        table_id -> Uuid,
        customer_id -> Uuid,
        party_size -> Int4,
        starts_at -> Timestamptz,
        ends_at -> Timestamptz,
        status -> Varchar,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    reviews (id) {
        id -> Uuid,
        restaurant_id -> Uuid,
        author_id -> Uuid,
        rating -> Int2,
        comment -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    subscriptions (id) {
        id -> Uuid,
        owner_id -> Uuid,
        plan -> Varchar,
        months -> Int2,
        status -> Varchar,
        starts_at -> Timestamptz,
        expires_at -> Timestamptz,
        cancelled_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Payments. Exactly one of `reservation_id` and `subscription_id` is set.
    payments (id) {
        id -> Uuid,
        payer_id -> Uuid,
        reservation_id -> Nullable<Uuid>,
        subscription_id -> Nullable<Uuid>,
        amount_minor -> Int8,
        currency -> Varchar,
        method -> Varchar,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    restaurant_images (id) {
        id -> Uuid,
        restaurant_id -> Uuid,
        url -> Text,
        alt_text -> Nullable<Varchar>,
        is_primary -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    owner_upgrade_requests (id) {
        id -> Uuid,
        user_id -> Uuid,
        business_name -> Varchar,
        message -> Nullable<Text>,
        status -> Varchar,
        decided_by -> Nullable<Uuid>,
        decided_at -> Nullable<Timestamptz>,
        rejection_reason -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(sections -> restaurants (restaurant_id));
diesel::joinable!(dining_tables -> restaurants (restaurant_id));
diesel::joinable!(dining_tables -> sections (section_id));
diesel::joinable!(menu_items -> restaurants (restaurant_id));
diesel::joinable!(reservations -> restaurants (restaurant_id));
diesel::joinable!(reservations -> dining_tables (table_id));
diesel::joinable!(reviews -> restaurants (restaurant_id));
diesel::joinable!(payments -> reservations (reservation_id));
diesel::joinable!(payments -> subscriptions (subscription_id));
diesel::joinable!(restaurant_images -> restaurants (restaurant_id));

diesel::allow_tables_to_appear_in_same_query!(
    restaurants,
    sections,
    dining_tables,
    menu_items,
    reservations,
    reviews,
    subscriptions,
    payments,
    restaurant_images,
    owner_upgrade_requests,
);
