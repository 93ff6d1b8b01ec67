//! Startup catalog seeding from a CSV export.

mod product_seeder;

pub use product_seeder::ProductSeeder;
