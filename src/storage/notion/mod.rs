mod database;

pub use database::{NotionDatabase, PAGE_SIZE};
