pub mod hashmap_account_repository;
pub mod postgres_account_repository;

pub use hashmap_account_repository::HashMapAccountRepository;
pub use postgres_account_repository::PostgresAccountRepository;
