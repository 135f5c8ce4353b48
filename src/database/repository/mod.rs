pub mod category;
pub mod product;

pub use category::CategoryRepository;
pub use product::ProductRepository;

use crate::database::manager::DatabaseError;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Database manager error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}
