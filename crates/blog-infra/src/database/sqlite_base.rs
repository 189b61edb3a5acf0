use std::marker::PhantomData;

use sea_orm::{DbConn, DbErr, EntityTrait, SqlErr};

use blog_core::error::RepoError;

/// Generic SQLite repository: a shared connection typed by the entity it serves.
pub struct SqliteRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> SqliteRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

/// Translate a SeaORM error into the repository taxonomy, keeping
/// constraint violations distinguishable from plain failures.
pub(crate) fn repo_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => RepoError::Constraint(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => RepoError::Reference(msg),
        _ => match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
            _ => RepoError::Query(err.to_string()),
        },
    }
}
