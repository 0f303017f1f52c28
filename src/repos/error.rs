/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - unique 制約違反 (23505) は Conflict として区別する
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
    #[error("conflict on `{field}`")]
    Conflict { field: &'static str },
}

pub type RepoResult<T> = Result<T, RepoError>;

impl RepoError {
    /// `field` names the unique column the statement can collide on.
    pub fn from_sqlx(e: sqlx::Error, field: &'static str) -> Self {
        if let sqlx::Error::Database(dbe) = &e
            && dbe.code().as_deref() == Some("23505")
        {
            return RepoError::Conflict { field };
        }
        RepoError::Db(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_stay_db_errors() {
        let err = RepoError::from_sqlx(sqlx::Error::RowNotFound, "username");
        assert!(matches!(err, RepoError::Db(sqlx::Error::RowNotFound)));
    }
}
