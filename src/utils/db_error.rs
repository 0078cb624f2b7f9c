//! Classification of database errors.

/// Name of the unique constraint protecting `urls.code` on engines that report one.
const CODE_CONSTRAINT: &str = "urls_code_key";

/// Returns true if `e` is a unique violation on the `urls.code` column.
///
/// SQLite does not name constraints in its errors; the violated column shows up
/// in the message instead (`UNIQUE constraint failed: urls.code`).
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(CODE_CONSTRAINT) || db_err.message().contains("urls.code")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_not_a_collision() {
        assert!(!is_unique_violation_on_code(&sqlx::Error::RowNotFound));
        assert!(!is_unique_violation_on_code(&sqlx::Error::PoolTimedOut));
    }
}
