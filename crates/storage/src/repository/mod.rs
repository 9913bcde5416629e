pub mod admin;
pub mod score_history;
pub mod score_info;
pub mod summary;
pub mod user;

/// The one soft-delete predicate. Every read and every guard goes through
/// this helper so the flag is filtered the same way at every call site.
pub(crate) fn not_deleted(alias: &str) -> String {
    format!("{alias}.is_deleted = FALSE")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicate_is_scoped_to_the_given_alias() {
        assert_eq!(not_deleted("u"), "u.is_deleted = FALSE");
        assert_eq!(not_deleted("users"), "users.is_deleted = FALSE");
    }
}
