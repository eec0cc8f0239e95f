//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod attendance_repo;
pub mod course_repo;
pub mod dashboard_repo;
pub mod enrollment_repo;
pub mod report_repo;
pub mod session_repo;
pub mod student_repo;
pub mod teacher_repo;
pub mod user_repo;

pub use attendance_repo::AttendanceRepo;
pub use course_repo::CourseRepo;
pub use dashboard_repo::DashboardRepo;
pub use enrollment_repo::EnrollmentRepo;
pub use report_repo::ReportRepo;
pub use session_repo::SessionRepo;
pub use student_repo::StudentRepo;
pub use teacher_repo::TeacherRepo;
pub use user_repo::UserRepo;

/// `ILIKE` pattern matching `term` anywhere in the value.
///
/// Wildcards and the escape character in `term` match literally; use with
/// `ILIKE $n ESCAPE '\'`.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn plain_terms_are_wrapped() {
        assert_eq!(contains_pattern("ali"), "%ali%");
        assert_eq!(contains_pattern(""), "%%");
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern(r"c:\x"), r"%c:\\x%");
    }
}
