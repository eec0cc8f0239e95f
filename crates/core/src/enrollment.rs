//! Enrollment status constants.
//!
//! These must match the `CHECK` constraint on `student_courses.status`.

/// The student currently attends the course.
pub const ENROLLMENT_ACTIVE: &str = "active";

/// The student left the course; re-enrolling flips the row back to active.
pub const ENROLLMENT_DROPPED: &str = "dropped";
