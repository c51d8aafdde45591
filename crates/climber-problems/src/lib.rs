//! Climber Problems - Concrete problems solved with the hill-climbing engine
//!
//! Each problem implements [`ProblemAdapter`]: it is built from a CSV
//! [`Dataset`](data::Dataset), supplies the evaluator, neighborhood and default
//! search settings, and turns the best run into a [`Report`].
//!
//! - [`grades`]: curve a grade book to maximize the pass rate
//! - [`mentors`]: two-slot mentor blocks without double booking
//! - [`routes`]: shortest closed tour through a distance matrix
//! - [`projects`]: benefit-maximizing projects within a budget
//! - [`thesis`]: thesis defenses to rooms and slots
//! - [`exams`]: exam questions within time and difficulty limits
//! - [`teams`]: balanced teams by GPA and skill
//! - [`tuning`]: hyperparameters against a black-box score

pub mod adapter;
pub mod data;
pub mod exams;
pub mod grades;
pub mod mentors;
pub mod projects;
pub mod report;
pub mod routes;
pub mod teams;
pub mod thesis;
pub mod tuning;

pub use adapter::{solve, solve_and_report, Outcome, ProblemAdapter};
pub use data::{CsvLoader, DataLoader, DataUnavailable, Dataset};
pub use exams::QuestionBank;
pub use grades::GradeBook;
pub use mentors::MentorAvailability;
pub use projects::ProjectPortfolio;
pub use report::Report;
pub use routes::LabRoute;
pub use teams::Cohort;
pub use thesis::DefenseSchedule;
pub use tuning::{ParamSpace, ParamSpec, Tuner};

#[cfg(test)]
mod tests;
