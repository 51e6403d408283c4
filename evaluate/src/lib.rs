//! Team performance evaluation.
//!
//! Turns a snapshot of team activity (tasks, chat messages, feed posts, shared
//! files) into per-member and per-team scores, grades, trends, insights and
//! recommendations. The calculation is pure: the same inputs and the same
//! `now` always produce the same result.

pub mod client;
pub mod config;
pub mod fixture;
pub mod insight;
pub mod manager;
pub mod pass;

use chrono::{DateTime, Utc};
use model::{File, Member, MemberPerformance, Message, Post, Task, TeamPerformance};

pub use config::EvaluationContext;
pub use manager::PerformanceCalculator;

/// Scores every member with the default weights and rolls the team up.
/// Members come back in input order.
pub fn calculate_team_performance(
    members: &[Member],
    tasks: &[Task],
    messages: &[Message],
    posts: &[Post],
    files: &[File],
    now: DateTime<Utc>,
) -> TeamPerformance {
    PerformanceCalculator::default()
        .calculate_team_performance(members, tasks, messages, posts, files, now)
}

/// Scores a single member with the default weights.
pub fn calculate_member_performance(
    member: &Member,
    tasks: &[Task],
    messages: &[Message],
    posts: &[Post],
    files: &[File],
    now: DateTime<Utc>,
) -> MemberPerformance {
    PerformanceCalculator::default()
        .calculate_member_performance(member, tasks, messages, posts, files, now)
}
