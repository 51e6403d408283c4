pub mod collaboration;
pub mod communication;
pub mod contribution;
pub mod task;

use chrono::{DateTime, Utc};
use model::{File, Grade, Member, Message, Post, Task, Trend};

/// Upper bound of every component score and of the overall score.
pub const MAX_SCORE: f64 = 5.0;

/// One member's slice of the snapshot, frozen at `now`.
#[derive(Debug, Clone)]
pub struct MemberActivity<'a> {
    pub member: &'a Member,
    pub tasks: Vec<&'a Task>,
    pub messages: Vec<&'a Message>,
    pub posts: Vec<&'a Post>,
    pub files: Vec<&'a File>,
    pub now: DateTime<Utc>,
}

impl<'a> MemberActivity<'a> {
    pub fn partition(
        member: &'a Member,
        tasks: &'a [Task],
        messages: &'a [Message],
        posts: &'a [Post],
        files: &'a [File],
        now: DateTime<Utc>,
    ) -> Self {
        let user_id = member.user_id.as_str();
        Self {
            member,
            tasks: tasks.iter().filter(|t| t.is_assigned_to(user_id)).collect(),
            messages: messages.iter().filter(|m| m.sender_id == user_id).collect(),
            posts: posts.iter().filter(|p| p.author_id == user_id).collect(),
            files: files.iter().filter(|f| f.uploader_id == user_id).collect(),
            now,
        }
    }
}

/// Metrics that carry a 0-5 score.
pub trait Scored {
    fn score(&self) -> f64;
}

/// A metric extractor run once per member.
pub trait EvaluationPass: Send + Sync {
    type Metrics: Scored;

    fn apply(&self, activity: &MemberActivity<'_>) -> Self::Metrics;
    fn name(&self) -> &'static str;
}

/// Threshold ladder: the points of the first tier whose threshold the value
/// strictly exceeds, `fallback` when none does. Tiers are sorted by
/// descending threshold.
#[derive(Debug, Clone, Copy)]
pub struct Bucket {
    tiers: &'static [(f64, f64)],
    fallback: f64,
}

impl Bucket {
    pub const fn new(tiers: &'static [(f64, f64)], fallback: f64) -> Self {
        Self { tiers, fallback }
    }

    pub fn points(&self, value: f64) -> f64 {
        self.tiers
            .iter()
            .find(|(threshold, _)| value > *threshold)
            .map_or(self.fallback, |(_, points)| *points)
    }
}

/// Clamps into `[0, MAX_SCORE]`; non-finite input counts as no evidence.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, MAX_SCORE)
    } else {
        0.0
    }
}

/// `numerator / denominator × 100`, or `default` for an empty denominator.
pub fn percentage(numerator: usize, denominator: usize, default: f64) -> f64 {
    if denominator == 0 {
        default
    } else {
        numerator as f64 * 100.0 / denominator as f64
    }
}

pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Letter grade of a 0-5 score.
pub fn score_to_grade(score: f64) -> Grade {
    match score {
        s if s >= 4.5 => Grade::APlus,
        s if s >= 4.0 => Grade::A,
        s if s >= 3.5 => Grade::BPlus,
        s if s >= 3.0 => Grade::B,
        s if s >= 2.5 => Grade::CPlus,
        s if s >= 2.0 => Grade::C,
        _ => Grade::D,
    }
}

/// Compares against the score of the previous evaluation, if the caller has one.
pub fn score_trend(score: f64, previous: Option<f64>, tolerance: f64) -> Trend {
    match previous.filter(|p| p.is_finite()) {
        Some(previous) if score - previous > tolerance => Trend::Up,
        Some(previous) if previous - score > tolerance => Trend::Down,
        _ => Trend::Stable,
    }
}

/// Renders a duration given in hours: `45m`, `3.5h`, `2.0d`.
pub fn format_duration(hours: f64) -> String {
    if !hours.is_finite() || hours <= 0.0 {
        "0h".to_owned()
    } else if hours < 1.0 {
        format!("{}m", (hours * 60.0).round() as i64)
    } else if hours < 24.0 {
        format!("{:.1}h", hours)
    } else {
        format!("{:.1}d", hours / 24.0)
    }
}

/// Hours between two instants, fractional.
pub fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_seconds() as f64 / 3600.0
}
