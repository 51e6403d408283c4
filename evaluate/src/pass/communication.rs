use crate::pass::{hours_between, mean, EvaluationPass, MemberActivity, Scored, MAX_SCORE};
use model::{ActivityLevel, CommunicationMetrics};

/// Gaps of a day or more are a new conversation, not a response.
const RESPONSE_WINDOW_HOURS: f64 = 24.0;
const FAST_RESPONSE_HOURS: f64 = 4.0;

impl Scored for CommunicationMetrics {
    fn score(&self) -> f64 {
        self.score
    }
}

pub fn activity_level(messages_per_day: f64) -> ActivityLevel {
    if messages_per_day > 5.0 {
        ActivityLevel::High
    } else if messages_per_day > 2.0 {
        ActivityLevel::Medium
    } else {
        ActivityLevel::Low
    }
}

pub struct CommunicationPass;

impl EvaluationPass for CommunicationPass {
    type Metrics = CommunicationMetrics;

    fn apply(&self, activity: &MemberActivity<'_>) -> CommunicationMetrics {
        let messages = &activity.messages;
        let message_count = messages.len();

        let days_active = activity
            .member
            .assigned_at
            .map(|joined| (activity.now - joined).num_days())
            .unwrap_or(0)
            .max(1);

        let mut timestamps: Vec<_> = messages.iter().filter_map(|m| m.created_at).collect();
        timestamps.sort();
        let gaps: Vec<f64> = timestamps
            .windows(2)
            .map(|pair| hours_between(pair[0], pair[1]))
            .filter(|gap| *gap < RESPONSE_WINDOW_HOURS)
            .collect();
        let avg_response_time = mean(gaps.iter().copied());

        let messages_per_day = message_count as f64 / days_active as f64;
        let avg_message_length = mean(messages.iter().map(|m| m.content.chars().count() as f64));

        let length_points = if avg_message_length > 50.0 { 2.0 } else { 1.0 };
        let frequency_points = if messages_per_day > 1.0 { 2.0 } else { 1.0 };
        let response_points = if !gaps.is_empty() && avg_response_time < FAST_RESPONSE_HOURS {
            1.0
        } else {
            0.0
        };

        CommunicationMetrics {
            message_count,
            days_active,
            messages_per_day,
            avg_response_time,
            response_samples: gaps.len(),
            activity_level: activity_level(messages_per_day),
            avg_message_length,
            score: f64::min(MAX_SCORE, length_points + frequency_points + response_points),
        }
    }

    fn name(&self) -> &'static str {
        "communication_score"
    }
}
