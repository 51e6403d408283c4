//! Rule tables turning metric thresholds into insights and recommendations.
//!
//! Every rule fires at most once and results keep the table order.

use model::{
    ActivityLevel, CollaborationMetrics, CommunicationMetrics, Insight, InsightKind,
    MemberPerformance, Recommendation, RecommendationPriority,
};

/// Score from which a member counts as a high performer.
pub const HIGH_PERFORMER_SCORE: f64 = 4.0;
/// Score below which a member is struggling.
pub const STRUGGLING_SCORE: f64 = 3.0;

/// The member metrics the rules look at.
#[derive(Debug, Clone, Copy)]
pub struct MemberSignals<'a> {
    pub completion_rate: f64,
    pub on_time_rate: f64,
    pub communication: &'a CommunicationMetrics,
    pub collaboration: &'a CollaborationMetrics,
}

impl MemberSignals<'_> {
    fn responsive_within(&self, hours: f64) -> bool {
        self.communication.response_samples > 0 && self.communication.avg_response_time < hours
    }
}

type MemberRule = fn(&MemberSignals<'_>) -> Option<Insight>;
type MemberAdvice = fn(&MemberSignals<'_>) -> Option<Recommendation>;

fn insight(kind: InsightKind, title: &str, description: String) -> Insight {
    Insight {
        kind,
        title: title.to_owned(),
        description,
    }
}

fn recommendation(
    priority: RecommendationPriority,
    title: &str,
    description: String,
    actions: &[&str],
) -> Recommendation {
    Recommendation {
        priority,
        title: title.to_owned(),
        description,
        actions: actions.iter().map(|a| (*a).to_owned()).collect(),
    }
}

const MEMBER_INSIGHTS: &[MemberRule] = &[
    |m| {
        (m.completion_rate > 90.0).then(|| {
            insight(
                InsightKind::Success,
                "Excellent task completion rate",
                format!("Completed {:.0}% of assigned tasks", m.completion_rate),
            )
        })
    },
    |m| {
        (m.completion_rate < 60.0).then(|| {
            insight(
                InsightKind::Warning,
                "Task completion rate needs improvement",
                format!("Only {:.0}% of assigned tasks are completed", m.completion_rate),
            )
        })
    },
    |m| {
        (m.on_time_rate > 85.0).then(|| {
            insight(
                InsightKind::Success,
                "Consistently meets deadlines",
                format!("{:.0}% of completed tasks were delivered on time", m.on_time_rate),
            )
        })
    },
    |m| {
        (m.on_time_rate < 70.0).then(|| {
            insight(
                InsightKind::Warning,
                "Frequent deadline misses",
                format!("{:.0}% of completed tasks were delivered late", 100.0 - m.on_time_rate),
            )
        })
    },
    |m| match m.communication.activity_level {
        ActivityLevel::High => Some(insight(
            InsightKind::Success,
            "Highly engaged in team communication",
            format!(
                "Averages {:.1} messages per day",
                m.communication.messages_per_day
            ),
        )),
        ActivityLevel::Low => Some(insight(
            InsightKind::Info,
            "Could benefit from more active communication",
            format!(
                "Averages {:.1} messages per day",
                m.communication.messages_per_day
            ),
        )),
        ActivityLevel::Medium => None,
    },
    |m| {
        m.responsive_within(2.0).then(|| {
            insight(
                InsightKind::Success,
                "Very responsive team member",
                format!(
                    "Replies within {:.1} hours on average",
                    m.communication.avg_response_time
                ),
            )
        })
    },
    |m| {
        (m.collaboration.knowledge_sharing > 3).then(|| {
            insight(
                InsightKind::Success,
                "Excellent knowledge sharing",
                format!(
                    "Shared resources in {} posts",
                    m.collaboration.knowledge_sharing
                ),
            )
        })
    },
    |m| {
        (m.collaboration.mention_count > 5).then(|| {
            insight(
                InsightKind::Success,
                "Actively helps team members",
                format!(
                    "Reached out to teammates in {} messages",
                    m.collaboration.mention_count
                ),
            )
        })
    },
];

const MEMBER_RECOMMENDATIONS: &[MemberAdvice] = &[
    |m| {
        (m.completion_rate < 80.0).then(|| {
            recommendation(
                RecommendationPriority::High,
                "Improve Task Management",
                format!(
                    "Task completion is at {:.0}%, aim for at least 80%",
                    m.completion_rate
                ),
                &[
                    "Break large tasks into smaller steps",
                    "Review open tasks at the start of each day",
                    "Flag blocked tasks early",
                ],
            )
        })
    },
    |m| {
        (m.on_time_rate < 75.0).then(|| {
            recommendation(
                RecommendationPriority::High,
                "Better Deadline Planning",
                format!(
                    "Only {:.0}% of tasks finish before their deadline",
                    m.on_time_rate
                ),
                &[
                    "Estimate effort before accepting a deadline",
                    "Set personal milestones ahead of due dates",
                    "Renegotiate deadlines as soon as risks appear",
                ],
            )
        })
    },
    |m| {
        (m.communication.activity_level == ActivityLevel::Low).then(|| {
            recommendation(
                RecommendationPriority::Medium,
                "Increase Team Engagement",
                "Participation in team chat is low".to_owned(),
                &[
                    "Post a short daily progress update",
                    "Join ongoing discussions in the team chat",
                ],
            )
        })
    },
    |m| {
        (m.communication.avg_response_time > 8.0).then(|| {
            recommendation(
                RecommendationPriority::Medium,
                "Improve Response Time",
                format!(
                    "Replies take {:.1} hours on average",
                    m.communication.avg_response_time
                ),
                &[
                    "Check messages at fixed times during the day",
                    "Enable notifications for direct mentions",
                ],
            )
        })
    },
];

pub fn member_insights(signals: &MemberSignals<'_>) -> Vec<Insight> {
    MEMBER_INSIGHTS.iter().filter_map(|rule| rule(signals)).collect()
}

pub fn member_recommendations(signals: &MemberSignals<'_>) -> Vec<Recommendation> {
    MEMBER_RECOMMENDATIONS
        .iter()
        .filter_map(|rule| rule(signals))
        .collect()
}

/// Team-wide inputs of the team rules.
#[derive(Debug, Clone, Copy)]
pub struct TeamSignals<'a> {
    pub members: &'a [MemberPerformance],
    pub avg_response_time: f64,
}

impl TeamSignals<'_> {
    pub fn high_performers(&self) -> usize {
        self.members
            .iter()
            .filter(|m| m.overall.score >= HIGH_PERFORMER_SCORE)
            .count()
    }

    pub fn struggling(&self) -> usize {
        self.members
            .iter()
            .filter(|m| m.overall.score < STRUGGLING_SCORE)
            .count()
    }

    fn low_communicators(&self) -> usize {
        self.members
            .iter()
            .filter(|m| m.communication.activity_level == ActivityLevel::Low)
            .count()
    }

    fn ratio(&self, count: usize) -> f64 {
        if self.members.is_empty() {
            0.0
        } else {
            count as f64 / self.members.len() as f64
        }
    }
}

pub fn team_insights(team: &TeamSignals<'_>) -> Vec<Insight> {
    let mut insights = Vec::new();
    let high = team.high_performers();
    if team.ratio(high) > 0.7 {
        insights.push(insight(
            InsightKind::Success,
            "High-Performing Team",
            format!(
                "{} of {} members score {:.1} or higher",
                high,
                team.members.len(),
                HIGH_PERFORMER_SCORE
            ),
        ));
    }
    let struggling = team.struggling();
    if team.ratio(struggling) > 0.3 {
        insights.push(insight(
            InsightKind::Warning,
            "Performance Concerns",
            format!(
                "{} of {} members score below {:.1}",
                struggling,
                team.members.len(),
                STRUGGLING_SCORE
            ),
        ));
    }
    let sampled = team
        .members
        .iter()
        .any(|m| m.communication.response_samples > 0);
    if sampled && team.avg_response_time < 4.0 {
        insights.push(insight(
            InsightKind::Success,
            "Excellent Communication",
            format!(
                "Team replies within {:.1} hours on average",
                team.avg_response_time
            ),
        ));
    }
    insights
}

pub fn team_recommendations(team: &TeamSignals<'_>) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    let high = team.high_performers();
    let struggling = team.struggling();
    if high > 0 && struggling > 0 {
        recommendations.push(recommendation(
            RecommendationPriority::High,
            "Implement Mentoring Program",
            format!(
                "Pair {} high performer(s) with {} struggling member(s)",
                high, struggling
            ),
            &[
                "Assign each struggling member a mentor",
                "Schedule weekly mentoring check-ins",
                "Share working practices of top performers",
            ],
        ));
    }
    if team.ratio(team.low_communicators()) > 0.4 {
        recommendations.push(recommendation(
            RecommendationPriority::Medium,
            "Improve Team Communication",
            format!(
                "{} of {} members rarely communicate",
                team.low_communicators(),
                team.members.len()
            ),
            &[
                "Hold short daily stand-ups",
                "Agree on response time expectations",
                "Use the team feed for progress updates",
            ],
        ));
    }
    recommendations
}
