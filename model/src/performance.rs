use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter grade for an overall score. Variants are declared worst to best so
/// the derived ordering follows the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "D")]
    D,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A+")]
    APlus,
}

impl Grade {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    High,
    Medium,
    #[default]
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Success,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: RecommendationPriority,
    pub title: String,
    pub description: String,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallScore {
    pub score: f64,
    pub grade: Grade,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskMetrics {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub in_progress_tasks: usize,
    pub completion_rate: f64,
    pub avg_completion_hours: f64,
    /// `avg_completion_hours` rendered for display, e.g. `"2.5d"`.
    pub avg_completion_time: String,
    pub on_time_rate: f64,
    pub overdue_tasks: usize,
    pub priority_performance: f64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationMetrics {
    pub message_count: usize,
    pub days_active: i64,
    pub messages_per_day: f64,
    /// Mean gap in hours between consecutive messages less than a day apart.
    pub avg_response_time: f64,
    pub response_samples: usize,
    pub activity_level: ActivityLevel,
    pub avg_message_length: f64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationMetrics {
    pub post_count: usize,
    pub total_likes: u64,
    pub total_comments: u64,
    pub engagement_rate: f64,
    pub mention_count: usize,
    pub knowledge_sharing: usize,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionType {
    Documentation,
    Code,
    Design,
    Communication,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContributionMetrics {
    pub total_files: usize,
    pub total_downloads: u64,
    pub document_files: usize,
    pub code_files: usize,
    pub design_files: usize,
    pub post_count: usize,
    pub contribution_types: Vec<ContributionType>,
    pub diversity_score: usize,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPerformance {
    pub member_id: String,
    pub user_id: String,
    pub overall: OverallScore,
    pub tasks: TaskMetrics,
    pub communication: CommunicationMetrics,
    pub collaboration: CollaborationMetrics,
    pub contribution: ContributionMetrics,
    pub insights: Vec<Insight>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TeamOverall {
    /// 0-100.
    pub productivity: f64,
    /// Mean member overall score, 0-5.
    pub quality: f64,
    /// Mean member collaboration score, 0-5.
    pub collaboration: f64,
    /// Completed tasks per week.
    pub velocity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TeamTaskSummary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub in_progress_tasks: usize,
    pub overdue_tasks: usize,
    pub completion_rate: f64,
    pub velocity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TeamCommunicationSummary {
    pub total_messages: usize,
    pub avg_response_time: f64,
    pub active_communicators: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TeamEngagementSummary {
    pub total_posts: usize,
    pub total_files: usize,
    pub avg_engagement: f64,
    pub knowledge_sharing: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PerformerDistribution {
    pub high_performers: usize,
    pub average_performers: usize,
    pub struggling_performers: usize,
    pub top_performer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TeamPerformance {
    pub overall: TeamOverall,
    pub tasks: TeamTaskSummary,
    pub communication: TeamCommunicationSummary,
    pub engagement: TeamEngagementSummary,
    pub distribution: PerformerDistribution,
    pub members: Vec<MemberPerformance>,
    pub insights: Vec<Insight>,
    pub recommendations: Vec<Recommendation>,
}
