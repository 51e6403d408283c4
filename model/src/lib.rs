pub mod activity;
pub mod performance;

pub use activity::{
    ActivitySnapshot, File, FileCategory, Member, Message, Post, Task, TaskPriority, TaskStatus,
};
pub use performance::{
    ActivityLevel, CollaborationMetrics, CommunicationMetrics, ContributionMetrics,
    ContributionType, Grade, Insight, InsightKind, MemberPerformance, OverallScore,
    PerformerDistribution, Recommendation, RecommendationPriority, TaskMetrics,
    TeamCommunicationSummary, TeamEngagementSummary, TeamOverall, TeamPerformance,
    TeamTaskSummary, Trend,
};
