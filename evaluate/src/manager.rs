use crate::config::EvaluationContext;
use crate::insight::{self, MemberSignals, TeamSignals, HIGH_PERFORMER_SCORE, STRUGGLING_SCORE};
use crate::pass::collaboration::CollaborationPass;
use crate::pass::communication::CommunicationPass;
use crate::pass::contribution::ContributionPass;
use crate::pass::task::TaskPass;
use crate::pass::{
    clamp_score, mean, percentage, score_to_grade, score_trend, EvaluationPass, MemberActivity,
    Scored, MAX_SCORE,
};
use chrono::{DateTime, Utc};
use model::{
    ActivityLevel, ActivitySnapshot, File, Member, MemberPerformance, Message, OverallScore,
    PerformerDistribution, Post, Task, TaskStatus, TeamCommunicationSummary,
    TeamEngagementSummary, TeamOverall, TeamPerformance, TeamTaskSummary,
};
use tracing::{debug, info};

const SECONDS_PER_WEEK: f64 = 7.0 * 24.0 * 3600.0;

/// Stateless scoring engine: one member at a time through the four passes,
/// then the team rollup.
#[derive(Debug, Clone, Default)]
pub struct PerformanceCalculator {
    ctx: EvaluationContext,
}

impl PerformanceCalculator {
    pub fn new(ctx: EvaluationContext) -> Self {
        Self {
            ctx: ctx.normalized(),
        }
    }

    pub fn context(&self) -> &EvaluationContext {
        &self.ctx
    }

    pub fn calculate_member_performance(
        &self,
        member: &Member,
        tasks: &[Task],
        messages: &[Message],
        posts: &[Post],
        files: &[File],
        now: DateTime<Utc>,
    ) -> MemberPerformance {
        let activity = MemberActivity::partition(member, tasks, messages, posts, files, now);

        let tasks = TaskPass.apply(&activity);
        let communication = CommunicationPass.apply(&activity);
        let collaboration = CollaborationPass.apply(&activity);
        let contribution = ContributionPass.apply(&activity);

        let weights = &self.ctx.weights;
        let components = [
            (TaskPass.name(), weights.task, tasks.score()),
            (CommunicationPass.name(), weights.communication, communication.score()),
            (CollaborationPass.name(), weights.collaboration, collaboration.score()),
            (ContributionPass.name(), weights.contribution, contribution.score()),
        ];
        let score = clamp_score(
            components
                .iter()
                .map(|(_, weight, score)| weight * clamp_score(*score))
                .sum(),
        );

        let signals = MemberSignals {
            completion_rate: tasks.completion_rate,
            on_time_rate: tasks.on_time_rate,
            communication: &communication,
            collaboration: &collaboration,
        };
        let insights = insight::member_insights(&signals);
        let recommendations = insight::member_recommendations(&signals);

        let scores: Vec<_> = components
            .iter()
            .map(|(name, _, score)| format!("{name}={score:.2}"))
            .collect();
        debug!(
            user_id = %member.user_id,
            score,
            "member evaluated - Scores: {}",
            scores.join(", ")
        );

        MemberPerformance {
            member_id: member.member_id.clone(),
            user_id: member.user_id.clone(),
            overall: OverallScore {
                score,
                grade: score_to_grade(score),
                trend: score_trend(score, member.previous_score, self.ctx.trend.tolerance),
            },
            tasks,
            communication,
            collaboration,
            contribution,
            insights,
            recommendations,
        }
    }

    pub fn calculate_team_performance(
        &self,
        members: &[Member],
        tasks: &[Task],
        messages: &[Message],
        posts: &[Post],
        files: &[File],
        now: DateTime<Utc>,
    ) -> TeamPerformance {
        let performances: Vec<MemberPerformance> = members
            .iter()
            .map(|m| self.calculate_member_performance(m, tasks, messages, posts, files, now))
            .collect();

        let task_summary = summarize_tasks(tasks, now);
        let quality = mean(performances.iter().map(|p| p.overall.score));
        let collaboration = mean(performances.iter().map(|p| p.collaboration.score));
        let productivity = 100.0
            * (0.40 * task_summary.completion_rate / 100.0
                + 0.30 * quality / MAX_SCORE
                + 0.20 * collaboration / MAX_SCORE
                + 0.10 * (task_summary.velocity / MAX_SCORE).min(1.0));

        let communication = TeamCommunicationSummary {
            total_messages: messages.len(),
            avg_response_time: mean(performances.iter().map(|p| p.communication.avg_response_time)),
            active_communicators: performances
                .iter()
                .filter(|p| p.communication.activity_level != ActivityLevel::Low)
                .count(),
        };
        let engagement = TeamEngagementSummary {
            total_posts: posts.len(),
            total_files: files.len(),
            avg_engagement: mean(performances.iter().map(|p| p.collaboration.engagement_rate)),
            knowledge_sharing: performances
                .iter()
                .map(|p| p.collaboration.knowledge_sharing)
                .sum(),
        };

        let team = TeamSignals {
            members: &performances,
            avg_response_time: communication.avg_response_time,
        };
        let insights = insight::team_insights(&team);
        let recommendations = insight::team_recommendations(&team);
        let distribution = distribution(&performances);

        info!(
            "Team evaluation completed - members= {}, productivity= {:.1}, quality= {:.2}, collaboration= {:.2}, velocity= {:.2}",
            performances.len(),
            productivity,
            quality,
            collaboration,
            task_summary.velocity,
        );

        TeamPerformance {
            overall: TeamOverall {
                productivity: productivity.clamp(0.0, 100.0),
                quality,
                collaboration,
                velocity: task_summary.velocity,
            },
            tasks: task_summary,
            communication,
            engagement,
            distribution,
            members: performances,
            insights,
            recommendations,
        }
    }

    /// Evaluates a snapshot at its capture time, or at `now` if it has none.
    /// Evaluates at `now` when given, else at the snapshot's capture time, else
    /// at the current time.
    pub fn calculate_snapshot(
        &self,
        snapshot: &ActivitySnapshot,
        now: Option<DateTime<Utc>>,
    ) -> TeamPerformance {
        let now = now.or(snapshot.captured_at).unwrap_or_else(Utc::now);
        self.calculate_team_performance(
            &snapshot.members,
            &snapshot.tasks,
            &snapshot.messages,
            &snapshot.posts,
            &snapshot.files,
            now,
        )
    }
}

fn summarize_tasks(tasks: &[Task], now: DateTime<Utc>) -> TeamTaskSummary {
    let completed = tasks.iter().filter(|t| t.is_completed()).count();
    TeamTaskSummary {
        total_tasks: tasks.len(),
        completed_tasks: completed,
        in_progress_tasks: tasks
            .iter()
            .filter(|t| t.status == TaskStatus::InProgress)
            .count(),
        overdue_tasks: tasks.iter().filter(|t| t.is_overdue(now)).count(),
        completion_rate: percentage(completed, tasks.len(), 0.0),
        velocity: velocity(tasks),
    }
}

/// Completed tasks per week over the span of completion dates, at least one week.
pub fn velocity(tasks: &[Task]) -> f64 {
    let completed: Vec<&Task> = tasks.iter().filter(|t| t.is_completed()).collect();
    if completed.is_empty() {
        return 0.0;
    }
    let dates = completed.iter().filter_map(|t| t.completed_at);
    let span = match (dates.clone().min(), dates.max()) {
        (Some(first), Some(last)) => (last - first).num_seconds() as f64 / SECONDS_PER_WEEK,
        _ => 0.0,
    };
    completed.len() as f64 / span.max(1.0)
}

fn distribution(performances: &[MemberPerformance]) -> PerformerDistribution {
    let high = performances
        .iter()
        .filter(|p| p.overall.score >= HIGH_PERFORMER_SCORE)
        .count();
    let struggling = performances
        .iter()
        .filter(|p| p.overall.score < STRUGGLING_SCORE)
        .count();
    // first member wins ties
    let top = performances.iter().fold(None::<&MemberPerformance>, |best, p| match best {
        Some(b) if b.overall.score >= p.overall.score => Some(b),
        _ => Some(p),
    });
    PerformerDistribution {
        high_performers: high,
        average_performers: performances.len() - high - struggling,
        struggling_performers: struggling,
        top_performer: top.map(|p| p.user_id.clone()),
    }
}
