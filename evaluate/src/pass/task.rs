use crate::pass::{
    format_duration, hours_between, mean, percentage, EvaluationPass, MemberActivity, Scored,
    MAX_SCORE,
};
use model::{TaskMetrics, TaskPriority, TaskStatus};

impl Scored for TaskMetrics {
    fn score(&self) -> f64 {
        self.score
    }
}

pub struct TaskPass;

impl TaskPass {
    fn weighted_score(
        completion_rate: f64,
        on_time_rate: f64,
        priority_performance: f64,
        overdue_tasks: usize,
    ) -> f64 {
        let overdue_points = if overdue_tasks == 0 { 1.0 } else { 0.5 };
        let raw = 1.5 * (completion_rate / 100.0)
            + 1.5 * (on_time_rate / 100.0)
            + 1.0 * (priority_performance / 100.0)
            + overdue_points;
        raw.min(MAX_SCORE)
    }
}

impl EvaluationPass for TaskPass {
    type Metrics = TaskMetrics;

    fn apply(&self, activity: &MemberActivity<'_>) -> TaskMetrics {
        let tasks = &activity.tasks;
        let completed: Vec<_> = tasks.iter().filter(|t| t.is_completed()).collect();

        let completion_hours = completed.iter().filter_map(|t| match (t.created_at, t.completed_at) {
            (Some(created), Some(done)) => Some(hours_between(created, done).max(0.0)),
            _ => None,
        });
        let avg_completion_hours = mean(completion_hours);

        // a completion without timestamp gives no evidence of lateness
        let on_time = completed
            .iter()
            .filter(|t| match (t.deadline, t.completed_at) {
                (Some(deadline), Some(done)) => done <= deadline,
                _ => true,
            })
            .count();

        let high_priority: Vec<_> = tasks
            .iter()
            .filter(|t| t.priority == TaskPriority::High)
            .collect();
        let high_completed = high_priority.iter().filter(|t| t.is_completed()).count();

        let completion_rate = percentage(completed.len(), tasks.len(), 0.0);
        let on_time_rate = percentage(on_time, completed.len(), 100.0);
        let priority_performance = percentage(high_completed, high_priority.len(), 100.0);
        let overdue_tasks = tasks.iter().filter(|t| t.is_overdue(activity.now)).count();

        TaskMetrics {
            total_tasks: tasks.len(),
            completed_tasks: completed.len(),
            in_progress_tasks: tasks
                .iter()
                .filter(|t| t.status == TaskStatus::InProgress)
                .count(),
            completion_rate,
            avg_completion_hours,
            avg_completion_time: format_duration(avg_completion_hours),
            on_time_rate,
            overdue_tasks,
            priority_performance,
            score: Self::weighted_score(
                completion_rate,
                on_time_rate,
                priority_performance,
                overdue_tasks,
            ),
        }
    }

    fn name(&self) -> &'static str {
        "task_score"
    }
}
