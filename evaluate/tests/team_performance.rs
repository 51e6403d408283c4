use chrono::{DateTime, Duration, TimeZone, Utc};
use evaluate::fixture::FixtureGenerator;
use evaluate::pass::score_to_grade;
use evaluate::{calculate_member_performance, calculate_team_performance};
use model::{
    ActivityLevel, ActivitySnapshot, File, FileCategory, Grade, Member, Message, Post, Task,
    TaskPriority, TaskStatus,
};
use pretty_assertions::assert_eq;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
}

fn member(user: &str, joined_days_ago: i64) -> Member {
    Member {
        member_id: format!("member-{user}"),
        user_id: user.to_owned(),
        assigned_at: Some(now() - Duration::days(joined_days_ago)),
        assigned_role: Some("developer".to_owned()),
        is_lead: false,
        previous_score: None,
    }
}

/// Adds the activity of a member who maxes out every metric.
fn add_star(snapshot: &mut ActivitySnapshot, user: &str) {
    snapshot.members.push(member(user, 2));
    for n in 0..3 {
        let created = now() - Duration::days(5);
        snapshot.tasks.push(Task {
            id: format!("{user}-task-{n}"),
            assigned_users: vec![user.to_owned()],
            status: TaskStatus::Completed,
            priority: TaskPriority::High,
            created_at: Some(created),
            completed_at: Some(created + Duration::hours(20)),
            deadline: Some(created + Duration::days(2)),
            ..Default::default()
        });
    }
    let body = format!("@peer {}", "x".repeat(80));
    for n in 0..12 {
        snapshot.messages.push(Message {
            id: format!("{user}-msg-{n}"),
            sender_id: user.to_owned(),
            content: body.clone(),
            created_at: Some(now() - Duration::minutes(30 * n)),
        });
    }
    for n in 0..6 {
        snapshot.posts.push(Post {
            id: format!("{user}-post-{n}"),
            author_id: user.to_owned(),
            content: "release notes".to_owned(),
            like_count: 3,
            comment_count: 1,
            links: vec!["https://wiki.example.com".to_owned()],
            ..Default::default()
        });
    }
    let categories = [FileCategory::Document, FileCategory::Code, FileCategory::Design];
    for n in 0..6 {
        snapshot.files.push(File {
            id: format!("{user}-file-{n}"),
            uploader_id: user.to_owned(),
            category: categories[n % 3],
            download_count: 4,
            created_at: None,
        });
    }
}

/// Adds a member with a single overdue high-priority task and nothing else.
fn add_struggler(snapshot: &mut ActivitySnapshot, user: &str) {
    snapshot.members.push(member(user, 30));
    snapshot.tasks.push(Task {
        id: format!("{user}-task"),
        assigned_users: vec![user.to_owned()],
        status: TaskStatus::Pending,
        priority: TaskPriority::High,
        deadline: Some(now() - Duration::days(2)),
        created_at: Some(now() - Duration::days(10)),
        ..Default::default()
    });
}

fn evaluate(snapshot: &ActivitySnapshot) -> model::TeamPerformance {
    calculate_team_performance(
        &snapshot.members,
        &snapshot.tasks,
        &snapshot.messages,
        &snapshot.posts,
        &snapshot.files,
        now(),
    )
}

#[test]
fn star_member_maxes_every_component() {
    let mut snapshot = ActivitySnapshot::default();
    add_star(&mut snapshot, "ada");
    let result = calculate_member_performance(
        &snapshot.members[0],
        &snapshot.tasks,
        &snapshot.messages,
        &snapshot.posts,
        &snapshot.files,
        now(),
    );
    assert_eq!(result.tasks.score, 5.0);
    assert_eq!(result.communication.score, 5.0);
    assert_eq!(result.communication.activity_level, ActivityLevel::High);
    assert_eq!(result.collaboration.score, 5.0);
    assert_eq!(result.contribution.score, 5.0);
    assert!((result.overall.score - 5.0).abs() < 1e-9);
    assert_eq!(result.overall.grade, Grade::APlus);
    assert_eq!(result.tasks.avg_completion_time, "20.0h");
    assert!(result.recommendations.is_empty());
}

#[test]
fn member_without_any_activity_gets_neutral_defaults() {
    let member = member("idle", 10);
    let result = calculate_member_performance(&member, &[], &[], &[], &[], now());
    assert_eq!(result.tasks.completion_rate, 0.0);
    assert_eq!(result.tasks.on_time_rate, 100.0);
    assert_eq!(result.tasks.priority_performance, 100.0);
    assert_eq!(result.tasks.score, 3.5);
    assert_eq!(result.communication.score, 2.0);
    assert_eq!(result.communication.activity_level, ActivityLevel::Low);
    assert!(result.overall.score.is_finite());
    // 0.40 * 3.5 + 0.25 * 2 + 0.20 * 1 + 0.15 * 1
    assert!((result.overall.score - 2.25).abs() < 1e-9);
    assert_eq!(result.overall.grade, Grade::C);
}

#[test]
fn mixed_team_raises_concerns_and_mentoring() {
    let mut snapshot = ActivitySnapshot::default();
    add_star(&mut snapshot, "ada");
    add_star(&mut snapshot, "grace");
    add_struggler(&mut snapshot, "bob");
    let result = evaluate(&snapshot);

    assert_eq!(result.members.len(), 3);
    assert_eq!(result.members[2].overall.grade, Grade::D);
    assert_eq!(result.distribution.high_performers, 2);
    assert_eq!(result.distribution.struggling_performers, 1);
    assert_eq!(result.distribution.top_performer.as_deref(), Some("ada"));

    let insights: Vec<_> = result.insights.iter().map(|i| i.title.as_str()).collect();
    assert!(insights.contains(&"Performance Concerns"));
    assert!(!insights.contains(&"High-Performing Team"));
    let recommendations: Vec<_> = result
        .recommendations
        .iter()
        .map(|r| r.title.as_str())
        .collect();
    assert_eq!(recommendations[0], "Implement Mentoring Program");

    assert_eq!(result.tasks.total_tasks, 7);
    assert_eq!(result.tasks.completed_tasks, 6);
    assert_eq!(result.tasks.overdue_tasks, 1);
    // six completions within one week
    assert_eq!(result.overall.velocity, 6.0);
    assert!(result.overall.productivity > 0.0 && result.overall.productivity <= 100.0);
}

#[test]
fn member_order_is_preserved() {
    let snapshot = FixtureGenerator::new(11, now()).team(5);
    let forward = evaluate(&snapshot);

    let mut reversed = snapshot.clone();
    reversed.members.reverse();
    let backward = evaluate(&reversed);

    let forward_ids: Vec<_> = forward.members.iter().map(|m| m.user_id.clone()).collect();
    let mut backward_ids: Vec<_> = backward.members.iter().map(|m| m.user_id.clone()).collect();
    backward_ids.reverse();
    assert_eq!(forward_ids, backward_ids);

    for (a, b) in forward.members.iter().zip(backward.members.iter().rev()) {
        assert_eq!(a, b);
    }
}

#[test]
fn evaluation_is_idempotent() {
    let snapshot = FixtureGenerator::new(3, now()).team(6);
    assert_eq!(evaluate(&snapshot), evaluate(&snapshot));
}

#[test]
fn synthetic_teams_respect_score_invariants() {
    for seed in 0..25 {
        let snapshot = FixtureGenerator::new(seed, now()).team(8);
        let result = evaluate(&snapshot);
        assert_eq!(result.members.len(), snapshot.members.len());

        for m in &result.members {
            for score in [
                m.tasks.score,
                m.communication.score,
                m.collaboration.score,
                m.contribution.score,
                m.overall.score,
            ] {
                assert!((0.0..=5.0).contains(&score), "seed {seed}: {score}");
            }
            let weighted = 0.40 * m.tasks.score
                + 0.25 * m.communication.score
                + 0.20 * m.collaboration.score
                + 0.15 * m.contribution.score;
            assert!((m.overall.score - weighted).abs() < 1e-9);
            assert_eq!(m.overall.grade, score_to_grade(m.overall.score));
        }

        let mut by_score: Vec<_> = result.members.iter().map(|m| &m.overall).collect();
        by_score.sort_by(|a, b| a.score.total_cmp(&b.score));
        for pair in by_score.windows(2) {
            assert!(pair[0].grade <= pair[1].grade);
        }

        assert!((0.0..=100.0).contains(&result.overall.productivity));
        assert!(result.overall.quality.is_finite());
    }
}
