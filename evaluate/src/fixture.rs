//! Synthetic team activity for demos and tests.
//!
//! Every member and record kind draws from a ChaCha stream seeded with an FNV-1a
//! hash of the seed and member id, so the same seed always yields the same
//! snapshot. Never used on the scoring path.

use chrono::{DateTime, Duration, Utc};
use model::{
    ActivitySnapshot, File, FileCategory, Member, Message, Post, Task, TaskPriority, TaskStatus,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

const ROLES: [&str; 4] = ["developer", "designer", "writer", "manager"];
const PHRASES: [&str; 5] = [
    "Pushed the latest changes, please take a look when you have a moment.",
    "ok",
    "@team standup notes are in the feed",
    "Can someone review the onboarding flow before Friday? I left comments inline.",
    "thanks!",
];

pub fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME)
    })
}

/// Seeded generator for one member and record kind. ChaCha output is stable
/// across `rand_chacha` releases.
fn stream(seed: u64, label: &str) -> ChaCha8Rng {
    let mut key = seed.to_le_bytes().to_vec();
    key.extend_from_slice(label.as_bytes());
    ChaCha8Rng::seed_from_u64(fnv1a(&key))
}

#[derive(Debug, Clone)]
pub struct FixtureGenerator {
    seed: u64,
    now: DateTime<Utc>,
}

impl FixtureGenerator {
    pub fn new(seed: u64, now: DateTime<Utc>) -> Self {
        Self { seed, now }
    }

    pub fn team(&self, member_count: usize) -> ActivitySnapshot {
        let mut snapshot = ActivitySnapshot {
            captured_at: Some(self.now),
            ..Default::default()
        };
        for index in 0..member_count {
            let member = self.member(index);
            snapshot.tasks.extend(self.tasks(&member));
            snapshot.messages.extend(self.messages(&member));
            snapshot.posts.extend(self.posts(&member));
            snapshot.files.extend(self.files(&member));
            snapshot.members.push(member);
        }
        snapshot
    }

    pub fn member(&self, index: usize) -> Member {
        let user_id = format!("user-{index:03}");
        let mut rng = stream(self.seed, &user_id);
        Member {
            member_id: format!("member-{index:03}"),
            assigned_at: Some(self.now - Duration::days(rng.gen_range(7..97))),
            assigned_role: Some(ROLES[rng.gen_range(0..ROLES.len())].to_owned()),
            is_lead: index == 0,
            previous_score: rng
                .gen_bool(0.7)
                .then(|| f64::from(rng.gen_range(0..50u8)) / 10.0),
            user_id,
        }
    }

    pub fn tasks(&self, member: &Member) -> Vec<Task> {
        let mut rng = stream(self.seed, &format!("{}/tasks", member.user_id));
        let diligence = rng.gen_range(0..100);
        (0..rng.gen_range(2..14))
            .map(|n| {
                let created = self.now - Duration::hours(rng.gen_range(24..24 * 61));
                let deadline = created + Duration::hours(rng.gen_range(24..24 * 15));
                let status = if rng.gen_range(0..100) < diligence {
                    TaskStatus::Completed
                } else {
                    [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Cancelled]
                        [rng.gen_range(0..3usize)]
                };
                let completed_at = (status == TaskStatus::Completed).then(|| {
                    let hours = rng.gen_range(1..1 + 24 * 16);
                    (created + Duration::hours(hours)).min(self.now)
                });
                Task {
                    id: format!("{}-task-{n}", member.user_id),
                    assigned_users: vec![member.user_id.clone()],
                    assignment_type: None,
                    status,
                    priority: [
                        TaskPriority::Low,
                        TaskPriority::Medium,
                        TaskPriority::High,
                        TaskPriority::Urgent,
                    ][rng.gen_range(0..4usize)],
                    deadline: rng.gen_bool(0.8).then_some(deadline),
                    created_at: Some(created),
                    completed_at,
                }
            })
            .collect()
    }

    pub fn messages(&self, member: &Member) -> Vec<Message> {
        let mut rng = stream(self.seed, &format!("{}/messages", member.user_id));
        let mut at = member.assigned_at.unwrap_or(self.now - Duration::days(30));
        let count: usize = rng.gen_range(0..120);
        let mut messages = Vec::new();
        for n in 0..count {
            at += Duration::minutes(rng.gen_range(5..5 + 60 * 20));
            if at > self.now {
                break;
            }
            messages.push(Message {
                id: format!("{}-msg-{n}", member.user_id),
                sender_id: member.user_id.clone(),
                content: PHRASES[rng.gen_range(0..PHRASES.len())].to_owned(),
                created_at: Some(at),
            });
        }
        messages
    }

    pub fn posts(&self, member: &Member) -> Vec<Post> {
        let mut rng = stream(self.seed, &format!("{}/posts", member.user_id));
        (0..rng.gen_range(0..9))
            .map(|n| Post {
                id: format!("{}-post-{n}", member.user_id),
                author_id: member.user_id.clone(),
                content: format!("Update #{n}"),
                like_count: rng.gen_range(0..6),
                comment_count: rng.gen_range(0..4),
                attachments: if rng.gen_bool(0.3) {
                    vec![format!("attachment-{n}.pdf")]
                } else {
                    Vec::new()
                },
                links: if rng.gen_bool(0.25) {
                    vec![format!("https://wiki.example.com/page/{n}")]
                } else {
                    Vec::new()
                },
                created_at: Some(self.now - Duration::hours(rng.gen_range(0..24 * 30))),
            })
            .collect()
    }

    pub fn files(&self, member: &Member) -> Vec<File> {
        let mut rng = stream(self.seed, &format!("{}/files", member.user_id));
        (0..rng.gen_range(0..8))
            .map(|n| File {
                id: format!("{}-file-{n}", member.user_id),
                uploader_id: member.user_id.clone(),
                category: [
                    FileCategory::Document,
                    FileCategory::Code,
                    FileCategory::Design,
                    FileCategory::Other,
                ][rng.gen_range(0..4usize)],
                download_count: rng.gen_range(0..8),
                created_at: Some(self.now - Duration::hours(rng.gen_range(0..24 * 30))),
            })
            .collect()
    }
}
