use crate::pass::{Bucket, EvaluationPass, MemberActivity, Scored, MAX_SCORE};
use model::CollaborationMetrics;
use once_cell::sync::Lazy;
use regex::Regex;

static MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|[^\w@])@[\w.-]+").expect("mention pattern is valid"));

const ENGAGEMENT: Bucket = Bucket::new(&[(2.0, 1.5), (1.0, 1.0)], 0.5);
const MENTIONS: Bucket = Bucket::new(&[(5.0, 1.5), (2.0, 1.0)], 0.5);
const KNOWLEDGE_SHARING: Bucket = Bucket::new(&[(2.0, 1.0), (0.0, 0.5)], 0.0);
const POSTS: Bucket = Bucket::new(&[(5.0, 1.0), (2.0, 0.5)], 0.0);

impl Scored for CollaborationMetrics {
    fn score(&self) -> f64 {
        self.score
    }
}

/// True when the text addresses someone with `@handle`. E-mail addresses do not count.
pub fn has_mention(content: &str) -> bool {
    MENTION.is_match(content)
}

pub struct CollaborationPass;

impl EvaluationPass for CollaborationPass {
    type Metrics = CollaborationMetrics;

    fn apply(&self, activity: &MemberActivity<'_>) -> CollaborationMetrics {
        let posts = &activity.posts;
        let post_count = posts.len();
        let total_likes: u64 = posts.iter().map(|p| u64::from(p.like_count)).sum();
        let total_comments: u64 = posts.iter().map(|p| u64::from(p.comment_count)).sum();

        let engagement_rate = if post_count == 0 {
            0.0
        } else {
            (total_likes + total_comments) as f64 / post_count as f64
        };
        let mention_count = activity
            .messages
            .iter()
            .filter(|m| has_mention(&m.content))
            .count();
        let knowledge_sharing = posts.iter().filter(|p| p.shares_knowledge()).count();

        let score = ENGAGEMENT.points(engagement_rate)
            + MENTIONS.points(mention_count as f64)
            + KNOWLEDGE_SHARING.points(knowledge_sharing as f64)
            + POSTS.points(post_count as f64);

        CollaborationMetrics {
            post_count,
            total_likes,
            total_comments,
            engagement_rate,
            mention_count,
            knowledge_sharing,
            score: score.min(MAX_SCORE),
        }
    }

    fn name(&self) -> &'static str {
        "collaboration_score"
    }
}
