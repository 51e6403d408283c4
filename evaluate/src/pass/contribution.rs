use crate::pass::{Bucket, EvaluationPass, MemberActivity, Scored, MAX_SCORE};
use model::{ContributionMetrics, ContributionType, FileCategory};

const FILES: Bucket = Bucket::new(&[(5.0, 1.5), (2.0, 1.0)], 0.5);
const DOWNLOADS: Bucket = Bucket::new(&[(10.0, 1.0), (3.0, 0.5)], 0.0);
const DIVERSITY: Bucket = Bucket::new(&[(2.0, 1.5), (1.0, 1.0)], 0.5);
const POSTS: Bucket = Bucket::new(&[(3.0, 1.0), (1.0, 0.5)], 0.0);

impl Scored for ContributionMetrics {
    fn score(&self) -> f64 {
        self.score
    }
}

pub struct ContributionPass;

impl EvaluationPass for ContributionPass {
    type Metrics = ContributionMetrics;

    fn apply(&self, activity: &MemberActivity<'_>) -> ContributionMetrics {
        let files = &activity.files;
        let count_of = |category: FileCategory| files.iter().filter(|f| f.category == category).count();

        let document_files = count_of(FileCategory::Document);
        let code_files = count_of(FileCategory::Code);
        let design_files = count_of(FileCategory::Design);
        let total_downloads: u64 = files.iter().map(|f| u64::from(f.download_count)).sum();
        let post_count = activity.posts.len();

        let contribution_types: Vec<ContributionType> = [
            (ContributionType::Documentation, document_files),
            (ContributionType::Code, code_files),
            (ContributionType::Design, design_files),
            (ContributionType::Communication, post_count),
        ]
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(kind, _)| kind)
        .collect();
        let diversity_score = contribution_types.len();

        let score = FILES.points(files.len() as f64)
            + DOWNLOADS.points(total_downloads as f64)
            + DIVERSITY.points(diversity_score as f64)
            + POSTS.points(post_count as f64);

        ContributionMetrics {
            total_files: files.len(),
            total_downloads,
            document_files,
            code_files,
            design_files,
            post_count,
            contribution_types,
            diversity_score,
            score: score.min(MAX_SCORE),
        }
    }

    fn name(&self) -> &'static str {
        "contribution_score"
    }
}
