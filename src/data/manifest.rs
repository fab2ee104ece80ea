/// A fixed list of `(logical key, file name)` pairs for one dataset group.
pub type Manifest = &'static [(&'static str, &'static str)];

/// Subdirectory of the data root holding the ADHD subreddit exports.
pub const ADHD_SUBDIR: &str = "ADHD_Reddit_dataset";

/// Subdirectory of the data root holding the general mental-health sets.
pub const MENTAL_HEALTH_SUBDIR: &str = "Mental_Health_datasets";

pub const ADHD_FILES: Manifest = &[
    ("adhd_comments", "ADHD-comment.csv"),
    ("adhd_posts", "ADHD.csv"),
    ("adhd_women_comments", "adhdwomen-comment.csv"),
    ("adhd_women_posts", "adhdwomen.csv"),
];

pub const MENTAL_HEALTH_FILES: Manifest = &[
    ("conversations", "Conversation.csv"),
    ("depression_reddit", "depression_dataset_reddit_cleaned.csv"),
    ("health_anxiety", "healthanxiety_dataset.csv"),
    ("reddit_mental_health", "reddit_mental_health_data.csv"),
    ("stress", "Stress.csv"),
    ("suicide_ideation", "Suicide_Ideation_Dataset.csv"),
];
