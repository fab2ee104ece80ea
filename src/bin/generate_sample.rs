use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use encoding_rs::WINDOWS_1252;

use mental_health_data::config::DEFAULT_ROOT;
use mental_health_data::data::manifest::{ADHD_SUBDIR, MENTAL_HEALTH_SUBDIR};
use mental_health_data::MentalHealthDataLoader;

/// Deterministic row sampler (SplitMix64), so every run writes the same tree.
struct RowRng(u64);

impl RowRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in `0..n`.
    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    /// Uniform in `[0, 1)`.
    fn fraction(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u64) as usize]
    }
}

// ---------------------------------------------------------------------------
// Text snippets
// ---------------------------------------------------------------------------

const ADHD_TITLES: &[&str] = &[
    "Can\u{2019}t focus on anything today",
    "Finally diagnosed at 31 \u{2014} so much makes sense now",
    "Does anyone else forget to eat?",
    "Hyperfocus ate my whole weekend",
    "Tips for \u{201c}body doubling\u{201d} while working from home",
    "Meds started working, feeling calm",
];

const ADHD_COMMENTS: &[&str] = &[
    "Same here, timers help me a lot.",
    "I keep my keys in the fridge, apparently.",
    "Café study sessions are my secret weapon.",
    "Try breaking it into tiny steps, seriously.",
    "This is so relatable, thank you for posting.",
];

const LATIN1_COMMENTS: &[&str] = &[
    "Merci, ça m'aide beaucoup.",
    "Niño, I feel the same way.",
    "Über-organised planners never work for me.",
    "Plain old paper lists work best.",
];

const MH_TEXTS: &[&str] = &[
    "I haven't slept properly in weeks and everything feels heavy.",
    "Work stress is getting to me, my chest feels tight.",
    "Had a good day today, went for a walk with friends.",
    "Every headache makes me think something is seriously wrong.",
    "Therapy has been helping, slowly but surely.",
    "I feel like nobody would notice if I disappeared.",
];

const SUBREDDITS: &[&str] = &["ptsd", "anxiety", "stress", "relationships", "domesticviolence"];

// ---------------------------------------------------------------------------
// Output encodings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum SampleEncoding {
    Utf8,
    Utf8Bom,
    Latin1,
    Windows1252,
}

impl SampleEncoding {
    fn encode(self, text: &str) -> Vec<u8> {
        match self {
            SampleEncoding::Utf8 => text.as_bytes().to_vec(),
            SampleEncoding::Utf8Bom => {
                let mut bytes = "\u{feff}".as_bytes().to_vec();
                bytes.extend_from_slice(text.as_bytes());
                bytes
            }
            SampleEncoding::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
            SampleEncoding::Windows1252 => WINDOWS_1252.encode(text).0.into_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Sample files
// ---------------------------------------------------------------------------

struct SampleFile {
    subdir: &'static str,
    filename: &'static str,
    encoding: SampleEncoding,
    header: &'static [&'static str],
    row: fn(&mut RowRng, usize) -> Vec<String>,
}

fn post_row(rng: &mut RowRng, i: usize) -> Vec<String> {
    vec![
        format!("p{i:05}"),
        rng.pick(ADHD_TITLES).to_string(),
        rng.pick(ADHD_COMMENTS).to_string(),
        rng.below(500).to_string(),
        (1_600_000_000 + rng.below(100_000_000)).to_string(),
    ]
}

fn comment_row(rng: &mut RowRng, i: usize) -> Vec<String> {
    vec![
        format!("c{i:05}"),
        format!("p{:05}", rng.below(50)),
        rng.pick(ADHD_COMMENTS).to_string(),
        rng.below(120).to_string(),
    ]
}

fn latin1_comment_row(rng: &mut RowRng, i: usize) -> Vec<String> {
    vec![
        format!("c{i:05}"),
        format!("p{:05}", rng.below(50)),
        rng.pick(LATIN1_COMMENTS).to_string(),
        rng.below(120).to_string(),
    ]
}

fn conversation_row(rng: &mut RowRng, _: usize) -> Vec<String> {
    vec![
        rng.pick(MH_TEXTS).to_string(),
        "Thank you for sharing. What has helped you before?".to_string(),
    ]
}

fn labelled_text_row(rng: &mut RowRng, _: usize) -> Vec<String> {
    vec![rng.pick(MH_TEXTS).to_string(), rng.below(2).to_string()]
}

fn titled_text_row(rng: &mut RowRng, _: usize) -> Vec<String> {
    vec![
        rng.pick(ADHD_TITLES).to_string(),
        rng.pick(MH_TEXTS).to_string(),
        rng.below(2).to_string(),
    ]
}

fn stress_row(rng: &mut RowRng, i: usize) -> Vec<String> {
    let start = rng.below(20);
    vec![
        rng.pick(SUBREDDITS).to_string(),
        format!("8{i:05}"),
        format!("({start}, {})", start + 5),
        rng.pick(LATIN1_COMMENTS).to_string(),
        rng.below(2).to_string(),
        format!("{:.2}", 0.5 + rng.fraction() / 2.0),
        (1_520_000_000 + rng.below(20_000_000)).to_string(),
    ]
}

fn suicide_row(rng: &mut RowRng, _: usize) -> Vec<String> {
    let label = if rng.below(3) == 0 {
        "Potential Suicide post"
    } else {
        "Not Suicide post"
    };
    vec![rng.pick(MH_TEXTS).to_string(), label.to_string()]
}

const SAMPLE_FILES: &[SampleFile] = &[
    SampleFile {
        subdir: ADHD_SUBDIR,
        filename: "ADHD.csv",
        encoding: SampleEncoding::Utf8,
        header: &["id", "title", "selftext", "score", "created_utc"],
        row: post_row,
    },
    SampleFile {
        subdir: ADHD_SUBDIR,
        filename: "ADHD-comment.csv",
        encoding: SampleEncoding::Utf8Bom,
        header: &["id", "post_id", "body", "score"],
        row: comment_row,
    },
    SampleFile {
        subdir: ADHD_SUBDIR,
        filename: "adhdwomen.csv",
        encoding: SampleEncoding::Windows1252,
        header: &["id", "title", "selftext", "score", "created_utc"],
        row: post_row,
    },
    SampleFile {
        subdir: ADHD_SUBDIR,
        filename: "adhdwomen-comment.csv",
        encoding: SampleEncoding::Latin1,
        header: &["id", "post_id", "body", "score"],
        row: latin1_comment_row,
    },
    SampleFile {
        subdir: MENTAL_HEALTH_SUBDIR,
        filename: "Conversation.csv",
        encoding: SampleEncoding::Utf8,
        header: &["question", "answer"],
        row: conversation_row,
    },
    SampleFile {
        subdir: MENTAL_HEALTH_SUBDIR,
        filename: "depression_dataset_reddit_cleaned.csv",
        encoding: SampleEncoding::Utf8,
        header: &["clean_text", "is_depression"],
        row: labelled_text_row,
    },
    SampleFile {
        subdir: MENTAL_HEALTH_SUBDIR,
        filename: "healthanxiety_dataset.csv",
        encoding: SampleEncoding::Windows1252,
        header: &["title", "text", "label"],
        row: titled_text_row,
    },
    SampleFile {
        subdir: MENTAL_HEALTH_SUBDIR,
        filename: "reddit_mental_health_data.csv",
        encoding: SampleEncoding::Utf8,
        header: &["title", "text", "target"],
        row: titled_text_row,
    },
    SampleFile {
        subdir: MENTAL_HEALTH_SUBDIR,
        filename: "Stress.csv",
        encoding: SampleEncoding::Latin1,
        header: &[
            "subreddit",
            "post_id",
            "sentence_range",
            "text",
            "label",
            "confidence",
            "social_timestamp",
        ],
        row: stress_row,
    },
    SampleFile {
        subdir: MENTAL_HEALTH_SUBDIR,
        filename: "Suicide_Ideation_Dataset.csv",
        encoding: SampleEncoding::Utf8,
        header: &["Tweet", "Suicide"],
        row: suicide_row,
    },
];

fn render_csv(sample: &SampleFile, rows: usize, rng: &mut RowRng) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(sample.header)?;
    for i in 0..rows {
        writer.write_record((sample.row)(rng, i))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV buffer: {e}"))?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

fn write_sample(root: &Path, sample: &SampleFile, rows: usize, rng: &mut RowRng) -> Result<()> {
    let dir = root.join(sample.subdir);
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let text = render_csv(sample, rows, rng)?;
    let path = dir.join(sample.filename);
    fs::write(&path, sample.encoding.encode(&text))
        .with_context(|| format!("writing {}", path.display()))?;

    log::info!("wrote {} ({rows} rows, {:?})", path.display(), sample.encoding);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let root = args.next().map_or_else(|| PathBuf::from(DEFAULT_ROOT), PathBuf::from);
    let rows: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid row count: {n}"))?,
        None => 50,
    };

    let mut rng = RowRng(42);
    for sample in SAMPLE_FILES {
        write_sample(&root, sample, rows, &mut rng)?;
    }

    let info = MentalHealthDataLoader::new(&root).get_dataset_info();
    log::info!(
        "loaded {} datasets back:\n{}",
        info.len(),
        serde_json::to_string_pretty(&info)?
    );
    Ok(())
}
