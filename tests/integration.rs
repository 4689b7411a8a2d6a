//! Integration tests for the sentir classification library.
//!
//! These tests verify end-to-end workflows combining multiple components.

use std::io::Write;

use sentir::features::{hstack, TextStatsExtractor};
use sentir::preprocessing::{LabelEncoder, RandomOverSampler};
use sentir::prelude::*;
use sentir::text::{
    PorterStemmer, Stemmer, TextNormalizer, TfidfVectorizer, Tokenizer, WhitespaceTokenizer,
};

const STATEMENTS_CSV: &str = "\
,statement,status
0,had a lovely walk with friends today,Normal
1,work went fine and dinner was good,Normal
2,feeling good after a quiet evening,Normal
3,nice weekend plans with the family,Normal
4,slept well and woke up feeling fine,Normal
5,good mood today everything is fine,Normal
6,my heart races and i panic constantly,Anxiety
7,constant worry and panic before meetings,Anxiety
8,the worry will not stop i panic,Anxiety
9,panic attacks and endless worry again,Anxiety
10,worry panic worry every single night,Anxiety
11,shaking with panic and sick with worry,Anxiety
12,everything feels empty and hopeless lately,Depression
13,no energy no joy just hopeless days,Depression
14,hopeless and empty i cannot get up,Depression
15,the emptiness and hopeless feeling remains,Depression
16,another hopeless morning feeling empty,Depression
17,empty inside and hopeless about tomorrow,Depression
";

#[test]
fn test_classifier_workflow() {
    // Presence features: column 0 marks calm words, column 1 worried words
    let x = Matrix::from_vec(
        6,
        2,
        vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0],
    )
    .unwrap();
    let y = vec![0, 0, 0, 1, 1, 1];

    // Train model
    let mut model = BernoulliNb::new().with_alpha(0.1);
    model.fit(&x, &y).expect("Failed to fit model");

    // Make predictions
    let predictions = model.predict(&x).expect("Failed to predict");
    assert_eq!(predictions, y);
    assert!((accuracy(&predictions, &y) - 1.0).abs() < 1e-6);

    // Test on new data following the learned presence pattern
    let new_x = Matrix::from_vec(1, 2, vec![0.0, 1.0]).unwrap();
    assert_eq!(model.predict(&new_x).unwrap(), vec![1]);
}

#[test]
fn test_pipeline_workflow_from_csv_file() {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(STATEMENTS_CSV.as_bytes())
        .expect("Failed to write corpus");

    let report = Pipeline::new(PipelineConfig::default())
        .run_csv(file.path())
        .expect("Pipeline run failed");

    assert_eq!(report.n_rows, 18);
    assert_eq!(report.n_skipped, 0);
    assert_eq!(report.n_train, 14);
    assert_eq!(report.n_test, 4);
    assert_eq!(report.classes, vec!["Anxiety", "Depression", "Normal"]);
    assert_eq!(report.evaluation.reports.len(), 4);

    // Every candidate produced a full per-class report
    for model in &report.evaluation.reports {
        assert_eq!(model.report.classes.len(), 3);
        assert_eq!(model.confusion.shape(), (3, 3));
    }

    // Rankings never increase down the table
    let ranked = report.evaluation.ranked();
    for pair in ranked.windows(2) {
        assert!(pair[0].accuracy() >= pair[1].accuracy());
    }

    // Distinctive vocabulary per class keeps the leaderboard high
    let best = report.evaluation.best().expect("No models evaluated");
    assert!(best.accuracy() >= 0.5, "best accuracy {}", best.accuracy());

    let rendered = report.to_string();
    for name in [
        "bernoulli_nb",
        "decision_tree",
        "logistic_regression",
        "gradient_boosting",
    ] {
        assert!(rendered.contains(name), "leaderboard missing {name}");
    }
}

#[test]
fn test_pipeline_determinism_across_runs() {
    let corpus = Corpus::from_reader(STATEMENTS_CSV.as_bytes()).unwrap();
    let mut suite = EvaluationSuite::new();
    suite.add_model(ModelConfig::BernoulliNb {
        alpha: 0.1,
        binarize: 0.0,
    });
    suite.add_model(ModelConfig::LogisticRegression {
        c: 10.0,
        max_iter: 200,
    });
    let pipeline = Pipeline::new(PipelineConfig::default()).with_suite(suite);

    let first = pipeline.run(&corpus).expect("first run failed");
    let second = pipeline.run(&corpus).expect("second run failed");

    assert_eq!(first.n_train_balanced, second.n_train_balanced);
    assert_eq!(first.n_features, second.n_features);
    for (a, b) in first
        .evaluation
        .reports
        .iter()
        .zip(second.evaluation.reports.iter())
    {
        assert_eq!(a.name, b.name);
        assert_eq!(a.report.accuracy, b.report.accuracy);
        assert_eq!(a.confusion, b.confusion);
    }
}

#[test]
fn test_seven_category_end_to_end() {
    // Two statements per category, each with its own distinctive vocabulary
    let train: [(&str, &str); 14] = [
        ("feeling happy and steady this week", "Normal"),
        ("i enjoy my routine and feel happy", "Normal"),
        ("sadness never lifts and everything is hollow", "Depression"),
        ("empty hollow sadness fills the morning", "Depression"),
        ("i want to end my life tonight", "Suicidal"),
        ("thinking about ending my life no will to live", "Suicidal"),
        ("panic and worry tighten my chest", "Anxiety"),
        ("racing heart constant worry and panic", "Anxiety"),
        ("deadlines pile up and the pressure is heavy", "Stress"),
        ("overworked and tense about deadlines", "Stress"),
        ("manic highs then sudden lows all month", "Bi-Polar"),
        ("swinging between manic highs and deep lows", "Bi-Polar"),
        ("unstable identity and explosive outbursts", "Personality disorder"),
        ("splitting on people my identity feels unstable", "Personality disorder"),
    ];
    // Fresh statements reusing each category's vocabulary
    let held_out: [(&str, &str); 7] = [
        ("happy steady week and a pleasant routine", "Normal"),
        ("hollow empty sadness again", "Depression"),
        ("no will to live i want to end my life", "Suicidal"),
        ("worry and panic grip my racing chest", "Anxiety"),
        ("tense and overworked with heavy deadlines", "Stress"),
        ("manic highs collapsing into lows", "Bi-Polar"),
        ("explosive splitting and an unstable identity", "Personality disorder"),
    ];

    let train_statements: Vec<&str> = train.iter().map(|(s, _)| *s).collect();
    let train_labels: Vec<&str> = train.iter().map(|(_, l)| *l).collect();
    let test_statements: Vec<&str> = held_out.iter().map(|(s, _)| *s).collect();
    let test_labels: Vec<&str> = held_out.iter().map(|(_, l)| *l).collect();

    let mut encoder = LabelEncoder::new();
    let y_train = encoder.fit_transform(&train_labels).expect("encode failed");
    let y_test = encoder.transform(&test_labels).expect("encode failed");
    assert_eq!(encoder.classes().len(), 7);

    let normalizer = TextNormalizer::new();
    let tokenizer = WhitespaceTokenizer::new();
    let stemmer = PorterStemmer::new();
    let prepare = |statements: &[&str]| -> Vec<String> {
        statements
            .iter()
            .map(|raw| {
                let cleaned = normalizer.normalize(raw);
                let tokens = tokenizer.tokenize(&cleaned).expect("tokenize failed");
                let stems = stemmer.stem_tokens(&tokens).expect("stem failed");
                stems.join(" ")
            })
            .collect()
    };
    let train_docs = prepare(&train_statements);
    let test_docs = prepare(&test_statements);

    let mut vectorizer = TfidfVectorizer::new().with_ngram_range(1, 2);
    let terms_train = vectorizer.fit_transform(&train_docs).expect("fit failed");
    let terms_test = vectorizer.transform(&test_docs).expect("transform failed");

    let extractor = TextStatsExtractor::new();
    let stats_train = TextStatsExtractor::to_matrix(&extractor.extract_all(&train_statements));
    let stats_test = TextStatsExtractor::to_matrix(&extractor.extract_all(&test_statements));

    let x_train = hstack(&[&terms_train, &stats_train]).expect("fuse failed");
    let x_test = hstack(&[&terms_test, &stats_test]).expect("fuse failed");
    assert_eq!(x_test.n_cols(), x_train.n_cols());

    // Two per class already, so balancing leaves the split unchanged
    let sampler = RandomOverSampler::new().with_random_state(101);
    let (x_train, y_train) = sampler
        .fit_resample(&x_train, &y_train)
        .expect("resample failed");
    assert_eq!(y_train.len(), 14);

    let mut model = BernoulliNb::new().with_alpha(0.1).with_binarize(0.0);
    model.fit(&x_train, &y_train).expect("fit failed");
    let predictions = model.predict(&x_test).expect("predict failed");

    let score = accuracy(&predictions, &y_test);
    assert!(score >= 0.9, "held-out accuracy {score}");
}

#[test]
fn test_missing_rows_are_skipped() {
    let csv = "\
,statement,status
0,feeling fine and calm,Normal
1,,Normal
2,panic and worry again,
3,hopeless and empty days,Depression
4,good dinner with friends,Normal
5,endless panic and worry,Anxiety
6,slept well and feel rested,Normal
7,the worry keeps me awake,Anxiety
8,empty mornings and hopeless nights,Depression
9,quiet walk cleared my head,Normal
10,panic rising before every call,Anxiety
11,no joy left just hopeless hours,Depression
12,lovely weekend with the family,Normal
13,shaking with worry on the train,Anxiety
14,,Depression
15,feeling good about the week ahead,Normal
16,hopeless and tired of everything,Depression
17,worry and panic over nothing,Anxiety
18,calm evening and a warm meal,Normal
19,everything feels empty again,Depression
";
    // 20 raw rows, 3 unusable: two blank statements, one blank status
    let corpus = Corpus::from_reader(csv.as_bytes()).unwrap();
    assert_eq!(corpus.len(), 17);
    assert_eq!(corpus.n_skipped(), 3);
    assert_eq!(corpus.n_missing_statement(), 2);
    assert_eq!(corpus.n_missing_status(), 1);

    let counts = corpus.class_counts();
    assert_eq!(counts["Normal"], 7);
    assert_eq!(counts["Anxiety"], 5);
    assert_eq!(counts["Depression"], 5);
}

#[test]
fn test_oversampler_equalizes_training_classes() {
    let x = Matrix::from_vec(6, 1, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    let y = vec![0, 0, 0, 0, 1, 1];

    let sampler = RandomOverSampler::new().with_random_state(101);
    let (x_balanced, y_balanced) = sampler.fit_resample(&x, &y).expect("resample failed");

    assert_eq!(y_balanced.len(), 8);
    assert_eq!(x_balanced.n_rows(), 8);
    // Originals survive in order, duplicates follow
    assert_eq!(&y_balanced[..6], &y[..]);
    let minority = y_balanced.iter().filter(|&&c| c == 1).count();
    assert_eq!(minority, 4);
    // Duplicated rows carry minority-class feature values
    for row in 6..8 {
        assert!(x_balanced.get(row, 0) >= 4.0);
    }
}

#[test]
fn test_feature_fusion_rejects_misaligned_blocks() {
    let a = Matrix::zeros(3, 2);
    let b = Matrix::zeros(2, 2);
    assert!(hstack(&[&a, &b]).is_err());

    let c = Matrix::zeros(3, 3);
    let fused = hstack(&[&a, &c]).expect("aligned blocks should fuse");
    assert_eq!(fused.shape(), (3, 5));
}

#[test]
fn test_label_codec_round_trip() {
    let labels = ["Normal", "Anxiety", "Depression", "Normal", "Anxiety"];
    let mut encoder = LabelEncoder::new();
    let codes = encoder.fit_transform(&labels).expect("fit_transform failed");

    assert_eq!(encoder.classes(), ["Anxiety", "Depression", "Normal"]);
    assert_eq!(codes, vec![2, 0, 1, 2, 0]);

    let decoded = encoder.inverse_transform(&codes).expect("inverse failed");
    assert_eq!(decoded, labels.map(String::from));

    assert!(encoder.transform(&["Bi-Polar"]).is_err());
}
