use perf_report::aggregator::{aggregate_stacks, calculate_sample_distribution, StackAggregate};
use perf_report::parser::FunctionSample;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn sample(name: &str, count: u64) -> FunctionSample {
    FunctionSample {
        function_name: name.to_string(),
        sample_count: count,
    }
}

#[test]
fn test_aggregate_stacks_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "main;foo;bar 5").unwrap();
    writeln!(file, "main;foo;baz 3").unwrap();

    let top = aggregate_stacks(file.path(), 15).unwrap();

    assert_eq!(
        top,
        vec![
            sample("main", 8),
            sample("foo", 8),
            sample("bar", 5),
            sample("baz", 3),
        ]
    );
}

#[test]
fn test_aggregate_stacks_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(aggregate_stacks(&dir.path().join("missing.txt"), 15).is_err());
}

#[test]
fn test_default_top_n_truncates() {
    let content: String = (0..40).map(|i| format!("f{} {}\n", i, i + 1)).collect();
    let top = StackAggregate::from_text(&content).top_functions(15);

    assert_eq!(top.len(), 15);
    assert_eq!(top[0], sample("f39", 40));
    assert_eq!(top[14], sample("f25", 26));
}

#[test]
fn test_merge_matches_concatenation() {
    let a = "main;parse;lex 10\nmain;eval 4\nbad line\n";
    let b = "main;eval 6\nworker;io 2\n";

    let mut merged = StackAggregate::from_text(a);
    merged.merge(&StackAggregate::from_text(b));

    assert_eq!(merged, StackAggregate::from_text(&format!("{}{}", a, b)));
    assert_eq!(merged.skipped_lines(), 1);
}

#[test]
fn test_distribution_from_file_aggregate() {
    let aggregate = StackAggregate::from_text("a;b 3\na;c 1\n");
    let dist = calculate_sample_distribution(&aggregate);
    assert_eq!(dist.total_samples, 4);
    assert_eq!(dist.function_count, 3);
}

fn stack_line() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(prop::sample::select(vec!["main", "a", "b", "c", "d"]), 1..5),
        0u64..1000,
    )
        .prop_map(|(frames, count)| format!("{} {}", frames.join(";"), count))
}

fn stack_file() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => stack_line(),
            1 => Just("garbage".to_string()),
            1 => Just("main;x notanumber".to_string()),
        ],
        0..30,
    )
    .prop_map(|lines| lines.into_iter().map(|l| l + "\n").collect())
}

proptest! {
    #[test]
    fn prop_self_merge_equals_doubled_file(content in stack_file()) {
        let mut twice = StackAggregate::from_text(&content);
        twice.merge(&StackAggregate::from_text(&content));

        let doubled = StackAggregate::from_text(&format!("{}{}", content, content));
        prop_assert_eq!(twice, doubled);
    }

    #[test]
    fn prop_merge_is_associative(a in stack_file(), b in stack_file(), c in stack_file()) {
        let mut left = StackAggregate::from_text(&a);
        left.merge(&StackAggregate::from_text(&b));
        left.merge(&StackAggregate::from_text(&c));

        let mut right_tail = StackAggregate::from_text(&b);
        right_tail.merge(&StackAggregate::from_text(&c));
        let mut right = StackAggregate::from_text(&a);
        right.merge(&right_tail);

        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_top_n_bounded_and_sorted(content in stack_file(), top_n in 0usize..10) {
        let top = StackAggregate::from_text(&content).top_functions(top_n);

        prop_assert!(top.len() <= top_n);
        for pair in top.windows(2) {
            prop_assert!(pair[0].sample_count >= pair[1].sample_count);
        }
    }
}
