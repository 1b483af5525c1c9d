use checkfor::{scan_directory, search::FileProcessor, SearchRequest};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::{fs::File, io::Write};
use tempfile::tempdir;

fn create_test_files(
    dir: &tempfile::TempDir,
    file_count: usize,
    lines_per_file: usize,
) -> std::io::Result<()> {
    for i in 0..file_count {
        let file_path = dir.path().join(format!("test_{}.txt", i));
        let mut file = File::create(file_path)?;
        for j in 0..lines_per_file {
            writeln!(
                file,
                "Line {} TODO: fix bug {} FIXME: optimize line {} NOTE: important task {}",
                j, j, j, j
            )?;
        }
    }
    Ok(())
}

fn create_text(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("line {} TODO_item todo-list TODO: call foo() now", i))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_matching_modes(c: &mut Criterion) {
    let text = create_text(1000);

    let mut group = c.benchmark_group("Matching Modes");
    let modes = [
        ("substring", false, false),
        ("case_insensitive", true, false),
        ("whole_word", false, true),
        ("whole_word_case_insensitive", true, true),
    ];
    for (name, case_insensitive, whole_word) in modes {
        let mut request = SearchRequest::new("TODO");
        request.case_insensitive = case_insensitive;
        request.whole_word = whole_word;
        let processor = FileProcessor::new(&request);

        group.bench_function(name, |b| {
            b.iter(|| black_box(processor.process_text(black_box(&text))));
        });
    }
    group.finish();
}

fn bench_context_and_exclusions(c: &mut Criterion) {
    let text = create_text(1000);

    let mut group = c.benchmark_group("Context And Exclusions");
    for context in [0, 2, 10] {
        let mut request = SearchRequest::new("TODO");
        request.context = context;
        let processor = FileProcessor::new(&request);

        group.bench_function(format!("context_{}", context), |b| {
            b.iter(|| black_box(processor.process_text(black_box(&text))));
        });
    }

    let mut request = SearchRequest::new("TODO");
    request.exclude = vec!["foo()".to_string(), "line 5".to_string()];
    let processor = FileProcessor::new(&request);
    group.bench_function("exclusions", |b| {
        b.iter(|| black_box(processor.process_text(black_box(&text))));
    });
    group.finish();
}

fn bench_file_scaling(c: &mut Criterion) -> std::io::Result<()> {
    let dir = tempdir()?;
    let request = SearchRequest::new("TODO");

    let mut group = c.benchmark_group("File Scaling");
    for count in [1, 10, 100, 1000] {
        create_test_files(&dir, count, 10)?;

        group.bench_function(format!("files_{}", count), |b| {
            b.iter(|| black_box(scan_directory(dir.path(), &request).unwrap()));
        });
    }
    group.finish();
    Ok(())
}

fn bench_extension_filter(c: &mut Criterion) -> std::io::Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, 200, 10)?;
    for i in 0..20 {
        std::fs::write(dir.path().join(format!("code_{}.go", i)), create_text(10))?;
    }

    let mut request = SearchRequest::new("TODO");
    request.ext = Some(".go".to_string());

    c.bench_function("extension_filter", |b| {
        b.iter(|| black_box(scan_directory(dir.path(), &request).unwrap()));
    });
    Ok(())
}

fn run_file_benches(c: &mut Criterion) {
    bench_file_scaling(c).unwrap();
    bench_extension_filter(c).unwrap();
}

criterion_group!(
    benches,
    bench_matching_modes,
    bench_context_and_exclusions,
    run_file_benches
);
criterion_main!(benches);
