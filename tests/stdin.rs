//! The no-argument constructor reads standard input, so these tests re-run this test binary
//! as a child process with a fixture piped into it.

use std::{
    env,
    fs::File,
    path::PathBuf,
    process::{Command, Stdio},
};

use word_frequency::{FrequencyReport, WordFrequency};

const CHILD_ENV: &str = "WORD_FREQUENCY_STDIN_CHILD";
const MARKER: &str = "REPORT ";
const QUERIED: [&str; 4] = ["the", "lamp", "keeper's", "non-existent-!word"];

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn report(frequencies: &WordFrequency) -> serde_json::Value {
    let queried: Vec<String> = QUERIED.iter().map(|word| word.to_string()).collect();
    serde_json::to_value(FrequencyReport::new(frequencies, 5, &queried)).unwrap()
}

/// Runs inside the child only: counts stdin twice and prints both reports
#[test]
fn stdin_child() {
    if env::var_os(CHILD_ENV).is_none() {
        return;
    }
    let first = WordFrequency::from_stdin();
    let second = WordFrequency::from_stdin();
    println!("{}{}", MARKER, report(&first));
    println!("{}{}", MARKER, report(&second));
}

#[test]
fn stdin_is_read_once() {
    let output = Command::new(env::current_exe().unwrap())
        .args(["--exact", "stdin_child", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .stdin(Stdio::from(File::open(data("lighthouse.txt")).unwrap()))
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8(output.stdout).unwrap();
    let reports: Vec<serde_json::Value> = stdout
        .lines()
        // libtest may print the test name on the same line
        .filter_map(|line| line.split_once(MARKER).map(|(_, json)| json))
        .map(|json| serde_json::from_str(json).unwrap())
        .collect();
    assert_eq!(reports.len(), 2, "{stdout}");

    let first = &reports[0];
    let expected = report(&WordFrequency::from_path(data("lighthouse.txt")));
    assert_eq!(first, &expected);
    assert_eq!(first["number_of_words"], 138);
    assert_eq!(first["most_frequent_word"], "the");
    assert_eq!(first["queried"][0]["count"], 24);

    // Drained stdin: the same as a table that never saw any text
    let second = &reports[1];
    assert_eq!(second, &report(&WordFrequency::new()));
    assert_eq!(second["number_of_words"], 0);
    assert_eq!(second["most_frequent_word"], "");
    assert_eq!(second["bucket_size_average"], 0.0);
    assert_eq!(second["max_bucket_size"], 0);
}
