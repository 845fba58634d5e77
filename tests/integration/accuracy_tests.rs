//! Integration tests for the accuracy checker
//!
//! Record files are written to temporary files and checked with a fake
//! classifier, so verdicts are fully controlled by the test.

use std::io::Write;
use tempfile::NamedTempFile;
use ua_census::accuracy::{check_records, BotClassifier};
use ua_census::output::{read_records, write_records};
use ua_census::{IsBotClassifier, UserAgentRecord};

/// Classifier fake: a fixed list of strings is bots, everything else is not
struct ListClassifier {
    bots: Vec<&'static str>,
}

impl BotClassifier for ListClassifier {
    fn is_bot(&self, user_agent: &str) -> bool {
        self.bots.contains(&user_agent)
    }
}

fn record(category: &str, title: &str, user_agents: &[&str]) -> UserAgentRecord {
    UserAgentRecord::new(
        category,
        title,
        user_agents.iter().map(|s| s.to_string()).collect(),
    )
}

#[test]
fn test_accuracy_over_record_file() {
    let file = NamedTempFile::new().unwrap();
    write_records(
        file.path(),
        &[
            record("crawlers", "BotX", &["BotX/1.0"]),
            record("browsers", "Fake Browser", &["BotX/1.0"]),
            record("browsers", "Firefox", &["BotX/1.0", "Firefox/121.0"]),
            record("crawlers", "Stealth", &["Firefox/121.0"]),
            record("other", "Misc", &["BotX/1.0"]),
            record("", "Untyped", &["BotX/1.0"]),
        ],
    )
    .unwrap();

    let records = read_records(file.path()).unwrap();
    let report = check_records(&records, &ListClassifier { bots: vec!["BotX/1.0"] });

    assert_eq!(report.total, 4);
    assert_eq!(report.success, 2);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.mismatches, 3);
    assert!((report.percentage() - 50.0).abs() < 0.001);
    assert_eq!(report.to_string(), "done 2/4 50.00%");
}

#[test]
fn test_records_with_missing_fields_are_skipped_or_failed() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"[
  {"title": "No Type", "user_agents": ["BotX/1.0"]},
  {"type": "crawlers", "title": "No Agents"},
  {"type": "crawlers", "user_agents": ["BotX/1.0"]}
]"#,
    )
    .unwrap();
    file.flush().unwrap();

    let records = read_records(file.path()).unwrap();
    let report = check_records(&records, &ListClassifier { bots: vec!["BotX/1.0"] });

    assert_eq!(report.skipped, 1);
    assert_eq!(report.total, 2);
    assert_eq!(report.success, 1);
}

#[test]
fn test_empty_record_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[]").unwrap();
    file.flush().unwrap();

    let records = read_records(file.path()).unwrap();
    let report = check_records(&records, &IsBotClassifier::new());

    assert_eq!(report.total, 0);
    assert_eq!(report.percentage(), 0.0);
}

#[test]
fn test_isbot_classifier_on_typical_records() {
    let records = vec![
        record(
            "crawlers",
            "Googlebot",
            &["Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)"],
        ),
        record(
            "browsers",
            "Firefox",
            &["Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0"],
        ),
    ];

    let report = check_records(&records, &IsBotClassifier::new());

    assert_eq!(report.total, 2);
    assert_eq!(report.success, 2);
}
