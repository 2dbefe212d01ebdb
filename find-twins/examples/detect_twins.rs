use find_twins::{AuthorId, AuthorPair, DetectorConfig, MessageRecord, TwinDetector};

fn main() {
    let records = vec![
        MessageRecord::new("alice", "Is the release branch frozen yet?"),
        MessageRecord::new("alice_alt", "is the release branch frozen yet?"),
        MessageRecord::new("bob", "Is the release branch frozen yet?"),
        MessageRecord::new("alice", "frozen release branch means no merges"),
        MessageRecord::new("alice_alt", "no merges while the release branch is frozen"),
        MessageRecord::new("bob", "thanks, looks good"),
        MessageRecord::new("bob", "I will review the parser patch tomorrow"),
    ];

    // Compares the top-10 words of authors with threshold 0.7,
    // softened for authors with fewer than 3 counted words.
    let detector = TwinDetector::new(&DetectorConfig::default()).unwrap();

    let report = detector.detect(&records);
    assert_eq!(report.duplicate_pairs().len(), 3);
    assert_eq!(
        report.into_twins(),
        vec![AuthorPair::new(
            AuthorId::from("alice"),
            AuthorId::from("alice_alt")
        )]
    );
}
