// Unit tests for Servease Match

use servease_match::core::lexical_score;
use servease_match::models::{PostStatus, ProviderProfile, ServicePost};
use servease_match::services::parse_ranked_ids;

fn post(title: &str, description: Option<&str>) -> ServicePost {
    ServicePost {
        id: 1,
        title: title.to_string(),
        description: description.map(String::from),
        location: None,
        budget_min: None,
        budget_max: None,
        status: PostStatus::Open,
    }
}

fn provider(skills: &[&str], verified: bool, rating: Option<f64>) -> ProviderProfile {
    ProviderProfile {
        id: 1,
        account_id: Some("acct_1".to_string()),
        name: "Test Provider".to_string(),
        title: None,
        description: None,
        skills: skills.iter().map(|s| s.to_string()).collect(),
        location: None,
        is_verified: Some(verified),
        rating,
    }
}

#[test]
fn test_lexical_score_empty_skills_is_rating_plus_verified() {
    let p = post("Any job at all", Some("details"));

    for (verified, rating, expected) in [
        (false, None, 0),
        (true, None, 2),
        (false, Some(4.9), 4),
        (true, Some(4.9), 6),
        (true, Some(0.2), 2),
    ] {
        let pr = provider(&[], verified, rating);
        assert_eq!(lexical_score(&p, &pr), expected);
    }
}

#[test]
fn test_lexical_score_is_non_negative() {
    let posts = [
        post("", None),
        post("short", None),
        post("a much longer title with many words", Some("and a description")),
    ];
    let providers = [
        provider(&[], false, None),
        provider(&["nothing matching"], false, Some(-5.0)),
        provider(&["words", "many words"], true, Some(3.3)),
    ];

    for p in &posts {
        for pr in &providers {
            assert!(lexical_score(p, pr) >= 0);
        }
    }
}

#[test]
fn test_lexical_score_exact_vs_token_behavior() {
    let p = post("Install kitchen cabinets", Some("carpentry work"));

    // Single-token skill that matches verbatim: 2 points
    let exact = provider(&["carpentry"], false, None);
    assert_eq!(lexical_score(&p, &exact), 2);

    // Two-token skill, not contiguous, both tokens present: 2 points as well
    let tokens = provider(&["kitchen carpentry"], false, None);
    assert_eq!(lexical_score(&p, &tokens), 2);

    // Three-token skill, all tokens present: 3 points, above a verbatim match.
    // This is the documented double-counting behavior, not an idealized law.
    let triple = provider(&["install kitchen carpentry"], false, None);
    assert_eq!(lexical_score(&p, &triple), 3);
}

#[test]
fn test_lexical_score_plumber_example() {
    let p = post("Need a plumber for leaky pipe", Some("urgent repair needed"));
    let pr = ProviderProfile {
        id: 9,
        account_id: Some("acct_9".to_string()),
        name: "A".to_string(),
        title: None,
        description: None,
        skills: vec!["plumbing".to_string(), "pipe repair".to_string()],
        location: None,
        is_verified: Some(true),
        rating: Some(4.0),
    };
    // skills contribute 0 + 2, rating 4, verified 2
    assert_eq!(lexical_score(&p, &pr), 8);
}

#[test]
fn test_parse_ranked_ids_is_permissive() {
    assert_eq!(parse_ranked_ids("1,2,3"), vec![1, 2, 3]);
    assert_eq!(parse_ranked_ids("  8 ,  5 "), vec![8, 5]);
    assert_eq!(
        parse_ranked_ids("Ranked best to worst: 4, 2, seven, 7"),
        vec![2, 7]
    );
    assert_eq!(parse_ranked_ids("none of this, is numeric"), Vec::<i64>::new());
    assert_eq!(parse_ranked_ids(""), Vec::<i64>::new());
}
