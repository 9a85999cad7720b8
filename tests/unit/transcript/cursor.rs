use super::*;

fn transcript() -> Transcript {
    Transcript::new(vec![
        WordTiming::new("THE", 0.0, 0.3),
        WordTiming::new("QUICK", 0.3, 0.7),
        WordTiming::new("BROWN", 0.9, 1.4),
        WordTiming::new("FOX", 1.4, 1.8),
    ])
    .unwrap()
}

#[test]
fn policy_invariants_are_validated() {
    assert!(ActivePolicy::exact().validate().is_ok());
    assert!(ActivePolicy::with_grace(f64::NAN).validate().is_err());
    assert!(ActivePolicy::with_grace(-1.0).validate().is_err());
    assert!(ActivePolicy::rolling(0, 0.0).validate().is_err());
    assert!(ActiveCursor::new(ActivePolicy::rolling(0, 0.0)).is_err());
}

#[test]
fn in_order_queries_match_the_stateless_lookup() {
    let t = transcript();
    for policy in [
        ActivePolicy::exact(),
        ActivePolicy::with_grace(0.15),
        ActivePolicy::rolling(3, 0.15),
    ] {
        let mut cursor = ActiveCursor::new(policy).unwrap();
        for i in 0..=60 {
            let ts = f64::from(i) / 30.0;
            assert_eq!(
                cursor.active(&t, ts),
                t.active_words_at(ts, &policy),
                "policy {policy:?} diverged at t={ts}"
            );
        }
    }
}

#[test]
fn out_of_order_query_falls_back_to_search() {
    let t = transcript();
    let policy = ActivePolicy::exact();
    let mut cursor = ActiveCursor::new(policy).unwrap();

    assert_eq!(cursor.active(&t, 1.5), t.active_words_at(1.5, &policy));
    // Jump backwards, then forwards again.
    assert_eq!(cursor.active(&t, 0.1), t.active_words_at(0.1, &policy));
    assert_eq!(cursor.active(&t, 1.0), t.active_words_at(1.0, &policy));
}

#[test]
fn rolling_window_holds_the_trailing_phrase() {
    let t = transcript();
    let mut cursor = ActiveCursor::new(ActivePolicy::rolling(2, 0.3)).unwrap();

    let texts = |words: &[WordTiming]| -> Vec<String> {
        words.iter().map(|w| w.text.clone()).collect()
    };

    assert_eq!(texts(cursor.active(&t, 0.1)), ["THE"]);
    assert_eq!(texts(cursor.active(&t, 0.5)), ["THE", "QUICK"]);
    assert_eq!(texts(cursor.active(&t, 1.0)), ["QUICK", "BROWN"]);
    // FOX ends at 1.8; grace keeps the phrase up briefly.
    assert_eq!(texts(cursor.active(&t, 1.9)), ["BROWN", "FOX"]);
    assert!(cursor.active(&t, 2.2).is_empty());
}

#[test]
fn exact_policy_returns_at_most_one_word() {
    let t = transcript();
    let mut cursor = ActiveCursor::new(ActivePolicy::exact()).unwrap();
    for i in 0..=60 {
        let ts = f64::from(i) / 30.0;
        assert!(cursor.active(&t, ts).len() <= 1);
    }
}
