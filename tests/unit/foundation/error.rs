use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SublineError::transcript("x")
            .to_string()
            .contains("transcript error:")
    );
    assert!(
        SublineError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn font_error_names_resource_platform_and_remedy() {
    let err = SublineError::Font {
        family: "Impact".to_string(),
        attempted: vec![
            std::path::PathBuf::from("/usr/share/fonts/Impact.ttf"),
            std::path::PathBuf::from("/usr/local/share/fonts/Impact.ttf"),
        ],
        platform: "linux",
    };
    let msg = err.to_string();
    assert!(msg.contains("Impact"));
    assert!(msg.contains("linux"));
    assert!(msg.contains("/usr/share/fonts/Impact.ttf"));
    assert!(msg.contains("/usr/local/share/fonts/Impact.ttf"));
    assert!(msg.contains("install the font"));
}

#[test]
fn font_error_with_no_candidates_still_renders() {
    let err = SublineError::Font {
        family: "Ghost".to_string(),
        attempted: vec![],
        platform: "macos",
    };
    assert!(err.to_string().contains("no candidate paths"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SublineError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn warnings_name_both_sides_of_a_fallback() {
    let w = RenderWarning::UnknownStyle {
        requested: "xyz123".to_string(),
        fallback: "modern_bold".to_string(),
    };
    let msg = w.to_string();
    assert!(msg.contains("xyz123"));
    assert!(msg.contains("modern_bold"));

    let w = RenderWarning::WordSkipped {
        word: "HELLO".to_string(),
        reason: "no glyphs".to_string(),
    };
    assert!(w.to_string().contains("HELLO"));
}
