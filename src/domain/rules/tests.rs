// Unit tests for business rules

use super::*;

#[test]
fn test_preview_file_name_uses_stem() {
    let name = PreviewRules::preview_file_name(Path::new("/videos/ocean.mov"), 30).unwrap();
    assert_eq!(name, "preview_ocean.mp4");
}

#[test]
fn test_preview_file_name_truncates_long_stems() {
    let source = PathBuf::from(format!("/videos/{}.mp4", "a".repeat(50)));
    let name = PreviewRules::preview_file_name(&source, 30).unwrap();
    assert_eq!(name, format!("preview_{}.mp4", "a".repeat(30)));
}

#[test]
fn test_preview_file_name_truncates_on_char_boundary() {
    let source = PathBuf::from(format!("/videos/{}.mp4", "é".repeat(40)));
    let name = PreviewRules::preview_file_name(&source, 30).unwrap();
    assert_eq!(name, format!("preview_{}.mp4", "é".repeat(30)));
}

#[test]
fn test_preview_file_name_requires_stem() {
    assert!(PreviewRules::preview_file_name(Path::new("/"), 30).is_err());
}

#[test]
fn test_preview_duration_is_capped() {
    assert_eq!(PreviewRules::preview_duration(12.0, 5.0).unwrap(), 5.0);
    assert_eq!(PreviewRules::preview_duration(3.2, 5.0).unwrap(), 3.2);
    assert!(PreviewRules::preview_duration(0.0, 5.0).is_err());
    assert!(PreviewRules::preview_duration(4.0, 0.0).is_err());
}

#[test]
fn test_task_id_validation() {
    assert!(TaskIdRules::validate("task_01-a").is_ok());
    assert!(TaskIdRules::validate("").is_err());
    assert!(TaskIdRules::validate("../escape").is_err());
    assert!(TaskIdRules::validate(&"x".repeat(65)).is_err());
}

#[test]
fn test_collapse_duplicates_keeps_first_occurrence() {
    let paths = vec![
        PathBuf::from("b.mp4"),
        PathBuf::from("a.mp4"),
        PathBuf::from("b.mp4"),
    ];
    assert_eq!(
        SelectionRules::collapse_duplicates(paths),
        vec![PathBuf::from("b.mp4"), PathBuf::from("a.mp4")]
    );
}

#[test]
fn test_normalize_terms() {
    let terms = vec![
        " ocean ".to_string(),
        String::new(),
        "Ocean".to_string(),
        "city".to_string(),
    ];
    assert_eq!(
        SelectionRules::normalize_terms(&terms),
        vec!["ocean".to_string(), "city".to_string()]
    );
}
