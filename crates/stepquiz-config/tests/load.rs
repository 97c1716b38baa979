use stepquiz_config::quiz::error::{LoadingError, Severity};
use stepquiz_config::quiz::{has_errors, load_from_path, validate};
use stepquiz_test_helpers::fixtures::{capitals_quiz, write_temp_file};
use test_log::test;

#[test(tokio::test)]
async fn test_file_matches_fixture() {
    let content = load_from_path("test_configs/capitals.quiz.yaml").await.unwrap();
    let expected = capitals_quiz();
    assert_eq!(content.steps, expected.steps);
    for (id, question) in &expected.questions {
        let loaded = content.question(id).unwrap();
        assert_eq!(loaded.prompt, question.prompt);
        assert_eq!(loaded.r#type, question.r#type);
        assert_eq!(loaded.correct_answer, question.correct_answer);
    }
}

#[test(tokio::test)]
async fn test_broken_references() {
    let content = load_from_path("test_configs/broken-references.quiz.yaml").await.unwrap();
    let findings = validate(&content);
    assert!(has_errors(&findings));

    let errors = findings.iter().filter(|f| f.severity() == Severity::Error).count();
    let warnings = findings.iter().filter(|f| f.severity() == Severity::Warning).count();
    assert_eq!(errors, 2);
    assert_eq!(warnings, 2);
}

#[test(tokio::test)]
async fn test_missing_file() {
    let err = load_from_path("test_configs/does-not-exist.yaml").await.unwrap_err();
    assert!(matches!(err, LoadingError::Io { .. }));
    assert!(err.to_string().contains("does-not-exist.yaml"));
}

#[test(tokio::test)]
async fn test_invalid_yaml() {
    let (_dir, path) = write_temp_file("broken.quiz.yaml", "version: \"0.1\"\nquiz: [not, a, map]\n");
    assert!(matches!(load_from_path(&path).await, Err(LoadingError::ParseError(_))));
}
