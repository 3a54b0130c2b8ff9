use form_auto_fill::classify::classify;
use form_auto_fill::models::{BlockSnapshot, QuestionKind};

/// 构造一个最常见的单选题快照
fn radio_snapshot() -> BlockSnapshot {
    BlockSnapshot {
        heading: Some("Which color?\n*".to_string()),
        radio_labels: vec!["Red".to_string(), "Green".to_string(), "Blue".to_string()],
        ..Default::default()
    }
}

#[test]
fn test_text_kind_detected() {
    let snapshot = BlockSnapshot {
        heading: Some("What is 2+2?".to_string()),
        text_inputs: 1,
        ..Default::default()
    };
    let question = classify(&snapshot);
    assert_eq!(question.kind, QuestionKind::Text);
    assert_eq!(question.prompt, "What is 2+2?");
    assert!(question.choices.is_empty(), "文本题不应当有选项");
}

#[test]
fn test_radio_kind_detected_with_choices() {
    let question = classify(&radio_snapshot());
    assert_eq!(question.kind, QuestionKind::Radio);
    assert_eq!(question.choices, vec!["Red", "Green", "Blue"]);
}

#[test]
fn test_dropdown_kind_detected() {
    let snapshot = BlockSnapshot {
        heading: Some("Pick one".to_string()),
        dropdown_labels: vec!["Choose".to_string(), "A".to_string(), "B".to_string()],
        ..Default::default()
    };
    let question = classify(&snapshot);
    assert_eq!(question.kind, QuestionKind::Dropdown);
    assert_eq!(question.choices.len(), 3);
}

#[test]
fn test_unknown_kind_when_no_affordance() {
    let snapshot = BlockSnapshot {
        heading: Some("Just a section title".to_string()),
        ..Default::default()
    };
    let question = classify(&snapshot);
    assert_eq!(question.kind, QuestionKind::Unknown);
    assert!(question.choices.is_empty());
}

#[test]
fn test_email_only_block_not_a_text_kind() {
    // 邮箱输入框不算文本题控件，邮箱题由题干规则直接定位邮箱输入框作答
    let snapshot = BlockSnapshot {
        heading: Some("Email *".to_string()),
        email_inputs: 1,
        ..Default::default()
    };
    assert_eq!(classify(&snapshot).kind, QuestionKind::Unknown);
}

#[test]
fn test_text_takes_priority_over_radio() {
    // 同一区块出现多种控件时按 文本 > 单选 > 下拉 判定
    let snapshot = BlockSnapshot {
        heading: Some("Mixed".to_string()),
        text_inputs: 1,
        radio_labels: vec!["A".to_string()],
        dropdown_labels: vec!["B".to_string()],
        ..Default::default()
    };
    assert_eq!(classify(&snapshot).kind, QuestionKind::Text);
}

#[test]
fn test_radio_takes_priority_over_dropdown() {
    let snapshot = BlockSnapshot {
        heading: Some("Mixed".to_string()),
        radio_labels: vec!["A".to_string()],
        dropdown_labels: vec!["B".to_string()],
        ..Default::default()
    };
    assert_eq!(classify(&snapshot).kind, QuestionKind::Radio);
}

#[test]
fn test_prompt_keeps_only_first_line() {
    let question = classify(&radio_snapshot());
    assert_eq!(question.prompt, "Which color?");
}

#[test]
fn test_prompt_empty_when_heading_missing() {
    let snapshot = BlockSnapshot {
        text_inputs: 1,
        ..Default::default()
    };
    assert_eq!(classify(&snapshot).prompt, "");
}

#[test]
fn test_image_reference_passed_through() {
    let snapshot = BlockSnapshot {
        heading: Some("See the picture".to_string()),
        image: Some("https://example.com/q1.png".to_string()),
        text_inputs: 1,
        ..Default::default()
    };
    let question = classify(&snapshot);
    assert_eq!(question.image.as_deref(), Some("https://example.com/q1.png"));
}

#[test]
fn test_classification_is_idempotent() {
    let snapshot = radio_snapshot();
    let first = classify(&snapshot);
    let second = classify(&snapshot);
    assert_eq!(first, second, "同一快照的分类结果应当恒定");
}
