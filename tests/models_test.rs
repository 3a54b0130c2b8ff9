use form_auto_fill::models::labels::{match_continuation, ContinuationKind};
use form_auto_fill::models::IdentityProfile;

// ========== 身份信息 ==========

#[test]
fn test_profile_defaults() {
    let profile = IdentityProfile::default();
    assert_eq!(profile.name, "Somchai Jaidee");
    assert_eq!(profile.id, "67990001");
    assert_eq!(profile.email, "67990001@kmitl.ac.th");
    assert_eq!(profile.class_index, 3);
}

#[test]
fn test_profile_toml_partial_override() {
    let mut profile = IdentityProfile::default();
    profile
        .apply_toml("name = \"Alice\"\nclass_index = 1\n")
        .expect("解析身份配置失败");

    // 出现的字段被覆盖
    assert_eq!(profile.name, "Alice");
    assert_eq!(profile.class_index, 1);
    // 缺省的字段保持原值
    assert_eq!(profile.id, "67990001");
    assert_eq!(profile.email, "67990001@kmitl.ac.th");
}

#[test]
fn test_profile_toml_full_override() {
    let mut profile = IdentityProfile::default();
    profile
        .apply_toml(
            "name = \"Bob\"\nid = \"67990099\"\nemail = \"bob@kmitl.ac.th\"\nclass_index = 0\n",
        )
        .expect("解析身份配置失败");

    assert_eq!(profile.name, "Bob");
    assert_eq!(profile.id, "67990099");
    assert_eq!(profile.email, "bob@kmitl.ac.th");
    assert_eq!(profile.class_index, 0);
}

#[test]
fn test_profile_invalid_toml_rejected() {
    let mut profile = IdentityProfile::default();
    assert!(profile.apply_toml("name = ").is_err());
    // 解析失败时不应污染已有字段
    assert_eq!(profile.name, "Somchai Jaidee");
}

#[test]
fn test_profile_empty_toml_keeps_defaults() {
    let mut profile = IdentityProfile::default();
    profile.apply_toml("").expect("空内容应当合法");
    assert_eq!(profile, IdentityProfile::default());
}

// ========== 翻页按钮文案 ==========

#[test]
fn test_continuation_next_labels() {
    assert_eq!(match_continuation("Next"), Some(ContinuationKind::Next));
    assert_eq!(match_continuation("ถัดไป"), Some(ContinuationKind::Next));
}

#[test]
fn test_continuation_submit_labels() {
    assert_eq!(match_continuation("Submit"), Some(ContinuationKind::Submit));
    assert_eq!(match_continuation("ส่ง"), Some(ContinuationKind::Submit));
}

#[test]
fn test_continuation_trims_whitespace() {
    assert_eq!(match_continuation(" ส่ง "), Some(ContinuationKind::Submit));
    assert_eq!(match_continuation("\nNext\n"), Some(ContinuationKind::Next));
}

#[test]
fn test_continuation_rejects_other_buttons() {
    // 表单上还有 Back / Clear form 等按钮，不能误触发翻页
    assert_eq!(match_continuation("Back"), None);
    assert_eq!(match_continuation("Clear form"), None);
    assert_eq!(match_continuation(""), None);
}
