mod common;

use std::time::Duration;

use common::setup_test_env;
use rewards_console::{
    config::ConsoleConfig,
    data::{DataProvider, SeedData},
    errors::{ConsoleError, UploadError},
    notify::{NoticeKind, RecordingNotifier},
    profile::{AvatarFile, ProfileEditor, SimulatedUploader},
};

fn seeded_editor() -> (ProfileEditor, SimulatedUploader) {
    let (_, config) = setup_test_env();
    let editor = ProfileEditor::from_config(SeedData.current_profile(), &config);
    let uploader = SimulatedUploader::from_config(&ConsoleConfig {
        upload_delay_ms: 1,
        ..config
    });
    (editor, uploader)
}

#[tokio::test]
async fn password_change_and_profile_save() {
    let (mut editor, uploader) = seeded_editor();
    editor.set_field("bio", "Runs the rewards console.");
    editor.set_field("currentPassword", "hunter22");
    editor.set_field("newPassword", "correct-horse");
    editor.set_field("confirmPassword", "correct-horse");
    let sink = RecordingNotifier::new();

    let profile = editor.save(&uploader, &sink).await.unwrap();
    assert_eq!(profile.bio, "Runs the rewards console.");
    assert_eq!(profile.name, "Admin User");
    assert_eq!(sink.last().unwrap().message, "Profile updated");
}

#[tokio::test]
async fn mismatched_passwords_keep_the_form() {
    let (mut editor, uploader) = seeded_editor();
    editor.set_field("currentPassword", "hunter22");
    editor.set_field("newPassword", "correct-horse");
    editor.set_field("confirmPassword", "correct-horse!");
    let sink = RecordingNotifier::new();

    let result = editor.save(&uploader, &sink).await;
    assert!(matches!(result, Err(ConsoleError::Validation(_))));
    assert!(editor.has_unsaved_changes());
    let notice = sink.last().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.description.as_deref(), Some("New passwords do not match"));
}

#[tokio::test]
async fn current_password_without_new_one_fails() {
    let (mut editor, uploader) = seeded_editor();
    editor.set_field("currentPassword", "old");
    let sink = RecordingNotifier::new();

    let result = editor.save(&uploader, &sink).await;
    assert!(matches!(result, Err(ConsoleError::Validation(_))));
    assert_eq!(
        sink.last().unwrap().description.as_deref(),
        Some("Password must be at least 8 characters")
    );
}

#[tokio::test]
async fn non_image_avatar_is_rejected() {
    let (mut editor, uploader) = seeded_editor();
    editor.choose_avatar(AvatarFile::new("notes.txt", "text/plain", b"hi".to_vec()));
    let sink = RecordingNotifier::new();

    let result = editor.save(&uploader, &sink).await;
    assert!(matches!(
        result,
        Err(ConsoleError::Upload(UploadError::UnsupportedType(_)))
    ));
    assert!(editor.profile().avatar_url.is_none());
}

#[tokio::test]
async fn result_after_teardown_is_dropped() {
    let (mut editor, _) = seeded_editor();
    let slow = SimulatedUploader::new(Duration::from_millis(50), 1024);
    editor.choose_avatar(AvatarFile::new("me.png", "image/png", vec![7]));
    let slot = editor.upload_slot();
    let sink = RecordingNotifier::new();

    let (result, ()) = tokio::join!(editor.save(&slow, &sink), async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(!slot.is_trigger_enabled());
        slot.teardown();
    });

    assert!(matches!(result, Err(ConsoleError::InvalidState(_))));
    assert!(editor.profile().avatar_url.is_none());
    assert!(editor.upload_slot().is_trigger_enabled());
}
