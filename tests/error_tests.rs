// Tests for the error taxonomy: fatal classification and step naming
// drive the loop's continue-vs-abort decision and its user-facing
// failure notifications.

use voice_loop::Error;

#[test]
fn test_only_configuration_errors_are_fatal() {
    assert!(Error::Config("missing credential".to_string()).is_fatal());

    assert!(!Error::Capture("device busy".to_string()).is_fatal());
    assert!(!Error::Transcription("service unavailable".to_string()).is_fatal());
    assert!(!Error::Completion("service unavailable".to_string()).is_fatal());
    assert!(!Error::Synthesis("invalid voice".to_string()).is_fatal());
    assert!(!Error::Persistence("disk full".to_string()).is_fatal());
}

#[test]
fn test_errors_name_their_failed_step() {
    assert_eq!(Error::Config("x".to_string()).step(), "configuration");
    assert_eq!(Error::Capture("x".to_string()).step(), "capture");
    assert_eq!(Error::Transcription("x".to_string()).step(), "transcription");
    assert_eq!(Error::Completion("x".to_string()).step(), "completion");
    assert_eq!(Error::Synthesis("x".to_string()).step(), "synthesis");
    assert_eq!(Error::Persistence("x".to_string()).step(), "persistence");
}

#[test]
fn test_display_includes_step_and_cause() {
    let err = Error::Synthesis("invalid voice identifier".to_string());
    let rendered = err.to_string();

    assert!(rendered.contains("synthesis"), "got: {rendered}");
    assert!(rendered.contains("invalid voice identifier"), "got: {rendered}");
}
