use crate::{MediaResolver, OverlayError};

use googletest::prelude::*;

fn resolver() -> MediaResolver {
    MediaResolver::new("http://127.0.0.1:8080/media").unwrap()
}

#[test]
fn given_base_without_trailing_slash_when_created_then_treated_as_directory() {
    // Given / When
    let resolver = resolver();

    // Then
    assert_that!(resolver.base().as_str(), eq("http://127.0.0.1:8080/media/"));
}

#[test]
fn given_http_url_when_resolved_then_used_as_is() {
    // Given
    let resolver = resolver();

    // When
    let source = resolver.resolve("https://cdn.example.com/a/b.gif").unwrap();

    // Then
    assert_that!(source.as_str(), eq("https://cdn.example.com/a/b.gif"));
}

#[test]
fn given_file_url_when_resolved_then_used_as_is() {
    // Given
    let resolver = resolver();

    // When
    let source = resolver.resolve("file:///opt/alerts/ding.wav").unwrap();

    // Then
    assert_that!(source.as_str(), eq("file:///opt/alerts/ding.wav"));
}

#[test]
fn given_absolute_path_when_resolved_then_becomes_file_url() {
    // Given
    let resolver = resolver();

    // When
    let source = resolver.resolve("/opt/alerts/my clip.mp4").unwrap();

    // Then
    assert_that!(source.url().scheme(), eq("file"));
    assert_that!(source.as_str(), eq("file:///opt/alerts/my%20clip.mp4"));
}

#[test]
fn given_relative_path_when_resolved_then_joined_onto_base() {
    // Given
    let resolver = resolver();

    // When
    let nested = resolver.resolve("sounds/ding.mp3").unwrap();
    let dotted = resolver.resolve("./follow.png").unwrap();

    // Then
    assert_that!(nested.as_str(), eq("http://127.0.0.1:8080/media/sounds/ding.mp3"));
    assert_that!(dotted.as_str(), eq("http://127.0.0.1:8080/media/follow.png"));
}

#[test]
fn given_unsupported_scheme_when_resolved_then_rejected() {
    // Given
    let resolver = resolver();

    // When
    let result = resolver.resolve("data:image/png;base64,AAAA");

    // Then
    assert!(matches!(
        result,
        Err(OverlayError::UnsupportedScheme { ref scheme, .. }) if scheme == "data"
    ));
}

#[test]
fn given_malformed_base_when_created_then_url_error() {
    // When
    let result = MediaResolver::new("not a url");

    // Then
    assert!(matches!(result, Err(OverlayError::Url { .. })));
}
