use isic::reqwest::StatusCode;
use isic::{Download, IsicError, Session, DEFAULT_HOSTNAME};
use rstest::*;
use serde_json::{json, Value};
use std::cell::Cell;
use std::rc::Rc;
use tempfile::TempDir;

mod helpers;
use helpers::*;

#[fixture]
fn archive() -> FakeArchive {
    two_studies().with_login("dermatologist", "hunter2", "s3cr3t-t0k3n")
}

#[rstest]
fn test_anonymous(archive: FakeArchive) {
    let session = Session::builder(&archive).hostname(HOSTNAME).connect().unwrap();
    assert_eq!(session.base_url().as_str(), BASE_URL);
    assert!(session.auth_token().is_none());
    assert_eq!(archive.total(), 0);

    session.get("study").unwrap();
    assert_eq!(archive.requests()[0].token, None);
}

#[test]
fn test_default_hostname() {
    let archive = FakeArchive::new();
    let session = Session::builder(&archive).connect().unwrap();
    assert_eq!(
        session.base_url().as_str(),
        format!("{}/api/v1/", DEFAULT_HOSTNAME)
    );
}

#[test]
fn test_hostname_without_protocol() {
    let archive = FakeArchive::new();
    let e = Session::builder(&archive)
        .hostname("isic-archive.com")
        .connect()
        .unwrap_err();
    assert!(matches!(e, IsicError::InvalidUrl(_)));
}

#[rstest]
fn test_login(archive: FakeArchive) {
    let session = Session::builder(&archive)
        .hostname(HOSTNAME)
        .username("dermatologist")
        .password("hunter2")
        .connect()
        .unwrap();
    assert_eq!(session.auth_token().unwrap().as_str(), "s3cr3t-t0k3n");

    let login = &archive.requests()[0];
    assert_eq!(login.url, format!("{}user/authentication", BASE_URL));
    assert_eq!(
        login.basic_auth,
        Some(("dermatologist".to_string(), "hunter2".to_string()))
    );

    session.get_json::<Value>("study").unwrap();
    let requests = archive.requests();
    assert_eq!(requests[1].token.as_deref(), Some("s3cr3t-t0k3n"));
    assert_eq!(requests[1].basic_auth, None);
}

#[rstest]
fn test_login_rejected(archive: FakeArchive) {
    let e = Session::builder(&archive)
        .hostname(HOSTNAME)
        .username("dermatologist")
        .password("wrong")
        .connect()
        .unwrap_err();
    match e {
        IsicError::Authentication { message } => assert_eq!(message, "Login failed."),
        e => panic!("unexpected error: {:?}", e),
    }
    assert_eq!(archive.total(), 1);
}

#[test]
fn test_login_rejected_without_message() {
    let archive = FakeArchive::new().with_response(
        "user/authentication",
        StatusCode::BAD_GATEWAY,
        "upstream is down",
    );
    let mut session = Session::builder(&archive).hostname(HOSTNAME).connect().unwrap();
    match session.login("nobody", "nothing").unwrap_err() {
        IsicError::Authentication { message } => assert_eq!(message, "upstream is down"),
        e => panic!("unexpected error: {:?}", e),
    }
    assert!(session.auth_token().is_none());
}

#[test]
fn test_login_response_without_token() {
    let archive = FakeArchive::new().with_json("user/authentication", json!({"user": {}}));
    let mut session = Session::builder(&archive).hostname(HOSTNAME).connect().unwrap();
    assert!(matches!(
        session.login("nobody", "nothing"),
        Err(IsicError::UnexpectedResponse(_))
    ));
}

#[rstest]
fn test_password_prompt(archive: FakeArchive) {
    let asked = Rc::new(Cell::new(false));
    let asked_in_prompt = Rc::clone(&asked);
    let session = Session::builder(&archive)
        .hostname(HOSTNAME)
        .username("dermatologist")
        .password_prompt(move |username| {
            assert_eq!(username, "dermatologist");
            asked_in_prompt.set(true);
            Ok("hunter2".to_string())
        })
        .connect()
        .unwrap();
    assert!(asked.get());
    assert!(session.auth_token().is_some());
}

#[rstest]
fn test_password_prompt_not_used_when_password_given(archive: FakeArchive) {
    let session = Session::builder(&archive)
        .hostname(HOSTNAME)
        .username("dermatologist")
        .password("hunter2")
        .password_prompt(|_| panic!("should not prompt"))
        .connect()
        .unwrap();
    assert!(session.auth_token().is_some());
}

#[rstest]
fn test_get_does_not_fail_on_error_status(archive: FakeArchive) {
    let session = Session::builder(&archive).hostname(HOSTNAME).connect().unwrap();
    let res = session.get("/nowhere").unwrap();
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(archive.urls(), vec![format!("{}nowhere", BASE_URL)]);
}

#[rstest]
fn test_get_json_error_status(archive: FakeArchive) {
    let session = Session::builder(&archive).hostname(HOSTNAME).connect().unwrap();
    match session.get_json::<Value>("nowhere").unwrap_err() {
        IsicError::Status { status, text, .. } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert!(text.contains("Resource not found"));
        }
        e => panic!("unexpected error: {:?}", e),
    }
}

#[test]
fn test_get_json_not_json() {
    let archive = FakeArchive::new().with_response("study", StatusCode::OK, "<html></html>");
    let session = Session::builder(&archive).hostname(HOSTNAME).connect().unwrap();
    assert!(matches!(
        session.get_json::<Value>("study"),
        Err(IsicError::Decode(_))
    ));
}

#[rstest]
fn test_get_json(archive: FakeArchive) {
    let session = Session::builder(&archive).hostname(HOSTNAME).connect().unwrap();
    let studies: Value = session.get_json("/study").unwrap();
    assert_eq!(studies[1], json!({"_id": STUDY_B, "name": "S2"}));
}

#[rstest]
fn test_get_file_to_path(archive: FakeArchive) -> std::io::Result<()> {
    let tmp_dir = TempDir::new()?;
    let dst = tmp_dir.path().join("ISIC_0000007.jpg");
    fs_err::write(&dst, "old contents which are longer than the new ones")?;

    let session = Session::builder(&archive).hostname(HOSTNAME).connect().unwrap();
    let endpoint = format!("image/{}/download", IMAGE_7);
    match session.get_file(&endpoint, Some(&dst)).unwrap() {
        Download::Saved { path, size } => {
            assert_eq!(path, dst);
            assert_eq!(size, 22);
        }
        d => panic!("unexpected download: {:?}", d),
    }
    assert_eq!(fs_err::read(&dst)?, b"\xff\xd8\xff\xe0 not really a jpeg");
    Ok(())
}

#[rstest]
fn test_get_file_without_path(archive: FakeArchive) {
    let session = Session::builder(&archive).hostname(HOSTNAME).connect().unwrap();
    let endpoint = format!("image/{}/download", IMAGE_7);
    match session.get_file(&endpoint, None).unwrap() {
        Download::Response(res) => assert!(res.body.starts_with(b"\xff\xd8")),
        d => panic!("unexpected download: {:?}", d),
    }
}

#[rstest]
fn test_get_file_error_writes_nothing(archive: FakeArchive) -> std::io::Result<()> {
    let tmp_dir = TempDir::new()?;
    let dst = tmp_dir.path().join("missing.jpg");
    let session = Session::builder(&archive).hostname(HOSTNAME).connect().unwrap();
    let e = session.get_file("image/missing/download", Some(&dst)).unwrap_err();
    assert!(matches!(e, IsicError::Status { .. }));
    assert!(!dst.exists());
    Ok(())
}

#[rstest]
fn test_download_image_by_number_name(archive: FakeArchive) -> std::io::Result<()> {
    let tmp_dir = TempDir::new()?;
    let dst = tmp_dir.path().join("seven.jpg");
    let mut session = Session::builder(&archive).hostname(HOSTNAME).connect().unwrap();
    session.download_image("ISIC_0000007", &dst).unwrap();
    assert_eq!(fs_err::read(&dst)?, b"\xff\xd8\xff\xe0 not really a jpeg");
    assert_eq!(
        archive.urls(),
        vec![
            format!("{}image?details=false&name=ISIC_0000007", BASE_URL),
            format!("{}image/{}/download", BASE_URL, IMAGE_7),
        ]
    );
    Ok(())
}
