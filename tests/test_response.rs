use bytes::Bytes;
use docserver::http::response::{Body, Response, StatusCode};
use docserver::http::writer::ResponseWriter;

async fn wire(response: Response) -> Vec<u8> {
    let mut writer = ResponseWriter::new(response);
    let mut out = Vec::new();
    writer.write_to_stream(&mut out).await.unwrap();
    out
}

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::Forbidden.as_u16(), 403);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    assert_eq!(StatusCode::Forbidden.reason_phrase(), "Forbidden");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::InternalServerError.reason_phrase(),
        "Internal Server Error"
    );
}

#[test]
fn test_response_ok_header() {
    let response = Response::ok(Body::Captured(Bytes::from_static(b"twelve bytes")));

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.header, "Content-Length: 12\n\n");
    assert_eq!(response.body.as_ref(), b"twelve bytes");
}

#[test]
fn test_response_empty_body() {
    let response = Response::ok(Body::Captured(Bytes::new()));

    assert_eq!(response.header, "Content-Length: 0\n\n");
    assert!(response.body.is_empty());
}

#[test]
fn test_response_error_bodies() {
    assert_eq!(Response::bad_request().body.as_ref(), b"400 Bad Request");
    assert_eq!(
        Response::error(StatusCode::Forbidden).body.as_ref(),
        b"403 Forbidden"
    );
    assert_eq!(
        Response::error(StatusCode::NotFound).body.as_ref(),
        b"404 Not Found"
    );
    assert_eq!(
        Response::error(StatusCode::InternalServerError).body.as_ref(),
        b"500 Internal Server Error"
    );
}

#[test]
fn test_response_error_status_matches_body() {
    let response = Response::error(StatusCode::NotFound);

    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(response.header, "Content-Length: 13\n\n");
}

#[tokio::test]
async fn test_writer_frames_success() {
    let out = wire(Response::ok(Body::Text("hello".to_string()))).await;
    assert_eq!(out, b"Content-Length: 5\n\nhello\n");
}

#[tokio::test]
async fn test_writer_frames_error() {
    let out = wire(Response::error(StatusCode::NotFound)).await;
    assert_eq!(out, b"Content-Length: 13\n\n404 Not Found\n");
}

#[tokio::test]
async fn test_writer_binary_body() {
    let body = Bytes::from_static(&[0, 1, 2, 255]);
    let out = wire(Response::ok(Body::Captured(body))).await;

    assert_eq!(out, b"Content-Length: 4\n\n\x00\x01\x02\xff\n");
}

#[test]
fn test_writer_length_includes_trailing_newline() {
    let writer = ResponseWriter::new(Response::ok(Body::Text("abc".to_string())));
    assert_eq!(writer.total_len(), "Content-Length: 3\n\nabc\n".len());
}
