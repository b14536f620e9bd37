//! Reqwest transport tests against a local mock server

#[cfg(test)]
mod tests {
    use crate::common::assertions::EnvelopeAssertions;
    use crate::common::fixtures::ClientFactory;
    use bytes::Bytes;
    use cms_api_client::{
        ApiClient, CacheOptions, ClientConfig, FormPart, RequestBody, RequestOptions,
        StaticIdentityProvider,
    };
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{body_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::builder()
            .config(ClientConfig::with_base_url(format!("{}/api", server.uri())))
            .with_identity_provider(Arc::new(StaticIdentityProvider::signed_in(
                ClientFactory::identity(),
            )))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_sends_auth_and_unwraps_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/startups"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "name": "Acme" }],
                "message": "1 startup"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server).get("/startups").await;

        response.assert_success();
        assert_eq!(response.data, Some(json!([{ "name": "Acme" }])));
        assert_eq!(response.message.as_deref(), Some("1 startup"));
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/pages"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "title": "Home" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "data": { "id": 9 } })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .post("/pages", Some(json!({ "title": "Home" })))
            .await;

        assert_eq!(response.data, Some(json!({ "id": 9 })));
    }

    #[tokio::test]
    async fn test_error_status_becomes_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "error": "Page not found" })),
            )
            .mount(&server)
            .await;

        let response = client_for(&server).get("/missing").await;

        response.assert_failure_containing("Page not found");
        assert_eq!(response.data, Some(json!({ "error": "Page not found" })));
    }

    #[tokio::test]
    async fn test_plain_text_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/pages/1"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
            .mount(&server)
            .await;

        let response = client_for(&server).delete("/pages/1").await;

        response.assert_failure_containing("Forbidden");
    }

    #[tokio::test]
    async fn test_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/pages/2"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let response = client_for(&server).delete("/pages/2").await;

        response.assert_success();
        assert!(response.data.is_none());
    }

    #[tokio::test]
    async fn test_multipart_upload_sets_its_own_boundary() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/media"))
            .respond_with(|request: &Request| {
                let content_type = request
                    .headers
                    .get("content-type")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": { "content_type": content_type } }))
            })
            .mount(&server)
            .await;

        let options = RequestOptions {
            method: cms_api_client::Method::Post,
            body: Some(RequestBody::Multipart(vec![
                FormPart::text("alt", "logo"),
                FormPart::file("file", "logo.png", Bytes::from_static(b"\x89PNG"))
                    .with_content_type("image/png"),
            ])),
            ..Default::default()
        };
        let response = client_for(&server).request("/media", options).await;

        response.assert_success();
        let content_type = response.data.unwrap()["content_type"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("multipart/form-data; boundary="));
    }

    #[tokio::test]
    async fn test_cached_reads_against_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/settings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "theme": "dark" } })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let options = CacheOptions::enabled().with_tag("settings");
        let (a, b) = tokio::join!(
            client.get_cached("/settings", options.clone()),
            client.get_cached("/settings", options.clone()),
        );
        let c = client.get_cached("/settings", options).await;

        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_envelope() {
        let server = MockServer::start().await;
        let base_url = format!("{}/api", server.uri());
        drop(server);

        let client = ApiClient::new(ClientConfig::with_base_url(base_url)).unwrap();
        let response = client.get("/pages").await;

        assert!(!response.success);
        assert!(!response.error_message().is_empty());
    }
}
