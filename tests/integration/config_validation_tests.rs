//! Configuration validation integration tests

#[cfg(test)]
mod tests {
    use cms_api_client::{ApiClient, ClientConfig, ClientError};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_client_from_yaml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
http:
  base_url: "https://cms.example.com/api"
  timeout: 5
cache:
  default_ttl: 120
batch:
  delay_ms: 25
  max_size: 4
  coalesce_single_reads: true
"#
        )
        .unwrap();

        let config = ClientConfig::from_file(file.path()).await.unwrap();
        assert_eq!(config.http.base_url, "https://cms.example.com/api");
        assert_eq!(config.batch.max_size, 4);
        assert!(config.batch.coalesce_single_reads);

        let client = ApiClient::new(config).unwrap();
        assert_eq!(client.config().cache.default_ttl, 120);
    }

    #[test]
    fn test_invalid_sections_are_named() {
        let cases = [
            ("http:\n  base_url: \"not a url\"\n", "HTTP"),
            ("cache:\n  max_entries: 0\n", "Cache"),
            ("batch:\n  max_size: 0\n", "Batch"),
            ("auth:\n  token_secret: \"\"\n", "Auth"),
        ];

        for (yaml, section) in cases {
            match ClientConfig::from_yaml(yaml) {
                Err(ClientError::Config(message)) => {
                    assert!(message.starts_with(section), "{}: {}", section, message)
                }
                other => panic!("expected config error for {}, got {:?}", section, other),
            }
        }
    }
}
