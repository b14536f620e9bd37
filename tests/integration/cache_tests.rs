//! Cache integration tests

#[cfg(test)]
mod tests {
    use crate::common::{ClientFactory, RecordingTransport};
    use cms_api_client::{CacheOptions, RequestOptions, ResponseEnvelope};
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn test_mutations_always_reach_transport() {
        let transport = RecordingTransport::echo();
        let client = ClientFactory::signed_in(&transport);

        client.post("/pages", Some(json!({ "title": "a" }))).await;
        client.post("/pages", Some(json!({ "title": "a" }))).await;

        assert_eq!(transport.call_count(), 2);
        assert_eq!(client.cache_stats().entries, 0);
    }

    #[tokio::test]
    async fn test_concurrent_cached_reads_share_one_call() {
        let transport = RecordingTransport::echo().with_latency(Duration::from_millis(25));
        let client = ClientFactory::signed_in(&transport);
        let options = CacheOptions::enabled().with_tag("startups");

        let (a, b) = tokio::join!(
            client.get_cached("/startups", options.clone()),
            client.get_cached("/startups", options.clone()),
        );

        assert_eq!(transport.call_count(), 1);
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_overlapping_tags_invalidate_both_entries() {
        let transport = RecordingTransport::echo();
        let client = ClientFactory::signed_in(&transport);

        client
            .get_cached("/pages", CacheOptions::enabled().with_tags(["content", "pages"]))
            .await;
        client
            .get_cached("/posts", CacheOptions::enabled().with_tags(["content", "posts"]))
            .await;
        assert_eq!(transport.call_count(), 2);

        assert_eq!(client.invalidate_cache(["content"]).await, 2);
        // Already gone through "content"
        assert_eq!(client.invalidate_cache(["pages", "posts"]).await, 0);

        client.get_cached("/pages", CacheOptions::enabled()).await;
        client.get_cached("/posts", CacheOptions::enabled()).await;
        assert_eq!(transport.call_count(), 4);
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let transport = RecordingTransport::echo();
        let client = ClientFactory::signed_in(&transport);
        let options = CacheOptions::enabled().with_ttl(Duration::from_millis(40));

        client.get_cached("/menus", options.clone()).await;
        client.get_cached("/menus", options.clone()).await;
        assert_eq!(transport.call_count(), 1);

        std::thread::sleep(Duration::from_millis(100));
        client.get_cached("/menus", options).await;
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_explicit_key_shares_entry_across_endpoints() {
        let transport = RecordingTransport::echo();
        let client = ClientFactory::signed_in(&transport);
        let options = CacheOptions::enabled().with_key("navigation");

        let first = client.get_cached("/menus/main", options.clone()).await;
        let second = client.get_cached("/menus/footer", options).await;

        assert_eq!(transport.call_count(), 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let transport = RecordingTransport::failing_on("/flaky");
        let client = ClientFactory::signed_in(&transport);

        let first: ResponseEnvelope = client.get_cached("/flaky", CacheOptions::enabled()).await;
        let second = client.get_cached("/flaky", CacheOptions::enabled()).await;

        assert!(!first.success && !second.success);
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_disabled_cache_option_on_request() {
        let transport = RecordingTransport::echo();
        let client = ClientFactory::signed_in(&transport);
        let options = RequestOptions {
            cache: CacheOptions::disabled(),
            ..Default::default()
        };

        client.request("/pages", options.clone()).await;
        client.request("/pages", options).await;

        assert_eq!(transport.call_count(), 2);
    }
}
