//! Batch coalescing integration tests

#[cfg(test)]
mod tests {
    use crate::common::assertions::{EnvelopeAssertions, ids};
    use crate::common::{ClientFactory, RecordingTransport, RequestFactory};
    use cms_api_client::config::BatchConfig;
    use cms_api_client::{ClientError, RequestDescriptor};
    use serde_json::json;
    use std::time::Duration;
    use tokio::time::Instant;

    const WINDOW: Duration = Duration::from_millis(50);

    #[tokio::test(start_paused = true)]
    async fn test_two_callers_one_flush() {
        let transport = RecordingTransport::echo();
        let client = ClientFactory::signed_in(&transport);
        let start = Instant::now();

        let caller_a = tokio::spawn({
            let client = client.clone();
            async move {
                client
                    .batch(vec![RequestFactory::read("s1", "/startups")])
                    .await
            }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        let caller_b = tokio::spawn({
            let client = client.clone();
            async move {
                client
                    .batch(vec![RequestFactory::read("s2", "/content")])
                    .await
            }
        });

        let a = caller_a.await.unwrap().unwrap();
        let b = caller_b.await.unwrap().unwrap();

        assert_eq!(ids(&a), ["s1"]);
        assert_eq!(a[0].response.echoed_url(), RequestFactory::url("/startups"));
        assert_eq!(ids(&b), ["s2"]);
        assert_eq!(b[0].response.echoed_url(), RequestFactory::url("/content"));

        assert_eq!(transport.call_count(), 2);
        for call in transport.calls() {
            let waited = call.at.duration_since(start);
            assert!(waited >= WINDOW && waited < WINDOW + Duration::from_millis(10));
        }
        assert_eq!(client.batch_stats().batches_flushed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_callers_get_only_their_ids_in_order() {
        let transport = RecordingTransport::echo().with_latency(Duration::from_millis(5));
        let client = ClientFactory::signed_in(&transport);

        let (a, b) = tokio::join!(
            client.batch(vec![
                RequestFactory::read("pages", "/pages"),
                RequestFactory::read("menus", "/menus"),
                RequestFactory::read("posts", "/posts"),
            ]),
            client.batch(vec![
                RequestFactory::read("settings", "/settings"),
                RequestFactory::read("authors", "/authors"),
            ]),
        );

        let a = a.unwrap();
        let b = b.unwrap();
        assert_eq!(ids(&a), ["pages", "menus", "posts"]);
        assert_eq!(ids(&b), ["settings", "authors"]);
        for result in a.iter().chain(b.iter()) {
            assert_eq!(
                result.response.echoed_url(),
                RequestFactory::url(&format!("/{}", result.id))
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_mixed_auth_submission_is_split() {
        let transport = RecordingTransport::echo();
        let client = ClientFactory::signed_in(&transport);

        let results = client
            .batch(vec![
                RequestFactory::read("dashboard", "/dashboard"),
                RequestFactory::public_read("landing", "/landing"),
            ])
            .await
            .unwrap();

        assert_eq!(ids(&results), ["dashboard", "landing"]);
        let stats = client.batch_stats();
        assert_eq!(stats.batches_opened, 2);
        assert_eq!(stats.batches_flushed, 2);

        for call in transport.calls() {
            let has_auth = call.request.header("authorization").is_some();
            assert_eq!(has_auth, call.request.url.ends_with("/dashboard"));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_size_trigger_skips_window() {
        let transport = RecordingTransport::echo();
        let mut config = ClientFactory::config();
        config.batch = BatchConfig::default().with_max_size(4);
        let client = ClientFactory::with_config(&transport, config);
        let start = Instant::now();

        let early = tokio::spawn({
            let client = client.clone();
            async move {
                client
                    .batch(vec![
                        RequestFactory::read("a", "/a"),
                        RequestFactory::read("b", "/b"),
                        RequestFactory::read("c", "/c"),
                    ])
                    .await
            }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        let late = client
            .batch(vec![RequestFactory::read("d", "/d")])
            .await
            .unwrap();
        let early = early.await.unwrap().unwrap();

        assert_eq!(ids(&early), ["a", "b", "c"]);
        assert_eq!(ids(&late), ["d"]);
        assert!(start.elapsed() < WINDOW);
        assert_eq!(client.batch_stats().size_triggered, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mutation_runs_before_window_closes() {
        let transport = RecordingTransport::echo();
        let client = ClientFactory::signed_in(&transport);
        let start = Instant::now();

        let results = client
            .batch(vec![
                RequestFactory::read("list", "/pages"),
                RequestDescriptor::delete("remove", "/pages/3"),
                RequestDescriptor::post("create", "/pages").with_json(json!({ "title": "New" })),
            ])
            .await
            .unwrap();

        assert_eq!(ids(&results), ["list", "remove", "create"]);
        for call in transport.calls() {
            let waited = call.at.duration_since(start);
            if call.request.method.is_read() {
                assert!(waited >= WINDOW);
            } else {
                assert_eq!(waited, Duration::ZERO);
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_member_keeps_its_slot() {
        let transport = RecordingTransport::failing_on("/broken");
        let client = ClientFactory::signed_in(&transport);

        let results = client
            .batch(vec![
                RequestFactory::read("first", "/first"),
                RequestFactory::read("broken", "/broken"),
                RequestFactory::read("last", "/last"),
            ])
            .await
            .unwrap();

        assert_eq!(ids(&results), ["first", "broken", "last"]);
        results[0].response.assert_success();
        results[1].response.assert_failure_containing("connection refused");
        results[2].response.assert_success();
    }

    #[tokio::test(start_paused = true)]
    async fn test_batched_cached_reads_hit_network_once() {
        let transport = RecordingTransport::echo();
        let client = ClientFactory::signed_in(&transport);

        let (a, b) = tokio::join!(
            client.batch(vec![RequestFactory::cached_read("nav-a", "/navigation", &["nav"])]),
            client.batch(vec![RequestFactory::cached_read("nav-b", "/navigation", &["nav"])]),
        );

        assert_eq!(a.unwrap()[0].id, "nav-a");
        assert_eq!(b.unwrap()[0].id, "nav-b");
        assert_eq!(transport.calls_to("/navigation"), 1);
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_a_contract_violation() {
        let transport = RecordingTransport::echo();
        let client = ClientFactory::signed_in(&transport);

        let err = client
            .batch(vec![
                RequestFactory::read("same", "/a"),
                RequestFactory::read("same", "/b"),
            ])
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::DuplicateRequestId(_)));
        assert!(err.is_contract_violation());
        assert_eq!(transport.call_count(), 0);
    }
}
