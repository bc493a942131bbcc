#[cfg(test)]
mod tests {
    use netcache::bytes::Bytes;
    use netcache::cache::{InMemoryResponseCache, ResponseCache};
    use netcache::test_utils::MockTransport;
    use netcache::{Endpoint, FetchPipeline, NetworkError, Parameters};
    use serde::Deserialize;
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Reading {
        value: i64,
    }

    struct DataEndpoint;

    impl Endpoint for DataEndpoint {
        fn base_url(&self) -> &str {
            "https://api.example.com"
        }

        fn path(&self) -> &str {
            "/data"
        }
    }

    struct Search {
        parameters: Parameters,
    }

    impl Endpoint for Search {
        fn base_url(&self) -> &str {
            "https://api.example.com/"
        }

        fn path(&self) -> &str {
            "search"
        }

        fn parameters(&self) -> Option<Parameters> {
            Some(self.parameters.clone())
        }
    }

    fn setup(ttl_secs: u64) -> (FetchPipeline, Arc<MockTransport>, Arc<InMemoryResponseCache>) {
        let transport = Arc::new(MockTransport::new());
        let cache = Arc::new(InMemoryResponseCache::with_ttl_secs(ttl_secs));
        let pipeline = FetchPipeline::with_parts(transport.clone(), cache.clone());
        (pipeline, transport, cache)
    }

    #[tokio::test(start_paused = true)]
    async fn test_cached_until_ttl_then_refetched() {
        let (pipeline, transport, cache) = setup(60);
        transport.respond(200, r#"{"value":1}"#);

        // t = 0: miss, network, stored
        let reading: Reading = pipeline.fetch_endpoint(&DataEndpoint).await.unwrap();
        assert_eq!(reading, Reading { value: 1 });
        assert_eq!(transport.calls(), 1);

        // t = 10: served from cache
        tokio::time::advance(Duration::from_secs(10)).await;
        let reading: Reading = pipeline.fetch_endpoint(&DataEndpoint).await.unwrap();
        assert_eq!(reading, Reading { value: 1 });
        assert_eq!(transport.calls(), 1);

        // t = 65: expired, server now answers 404
        tokio::time::advance(Duration::from_secs(55)).await;
        transport.respond(404, "not found");
        let err = pipeline
            .fetch_endpoint::<Reading, _>(&DataEndpoint)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            NetworkError::RequestFailed("Request failed with status code: 404".into())
        );
        assert_eq!(transport.calls(), 2);

        // The stale entry is left alone.
        let entry = cache.entry("https://api.example.com/data").unwrap().unwrap();
        assert_eq!(entry.payload(), &Bytes::from_static(br#"{"value":1}"#));
        assert!(!entry.is_fresh(cache.ttl()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_parameters_are_part_of_the_key() {
        let (pipeline, transport, _cache) = setup(60);
        transport.respond(200, r#"{"value":1}"#);
        transport.respond(200, r#"{"value":2}"#);

        let page = |n: &str| Search {
            parameters: vec![("q".into(), "weather".into()), ("page".into(), n.into())],
        };

        let first: Reading = pipeline.fetch_endpoint(&page("1")).await.unwrap();
        let second: Reading = pipeline.fetch_endpoint(&page("2")).await.unwrap();
        let first_again: Reading = pipeline.fetch_endpoint(&page("1")).await.unwrap();

        assert_eq!((first.value, second.value, first_again.value), (1, 2, 1));
        assert_eq!(
            transport.requested_urls(),
            vec![
                "https://api.example.com/search?q=weather&page=1",
                "https://api.example.com/search?q=weather&page=2",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_clones_share_the_cache() {
        let (pipeline, transport, _cache) = setup(60);
        transport.respond(200, r#"{"value":4}"#);

        let other = pipeline.clone();
        let _: Reading = pipeline.fetch_endpoint(&DataEndpoint).await.unwrap();
        let reading: Reading = other.fetch_endpoint(&DataEndpoint).await.unwrap();

        assert_eq!(reading.value, 4);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_misses_both_reach_network() {
        let transport = Arc::new(MockTransport::with_latency(Duration::from_millis(50)));
        let cache = Arc::new(InMemoryResponseCache::with_ttl_secs(60));
        let pipeline = FetchPipeline::with_parts(transport.clone(), cache.clone());
        transport.respond(200, r#"{"value":1}"#);
        transport.respond(200, r#"{"value":2}"#);

        let (a, b) = tokio::join!(
            pipeline.fetch_endpoint::<Reading, _>(&DataEndpoint),
            pipeline.fetch_endpoint::<Reading, _>(&DataEndpoint),
        );

        let mut values = vec![a.unwrap().value, b.unwrap().value];
        values.sort_unstable();
        assert_eq!(values, vec![1, 2]);
        assert_eq!(transport.calls(), 2);
        assert_eq!(cache.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_same_payload_different_types() {
        #[derive(Debug, Deserialize)]
        struct Named {
            #[allow(dead_code)]
            name: String,
        }

        let (pipeline, transport, _cache) = setup(60);
        transport.respond(200, r#"{"value":9}"#);

        let reading: Reading = pipeline.fetch_endpoint(&DataEndpoint).await.unwrap();
        assert_eq!(reading.value, 9);

        // Cache hit decoded into an incompatible type fails without refetching.
        let err = pipeline
            .fetch_endpoint::<Named, _>(&DataEndpoint)
            .await
            .unwrap_err();
        assert_eq!(err, NetworkError::DecodingFailed);
        assert_eq!(transport.calls(), 1);

        let value: serde_json::Value =
            pipeline.fetch_endpoint(&DataEndpoint).await.unwrap();
        assert_eq!(value["value"], 9);
    }
}
