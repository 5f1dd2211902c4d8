use stock_analyst::analyzer::{AnalysisError, Analyzer};
use stock_analyst::completion_client::CompletionClient;
use stock_analyst::news_client::{NewsClient, NewsError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fixed_completion_body() -> serde_json::Value {
    serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": "Buy, max 150, min 140"}}]
    })
}

fn analyzer_for(news_server: &MockServer, completion_server: &MockServer) -> Analyzer {
    Analyzer::new(
        NewsClient::new(&news_server.uri(), "news-key", 5, 5).unwrap(),
        CompletionClient::new(&completion_server.uri(), "openai-key", "gpt-3.5-turbo", 5).unwrap(),
    )
}

#[tokio::test]
async fn test_two_ticker_batch_end_to_end() {
    let news_server = MockServer::start().await;
    let completion_server = MockServer::start().await;

    // AAPL gets 2 articles, TSLA gets none
    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .and(query_param("q", "AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "articles": [
                {"title": "AAPL hits record", "description": "Shares rally"},
                {"title": "iPhone demand strong", "description": null}
            ]
        })))
        .mount(&news_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .and(query_param("q", "TSLA"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"articles": []})),
        )
        .mount(&news_server)
        .await;

    // Completion echoes the same fixed call for any prompt
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixed_completion_body()))
        .expect(2)
        .mount(&completion_server)
        .await;

    let analyzer = analyzer_for(&news_server, &completion_server);

    // Same order as the input list; zero articles is not an error
    for ticker in ["AAPL", "TSLA"] {
        let analysis = analyzer.analyze(ticker).await.unwrap();
        assert_eq!(analysis, "Buy, max 150, min 140");
    }
}

#[tokio::test]
async fn test_failed_ticker_does_not_poison_the_next() {
    let news_server = MockServer::start().await;
    let completion_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .and(query_param("q", "AAPL"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&news_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .and(query_param("q", "TSLA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "articles": [{"title": "TSLA deliveries up", "description": "Q3 beat"}]
        })))
        .mount(&news_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixed_completion_body()))
        .expect(1)
        .mount(&completion_server)
        .await;

    let analyzer = analyzer_for(&news_server, &completion_server);

    // First ticker fails at the news step with the upstream detail attached
    let err = analyzer.analyze("AAPL").await.unwrap_err();
    match &err {
        AnalysisError::News(NewsError::Api { status, body }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("expected news Api error, got {:?}", other),
    }
    let message = format!("Error analyzing {}: {}", "AAPL", err);
    assert!(message.starts_with("Error analyzing AAPL: news API returned 500"));

    // Second ticker still goes through
    let analysis = analyzer.analyze("TSLA").await.unwrap();
    assert_eq!(analysis, "Buy, max 150, min 140");
}

#[tokio::test]
async fn test_missing_completion_key_is_per_ticker_not_fatal() {
    let news_server = MockServer::start().await;

    // News succeeds for both tickers; completion key is empty
    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "articles": [{"title": "Headline", "description": "Detail"}]
        })))
        .expect(2)
        .mount(&news_server)
        .await;

    let analyzer = Analyzer::new(
        NewsClient::new(&news_server.uri(), "news-key", 5, 5).unwrap(),
        CompletionClient::new("http://unused", "", "gpt-3.5-turbo", 5).unwrap(),
    );

    for ticker in ["AAPL", "TSLA"] {
        let err = analyzer.analyze(ticker).await.unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
