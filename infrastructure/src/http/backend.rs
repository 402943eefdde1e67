//! reqwest-based [`ChatBackend`] implementation

use async_trait::async_trait;
use chatline_application::{BackendConfig, ChatBackend, ChatError, ChunkStream};
use chatline_domain::Question;
use futures::StreamExt;
use reqwest::Url;
use serde::Serialize;
use tracing::{debug, info};

/// Request body sent to the backend
#[derive(Debug, Serialize)]
struct QuestionPayload<'a> {
    question: &'a str,
}

/// Chat backend reached over HTTP.
///
/// One POST per question; the body of a successful response is streamed
/// chunk by chunk as the transport delivers it.
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpChatBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, ChatError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            ChatError::transport(format!("Invalid endpoint '{}': {}", config.endpoint, e))
        })?;

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ChatError::transport(format!("Failed to build HTTP client: {}", e)))?;

        info!(endpoint = %endpoint, "HTTP chat backend ready");
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn open_stream(&self, question: &Question) -> Result<ChunkStream, ChatError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&QuestionPayload {
                question: question.content(),
            })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        debug!(status = status.as_u16(), "Backend responded");
        if !status.is_success() {
            return Err(ChatError::request_failed(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
            ));
        }

        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()).map_err(transport_error))
            .boxed())
    }
}

/// Flatten a reqwest error and its sources into a [`ChatError::TransportError`].
fn transport_error(error: reqwest::Error) -> ChatError {
    let mut message = if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_connect() {
        "Could not connect to the chat backend".to_string()
    } else {
        error.to_string()
    };

    let mut source = std::error::Error::source(&error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    ChatError::TransportError(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        body::Body,
        extract::State,
        http::{HeaderMap, StatusCode, header},
        routing::post,
    };
    use std::sync::{Arc, Mutex};

    type Captured = Arc<Mutex<Vec<(Option<String>, serde_json::Value)>>>;

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/chat")
    }

    fn backend_for(endpoint: &str) -> HttpChatBackend {
        HttpChatBackend::new(&BackendConfig::default().with_endpoint(endpoint)).unwrap()
    }

    async fn collect(mut stream: ChunkStream) -> Result<String, ChatError> {
        let mut bytes = Vec::new();
        while let Some(chunk) = stream.next().await {
            bytes.extend(chunk?);
        }
        Ok(String::from_utf8(bytes).unwrap())
    }

    async fn streaming_handler(
        State(captured): State<Captured>,
        headers: HeaderMap,
        Json(body): Json<serde_json::Value>,
    ) -> Body {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        captured.lock().unwrap().push((content_type, body));
        Body::from_stream(futures::stream::iter(vec![
            Ok::<_, std::io::Error>("Hel"),
            Ok("lo **wor"),
            Ok("ld**"),
        ]))
    }

    #[tokio::test]
    async fn test_posts_question_as_json_and_streams_body() {
        let captured: Captured = Arc::default();
        let router = Router::new()
            .route("/chat", post(streaming_handler))
            .with_state(Arc::clone(&captured));
        let backend = backend_for(&spawn_server(router).await);

        let question = Question::try_new("Como funciona a bateria?").unwrap();
        let stream = backend.open_stream(&question).await.unwrap();

        assert_eq!(collect(stream).await.unwrap(), "Hello **world**");
        let captured = captured.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].0.as_deref(), Some("application/json"));
        assert_eq!(
            captured[0].1,
            serde_json::json!({ "question": "Como funciona a bateria?" })
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_request_failed() {
        let router = Router::new().route(
            "/chat",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let backend = backend_for(&spawn_server(router).await);

        let err = backend
            .open_stream(&Question::try_new("hi").unwrap())
            .await
            .err()
            .unwrap();

        assert_eq!(err, ChatError::request_failed(500, "Internal Server Error"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let backend = backend_for(&format!("http://{addr}/chat"));

        let err = backend
            .open_stream(&Question::try_new("hi").unwrap())
            .await
            .err()
            .unwrap();

        assert!(matches!(err, ChatError::TransportError(_)));
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let config = BackendConfig::default().with_endpoint("not a url");
        let err = HttpChatBackend::new(&config).unwrap_err();
        assert!(err.to_string().contains("Invalid endpoint"));
    }

    #[tokio::test]
    async fn test_renders_through_use_case() {
        use chatline_application::{BubbleId, ChatView, SendMessageUseCase, SendOutcome};
        use chatline_domain::Sender;

        #[derive(Default)]
        struct LastBubble(Mutex<Vec<String>>);

        impl ChatView for LastBubble {
            fn append_bubble(&self, _sender: Sender, content: &str) -> BubbleId {
                let mut bubbles = self.0.lock().unwrap();
                bubbles.push(content.to_string());
                BubbleId(bubbles.len() as u64 - 1)
            }
            fn replace_bubble(&self, id: BubbleId, content: &str) {
                self.0.lock().unwrap()[id.0 as usize] = content.to_string();
            }
            fn scroll_to_bottom(&self) {}
        }

        let captured: Captured = Arc::default();
        let router = Router::new()
            .route("/chat", post(streaming_handler))
            .with_state(captured);
        let backend = Arc::new(backend_for(&spawn_server(router).await));
        let renderer = Arc::new(crate::markdown::HtmlMarkdownRenderer::new());
        let use_case = SendMessageUseCase::new(backend, renderer);
        let view = LastBubble::default();

        let outcome = use_case
            .execute("hi", &view, &tokio_util::sync::CancellationToken::new())
            .await
            .unwrap();

        assert!(matches!(outcome, SendOutcome::Completed(_)));
        assert_eq!(
            view.0.lock().unwrap()[1],
            "<p>Hello <strong>world</strong></p>\n"
        );
    }
}
