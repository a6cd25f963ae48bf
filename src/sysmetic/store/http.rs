use super::{CatalogDraft, DataSource, IconFile};
use crate::config::SysmeticConfig;
use crate::error::{Result, SysmeticError};
use crate::filters::FilterContext;
use crate::model::{
    AdminStrategyRow, CatalogItem, CatalogKind, InquiryRow, MemberRole, MemberRow,
    MethodAndStock, NoticeRow, QuestionRow, StrategySummary,
};
use crate::screen::ListQuery;
use crate::table::PageResponse;
use async_trait::async_trait;
use reqwest::{multipart, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// Every successful body is wrapped as `{"data": ...}`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Error body shape; servers differ on which field carries the text.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

pub struct HttpSource {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpSource {
    pub fn new(config: &SysmeticConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: &SysmeticConfig, client: Client) -> Self {
        Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and turn any non-2xx status into [`SysmeticError::Api`].
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
        let message = body
            .message
            .or(body.error)
            .unwrap_or_else(|| {
                if text.is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    text
                }
            });
        warn!(status = status.as_u16(), %message, "API request rejected");
        Err(SysmeticError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        debug!(path, ?params, "GET");
        let response = self
            .send(self.request(Method::GET, path).query(params))
            .await?;
        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.data)
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> Result<PageResponse<T>> {
        let mut params = query.params.pairs().to_vec();
        if let Some(sort) = &query.sort {
            params.push(("sort".to_string(), sort.to_string()));
        }
        self.get_data(path, &params).await
    }

    async fn send_json(&self, method: Method, path: &str, body: serde_json::Value) -> Result<()> {
        debug!(%method, path, "mutation");
        self.send(self.request(method, path).json(&body)).await?;
        Ok(())
    }

    fn catalog_form(draft: &CatalogDraft) -> Result<multipart::Form> {
        let mut form = multipart::Form::new().text("name", draft.name.clone());
        if let Some(IconFile {
            file_name,
            bytes,
            mime,
        }) = &draft.icon
        {
            let part = multipart::Part::bytes(bytes.clone())
                .file_name(file_name.clone())
                .mime_str(mime)?;
            form = form.part("file", part);
        }
        Ok(form)
    }
}

fn catalog_path(kind: CatalogKind) -> String {
    format!("/v1/admin/{}", kind.as_str())
}

#[async_trait]
impl DataSource for HttpSource {
    async fn method_and_stock(&self) -> Result<MethodAndStock> {
        self.get_data("/v1/strategy/methodandstock", &[]).await
    }

    async fn search_strategies(&self, query: &ListQuery) -> Result<PageResponse<StrategySummary>> {
        let path = match query.context {
            FilterContext::StrategyAlgorithm => "/v1/strategy/search/algorithm",
            _ => "/v1/strategy/search/conditions",
        };
        self.get_page(path, query).await
    }

    async fn list_catalog(
        &self,
        kind: CatalogKind,
        query: &ListQuery,
    ) -> Result<PageResponse<CatalogItem>> {
        self.get_page(&catalog_path(kind), query).await
    }

    async fn create_catalog_item(&self, kind: CatalogKind, draft: &CatalogDraft) -> Result<()> {
        let form = Self::catalog_form(draft)?;
        self.send(self.request(Method::POST, &catalog_path(kind)).multipart(form))
            .await?;
        Ok(())
    }

    async fn update_catalog_item(
        &self,
        kind: CatalogKind,
        id: i64,
        draft: &CatalogDraft,
    ) -> Result<()> {
        let form = Self::catalog_form(draft)?;
        let path = format!("{}/{}", catalog_path(kind), id);
        self.send(self.request(Method::PUT, &path).multipart(form))
            .await?;
        Ok(())
    }

    async fn delete_catalog_items(&self, kind: CatalogKind, ids: &[i64]) -> Result<()> {
        self.send_json(Method::DELETE, &catalog_path(kind), json!({ "ids": ids }))
            .await
    }

    async fn admin_strategies(&self, query: &ListQuery) -> Result<PageResponse<AdminStrategyRow>> {
        self.get_page("/v1/admin/strategy", query).await
    }

    async fn approve_strategies(&self, ids: &[i64]) -> Result<()> {
        self.send_json(
            Method::POST,
            "/v1/admin/strategy/allow",
            json!({ "strategyId": ids }),
        )
        .await
    }

    async fn reject_strategy(&self, id: i64, reason: &str) -> Result<()> {
        self.send_json(
            Method::POST,
            "/v1/admin/strategy/reject",
            json!({ "strategyId": id, "rejectReason": reason }),
        )
        .await
    }

    async fn members(&self, query: &ListQuery) -> Result<PageResponse<MemberRow>> {
        self.get_page("/v1/admin/members", query).await
    }

    async fn change_member_roles(&self, ids: &[i64], role: MemberRole) -> Result<()> {
        self.send_json(
            Method::PATCH,
            "/v1/admin/members/role",
            json!({ "memberId": ids, "roleCode": role.as_str() }),
        )
        .await
    }

    async fn delete_members(&self, ids: &[i64]) -> Result<()> {
        self.send_json(
            Method::DELETE,
            "/v1/admin/members",
            json!({ "memberId": ids }),
        )
        .await
    }

    async fn notices(&self, query: &ListQuery) -> Result<PageResponse<NoticeRow>> {
        self.get_page("/v1/admin/notice", query).await
    }

    async fn delete_notices(&self, ids: &[i64]) -> Result<()> {
        self.send_json(Method::DELETE, "/v1/admin/notice", json!({ "ids": ids }))
            .await
    }

    async fn toggle_notice_visibility(&self, id: i64) -> Result<()> {
        let path = format!("/v1/admin/notice/{}/open-close", id);
        self.send(self.request(Method::PUT, &path)).await?;
        Ok(())
    }

    async fn inquiries(&self, query: &ListQuery) -> Result<PageResponse<InquiryRow>> {
        self.get_page("/v1/admin/qna", query).await
    }

    async fn delete_inquiries(&self, ids: &[i64]) -> Result<()> {
        self.send_json(Method::DELETE, "/v1/admin/qna", json!({ "ids": ids }))
            .await
    }

    async fn my_strategies(&self, query: &ListQuery) -> Result<PageResponse<StrategySummary>> {
        self.get_page("/v1/member/strategy", query).await
    }

    async fn delete_my_strategies(&self, ids: &[i64]) -> Result<()> {
        self.send_json(
            Method::DELETE,
            "/v1/member/strategy",
            json!({ "strategyIds": ids }),
        )
        .await
    }

    async fn my_questions(&self) -> Result<Vec<QuestionRow>> {
        self.get_data("/v1/member/qna", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_drops_trailing_slash() {
        let config = SysmeticConfig {
            api_url: "https://api.sysmetic.io/".to_string(),
            ..Default::default()
        };
        let source = HttpSource::new(&config).unwrap();
        assert_eq!(source.base_url(), "https://api.sysmetic.io");
    }

    #[test]
    fn catalog_paths_follow_kind() {
        assert_eq!(catalog_path(CatalogKind::Stock), "/v1/admin/stocks");
        assert_eq!(catalog_path(CatalogKind::Method), "/v1/admin/methods");
    }

    #[test]
    fn envelope_unwraps_data() {
        let envelope: Envelope<MethodAndStock> = serde_json::from_str(
            r#"{"data":{"methodList":[{"id":1,"name":"Auto"}],"stockList":[]}}"#,
        )
        .unwrap();
        assert_eq!(envelope.data.method_list[0].name, "Auto");
    }

    #[test]
    fn error_body_accepts_either_field() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"nope"}"#).unwrap();
        assert_eq!(body.message.or(body.error).as_deref(), Some("nope"));
    }

    mod wire {
        use super::*;
        use crate::filters::{ids, FilterRegistry, FilterValue};
        use crate::screen::ListScreen;
        use wiremock::matchers::{body_json, header, method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        fn source_for(server: &MockServer) -> HttpSource {
            let config = SysmeticConfig {
                api_url: server.uri(),
                token: Some("secret".to_string()),
                ..Default::default()
            };
            HttpSource::new(&config).unwrap()
        }

        fn query_for(context: FilterContext, filters: &[(&str, FilterValue)]) -> ListQuery {
            let registry = FilterRegistry::default();
            let mut screen: ListScreen<()> =
                ListScreen::new(context, registry.fields(context), 10);
            for (id, value) in filters {
                screen.set_filter(id, value.clone());
            }
            screen.begin_request()
        }

        fn empty_page() -> serde_json::Value {
            json!({ "data": { "content": [], "totalPages": 0, "totalElement": 0 } })
        }

        #[tokio::test]
        async fn search_sends_repeated_keys_with_bearer_token() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/v1/strategy/search/conditions"))
                .and(header("authorization", "Bearer secret"))
                .and(query_param("page", "0"))
                .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
                .expect(1)
                .mount(&server)
                .await;

            let query = query_for(
                FilterContext::StrategyConditions,
                &[(ids::CYCLE, FilterValue::multi(["D", "P"]))],
            );
            let page = source_for(&server).search_strategies(&query).await.unwrap();
            assert!(page.content.is_empty());

            let requests = server.received_requests().await.unwrap();
            let cycles: Vec<String> = requests[0]
                .url
                .query_pairs()
                .filter(|(k, _)| k == "cycle")
                .map(|(_, v)| v.into_owned())
                .collect();
            assert_eq!(cycles, vec!["D", "P"]);
        }

        #[tokio::test]
        async fn algorithm_tab_uses_its_own_path() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/v1/strategy/search/algorithm"))
                .and(query_param(ids::ALGORITHM, "DEFENSIVE"))
                .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
                .expect(1)
                .mount(&server)
                .await;

            let query = query_for(
                FilterContext::StrategyAlgorithm,
                &[(ids::ALGORITHM, FilterValue::Single("DEFENSIVE".into()))],
            );
            source_for(&server).search_strategies(&query).await.unwrap();
        }

        #[tokio::test]
        async fn catalog_list_unwraps_the_data_envelope() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/v1/admin/stocks"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "data": {
                        "content": [{ "id": 4, "name": "NASDAQ", "filePath": "/icons/4.png" }],
                        "totalPages": 3,
                        "totalElement": 21
                    }
                })))
                .mount(&server)
                .await;

            let query = query_for(FilterContext::Catalog, &[]);
            let page = source_for(&server)
                .list_catalog(CatalogKind::Stock, &query)
                .await
                .unwrap();

            assert_eq!(page.content[0].name, "NASDAQ");
            assert_eq!(page.total_pages, 3);
            assert_eq!(page.total_element, 21);
        }

        #[tokio::test]
        async fn mutations_send_the_expected_bodies() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/v1/admin/strategy/allow"))
                .and(body_json(json!({ "strategyId": [1, 2] })))
                .respond_with(ResponseTemplate::new(200))
                .expect(1)
                .mount(&server)
                .await;
            Mock::given(method("POST"))
                .and(path("/v1/admin/strategy/reject"))
                .and(body_json(json!({ "strategyId": 7, "rejectReason": "too risky" })))
                .respond_with(ResponseTemplate::new(200))
                .expect(1)
                .mount(&server)
                .await;
            Mock::given(method("PATCH"))
                .and(path("/v1/admin/members/role"))
                .and(body_json(json!({ "memberId": [3], "roleCode": "TRADER" })))
                .respond_with(ResponseTemplate::new(200))
                .expect(1)
                .mount(&server)
                .await;
            Mock::given(method("DELETE"))
                .and(path("/v1/member/strategy"))
                .and(body_json(json!({ "strategyIds": [9] })))
                .respond_with(ResponseTemplate::new(200))
                .expect(1)
                .mount(&server)
                .await;
            Mock::given(method("DELETE"))
                .and(path("/v1/admin/notice"))
                .and(body_json(json!({ "ids": [5, 6] })))
                .respond_with(ResponseTemplate::new(200))
                .expect(1)
                .mount(&server)
                .await;
            Mock::given(method("PUT"))
                .and(path("/v1/admin/notice/5/open-close"))
                .respond_with(ResponseTemplate::new(200))
                .expect(1)
                .mount(&server)
                .await;

            let source = source_for(&server);
            source.approve_strategies(&[1, 2]).await.unwrap();
            source.reject_strategy(7, "too risky").await.unwrap();
            source
                .change_member_roles(&[3], MemberRole::Trader)
                .await
                .unwrap();
            source.delete_my_strategies(&[9]).await.unwrap();
            source.delete_notices(&[5, 6]).await.unwrap();
            source.toggle_notice_visibility(5).await.unwrap();
        }

        #[tokio::test]
        async fn rejected_request_carries_server_message() {
            let server = MockServer::start().await;
            Mock::given(method("DELETE"))
                .and(path("/v1/admin/members"))
                .respond_with(
                    ResponseTemplate::new(409)
                        .set_body_json(json!({ "message": "member has open strategies" })),
                )
                .mount(&server)
                .await;

            let err = source_for(&server).delete_members(&[1]).await.unwrap_err();
            match err {
                SysmeticError::Api { status, message } => {
                    assert_eq!(status, 409);
                    assert_eq!(message, "member has open strategies");
                }
                other => panic!("expected an API error, got {:?}", other),
            }
        }

        #[tokio::test]
        async fn empty_error_body_falls_back_to_status_reason() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/v1/member/qna"))
                .respond_with(ResponseTemplate::new(403))
                .mount(&server)
                .await;

            let err = source_for(&server).my_questions().await.unwrap_err();
            assert!(matches!(
                err,
                SysmeticError::Api { status: 403, ref message } if message == "Forbidden"
            ));
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_http_error() {
        let config = SysmeticConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..Default::default()
        };
        let source = HttpSource::new(&config).unwrap();
        let err = source.method_and_stock().await.unwrap_err();
        assert!(matches!(err, SysmeticError::Http(_)));
    }
}
