//! HTTP 请求方法

use serde::Serialize;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::types::Envelope;

use super::{HttpServerGateway, SERVER_RESOURCE};

impl HttpServerGateway {
    fn url(&self, path: &str) -> String {
        format!("{}{SERVER_RESOURCE}{path}", self.base_url)
    }

    /// 执行 GET 请求
    pub(crate) async fn get_envelope(&self, path: &str) -> Result<Envelope> {
        let url = self.url(path);
        let (status, body) =
            HttpUtils::execute_request(self.client.get(&url), "GET", &url).await?;
        HttpUtils::parse_envelope(status, &body)
    }

    /// 执行 POST 请求 (JSON body)
    pub(crate) async fn post_envelope<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope> {
        let url = self.url(path);
        let (status, text) =
            HttpUtils::execute_request(self.client.post(&url).json(body), "POST", &url).await?;
        HttpUtils::parse_envelope(status, &text)
    }

    /// 执行 DELETE 请求
    pub(crate) async fn delete_envelope(&self, path: &str) -> Result<Envelope> {
        let url = self.url(path);
        let (status, body) =
            HttpUtils::execute_request(self.client.delete(&url), "DELETE", &url).await?;
        HttpUtils::parse_envelope(status, &body)
    }
}
