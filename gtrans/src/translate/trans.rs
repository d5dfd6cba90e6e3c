use super::utils::build_params;
use super::types_rs::*;
use super::{Client, Error};
use crate::language::{LanguageTable, parse_languages_page};
use gtrans_common::helper::{parse_json_response, read_text_response};

impl Client {
    /// 请求`translate_a/single`，令牌由密钥对缓存计算
    ///
    /// 令牌被拒绝和服务不可用都表现为非2xx响应，无法区分
    pub(crate) async fn single(
        &self,
        text: &str,
        src: &str,
        dest: &str,
    ) -> Result<LdResponse, Error> {
        let token = self.key_store.derive(text).await.to_string();
        let resp = self
            .http_client
            .get(format!("{}/translate_a/single", self.base_url))
            .query(&build_params(text, src, dest, &token))
            .send()
            .await?;

        let res = parse_json_response(resp).await?;
        Ok(res)
    }

    /// 从公开文档页获取语种列表，返回与当前语种表合并后的新表
    ///
    /// 当前client不受影响，需要时通过[`Client::with_languages`]使用新表
    pub async fn fetch_languages(&self) -> Result<LanguageTable, Error> {
        let resp = self.http_client.get(&self.languages_url).send().await?;
        let html = read_text_response(resp).await?;
        let fetched = parse_languages_page(&html)?;
        Ok(self.languages.merged(&fetched))
    }
}

impl Translate<'_> {
    pub async fn send(&self) -> Result<Translated, Error> {
        let src = self.src.to_lowercase();
        let dest = self.dest.to_lowercase();
        let res = self.client.single(self.text, &src, &dest).await?;

        let detected = (!res.src.is_empty()).then(|| res.src.clone());
        Ok(Translated {
            text: res.joined_trans(),
            src,
            dest,
            origin: self.text.to_owned(),
            detected,
        })
    }
}

impl DetectLanguage<'_> {
    /// `dest`为`auto`时只识别语种
    pub async fn send(&self) -> Result<LdResponse, Error> {
        let dest = self.dest.to_lowercase();
        self.client.single(self.text, "auto", &dest).await
    }
}
