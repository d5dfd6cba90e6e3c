use crate::Error;
use time::OffsetDateTime;

/// 以小时为粒度的时间计数，即 `floor(unix秒 / 3600)`
///
/// eg: 2025-11-13T13:31:09Z -> 489733
pub fn hour_bucket(date_time: OffsetDateTime) -> i64 {
    date_time.unix_timestamp().div_euclid(3600)
}

/// 把配置里的服务地址规范为不带结尾`/`的base url，没有scheme时补上`https://`
///
/// eg: `translate.google.com` -> `https://translate.google.com`
pub fn normalize_base_url(service_url: &str) -> String {
    let trimmed = service_url.trim().trim_end_matches('/');
    if trimmed.contains("://") {
        trimmed.to_owned()
    } else {
        format!("https://{}", trimmed)
    }
}

pub async fn into_request_failed_error(resp: reqwest::Response) -> Error {
    let status = resp.status();
    let body = resp.text().await;
    match body {
        Ok(message) => Error::RequestAPIFailed {
            status: status.to_string(),
            message,
        },
        Err(e) => Error::Reqwest(e),
    }
}

pub async fn parse_json_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, Error> {
    let status = resp.status();

    if !status.is_success() {
        return Err(into_request_failed_error(resp).await);
    }

    let text = resp.text().await?;
    let data = serde_json::from_str(&text)
        .map_err(|e| Error::Common(format!("JSON parse error: {}", e)))?;
    Ok(data)
}

/// 只要求2xx，返回原始文本，用于抓取html页面
pub async fn read_text_response(resp: reqwest::Response) -> Result<String, Error> {
    if !resp.status().is_success() {
        return Err(into_request_failed_error(resp).await);
    }
    Ok(resp.text().await?)
}
