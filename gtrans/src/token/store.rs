use super::{KeyPair, KeyPairError, Token, derive};
use bon::bon;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// 网页中密钥对赋值语句的变量名，即`tkk:'<int>.<int>'`
pub const DEFAULT_KEY_NAME: &str = "tkk";
/// 合成密钥对的缓存时间，过期后下次`current`会重新抓取网页
pub const DEFAULT_FALLBACK_RETRY: Duration = Duration::from_secs(60);

static KEY_PAIR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z_$][A-Za-z0-9_$]*)\s*:\s*'(-?\d+)\.(-?\d+)'").unwrap()
});

/// 从网页内容中找出`<key_name>:'<int>.<int>'`并解析
pub fn parse_key_pair(body: &str, key_name: &str) -> Result<KeyPair, KeyPairError> {
    let caps = KEY_PAIR_PATTERN
        .captures_iter(body)
        .find(|caps| &caps[1] == key_name)
        .ok_or_else(|| {
            KeyPairError::Parse(format!("`{}:'<int>.<int>'` not found in page", key_name))
        })?;
    format!("{}.{}", &caps[2], &caps[3]).parse()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPairSource {
    /// 从网页解析得到
    Page,
    /// 抓取或解析失败，按小时计数生成
    Fallback,
    /// 调用者通过[`KeyPairStore::replace`]设置
    Manual,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyPairCache {
    pub pair: KeyPair,
    pub obtained_at: OffsetDateTime,
    pub source: KeyPairSource,
}

/// 密钥对的获取与缓存
///
/// 第一次使用时才抓取网页，之后一直复用缓存，直到调用`refresh`/`invalidate`/`replace`，
/// 或者超过了`max_age`(网页来源)/`fallback_retry`(合成来源)。
/// 缓存由一个异步锁保护，刷新期间的并发调用会等待同一次抓取的结果。
pub struct KeyPairStore {
    http_client: reqwest::Client,
    page_url: String,
    key_name: String,
    max_age: Option<Duration>,
    fallback_retry: Duration,
    cache: Mutex<Option<KeyPairCache>>,
}

#[bon]
impl KeyPairStore {
    #[builder(on(String, into))]
    pub fn new(
        // 超时等传输设置都来自这个client
        http_client: reqwest::Client,
        page_url: String,
        #[builder(default = DEFAULT_KEY_NAME.to_owned())] key_name: String,
        max_age: Option<Duration>,
        #[builder(default = DEFAULT_FALLBACK_RETRY)] fallback_retry: Duration,
    ) -> Self {
        Self {
            http_client,
            page_url,
            key_name,
            max_age,
            fallback_retry,
            cache: Mutex::new(None),
        }
    }
}

impl KeyPairStore {
    pub fn page_url(&self) -> &str {
        &self.page_url
    }

    /// 当前可用的密钥对，需要时会抓取网页
    ///
    /// 不会返回错误：抓取或解析失败时使用[`KeyPair::synthetic`]。
    pub async fn current(&self) -> KeyPair {
        let mut cache = self.cache.lock().await;
        let now = OffsetDateTime::now_utc();
        if let Some(entry) = cache.as_ref().filter(|entry| self.is_fresh(entry, now)) {
            return entry.pair;
        }

        let entry = self.load().await;
        *cache = Some(entry);
        entry.pair
    }

    /// 计算`text`的令牌
    pub async fn derive(&self, text: &str) -> Token {
        derive(text, self.current().await)
    }

    /// 忽略缓存，立即重新抓取
    pub async fn refresh(&self) -> KeyPairCache {
        let mut cache = self.cache.lock().await;
        let entry = self.load().await;
        *cache = Some(entry);
        entry
    }

    /// 清空缓存，下次`current`时重新抓取
    pub async fn invalidate(&self) {
        self.cache.lock().await.take();
    }

    /// 使用调用者提供的密钥对，它不会过期
    pub async fn replace(&self, pair: KeyPair) {
        *self.cache.lock().await = Some(KeyPairCache {
            pair,
            obtained_at: OffsetDateTime::now_utc(),
            source: KeyPairSource::Manual,
        });
    }

    pub async fn cached(&self) -> Option<KeyPairCache> {
        *self.cache.lock().await
    }

    /// 抓取网页并解析密钥对，不读写缓存
    pub async fn fetch(&self) -> Result<KeyPair, KeyPairError> {
        let resp = self.http_client.get(&self.page_url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(KeyPairError::Status(status));
        }

        let body = resp.text().await?;
        parse_key_pair(&body, &self.key_name)
    }

    async fn load(&self) -> KeyPairCache {
        let obtained_at = OffsetDateTime::now_utc();
        match self.fetch().await {
            Ok(pair) => {
                debug!(page_url = %self.page_url, %pair, "key pair fetched");
                KeyPairCache {
                    pair,
                    obtained_at,
                    source: KeyPairSource::Page,
                }
            }
            Err(e) => {
                let pair = KeyPair::synthetic(obtained_at);
                warn!(
                    page_url = %self.page_url,
                    error = %e,
                    %pair,
                    "key pair unavailable, using hour-based fallback"
                );
                KeyPairCache {
                    pair,
                    obtained_at,
                    source: KeyPairSource::Fallback,
                }
            }
        }
    }

    fn is_fresh(&self, entry: &KeyPairCache, now: OffsetDateTime) -> bool {
        let limit = match entry.source {
            KeyPairSource::Page => self.max_age,
            KeyPairSource::Fallback => Some(self.fallback_retry),
            KeyPairSource::Manual => None,
        };
        limit.is_none_or(|limit| now - entry.obtained_at < limit)
    }
}
