//! 文本翻译与语种检测
//!
//! # Example
//! ```no_run
//! # async fn run() -> Result<(), gtrans::translate::Error> {
//! use gtrans::translate::Client;
//!
//! let client = Client::builder().build()?;
//! let res = client
//!     .translate()
//!     .text("你好，世界！")
//!     .dest("en")
//!     .build()
//!     .send()
//!     .await?;
//! println!("{}", res.text);
//! # Ok(())
//! # }
//! ```

use crate::language::{LANGUAGES_DOC_URL, LanguageTable};
use crate::token::{KeyPairStore, Token};
use bon::bon;
use gtrans_common::helper::normalize_base_url;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

mod error;
pub use error::Error;

mod trans;
mod types_rs;
mod utils;
pub use types_rs::*;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// 可选的服务地址，未配置`service_urls`时只使用第一个
pub const DEFAULT_SERVICE_URLS: &[&str] = &[
    "translate.google.com",
    "translate.google.ac",
    "translate.google.ad",
    "translate.google.ae",
    "translate.google.at",
    "translate.google.be",
    "translate.google.ca",
    "translate.google.ch",
    "translate.google.cn",
    "translate.google.co.jp",
    "translate.google.co.kr",
    "translate.google.co.uk",
    "translate.google.com.au",
    "translate.google.com.br",
    "translate.google.com.hk",
    "translate.google.com.tw",
    "translate.google.de",
    "translate.google.es",
    "translate.google.fr",
    "translate.google.it",
    "translate.google.nl",
    "translate.google.pl",
    "translate.google.pt",
    "translate.google.ru",
    "translate.google.se",
];

pub struct Client {
    http_client: reqwest::Client,
    base_url: String,
    user_agent: String,
    key_store: KeyPairStore,
    languages: Arc<LanguageTable>,
    languages_url: String,
}

#[bon]
impl Client {
    /// 服务地址和User-Agent在创建时各随机选一个，之后不再变化
    ///
    /// - `service_urls`/`user_agents`为空时使用默认值，地址没有scheme时补`https://`
    /// - `seed`: 固定后同样的配置总是选到同样的地址和User-Agent
    /// - `proxy`: 只接受`http`开头的代理地址，其它的忽略
    /// - `timeout`: 翻译请求和抓取密钥对页面都使用这个超时
    #[builder(on(String, into))]
    pub fn new(
        #[builder(default)] service_urls: Vec<String>,
        #[builder(default)] user_agents: Vec<String>,
        proxy: Option<String>,
        seed: Option<u64>,
        #[builder(default = DEFAULT_TIMEOUT)] timeout: Duration,
        #[builder(default)] accept_invalid_certs: bool,
        #[builder(default)] languages: LanguageTable,
        #[builder(default = LANGUAGES_DOC_URL.to_owned())] languages_url: String,
        key_max_age: Option<Duration>,
    ) -> Result<Self, Error> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let host = choose_or(&mut rng, &service_urls, DEFAULT_SERVICE_URLS[0]);
        let user_agent = choose_or(&mut rng, &user_agents, DEFAULT_USER_AGENT);
        let base_url = normalize_base_url(&host);

        let mut builder = reqwest::Client::builder()
            .user_agent(user_agent.as_str())
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs);
        match proxy {
            Some(proxy) if proxy.starts_with("http") => {
                builder = builder.proxy(reqwest::Proxy::all(proxy.as_str())?);
            }
            Some(proxy) => warn!(%proxy, "proxy ignored, only http(s) proxies are supported"),
            None => {}
        }
        let http_client = builder.build()?;

        let key_store = KeyPairStore::builder()
            .http_client(http_client.clone())
            .page_url(format!("{}/", base_url))
            .maybe_max_age(key_max_age)
            .build();

        Ok(Self {
            http_client,
            base_url,
            user_agent,
            key_store,
            languages: Arc::new(languages),
            languages_url,
        })
    }
}

fn choose_or(rng: &mut StdRng, candidates: &[String], default: &str) -> String {
    candidates
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| default.to_owned())
}

impl Client {
    /// 翻译文本，`src`为`auto`时自动识别源语种
    pub fn translate(&self) -> TranslateBuilder<'_> {
        Translate::builder(self)
    }

    pub fn detect_language(&self) -> DetectLanguageBuilder<'_> {
        DetectLanguage::builder(self)
    }

    /// 计算`text`的`tk`参数
    pub async fn token(&self, text: &str) -> Token {
        self.key_store.derive(text).await
    }

    /// 可以手动刷新或清空密钥对缓存
    pub fn key_pair_store(&self) -> &KeyPairStore {
        &self.key_store
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn languages(&self) -> &LanguageTable {
        &self.languages
    }

    /// 查找语种代码，见[`LanguageTable::valid_key`]
    pub fn valid_language_key(&self, lang: &str) -> Result<&str, Error> {
        self.languages.valid_key(lang)
    }

    /// 使用新的语种表，密钥对缓存等其它状态保持不变
    pub fn with_languages(self, languages: LanguageTable) -> Self {
        Self {
            languages: Arc::new(languages),
            ..self
        }
    }
}
