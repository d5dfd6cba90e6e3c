//! `tk`令牌计算
//!
//! 翻译接口要求每个请求带上`tk`参数，它由请求文本和网页里嵌入的密钥对(key pair)在本地计算得到。
//!
//! - [`KeyPairStore`]: 从网页抓取并缓存密钥对，抓取或解析失败时退回到按小时计数生成的合成密钥对
//! - [`derive`]: 纯函数，`(text, key pair) -> Token`
//!
//! # Example
//! ```
//! use gtrans::token::{KeyPair, derive};
//!
//! let pair = KeyPair::new(406398, 2087938574);
//! assert_eq!(derive("hello", pair).to_string(), "338590.203232");
//! ```

mod error;
pub use error::KeyPairError;

mod store;
pub use store::{
    DEFAULT_FALLBACK_RETRY, DEFAULT_KEY_NAME, KeyPairCache, KeyPairSource, KeyPairStore,
    KeyPairStoreBuilder, parse_key_pair,
};

mod transform;
pub use transform::derive;

mod types_rs;
pub use types_rs::*;
