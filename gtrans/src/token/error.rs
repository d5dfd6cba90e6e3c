use reqwest::StatusCode;

/// 获取密钥对失败的原因
///
/// 只会由[`KeyPairStore::fetch`](super::KeyPairStore::fetch)返回，
/// `current`/`derive`会吸收这些错误并改用合成密钥对。
#[derive(thiserror::Error, Debug)]
pub enum KeyPairError {
    #[error("fetch key pair page failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("fetch key pair page failed, status: {0}")]
    Status(StatusCode),
    #[error("parse key pair failed: {0}")]
    Parse(String),
}

impl KeyPairError {
    /// 网络错误或非2xx
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_) | Self::Status(_))
    }

    /// 页面拿到了，但找不到或解析不了密钥对
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}
