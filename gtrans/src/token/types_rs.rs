use super::KeyPairError;
use gtrans_common::helper::hour_bucket;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use time::OffsetDateTime;

/// 网页里嵌入的密钥对`(a, b)`
///
/// `a`(seed)是计算的初始值，`b`(mask)大约每小时变化一次，在计算的最后一步用来异或。
/// 两个值总是一起创建，创建后不可修改。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyPair {
    seed: i64,
    mask: i64,
}

impl KeyPair {
    pub const fn new(seed: i64, mask: i64) -> Self {
        Self { seed, mask }
    }

    /// 网页上的密钥对不可用时的替代值：两个字段都是当前的小时计数
    ///
    /// 服务端大概率会拒绝用它算出来的令牌，但至少能生成格式合法的请求。
    pub fn synthetic(now: OffsetDateTime) -> Self {
        let hour = hour_bucket(now);
        Self::new(hour, hour)
    }

    pub const fn seed(&self) -> i64 {
        self.seed
    }

    pub const fn mask(&self) -> i64 {
        self.mask
    }

    // 只取低32位参与运算
    pub(crate) const fn seed_bits(&self) -> u32 {
        self.seed as u32
    }

    pub(crate) const fn mask_bits(&self) -> u32 {
        self.mask as u32
    }
}

impl Display for KeyPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.seed, self.mask)
    }
}

/// 解析`"<int>.<int>"`
impl FromStr for KeyPair {
    type Err = KeyPairError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (seed, mask) = s
            .split_once('.')
            .ok_or_else(|| KeyPairError::Parse(format!("missing '.' in `{}`", s)))?;
        let parse = |part: &str| {
            part.parse::<i64>()
                .map_err(|e| KeyPairError::Parse(format!("invalid integer `{}`: {}", part, e)))
        };
        Ok(Self::new(parse(seed)?, parse(mask)?))
    }
}

/// 请求参数`tk`的值，形如`"<value>.<check>"`
///
/// `value`在`[0, 1_000_000)`之间，`check = value ^ seed`。只在一次请求中使用。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    value: u32,
    check: u32,
}

impl Token {
    pub(crate) const fn new(value: u32, check: u32) -> Self {
        Self { value, check }
    }

    pub const fn value(&self) -> u32 {
        self.value
    }

    pub const fn check(&self) -> u32 {
        self.check
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.value, self.check)
    }
}
