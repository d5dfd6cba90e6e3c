//! 语种代码表
//!
//! [`LanguageTable`]是不可变的快照。需要更新时用[`LanguageTable::merged`]或
//! [`Client::fetch_languages`](crate::translate::Client::fetch_languages)得到新表，再交给client使用。

mod defaults;
mod docs;
pub use docs::{LANGUAGES_DOC_URL, parse_languages_page};

use crate::translate::Error;
use std::collections::BTreeMap;

/// 自动识别源语种
pub const DEFAULT_LANGUAGE: &str = "auto";

/// 语种代码 -> 语种名称(小写)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageTable {
    entries: BTreeMap<String, String>,
}

impl Default for LanguageTable {
    fn default() -> Self {
        defaults::LANGUAGES.iter().copied().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LanguageTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(code, name)| (code.into().to_lowercase(), name.into().to_lowercase()))
            .collect();
        Self { entries }
    }
}

impl LanguageTable {
    /// 查找语种代码，`lang`可以是代码(`en`)或名称(`english`)，不区分大小写
    pub fn valid_key(&self, lang: &str) -> Result<&str, Error> {
        let lang = lang.to_lowercase();
        self.entries
            .iter()
            .find(|(code, name)| **code == lang || **name == lang)
            .map(|(code, _)| code.as_str())
            .ok_or(Error::InvalidLanguage(lang))
    }

    pub fn name(&self, code: &str) -> Option<&str> {
        self.entries.get(&code.to_lowercase()).map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(&code.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(code, name)| (code.as_str(), name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 返回合并后的新表，`other`中的条目覆盖同名代码
    pub fn merged(&self, other: &LanguageTable) -> LanguageTable {
        let mut entries = self.entries.clone();
        entries.extend(other.entries.clone());
        LanguageTable { entries }
    }
}
