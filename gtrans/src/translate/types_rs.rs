use crate::language::DEFAULT_LANGUAGE;
use crate::translate::Client;
use bon::Builder;
use serde::Deserialize;

// region    --- translate
#[derive(Builder)]
pub struct Translate<'a> {
    #[builder(start_fn)]
    pub(crate) client: &'a Client,
    pub(crate) text: &'a str,
    /// 源语种，默认`auto`
    #[builder(default = DEFAULT_LANGUAGE)]
    pub(crate) src: &'a str,
    pub(crate) dest: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Translated {
    /// 请求的源语种
    pub src: String,
    pub dest: String,
    pub origin: String,
    /// 所有句子的译文拼接
    pub text: String,
    /// 接口识别出的源语种
    pub detected: Option<String>,
}
// endregion --- translate

// region    --- detect language
#[derive(Builder)]
pub struct DetectLanguage<'a> {
    #[builder(start_fn)]
    pub(crate) client: &'a Client,
    pub(crate) text: &'a str,
    #[builder(default = DEFAULT_LANGUAGE)]
    pub(crate) dest: &'a str,
}
// endregion --- detect language

// region    --- response
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Sentence {
    // 音译等条目没有trans/orig
    #[serde(default)]
    pub trans: String,
    #[serde(default)]
    pub orig: String,
    #[serde(default)]
    pub backend: i32,
}

/// `translate_a/single`在`dj=1`时的响应
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct LdResponse {
    #[serde(default)]
    pub sentences: Vec<Sentence>,
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub spell: Option<serde_json::Value>,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub ld_result: LdResult,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct LdResult {
    #[serde(default)]
    pub srclangs: Vec<String>,
    #[serde(default)]
    pub srclangs_confidences: Vec<f64>,
    #[serde(default)]
    pub extended_srclangs: Vec<String>,
}

impl LdResponse {
    pub(crate) fn joined_trans(&self) -> String {
        self.sentences.iter().map(|s| s.trans.as_str()).collect()
    }
}
// endregion --- response
