use super::LanguageTable;
use crate::translate::Error;
use regex::Regex;
use std::sync::LazyLock;

/// 公开的语种列表文档页
pub const LANGUAGES_DOC_URL: &str = "https://cloud.google.com/translate/docs/languages";

static CELL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<td[^>]*>(.*?)</td>").unwrap());
static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<code[^>]*>(.*?)</code>").unwrap());
static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// 解析文档页`<tbody>`中的每一行：第一个`<td>`是名称，`<code>`是代码
pub fn parse_languages_page(html: &str) -> Result<LanguageTable, Error> {
    let table = section(html, "<table", "</table>")
        .ok_or_else(|| Error::Common("languages table not found in page".to_owned()))?;
    let tbody = section(table, "<tbody", "</tbody>")
        .ok_or_else(|| Error::Common("languages table has no tbody".to_owned()))?;

    let languages: LanguageTable = tbody.split("<tr").filter_map(parse_row).collect();
    if languages.is_empty() {
        return Err(Error::Common("no language rows found in page".to_owned()));
    }
    Ok(languages)
}

fn section<'a>(html: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let start = html.find(open)?;
    let end = start + html[start..].find(close)?;
    Some(&html[start..end])
}

fn parse_row(row: &str) -> Option<(String, String)> {
    let name = CELL_PATTERN.captures(row)?.get(1)?.as_str();
    let name = TAG_PATTERN.replace_all(name, "").trim().to_owned();
    let code = CODE_PATTERN.captures(row)?.get(1)?.as_str().trim().to_owned();
    if name.is_empty() || code.is_empty() {
        return None;
    }
    Some((code, name))
}
