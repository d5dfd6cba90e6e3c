/// 翻译接口的查询参数，其中固定参数来自浏览器翻译插件
pub(crate) fn build_params<'a>(
    text: &'a str,
    src: &'a str,
    dest: &'a str,
    token: &'a str,
) -> Vec<(&'static str, &'a str)> {
    vec![
        ("client", "gtx"),
        ("sl", src),
        ("tl", dest),
        ("hl", dest),
        ("tk", token),
        ("q", text),
        ("dt", "t"),
        ("dt", "bd"),
        ("dj", "1"),
        ("source", "popup"),
    ]
}
